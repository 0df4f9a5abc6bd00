//! Rewrite configuration.

/// Knobs for one traversal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Prefix of minted temp names; must start an identifier.
    pub temp_prefix: String,
    /// Reserve every identifier of the input tree up front. When off, only
    /// the matched subtree and the template are avoided on each application.
    pub reserve_input_names: bool,
    /// Downgraded rule failures beyond this count are still recorded but no
    /// longer logged.
    pub max_failures_logged: usize,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            temp_prefix: "_".to_owned(),
            reserve_input_names: true,
            max_failures_logged: 16,
        }
    }
}
