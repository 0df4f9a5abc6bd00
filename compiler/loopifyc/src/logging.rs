//! Tracing subscriber setup.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable selecting the hierarchical tree layout.
pub const TREE_VAR: &str = "LOOPIFY_LOG_TREE";

/// Install a subscriber filtered by `RUST_LOG`.
///
/// Nothing is installed unless `RUST_LOG` is set. With `LOOPIFY_LOG_TREE` set
/// as well, spans are drawn as an indented tree instead of flat lines.
pub fn init() {
    if std::env::var("RUST_LOG").is_err() {
        return;
    }
    let filter = EnvFilter::from_default_env();
    if std::env::var_os(TREE_VAR).is_some() {
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    }
}
