//! Rewrite rules and the validated rule table.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::matcher::CaptureMap;
use crate::pattern::NodePattern;
use crate::RuleError;

type TemplateFn = dyn Fn(&CaptureMap<'_>) -> String + Send + Sync;

/// Replacement source text.
#[derive(Clone)]
pub enum Template {
    /// Fixed text.
    Text(String),
    /// Text computed from the captures of the match, for templates whose
    /// shape depends on which optional parts matched.
    Computed(Arc<TemplateFn>),
}

impl Template {
    pub fn text(text: impl Into<String>) -> Self {
        Template::Text(text.into())
    }

    pub fn computed(f: impl Fn(&CaptureMap<'_>) -> String + Send + Sync + 'static) -> Self {
        Template::Computed(Arc::new(f))
    }

    pub fn realize(&self, captures: &CaptureMap<'_>) -> Cow<'_, str> {
        match self {
            Template::Text(text) => Cow::Borrowed(text),
            Template::Computed(f) => Cow::Owned(f(captures)),
        }
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Template::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// A captured subtree spliced into the template.
///
/// `retarget` pairs a parameter capture with a temp: every reference to the
/// captured parameter inside the spliced subtree is renamed to that temp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Splice {
    pub capture: String,
    pub retarget: Vec<(String, String)>,
}

/// One rewrite: when `pattern` matches, replace the node with the
/// instantiated `template`.
#[derive(Clone, Debug)]
pub struct Rule {
    name: String,
    pattern: NodePattern,
    template: Template,
    temps: Vec<String>,
    splices: Vec<Splice>,
}

impl Rule {
    pub fn new(name: impl Into<String>, pattern: NodePattern, template: Template) -> Self {
        Rule {
            name: name.into(),
            pattern,
            template,
            temps: Vec::new(),
            splices: Vec::new(),
        }
    }

    /// Template identifiers that are renamed to fresh temps on each
    /// application.
    #[must_use]
    pub fn temps(mut self, names: &[&str]) -> Self {
        self.temps.extend(names.iter().map(|n| (*n).to_owned()));
        self
    }

    /// Splice `capture` into the template, retargeting parameter captures
    /// onto temps.
    #[must_use]
    pub fn splice(mut self, capture: &str, retarget: &[(&str, &str)]) -> Self {
        self.splices.push(Splice {
            capture: capture.to_owned(),
            retarget: retarget
                .iter()
                .map(|&(param, temp)| (param.to_owned(), temp.to_owned()))
                .collect(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &NodePattern {
        &self.pattern
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn temp_names(&self) -> &[String] {
        &self.temps
    }

    pub fn splices(&self) -> &[Splice] {
        &self.splices
    }

    fn validate(&self) -> Result<(), RuleError> {
        let mut temps = FxHashSet::default();
        for temp in &self.temps {
            if !temps.insert(temp.as_str()) {
                return Err(RuleError::DuplicateTemp {
                    rule: self.name.clone(),
                    temp: temp.clone(),
                });
            }
        }

        let captures = self.pattern.capture_names();
        let unknown_capture = |capture: &str| RuleError::UnknownCapture {
            rule: self.name.clone(),
            capture: capture.to_owned(),
        };

        let mut spliced = FxHashSet::default();
        for splice in &self.splices {
            if !captures.contains(&splice.capture.as_str()) {
                return Err(unknown_capture(&splice.capture));
            }
            if !spliced.insert(splice.capture.as_str()) {
                return Err(RuleError::DuplicateSplice {
                    rule: self.name.clone(),
                    capture: splice.capture.clone(),
                });
            }
            for (param, temp) in &splice.retarget {
                if !captures.contains(&param.as_str()) {
                    return Err(unknown_capture(param));
                }
                if !temps.contains(temp.as_str()) {
                    return Err(RuleError::UnknownTemp {
                        rule: self.name.clone(),
                        capture: param.clone(),
                        temp: temp.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Ordered, validated rule catalog.
///
/// Rules are tried in the order given; declaration order alone decides which
/// of several matching rules applies.
#[derive(Clone, Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RuleError> {
        let mut names = FxHashSet::default();
        for rule in &rules {
            if !names.insert(rule.name()) {
                return Err(RuleError::DuplicateRule(rule.name.clone()));
            }
            rule.validate()?;
        }
        Ok(RuleTable { rules })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(Rule::name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<'t> IntoIterator for &'t RuleTable {
    type Item = &'t Rule;
    type IntoIter = std::slice::Iter<'t, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
