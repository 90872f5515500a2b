use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::params::parse_params;
use crate::partials::PartialStore;
use crate::rewrite::Rewriter;

/// `{{> name key="value" }}`. Arguments run up to the first `}}`.
///
/// The name is everything up to whitespace or `}`, so `{{> nav-mobile }}`
/// looks up `nav-mobile` rather than inlining `nav`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{\{>\s*([^\s}]+)(.*?)\}\}").expect("valid placeholder regex")
});

/// A content problem found while expanding a page. Never fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    PartialNotFound { name: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::PartialNotFound { name } => write!(f, "Partial \"{name}\" not found"),
        }
    }
}

/// Expanded page text and whatever went wrong along the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    pub text: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Expander<'a, R> {
    partials: &'a PartialStore,
    rewriter: R,
}

impl<'a, R: Rewriter> Expander<'a, R> {
    pub fn new(partials: &'a PartialStore, rewriter: R) -> Self {
        Self { partials, rewriter }
    }

    /// Replace every placeholder in `page` with its rewritten partial.
    ///
    /// Unknown names stay in the text as written and produce a
    /// [`Diagnostic`]. Inlined partials are not scanned again.
    pub fn expand(&self, page: &str) -> Expansion {
        let mut diagnostics = Vec::new();

        let text = PLACEHOLDER.replace_all(page, |caps: &Captures| {
            let name = &caps[1];
            match self.partials.get(name) {
                Some(partial) => {
                    let params = parse_params(&caps[2]);
                    self.rewriter.rewrite(partial, &params).into_owned()
                }
                None => {
                    diagnostics.push(Diagnostic::PartialNotFound { name: name.to_string() });
                    caps[0].to_string()
                }
            }
        });

        Expansion {
            text: text.into_owned(),
            diagnostics,
        }
    }
}
