//! Marking the current navigation entry as active inside a partial.
//!
//! The rewrite works on raw markup with a handful of patterns built from a
//! fixed table of the site's navigation. A pattern that finds nothing leaves
//! the text untouched. Callers only see the [`Rewriter`] trait, so the text
//! surgery can be replaced by a tree-based rewrite later.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::params::Params;

/// The parameter that selects the active navigation entry.
pub const ACTIVE_NAV: &str = "activeNav";

const LINK_CLASS: &str = r#"class="nav__link""#;
const LINK_CLASS_ACTIVE: &str = r#"class="nav__link nav__link--active""#;
const TRIGGER_CLASS: &str = r#"class="nav__dropdown-trigger""#;
const TRIGGER_CLASS_ACTIVE: &str = r#"class="nav__dropdown-trigger nav__dropdown-trigger--active""#;

/// How a navigation entry is located in the markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// A `nav__link` element whose tag also carries the selector.
    Link,
    /// The dropdown trigger button whose label starts with the selector.
    Dropdown,
    /// The trigger button of the mega dropdown whose class is the selector.
    Mega,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavTarget {
    pub key: &'static str,
    pub selector: &'static str,
    pub strategy: Strategy,
}

/// Every value `activeNav` understands.
pub const NAV_TABLE: &[NavTarget] = &[
    NavTarget { key: "home", selector: r#"href="/""#, strategy: Strategy::Link },
    NavTarget { key: "problems", selector: "Your Problems", strategy: Strategy::Dropdown },
    NavTarget { key: "solutions", selector: "Our Solutions", strategy: Strategy::Dropdown },
    NavTarget { key: "results", selector: r#"href="/results/""#, strategy: Strategy::Link },
    NavTarget { key: "insights", selector: "nav__mega-dropdown", strategy: Strategy::Mega },
    NavTarget { key: "schedule", selector: r#"href="/schedule/""#, strategy: Strategy::Link },
];

impl NavTarget {
    fn pattern(&self) -> String {
        let selector = regex::escape(self.selector);
        match self.strategy {
            // Class first, then selector first. Alternation keeps this a
            // single pass, so a tag is never rewritten twice.
            Strategy::Link => {
                let class = regex::escape(LINK_CLASS);
                format!("{class}[^>]*{selector}|{selector}[^>]*{class}")
            }
            Strategy::Dropdown => {
                format!(r"<button {}[^>]*>\s*{selector}", regex::escape(TRIGGER_CLASS))
            }
            Strategy::Mega => {
                format!(
                    r#"<div class="{selector}">\s*<button {}"#,
                    regex::escape(TRIGGER_CLASS)
                )
            }
        }
    }
}

struct Rule {
    target: &'static NavTarget,
    pattern: Regex,
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    NAV_TABLE
        .iter()
        .map(|target| Rule {
            target,
            pattern: Regex::new(&target.pattern()).expect("valid navigation pattern"),
        })
        .collect()
});

/// Post-processing applied to a partial before it is inlined.
pub trait Rewriter {
    fn rewrite<'a>(&self, text: &'a str, params: &Params) -> Cow<'a, str>;
}

impl<R: Rewriter + ?Sized> Rewriter for &R {
    fn rewrite<'a>(&self, text: &'a str, params: &Params) -> Cow<'a, str> {
        (**self).rewrite(text, params)
    }
}

/// Rewrites driven by `activeNav` and [`NAV_TABLE`].
#[derive(Debug, Default, Clone, Copy)]
pub struct NavRewriter;

impl Rewriter for NavRewriter {
    fn rewrite<'a>(&self, text: &'a str, params: &Params) -> Cow<'a, str> {
        let Some(value) = params.get(ACTIVE_NAV) else {
            return Cow::Borrowed(text);
        };
        match RULES.iter().find(|rule| rule.target.key == value) {
            Some(rule) => mark_active(text, rule),
            None => Cow::Borrowed(text),
        }
    }
}

fn mark_active<'a>(text: &'a str, rule: &Rule) -> Cow<'a, str> {
    match rule.target.strategy {
        // Desktop and mobile menus both carry the link.
        Strategy::Link => rule.pattern.replace_all(text, |caps: &Captures| {
            caps[0].replacen(LINK_CLASS, LINK_CLASS_ACTIVE, 1)
        }),
        Strategy::Dropdown | Strategy::Mega => rule.pattern.replace(text, |caps: &Captures| {
            caps[0].replacen(TRIGGER_CLASS, TRIGGER_CLASS_ACTIVE, 1)
        }),
    }
}
