use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// Flat `key -> value` arguments of one placeholder.
pub type Params = HashMap<String, String>;

static PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z0-9_]+)="([^"]*)""#).expect("valid parameter regex"));

/// Parse `key="value"` pairs from a placeholder's argument text.
///
/// Pairs are read left to right and a repeated key keeps its last value.
/// Anything that is not a complete pair is skipped.
pub fn parse_params(args: &str) -> Params {
    PARAM
        .captures_iter(args)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}
