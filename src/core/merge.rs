//! Per-field merging of build overrides onto goal defaults.
//!
//! Every field is merged independently: a value supplied on the build wins
//! outright, otherwise the goal-level default is used. Nothing is merged
//! key-by-key; in particular a build's `buildVars` replaces the goal's
//! variables entirely.

use std::collections::BTreeMap;

/// Take the override when present, else a copy of the default.
pub fn override_or_default<T: Clone>(value: Option<&T>, default: &T) -> T {
    value.unwrap_or(default).clone()
}

pub fn merge_build_type(value: Option<&String>, default: &String) -> String {
    override_or_default(value, default)
}

/// Build variables are replaced wholesale, never unioned.
pub fn merge_vars(
    value: Option<&BTreeMap<String, String>>,
    default: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    override_or_default(value, default)
}

pub fn merge_target(value: Option<&String>, default: &String) -> String {
    override_or_default(value, default)
}

pub fn merge_description(value: Option<&String>, default: &String) -> String {
    override_or_default(value, default)
}

pub fn merge_artifacts(value: Option<&Vec<String>>, default: &Vec<String>) -> Vec<String> {
    override_or_default(value, default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_override_or_default() {
        assert_eq!(override_or_default(Some(&1), &2), 1);
        assert_eq!(override_or_default(None, &2), 2);
    }

    #[test]
    fn test_vars_replaced_wholesale() {
        let goal = vars(&[("X", "1")]);
        let build = vars(&[("Y", "2")]);
        assert_eq!(merge_vars(Some(&build), &goal), vars(&[("Y", "2")]));
        assert_eq!(merge_vars(None, &goal), vars(&[("X", "1")]));
    }

    #[test]
    fn test_empty_override_still_wins() {
        let goal = vars(&[("X", "1")]);
        assert!(merge_vars(Some(&BTreeMap::new()), &goal).is_empty());
        assert!(merge_artifacts(Some(&Vec::new()), &vec!["a".to_string()]).is_empty());
    }

    #[test]
    fn test_scalar_fields() {
        let release = "release".to_string();
        let debug = "debug".to_string();
        assert_eq!(merge_build_type(Some(&debug), &release), "debug");
        assert_eq!(merge_build_type(None, &release), "release");
        assert_eq!(merge_target(None, &"all".to_string()), "all");
        assert_eq!(merge_description(Some(&"x".to_string()), &String::new()), "x");
    }
}
