//! Free-form `key=value` build arguments.

use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgError {
    #[error("argument string must be in the form x=y, got `{0}`")]
    MissingEquals(String),
}

/// Parse `x=y j=k` style arguments; each splits on its first `=`.
///
/// Later duplicates win.
pub fn parse_key_value_pairs<S: AsRef<str>>(args: &[S]) -> Result<BTreeMap<String, String>, ArgError> {
    args.iter()
        .map(|arg| {
            let arg = arg.as_ref();
            arg.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| ArgError::MissingEquals(arg.to_string()))
        })
        .collect()
}
