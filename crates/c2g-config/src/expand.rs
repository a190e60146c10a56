//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references using the process environment.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    expand_with(value, field, |name| std::env::var(name).ok())
}

/// Expand variable references with a custom lookup.
///
/// Unset variables without a default are reported as [`ConfigError::EnvVar`].
pub(crate) fn expand_with<F>(value: &str, field: &str, mut lookup: F) -> Result<String, ConfigError>
where
    F: FnMut(&str) -> Option<String>,
{
    shellexpand::env_with_context(value, |name: &str| {
        Ok::<_, std::convert::Infallible>(lookup(name))
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.var_name),
    })
}
