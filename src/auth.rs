use std::fmt;

use crate::error::{Error, Result};

/// Environment variable holding the GitHub access token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Opaque access token sent with every API request.
///
/// `Debug` is redacted so the token never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Reads a token from the named environment variable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingToken`] if the variable is unset, empty or not
    /// valid unicode.
    pub fn from_env_var(var: &str) -> Result<Self> {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => Ok(Self(value)),
            _ => Err(Error::MissingToken {
                var: var.to_string(),
            }),
        }
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name so parallel tests don't race.

    #[test]
    fn test_token_from_set_variable() {
        std::env::set_var("RUN_ARTIFACTS_TEST_TOKEN_SET", "ghp_abc123");

        let token = Token::from_env_var("RUN_ARTIFACTS_TEST_TOKEN_SET").unwrap();
        assert_eq!(token.as_str(), "ghp_abc123");
    }

    #[test]
    fn test_token_missing_variable() {
        std::env::remove_var("RUN_ARTIFACTS_TEST_TOKEN_UNSET");

        let err = Token::from_env_var("RUN_ARTIFACTS_TEST_TOKEN_UNSET").unwrap_err();
        assert!(matches!(err, Error::MissingToken { ref var } if var == "RUN_ARTIFACTS_TEST_TOKEN_UNSET"));
    }

    #[test]
    fn test_token_empty_variable_is_missing() {
        std::env::set_var("RUN_ARTIFACTS_TEST_TOKEN_EMPTY", "");

        let err = Token::from_env_var("RUN_ARTIFACTS_TEST_TOKEN_EMPTY").unwrap_err();
        assert!(matches!(err, Error::MissingToken { .. }));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::from("secret-value");
        assert_eq!(format!("{token:?}"), "Token(***)");
    }
}
