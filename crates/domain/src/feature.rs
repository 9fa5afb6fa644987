use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use dancerealmx_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Key of a gated product capability, e.g. `sell_resources`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FeatureKey(String);

impl FeatureKey {
    /// Creates a validated feature key. Keys are lowercase snake_case.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.is_empty() {
            return Err(AppError::Validation(
                "feature key must not be empty".to_owned(),
            ));
        }

        let is_snake_case = value.chars().all(|character| {
            character.is_ascii_lowercase() || character.is_ascii_digit() || character == '_'
        });
        if !is_snake_case || value.starts_with('_') || value.ends_with('_') {
            return Err(AppError::Validation(format!(
                "feature key '{value}' must be lowercase snake_case"
            )));
        }

        Ok(Self(value))
    }

    /// Returns the key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Borrow<str> for FeatureKey {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for FeatureKey {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

impl FromStr for FeatureKey {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::new(value)
    }
}

impl TryFrom<String> for FeatureKey {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FeatureKey> for String {
    fn from(value: FeatureKey) -> Self {
        value.0
    }
}
