//! Theme Preference Value Object

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid theme preference")]
pub struct ThemeError;

/// UI theme preference. Only two values are accepted on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ThemeError> {
        match s {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            _ => Err(ThemeError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Theme::parse("dark"), Ok(Theme::Dark));
        assert_eq!(Theme::parse("light"), Ok(Theme::Light));
        assert_eq!(Theme::parse("Dark"), Err(ThemeError));
        assert_eq!(Theme::parse("solarized"), Err(ThemeError));
        assert_eq!(Theme::parse(""), Err(ThemeError));
    }

    #[test]
    fn test_default_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }
}
