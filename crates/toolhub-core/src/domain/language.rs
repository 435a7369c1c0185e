//! Display languages supported by the catalog.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A display language.
///
/// Parsing accepts the locale aliases the catalog server understands
/// (`zh`, `zh-CN`, `chinese`, `english`), case-insensitively.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum Language {
    #[default]
    #[strum(to_string = "en", serialize = "english")]
    En,
    #[strum(to_string = "cn", serialize = "zh", serialize = "zh-cn", serialize = "chinese")]
    Cn,
}

impl Language {
    /// Locale code sent to the catalog API.
    pub const fn as_code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Cn => "cn",
        }
    }

    /// Parse a locale code or alias.
    pub fn parse_code(code: &str) -> Result<Self, strum::ParseError> {
        code.trim().parse()
    }
}
