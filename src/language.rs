//! The storefront's UI languages and the language switcher.

use crate::error::CheckError;
use fantoccini::{Client, Locator};
use std::fmt;

/// Selector of the language-switch `<select>` in the shop header.
const LANGUAGE_SELECT: &str = "div.language_switch select";

/// A UI language of the storefront.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Language {
    /// German, the shop default.
    De,
    /// English.
    En,
}

impl Language {
    /// ISO 639-1 code, as carried by the language switcher's option values.
    pub fn code(&self) -> &'static str {
        match *self {
            Language::De => "de",
            Language::En => "en",
        }
    }

    /// Maps a language switcher option value back to the language.
    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "de" => Some(Language::De),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Column of this language in the localization tables.
    pub(crate) fn index(&self) -> usize {
        match *self {
            Language::De => 0,
            Language::En => 1,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Reads the currently selected UI language from the shop's language
/// switcher.
#[derive(Clone, Debug)]
pub struct LanguageSwitcher {
    client: Client,
}

impl LanguageSwitcher {
    /// Creates a switcher reader over the given session.
    pub fn new(client: Client) -> Self {
        LanguageSwitcher { client }
    }

    /// The language the storefront is currently displayed in.
    pub async fn current_language(&self) -> Result<Language, CheckError> {
        let select = self.client.find(Locator::Css(LANGUAGE_SELECT)).await?;
        let code = select.prop("value").await?.unwrap_or_default();
        Language::from_code(&code).ok_or(CheckError::UnknownLanguage { code })
    }
}
