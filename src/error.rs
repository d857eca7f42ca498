//! Failure types reported by the page objects.
//!
//! Every failure is scenario-fatal: nothing here is retried or recovered
//! internally, the error is surfaced to the calling scenario with a message
//! embedding the relevant identifiers and expected/actual values.

use crate::helper::format_price;
use crate::listing::ViewMode;
use fantoccini::error::CmdError;
use std::error::Error;
use std::fmt;
use url::ParseError;

/// An error occurred while navigating to the listing page.
#[derive(Debug)]
pub enum NavigationError {
    /// The rendered listing URL is invalid.
    BadUrl(ParseError),
    /// The browser failed to open the listing URL.
    Failed(CmdError),
}

impl Error for NavigationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            NavigationError::BadUrl(ref e) => Some(e),
            NavigationError::Failed(ref e) => Some(e),
        }
    }
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            NavigationError::BadUrl(ref e) => write!(f, "listing url is invalid: {}", e),
            NavigationError::Failed(ref e) => write!(f, "failed to open the listing page: {}", e),
        }
    }
}

impl From<ParseError> for NavigationError {
    fn from(e: ParseError) -> Self {
        NavigationError::BadUrl(e)
    }
}

impl From<CmdError> for NavigationError {
    fn from(e: CmdError) -> Self {
        NavigationError::Failed(e)
    }
}

/// A check or interaction against the listing page failed.
///
/// The mismatch variants report a rendered value that differs from the
/// expected one; the not-found variants report a named filter, value or link
/// that is absent from the page. [`CheckError::Webdriver`] carries failures of
/// the underlying driver, including lookups of elements the page is expected
/// to always render.
#[derive(Debug)]
pub enum CheckError {
    /// The price of an article differs from the expected one.
    PriceMismatch {
        /// 1-based position of the article in the listing.
        position: usize,
        /// The price the listing displays.
        actual: f64,
        /// The price the scenario expects.
        expected: f64,
    },

    /// The displayed price text could not be parsed to a number.
    PriceNotNumeric {
        /// 1-based position of the article in the listing.
        position: usize,
        /// The text the price element displays.
        text: String,
    },

    /// The listing shows a different number of articles than expected.
    CountMismatch {
        /// How many article boxes the listing shows.
        actual: usize,
        /// How many the scenario expects.
        expected: usize,
    },

    /// The view that should be active is not.
    ViewNotActive {
        /// The view expected to be active.
        view: ViewMode,
    },

    /// A view other than the expected one carries the active marker.
    ViewActive {
        /// The view that is wrongly active.
        view: ViewMode,
        /// The view that should be active instead.
        expected: ViewMode,
    },

    /// An article's presence in the listing differs from what was expected.
    ListingMismatch {
        /// Name of the article, as matched against its link text.
        article: String,
        /// Whether the article is in the listing.
        present: bool,
    },

    /// No filter group with the requested name is visible.
    FilterNotFound {
        /// The requested group name.
        filter: String,
    },

    /// The filter group exists, but none of its properties carries the
    /// requested value.
    FilterValueNotFound {
        /// The requested group name.
        filter: String,
        /// The requested property value.
        value: String,
        /// The property names that were found under the group instead.
        tried: Vec<String>,
    },

    /// An action label that no localization entry exists for.
    UnknownActionLabel {
        /// The requested label.
        label: String,
    },

    /// The article box carries no action link with the localized title.
    ActionLinkNotFound {
        /// The requested canonical label.
        label: String,
        /// The localized title that was looked for.
        title: String,
        /// 1-based position of the article box.
        position: usize,
    },

    /// The language switcher carries a value no [`Language`] is known for.
    ///
    /// [`Language`]: crate::language::Language
    UnknownLanguage {
        /// The value the switcher reported.
        code: String,
    },

    /// The underlying WebDriver command failed.
    Webdriver(CmdError),
}

impl CheckError {
    /// Returns true if this error reports a rendered value that differs from
    /// the expected one.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            CheckError::PriceMismatch { .. }
                | CheckError::PriceNotNumeric { .. }
                | CheckError::CountMismatch { .. }
                | CheckError::ViewNotActive { .. }
                | CheckError::ViewActive { .. }
                | CheckError::ListingMismatch { .. }
        )
    }

    /// Returns true if this error reports a named filter, value or link that
    /// is absent from the page.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CheckError::FilterNotFound { .. }
                | CheckError::FilterValueNotFound { .. }
                | CheckError::ActionLinkNotFound { .. }
        )
    }
}

impl Error for CheckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            CheckError::Webdriver(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CheckError::PriceMismatch {
                position,
                actual,
                expected,
            } => write!(
                f,
                "the price of the article on position {} ({}) is different from {}",
                position,
                format_price(actual),
                format_price(expected)
            ),
            CheckError::PriceNotNumeric { position, ref text } => write!(
                f,
                "the price of the article on position {} ({:?}) is not numeric",
                position, text
            ),
            CheckError::CountMismatch { actual, expected } => write!(
                f,
                "there are {} articles in the listing (should be {})",
                actual, expected
            ),
            CheckError::ViewNotActive { view } => {
                write!(f, "the {}-view is not active", view)
            }
            CheckError::ViewActive { view, expected } => write!(
                f,
                "the {}-view is active (should be the {}-view)",
                view, expected
            ),
            CheckError::ListingMismatch {
                ref article,
                present,
            } => {
                if present {
                    write!(
                        f,
                        "the article {:?} is in the listing, but should not be",
                        article
                    )
                } else {
                    write!(
                        f,
                        "the article {:?} is not in the listing, but should be",
                        article
                    )
                }
            }
            CheckError::FilterNotFound { ref filter } => {
                write!(f, "the filter {:?} was not found", filter)
            }
            CheckError::FilterValueNotFound {
                ref filter,
                ref value,
                ref tried,
            } => write!(
                f,
                "the value {:?} was not found for filter {:?} (tried: {})",
                value,
                filter,
                tried.join(", ")
            ),
            CheckError::UnknownActionLabel { ref label } => {
                write!(f, "unknown action link label {:?}", label)
            }
            CheckError::ActionLinkNotFound {
                ref label,
                ref title,
                position,
            } => write!(
                f,
                "no action link titled {:?} ({}) on the article box on position {}",
                title, label, position
            ),
            CheckError::UnknownLanguage { ref code } => {
                write!(f, "unrecognized shop language {:?}", code)
            }
            CheckError::Webdriver(ref e) => write!(f, "webdriver command failed: {}", e),
        }
    }
}

impl From<CmdError> for CheckError {
    fn from(e: CmdError) -> Self {
        CheckError::Webdriver(e)
    }
}

/// The suite configuration could not be loaded.
#[derive(Debug)]
pub enum ConfigError {
    /// The configured storefront base URL does not parse.
    BadBaseUrl(ParseError),
    /// The configured browser backend is not supported.
    UnknownBrowser(String),
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            ConfigError::BadBaseUrl(ref e) => Some(e),
            ConfigError::UnknownBrowser(_) => None,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ConfigError::BadBaseUrl(ref e) => write!(f, "storefront base url is invalid: {}", e),
            ConfigError::UnknownBrowser(ref browser) => {
                write!(f, "unsupported browser backend {:?}", browser)
            }
        }
    }
}

impl From<ParseError> for ConfigError {
    fn from(e: ParseError) -> Self {
        ConfigError::BadBaseUrl(e)
    }
}
