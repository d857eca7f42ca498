//! Page objects for acceptance-testing a storefront's product listing through
//! [WebDriver].
//!
//! This crate binds the listing page's URL template and element locators to
//! the operations an acceptance scenario performs against the page: opening
//! it with navigation parameters, switching and checking the view, filtering
//! by property values, and asserting on prices, article counts and article
//! presence. The browser itself is driven through [`fantoccini`]; this crate
//! only adds the page's shape on top.
//!
//! Element locations live in a selector registry inside each page object, so
//! a template change touches one table rather than every scenario. Checks
//! fail with typed errors ([`CheckError`], [`NavigationError`]) whose
//! messages embed the expected and actual values, and a failing check is
//! scenario-fatal: nothing is retried or recovered internally.
//!
//! # Examples
//!
//! The example assumes a [WebDriver compatible] process such as
//! [`geckodriver`] running on port 4444, and a storefront on port 8000.
//!
//! ```no_run
//! use storefront_pages::{Config, ListingPage, ViewMode};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = config.session().await?;
//!
//!     let listing = ListingPage::new(client.clone(), config.base_url.clone());
//!
//!     // open category 5, second page; everything else keeps its default
//!     listing.open([("category", "5"), ("page", "2")]).await?;
//!
//!     // the listing should show twelve articles in the table view
//!     listing.count_articles(12).await?;
//!     listing.check_view(ViewMode::Table).await?;
//!
//!     // narrow down by colour and check the result
//!     listing.filter(&[("Farbe", "Rot")]).await?;
//!     listing.check_listing("Strandtuch Ibiza", false).await?;
//!     listing.check_price(1, 19.95).await?;
//!
//!     client.close().await?;
//!     Ok(())
//! }
//! ```
//!
//! Failures carry enough context to report upward as-is:
//!
//! ```
//! use storefront_pages::CheckError;
//!
//! let e = CheckError::CountMismatch { actual: 10, expected: 12 };
//! assert_eq!(e.to_string(), "there are 10 articles in the listing (should be 12)");
//! assert!(e.is_mismatch());
//! ```
//!
//! [WebDriver]: https://www.w3.org/TR/webdriver/
//! [WebDriver compatible]: https://github.com/Fyrd/caniuse/issues/2757#issuecomment-304529217
//! [`geckodriver`]: https://github.com/mozilla/geckodriver

#![deny(missing_docs)]
#![warn(missing_debug_implementations, rust_2018_idioms)]

pub mod article_box;
pub mod config;
pub mod error;
pub mod helper;
pub mod language;
pub mod listing;

pub use crate::article_box::ArticleBox;
pub use crate::config::{Browser, Config};
pub use crate::error::{CheckError, ConfigError, NavigationError};
pub use crate::language::{Language, LanguageSwitcher};
pub use crate::listing::{ListingPage, ViewMode};

pub use fantoccini::{Client, Locator};
