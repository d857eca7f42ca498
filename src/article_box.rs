//! Element object for a single article box in the listing.

use crate::error::CheckError;
use crate::language::Language;
use fantoccini::elements::Element;
use fantoccini::Locator;
use tracing::debug;

/// Canonical action labels and their localized link titles, German first.
const ACTION_LINKS: &[(&str, [&str; 2])] = &[
    ("compare", ["Vergleichen", "Compare"]),
    ("remember", ["Auf den Merkzettel", "Remember"]),
    ("buy", ["In den Warenkorb", "Add to cart"]),
    ("details", ["Zum Produkt", "View product"]),
];

/// One `div.artbox` in the listing.
///
/// The box's action links are addressed by their localized `title`
/// attribute, so clicks are scoped by the shop language the caller resolved
/// beforehand.
#[derive(Debug)]
pub struct ArticleBox {
    element: Element,
    position: usize,
}

impl ArticleBox {
    /// Wraps the article box element on the given 1-based position.
    pub fn new(element: Element, position: usize) -> Self {
        ArticleBox { element, position }
    }

    /// Clicks the action link with the given canonical label.
    ///
    /// The label (`compare`, `remember`, `buy` or `details`) is translated to
    /// the link title displayed in `language`, and the matching link inside
    /// the box is clicked.
    pub async fn click_action_link(
        &self,
        label: &str,
        language: Language,
    ) -> Result<(), CheckError> {
        let title = match localized_title(label, language) {
            Some(title) => title,
            None => {
                return Err(CheckError::UnknownActionLabel {
                    label: label.to_string(),
                })
            }
        };

        let selector = format!("a[title='{}']", escape_attribute(title));
        debug!(label, title, "clicking action link");

        match self.element.find(Locator::Css(&selector)).await {
            Ok(link) => {
                link.click().await?;
                Ok(())
            }
            Err(e) if e.is_no_such_element() => Err(CheckError::ActionLinkNotFound {
                label: label.to_string(),
                title: title.to_string(),
                position: self.position,
            }),
            Err(e) => Err(CheckError::Webdriver(e)),
        }
    }
}

/// Looks up the displayed link title for a canonical action label.
fn localized_title(label: &str, language: Language) -> Option<&'static str> {
    ACTION_LINKS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, titles)| titles[language.index()])
}

/// Escapes a value for use inside a single-quoted CSS attribute selector.
fn escape_attribute(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
