//! The product listing page and its interactive surface.

use crate::article_box::ArticleBox;
use crate::error::{CheckError, NavigationError};
use crate::helper;
use crate::language::LanguageSwitcher;
use fantoccini::elements::Element;
use fantoccini::{Client, Locator};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;
use url::Url;

/// CSS selectors for the parts of the listing page the checks interact with.
///
/// Selectors addressing repeated elements are format functions over their
/// template; everything a [`ListingPage`] method locates comes out of this
/// module.
pub(crate) mod css {
    /// Marker class carried by the switch controls of the active view.
    pub const ACTIVE: &str = ".active";
    /// The wrapper around the filter sidebar.
    pub const FILTER_CONTAINER: &str = "div.filter_properties > div";
    /// Close links of the currently applied filters, relative to the container.
    pub const FILTER_CLOSE_LINKS: &str = "div.slideContainer > ul > li.close > a";
    /// Filter group headers, relative to the container.
    pub const FILTER_GROUPS: &str = "div > div:not(.slideContainer)";
    /// One article box in the listing.
    pub const ARTICLE_BOX: &str = "div.artbox";
    /// The listing container holding the article boxes.
    pub const LISTING_BOX: &str = "div.listing";

    /// Property links of the `slide`th slide container, counted 1-based among
    /// the filter container's `div` children.
    pub fn filter_properties(slide: usize) -> String {
        format!("div.slideContainer:nth-of-type({}) > ul > li > a", slide)
    }

    /// Price paragraph of the article box on the given 1-based position.
    pub fn article_price(position: usize) -> String {
        format!("div.listing div.artbox:nth-of-type({}) p.price", position)
    }
}

/// The view switcher renders above and below the listing, so the active
/// view's control appears this many times.
const VIEW_SWITCH_COUNT: usize = 2;

/// Filter group headers render a trailing article count ("Farbe (3)").
const FILTER_GROUPS_HAVE_BRACKETS: bool = true;

/// The filter container's `div` children alternate between group header and
/// slide container, so group `i` (0-based) owns the `(i + 1) * 2`th child.
const FILTER_PROPERTY_FACTOR: usize = 2;

/// Category the listing falls back to when none is requested.
const DEFAULT_CATEGORY: &str = "3";

/// Page the listing falls back to when none is requested.
const DEFAULT_PAGE: &str = "1";

/// The listing's view modes, switchable through the view controls.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewMode {
    /// The tabular article grid.
    Table,
    /// The single-column article list.
    List,
}

impl ViewMode {
    /// All view modes the listing knows about.
    pub(crate) const ALL: [ViewMode; 2] = [ViewMode::Table, ViewMode::List];

    /// Selector of this view's switch control.
    fn switch_css(&self) -> &'static str {
        match *self {
            ViewMode::Table => "a.table-view",
            ViewMode::List => "a.list-view",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ViewMode::Table => "table",
            ViewMode::List => "list",
        })
    }
}

/// Renders the listing path and query for the given navigation parameters.
///
/// Missing or empty values resolve to the defaults: category `3`, page `1`,
/// everything else empty.
fn build_path<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut map: BTreeMap<&str, &str> = BTreeMap::new();
    for (parameter, value) in params {
        map.insert(parameter, value);
    }

    let get = |key: &str| map.get(key).copied().filter(|value| !value.is_empty());

    format!(
        "/listing/index/sCategory/{}/sSupplier/{}?sPage={}&sTemplate={}&sPerPage={}&sSort={}",
        get("category").unwrap_or(DEFAULT_CATEGORY),
        get("supplier").unwrap_or(""),
        get("page").unwrap_or(DEFAULT_PAGE),
        get("template").unwrap_or(""),
        get("perPage").unwrap_or(""),
        get("sort").unwrap_or(""),
    )
}

/// Resolves the displayed name of a filter group or property element.
///
/// See [`helper::resolve_name`] for the resolution rule; the `title`
/// attribute is only fetched when the visible text turns out empty.
async fn element_name(element: &Element, has_brackets: bool) -> Result<String, CheckError> {
    let text = element.text().await?;

    if text.trim().is_empty() {
        let title = element.attr("title").await?;
        Ok(helper::resolve_name(&text, title.as_deref(), has_brackets))
    } else {
        Ok(helper::resolve_name(&text, None, has_brackets))
    }
}

/// Page object for the storefront's product listing.
///
/// Binds the listing's URL template and element locators to the operations a
/// test scenario performs against the page: opening it with navigation
/// parameters, filtering, and checking prices, article counts, article
/// presence and the active view.
///
/// The page object holds no state beyond the driver handle and the storefront
/// base URL; every method queries the live DOM at call time, and a scenario
/// is expected to await each operation before issuing the next.
#[derive(Clone, Debug)]
pub struct ListingPage {
    client: Client,
    base: Url,
}

impl ListingPage {
    /// Creates a page object for the storefront at `base`.
    pub fn new(client: Client, base: Url) -> Self {
        ListingPage { client, base }
    }

    /// Get back the [`Client`] driving this page.
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Opens the listing with the given `(parameter, value)` pairs.
    ///
    /// Recognized parameters are `category`, `supplier`, `page`, `template`,
    /// `perPage` and `sort`; missing or empty values resolve to the defaults
    /// (category `3`, page `1`, everything else empty). The parameter map is
    /// built fresh per call and discarded after the navigation.
    pub async fn open<'a, I>(&self, params: I) -> Result<(), NavigationError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let url = self.base.join(&build_path(params))?;
        debug!(%url, "opening listing");
        self.client.goto(url.as_str()).await?;
        Ok(())
    }

    /// Checks the price of the article on the given 1-based position.
    ///
    /// The displayed text is parsed through [`helper::to_float`] and compared
    /// within [`helper::PRICE_TOLERANCE`].
    pub async fn check_price(&self, position: usize, expected: f64) -> Result<(), CheckError> {
        let selector = css::article_price(position);
        let element = self.client.find(Locator::Css(&selector)).await?;
        let text = element.text().await?;

        let actual = match helper::to_float(&text) {
            Some(value) => value,
            None => return Err(CheckError::PriceNotNumeric { position, text }),
        };

        if helper::prices_equal(actual, expected) {
            Ok(())
        } else {
            Err(CheckError::PriceMismatch {
                position,
                actual,
                expected,
            })
        }
    }

    /// Applies the given `(filter group, property value)` pairs.
    ///
    /// All previously applied filters are reset first by clicking their close
    /// links in reverse order: the DOM re-renders after every click, and
    /// closing the last-opened filter first keeps the positions of the
    /// remaining close links stable. Each requested group is then resolved to
    /// its position among the visible group headers and the property link
    /// whose displayed name equals the requested value is clicked.
    pub async fn filter(&self, properties: &[(&str, &str)]) -> Result<(), CheckError> {
        let container = self.client.find(Locator::Css(css::FILTER_CONTAINER)).await?;

        let close_links = container
            .find_all(Locator::Css(css::FILTER_CLOSE_LINKS))
            .await?;
        debug!(active = close_links.len(), "resetting filters");
        for link in close_links.iter().rev() {
            link.click().await?;
        }

        let groups = container.find_all(Locator::Css(css::FILTER_GROUPS)).await?;
        let mut names = Vec::with_capacity(groups.len());
        for group in &groups {
            names.push(element_name(group, FILTER_GROUPS_HAVE_BRACKETS).await?);
        }

        for &(filter, value) in properties {
            let index = match names.iter().position(|name| name == filter) {
                Some(index) => index,
                None => {
                    return Err(CheckError::FilterNotFound {
                        filter: filter.to_string(),
                    })
                }
            };
            self.set_filter_property(&container, index, filter, value)
                .await?;
        }

        Ok(())
    }

    /// Clicks the property named `value` under the filter group on `index`
    /// (0-based among the visible group headers).
    async fn set_filter_property(
        &self,
        container: &Element,
        index: usize,
        filter: &str,
        value: &str,
    ) -> Result<(), CheckError> {
        let slide = (index + 1) * FILTER_PROPERTY_FACTOR;
        let selector = css::filter_properties(slide);
        let properties = container.find_all(Locator::Css(&selector)).await?;

        let mut tried = Vec::with_capacity(properties.len());
        for property in &properties {
            let name = element_name(property, false).await?;
            if name == value {
                debug!(filter, value, "applying filter");
                property.click().await?;
                return Ok(());
            }
            tried.push(name);
        }

        Err(CheckError::FilterValueNotFound {
            filter: filter.to_string(),
            value: value.to_string(),
            tried,
        })
    }

    /// Counts the article boxes in the listing.
    pub async fn count_articles(&self, expected: usize) -> Result<(), CheckError> {
        let actual = self
            .client
            .find_all(Locator::Css(css::ARTICLE_BOX))
            .await?
            .len();

        if actual == expected {
            Ok(())
        } else {
            Err(CheckError::CountMismatch { actual, expected })
        }
    }

    /// Checks that exactly `active` is the selected view.
    ///
    /// The active view's switch controls must carry the active marker twice
    /// (once above and once below the listing); every other view must not
    /// carry it at all.
    pub async fn check_view(&self, active: ViewMode) -> Result<(), CheckError> {
        for view in ViewMode::ALL {
            let selector = format!("{}{}", view.switch_css(), css::ACTIVE);
            let count = self.client.find_all(Locator::Css(&selector)).await?.len();

            if view == active && count != VIEW_SWITCH_COUNT {
                return Err(CheckError::ViewNotActive { view });
            }
            if view != active && count != 0 {
                return Err(CheckError::ViewActive {
                    view,
                    expected: active,
                });
            }
        }

        Ok(())
    }

    /// Checks whether the article with the given name is in the listing.
    ///
    /// Presence means a link with exactly this text exists inside the listing
    /// container. With `negate` set, the check passes when the article is
    /// absent instead.
    pub async fn check_listing(&self, article: &str, negate: bool) -> Result<(), CheckError> {
        let listing = self.client.find(Locator::Css(css::LISTING_BOX)).await?;
        let present = !listing
            .find_all(Locator::LinkText(article))
            .await?
            .is_empty();

        if present == !negate {
            Ok(())
        } else {
            Err(CheckError::ListingMismatch {
                article: article.to_string(),
                present,
            })
        }
    }

    /// Clicks the labeled action link on the article box on the given 1-based
    /// position.
    ///
    /// Action link titles are localized, so the current shop language is read
    /// from the language switcher first and scopes the lookup; see
    /// [`ArticleBox::click_action_link`].
    pub async fn click_multiple_action_button(
        &self,
        label: &str,
        position: usize,
    ) -> Result<(), CheckError> {
        let language = LanguageSwitcher::new(self.client.clone())
            .current_language()
            .await?;

        let selector = format!("{}:nth-of-type({})", css::ARTICLE_BOX, position);
        let element = self.client.find(Locator::Css(&selector)).await?;

        ArticleBox::new(element, position)
            .click_action_link(label, language)
            .await
    }
}
