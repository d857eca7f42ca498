//! Session configuration for an acceptance suite.
//!
//! Where the storefront and the WebDriver server live, which browser backend
//! to drive, and the capability sets the backends are requested with.

use crate::error::ConfigError;
use fantoccini::error::NewSessionError;
use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use url::Url;

/// Browser backend the suite drives.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    /// Firefox through geckodriver.
    Firefox,
    /// Chrome/Chromium through chromedriver.
    Chrome,
}

impl FromStr for Browser {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "firefox" => Ok(Browser::Firefox),
            "chrome" => Ok(Browser::Chrome),
            other => Err(ConfigError::UnknownBrowser(other.to_string())),
        }
    }
}

/// Configuration of a scenario's browser session.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the storefront under test.
    pub base_url: Url,
    /// Address of the WebDriver server.
    pub webdriver_url: String,
    /// Browser backend to request.
    pub browser: Browser,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse("http://localhost:8000/").unwrap(),
            webdriver_url: "http://localhost:4444".to_string(),
            browser: Browser::Firefox,
        }
    }
}

impl Config {
    /// Reads the configuration from the environment.
    ///
    /// `STOREFRONT_BASE_URL`, `WEBDRIVER_URL` and `WEBDRIVER_BROWSER`
    /// override the defaults (a local storefront on port 8000, geckodriver on
    /// port 4444, firefox).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(value) = env::var("STOREFRONT_BASE_URL") {
            config.base_url = Url::parse(&value)?;
        }
        if let Ok(value) = env::var("WEBDRIVER_URL") {
            config.webdriver_url = value;
        }
        if let Ok(value) = env::var("WEBDRIVER_BROWSER") {
            config.browser = value.parse()?;
        }

        Ok(config)
    }

    /// Capabilities requested for the configured browser.
    ///
    /// Both backends run headless; chromium additionally needs its sandbox
    /// flags relaxed to come up inside a container.
    pub fn capabilities(&self) -> Capabilities {
        let mut caps = Capabilities::new();
        match self.browser {
            Browser::Firefox => {
                let opts = serde_json::json!({ "args": ["--headless"] });
                caps.insert("moz:firefoxOptions".to_string(), opts);
            }
            Browser::Chrome => {
                let opts = serde_json::json!({
                    "args": ["--headless", "--disable-gpu", "--no-sandbox", "--disable-dev-shm-usage"]
                });
                caps.insert("goog:chromeOptions".to_string(), opts);
            }
        }
        caps
    }

    /// Establishes the browser session this configuration describes.
    pub async fn session(&self) -> Result<Client, NewSessionError> {
        ClientBuilder::native()
            .capabilities(self.capabilities())
            .connect(&self.webdriver_url)
            .await
    }
}
