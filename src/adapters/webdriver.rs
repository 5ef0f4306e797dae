use crate::config::BrowserConfig;
use crate::domain::ports::{Element, Locator, Page, WaitPolicy};
use crate::utils::error::{Result, ScrapeError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thirtyfour::prelude::*;
use thirtyfour::ChromiumLikeCapabilities;
use tokio::time::{sleep, Instant};

fn to_by(locator: &Locator) -> By {
    match locator {
        Locator::Id(id) => By::Id(id.clone()),
        Locator::Class(classes) => By::Css(format!(".{}", classes)),
        Locator::Tag(tag) => By::Tag(tag.clone()),
        Locator::LinkTextContains(text) => {
            By::XPath(format!(".//a[contains(text(), '{}')]", text))
        }
    }
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    value: StatusValue,
}

#[derive(Debug, Deserialize)]
struct StatusValue {
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    message: String,
}

/// Asks the WebDriver server whether it can start a new session.
pub async fn ensure_webdriver_ready(client: &Client, webdriver_url: &str) -> Result<()> {
    let status_url = format!("{}/status", webdriver_url.trim_end_matches('/'));
    tracing::debug!("Checking WebDriver status at {}", status_url);

    let unavailable = |reason: String| ScrapeError::WebDriverUnavailable {
        url: webdriver_url.to_string(),
        reason,
    };

    let response = client
        .get(&status_url)
        .send()
        .await
        .map_err(|e| unavailable(e.to_string()))?;

    if !response.status().is_success() {
        return Err(unavailable(format!("status endpoint returned {}", response.status())));
    }

    let status: StatusResponse = response
        .json()
        .await
        .map_err(|e| unavailable(format!("unexpected status payload: {}", e)))?;

    if !status.value.ready {
        return Err(unavailable(if status.value.message.is_empty() {
            "server reports it is not ready".to_string()
        } else {
            status.value.message
        }));
    }

    tracing::debug!("WebDriver ready: {}", status.value.message);
    Ok(())
}

/// A Chrome window driven over the W3C WebDriver protocol.
pub struct WebDriverPage {
    driver: WebDriver,
}

impl WebDriverPage {
    pub async fn launch(config: &BrowserConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if config.maximized {
            caps.add_arg("--start-maximized")?;
        }
        if config.headless {
            caps.set_headless()?;
        }

        tracing::info!("Launching Chrome through {}", config.webdriver_url);
        let driver = WebDriver::new(config.webdriver_url.as_str(), caps).await?;
        Ok(Self { driver })
    }

    async fn first_displayed(&self, by: &By) -> WebDriverResult<Option<WebElement>> {
        for element in self.driver.find_all(by.clone()).await? {
            if element.is_displayed().await? {
                return Ok(Some(element));
            }
        }
        Ok(None)
    }
}

#[async_trait]
impl Page for WebDriverPage {
    type Element = WebDriverElement;

    async fn goto(&self, url: &str) -> Result<()> {
        self.driver.goto(url).await?;
        Ok(())
    }

    async fn wait_visible(&self, locator: &Locator, wait: WaitPolicy) -> Result<WebDriverElement> {
        let by = to_by(locator);
        let deadline = Instant::now() + wait.timeout;

        loop {
            match self.first_displayed(&by).await {
                Ok(Some(element)) => return Ok(WebDriverElement(element)),
                Ok(None) => {}
                // Stale or detached nodes while a click re-renders the page.
                Err(e) => tracing::debug!("Visibility check for {} failed: {}", locator, e),
            }

            if Instant::now() >= deadline {
                return Err(ScrapeError::Timeout {
                    anchor: locator.to_string(),
                    seconds: wait.timeout.as_secs(),
                });
            }
            sleep(wait.poll_interval).await;
        }
    }

    async fn quit(self) -> Result<()> {
        self.driver.quit().await?;
        Ok(())
    }
}

pub struct WebDriverElement(WebElement);

#[async_trait]
impl Element for WebDriverElement {
    async fn find(&self, locator: &Locator) -> Result<Self> {
        // An empty match list means absent.
        self.0
            .find_all(to_by(locator))
            .await?
            .into_iter()
            .next()
            .map(WebDriverElement)
            .ok_or_else(|| ScrapeError::ElementNotFound {
                anchor: locator.to_string(),
            })
    }

    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>> {
        let elements = self.0.find_all(to_by(locator)).await?;
        Ok(elements.into_iter().map(WebDriverElement).collect())
    }

    async fn text(&self) -> Result<String> {
        Ok(self.0.text().await?)
    }

    async fn click(&self) -> Result<()> {
        self.0.click().await?;
        Ok(())
    }
}
