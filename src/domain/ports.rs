use crate::utils::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location of `path` as reported to the operator.
    fn describe(&self, path: &str) -> String;
}

/// How to find an element on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Id(String),
    /// One or more class names joined by `.`; all must be present.
    Class(String),
    Tag(String),
    /// An `<a>` whose own text contains the given fragment.
    LinkTextContains(String),
}

impl Locator {
    pub fn id(id: &str) -> Self {
        Locator::Id(id.to_string())
    }

    pub fn class(classes: &str) -> Self {
        Locator::Class(classes.to_string())
    }

    pub fn tag(tag: &str) -> Self {
        Locator::Tag(tag.to_string())
    }

    pub fn link_text_contains(fragment: &str) -> Self {
        Locator::LinkTextContains(fragment.to_string())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::Class(classes) => write!(f, ".{}", classes),
            Locator::Tag(tag) => write!(f, "<{}>", tag),
            Locator::LinkTextContains(text) => write!(f, "a[text*='{}']", text),
        }
    }
}

/// Bounded visibility wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl WaitPolicy {
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(20), Duration::from_millis(500))
    }
}

#[async_trait]
pub trait Element: Send + Sync + Sized {
    /// First descendant matching `locator`, or `ElementNotFound`.
    async fn find(&self, locator: &Locator) -> Result<Self>;
    /// All descendants matching `locator`, in document order.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self>>;
    async fn text(&self) -> Result<String>;
    async fn click(&self) -> Result<()>;
}

#[async_trait]
pub trait Page: Send + Sync + Sized {
    type Element: Element;

    async fn goto(&self, url: &str) -> Result<()>;
    /// Polls until an element matching `locator` is displayed, failing with
    /// `Timeout` once `wait.timeout` elapses. A failed lookup during polling
    /// counts as not yet visible.
    async fn wait_visible(&self, locator: &Locator, wait: WaitPolicy) -> Result<Self::Element>;
    async fn quit(self) -> Result<()>;
}
