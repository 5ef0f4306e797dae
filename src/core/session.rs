use crate::domain::ports::Page;
use crate::utils::error::Result;
use tracing::{info, warn};

/// The single browser window of a run.
///
/// `start` navigates to the root page; `stop` consumes the session so the
/// browser is released exactly once.
pub struct BrowserSession<P: Page> {
    page: P,
}

impl<P: Page> BrowserSession<P> {
    /// Opens `root_url`. If navigation fails the browser is shut down before
    /// the error is returned.
    pub async fn start(page: P, root_url: &str) -> Result<Self> {
        info!("Opening {}", root_url);
        let loaded = page.goto(root_url).await;
        if let Err(e) = loaded {
            if let Err(quit_error) = page.quit().await {
                warn!("Failed to close browser after load error: {}", quit_error);
            }
            return Err(e);
        }
        Ok(Self { page })
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub async fn stop(self) -> Result<()> {
        info!("Closing browser");
        self.page.quit().await
    }
}
