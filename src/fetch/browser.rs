use super::PageSource;
use crate::error::FetchError;
use crate::log_debug;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use std::time::Duration;

/// Browser-rendered page source: loads the page in headless Chromium and
/// returns the DOM after script execution. A fresh browser process is
/// launched per fetch and torn down before this returns, success or not.
pub struct BrowserSource {
    timeout: Duration,
}

impl BrowserSource {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn render(&self, page: &Page, url: &str) -> Result<String, FetchError> {
        match tokio::time::timeout(self.timeout, page.goto(url)).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(FetchError::Render(format!("Navigation failed: {}", e))),
            Err(_) => return Err(FetchError::Timeout(self.timeout.as_secs())),
        }

        let _ = page.wait_for_navigation().await;

        let result = page
            .evaluate("document.documentElement.outerHTML")
            .await
            .map_err(|e| FetchError::Render(format!("Failed to read DOM: {}", e)))?;

        result
            .into_value::<String>()
            .map_err(|e| FetchError::Render(format!("Unexpected DOM payload: {}", e)))
    }
}

#[async_trait]
impl PageSource for BrowserSource {
    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let config = BrowserConfig::builder()
            .arg("--headless=new")
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(FetchError::BrowserUnavailable)?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| FetchError::BrowserUnavailable(e.to_string()))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let result = match browser.new_page("about:blank").await {
            Ok(page) => {
                let rendered = self.render(&page, url).await;
                let _ = page.close().await;
                rendered
            }
            Err(e) => Err(FetchError::Render(format!("Failed to open page: {}", e))),
        };

        // Tear the browser down on both the success and failure paths.
        if let Err(e) = browser.close().await {
            log_debug!("[fetch] Browser close failed: {}", e);
        }
        let _ = browser.wait().await;
        let _ = handler_task.await;

        result
    }
}
