use crate::error::{BrowserError, Result};
use crate::fingerprint::FingerprintConfig;
use chromiumoxide::browser::{Browser, BrowserConfig as CdpBrowserConfig};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::Page;
use futures::StreamExt;
use slidepass_core::BrowserConfig;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Owned browser session.
///
/// Opened explicitly and closed explicitly; nothing about the browser lives
/// in process-wide state. Dropping without [`BrowserSession::close`] still
/// kills the child process, but skips the graceful shutdown.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    fingerprint: FingerprintConfig,
    navigation_timeout: Duration,
}

impl BrowserSession {
    /// Launch Chromium with a randomized fingerprint.
    pub async fn open(config: &BrowserConfig) -> Result<Self> {
        let fingerprint = FingerprintConfig::randomized(config, &mut rand::thread_rng());
        let navigation_timeout = Duration::from_secs(config.navigation_timeout_secs);

        let mut builder = CdpBrowserConfig::builder()
            .no_sandbox()
            .window_size(fingerprint.viewport_width, fingerprint.viewport_height)
            .request_timeout(navigation_timeout);
        if !config.headless {
            builder = builder.with_head();
        }
        let cdp_config = builder.build().map_err(BrowserError::ChromiumError)?;

        let (browser, mut handler) = Browser::launch(cdp_config)
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        // CDP messages only flow while the handler is polled
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        debug!(
            width = fingerprint.viewport_width,
            height = fingerprint.viewport_height,
            headless = config.headless,
            "browser session opened"
        );

        Ok(Self {
            browser,
            handler,
            fingerprint,
            navigation_timeout,
        })
    }

    /// Fingerprint this session presents.
    pub fn fingerprint(&self) -> &FingerprintConfig {
        &self.fingerprint
    }

    /// Open a tab with the session's user agent and navigate it to `url`.
    pub async fn new_page(&self, url: &str) -> Result<Page> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        page.set_user_agent(SetUserAgentOverrideParams::new(
            self.fingerprint.user_agent.clone(),
        ))
        .await
        .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;

        tokio::time::timeout(self.navigation_timeout, page.goto(url))
            .await
            .map_err(|_| BrowserError::Timeout(format!("navigating to {url}")))?
            .map_err(|e| BrowserError::NavigationError(e.to_string()))?;

        Ok(page)
    }

    /// Shut the browser down and wait for its event handler to finish.
    pub async fn close(mut self) -> Result<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BrowserError::ChromiumError(e.to_string()))?;
        let _ = self.browser.wait().await;
        let _ = self.handler.await;

        debug!("browser session closed");
        Ok(())
    }
}
