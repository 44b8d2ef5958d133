use serde_json::json;
use thirtyfour::{
    extensions::cdp::ChromeDevTools, prelude::*, CapabilitiesHelper, ChromiumLikeCapabilities,
    PageLoadStrategy,
};

use crate::configuration::BrowserSettings;

/// Hides `navigator.webdriver` from page scripts before any of them run.
const MASK_WEBDRIVER_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', { get: () => undefined });";

/// One isolated headless Chrome session.
///
/// Call [`Droid::quit`] when done. A session dropped without it (for example
/// when the surrounding task is cancelled by a timeout) is closed in the
/// background.
pub struct Droid {
    driver: WebDriver,
    closed: bool,
}

impl Droid {
    pub async fn launch(settings: &BrowserSettings, user_agent: &str) -> WebDriverResult<Self> {
        let mut caps = DesiredCapabilities::chrome();
        caps.set_headless()?;
        caps.set_no_sandbox()?;
        caps.set_disable_dev_shm_usage()?;
        caps.set_disable_gpu()?;
        caps.add_arg("--disable-blink-features=AutomationControlled")?;
        caps.add_arg("--no-first-run")?;
        caps.add_arg(&format!(
            "--window-size={},{}",
            settings.viewport_width, settings.viewport_height
        ))?;
        caps.add_arg(&format!("--user-agent={}", user_agent))?;
        caps.add_experimental_option("excludeSwitches", vec!["enable-automation"])?;
        // Navigation returns once the DOM is parsed.
        caps.set_page_load_strategy(PageLoadStrategy::Eager)?;

        let driver = WebDriver::new(&settings.webdriver_url, caps).await?;
        let droid = Droid {
            driver,
            closed: false,
        };

        droid
            .dev_tools()
            .execute_cdp_with_params(
                "Page.addScriptToEvaluateOnNewDocument",
                json!({ "source": MASK_WEBDRIVER_SCRIPT }),
            )
            .await?;

        Ok(droid)
    }

    pub fn driver(&self) -> &WebDriver {
        &self.driver
    }

    fn dev_tools(&self) -> ChromeDevTools {
        ChromeDevTools::new(self.driver.handle.clone())
    }

    pub async fn quit(mut self) {
        self.closed = true;
        if let Err(e) = self.driver.clone().quit().await {
            log::warn!("Failed to close browser session: {:?}", e);
        }
    }
}

impl Drop for Droid {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        let driver = self.driver.clone();

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = driver.quit().await {
                        log::warn!("Failed to close abandoned browser session: {:?}", e);
                    }
                });
            }
            Err(_) => log::error!("Browser session leaked: no runtime to close it on"),
        }
    }
}
