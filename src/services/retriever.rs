use std::{fmt, time::Duration};

use reqwest::{
    header::{
        HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION,
        UPGRADE_INSECURE_REQUESTS, USER_AGENT,
    },
    Client,
};
use thirtyfour::error::WebDriverError;
use thiserror::Error;

use crate::{configuration::RetrievalSettings, domain::SourceDefinition};

use super::Droid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalTier {
    Rendered,
    Http,
}

impl fmt::Display for RetrievalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetrievalTier::Rendered => f.write_str("rendered browser"),
            RetrievalTier::Http => f.write_str("plain HTTP"),
        }
    }
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("browser error: {0}")]
    Browser(#[from] WebDriverError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{tier} fetch timed out after {after:?}")]
    Timeout { tier: RetrievalTier, after: Duration },

    #[error("{tier} fetch returned no listings")]
    NoListings { tier: RetrievalTier },

    #[error("browser tier disabled")]
    BrowserDisabled,

    #[error("all tiers failed (rendered: {rendered}; http: {http})")]
    Exhausted {
        rendered: Box<RetrievalError>,
        http: Box<RetrievalError>,
    },
}

/// Markup of a search page and the tier that produced it.
#[derive(Debug)]
pub struct Page {
    pub markup: String,
    pub tier: RetrievalTier,
}

/// Fetches search pages, rendering them in a browser first and falling back
/// to a plain HTTP GET with browser-like headers.
pub struct Retriever {
    http_client: Client,
    settings: RetrievalSettings,
}

impl Retriever {
    pub fn new(settings: RetrievalSettings) -> Result<Self, RetrievalError> {
        let http_client = Client::builder()
            .default_headers(browser_headers(&settings.user_agent))
            .timeout(settings.http_timeout())
            .build()?;

        Ok(Retriever {
            http_client,
            settings,
        })
    }

    pub fn source_timeout(&self) -> Duration {
        self.settings.source_timeout()
    }

    pub async fn retrieve(
        &self,
        source: &SourceDefinition,
        query: &str,
    ) -> Result<Page, RetrievalError> {
        let url = source.search_url(query);

        let rendered = match self.render(&url).await {
            Ok(markup) if source.kind.has_listings(&markup) => {
                return Ok(Page {
                    markup,
                    tier: RetrievalTier::Rendered,
                })
            }
            Ok(_) => RetrievalError::NoListings {
                tier: RetrievalTier::Rendered,
            },
            Err(e) => e,
        };
        log::info!(
            "Rendered fetch of {} failed ({}), trying plain HTTP",
            source.name,
            rendered
        );

        match self.fetch(&url).await {
            Ok(markup) => Ok(Page {
                markup,
                tier: RetrievalTier::Http,
            }),
            Err(http) => Err(RetrievalError::Exhausted {
                rendered: Box::new(rendered),
                http: Box::new(http),
            }),
        }
    }

    /// Loads `url` in a fresh browser session. The session is always closed
    /// before returning.
    async fn render(&self, url: &str) -> Result<String, RetrievalError> {
        let browser = &self.settings.browser;
        if !browser.enabled {
            return Err(RetrievalError::BrowserDisabled);
        }

        let timed_out = || RetrievalError::Timeout {
            tier: RetrievalTier::Rendered,
            after: browser.navigation_timeout(),
        };

        let droid = tokio::time::timeout(
            browser.navigation_timeout(),
            Droid::launch(browser, &self.settings.user_agent),
        )
        .await
        .map_err(|_| timed_out())??;

        log::info!("Loading: {}", url);
        let rendered = async {
            tokio::time::timeout(browser.navigation_timeout(), droid.driver().goto(url))
                .await
                .map_err(|_| timed_out())??;
            // Deferred listings fill in after DOMContentLoaded.
            tokio::time::sleep(browser.settle_interval()).await;

            Ok::<_, RetrievalError>(droid.driver().source().await?)
        }
        .await;

        droid.quit().await;
        rendered
    }

    async fn fetch(&self, url: &str) -> Result<String, RetrievalError> {
        log::info!("Plain HTTP fetch for: {}", url);
        let markup = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(markup)
    }
}

fn browser_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(user_agent) {
        headers.insert(USER_AGENT, value);
    }
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn browser_headers_mimic_desktop_browser() {
        let headers = browser_headers("Mozilla/5.0 (Windows NT 10.0; Win64; x64)");

        assert_eq!(headers[USER_AGENT], "Mozilla/5.0 (Windows NT 10.0; Win64; x64)");
        assert_eq!(headers[ACCEPT_LANGUAGE], "en-US,en;q=0.5");
        assert_eq!(headers[UPGRADE_INSECURE_REQUESTS], "1");
        assert_eq!(headers.len(), 6);
    }

    #[test]
    fn exhausted_error_reports_both_tiers() {
        let error = RetrievalError::Exhausted {
            rendered: Box::new(RetrievalError::BrowserDisabled),
            http: Box::new(RetrievalError::NoListings {
                tier: RetrievalTier::Http,
            }),
        };

        assert_eq!(
            error.to_string(),
            "all tiers failed (rendered: browser tier disabled; http: plain HTTP fetch returned no listings)"
        );
    }
}
