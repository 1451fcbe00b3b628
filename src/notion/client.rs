//! Notion REST client

use crate::config::RelayConfig;
use crate::error::{AppError, Result};
use crate::notion::types::*;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use tracing::{debug, warn};

/// Pinned API version sent with every request
pub const NOTION_VERSION: &str = "2022-06-28";

/// Thin wrapper over one shared `reqwest::Client`
#[derive(Clone)]
pub struct NotionClient {
    client: Client,
    base_url: String,
}

impl NotionClient {
    pub fn new(config: &RelayConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.notion_api_url.clone(),
        })
    }

    fn get_headers(&self, token: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AppError::Config("NOTION_TOKEN contains invalid header characters".to_string()))?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert("notion-version", HeaderValue::from_static(NOTION_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Create a page in `database_id`. Returns the new page id.
    ///
    /// A status >= 400 yields `AppError::Upstream` with the body text verbatim.
    pub async fn create_page(
        &self,
        token: &str,
        database_id: &str,
        properties: &PropertyMap,
    ) -> Result<Option<String>> {
        let body = CreatePageRequest {
            parent: Parent { database_id },
            properties,
        };

        let response = self
            .client
            .post(format!("{}/v1/pages", self.base_url))
            .headers(self.get_headers(token)?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status.as_u16() >= 400 {
            warn!("Notion rejected page creation with status {}", status);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        let page: CreatedPage = serde_json::from_str(&text)?;
        debug!("Notion page created: {:?}", page.id);
        Ok(page.id)
    }
}
