//! HTTP transport for the neighbors service

use async_trait::async_trait;
use reqwest::{redirect, Client, Url};

use super::{BoxedSession, NeighborService, NeighborSession};
use crate::config::CrawlerConfig;
use crate::error::{CrawlError, Result};
use crate::node::NodeId;

const MAX_REDIRECTS: usize = 10;

/// Opens one [`HttpSession`] per worker against `config.base_url`
#[derive(Debug, Clone)]
pub struct HttpNeighborService {
    config: CrawlerConfig,
}

impl HttpNeighborService {
    pub fn new(config: CrawlerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl NeighborService for HttpNeighborService {
    fn open_session(&self) -> Result<BoxedSession> {
        Ok(Box::new(HttpSession::new(&self.config)?))
    }
}

/// A worker's own HTTP client
///
/// Requests are `GET {base_url}/{node}` with the node percent-encoded as a
/// single path segment. Any non-2xx status is reported as an error.
#[derive(Debug)]
pub struct HttpSession {
    client: Client,
    base_url: Url,
}

impl HttpSession {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.retry.connect_timeout)
            .timeout(config.retry.request_timeout)
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| CrawlError::Session(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.parsed_base_url()?,
        })
    }

    /// URL queried for `node`
    pub fn node_url(&self, node: &NodeId) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| CrawlError::InvalidBaseUrl {
                url: self.base_url.to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .push(node.as_str());
        Ok(url)
    }
}

#[async_trait]
impl NeighborSession for HttpSession {
    async fn fetch_raw(&mut self, node: &NodeId) -> Result<String> {
        let url = self.node_url(node)?;
        tracing::debug!(node = %node, url = %url, "Sending neighbors request");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CrawlError::Transport {
                node: node.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                node: node.clone(),
                status,
            });
        }

        response.text().await.map_err(|source| CrawlError::Transport {
            node: node.clone(),
            source,
        })
    }
}
