//! HTTP artifact fetcher

use super::Fetcher;
use crate::{PlayStatsError, Result};

/// Downloads artifacts by substituting the remote ID into a URL template
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    url_template: String,
}

impl HttpFetcher {
    pub fn new(url_template: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("playstats/0.1")
            .timeout(std::time::Duration::from_secs(120))
            .build()?;

        Ok(HttpFetcher {
            client,
            url_template: url_template.to_string(),
        })
    }

    pub fn url_for(&self, remote_id: &str) -> String {
        self.url_template.replace("{id}", remote_id)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, remote_id: &str) -> Result<Vec<u8>> {
        let url = self.url_for(remote_id);
        log::info!("Downloading {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(PlayStatsError::Artifact {
                path: url,
                message: format!("server returned {}", response.status()),
            });
        }

        Ok(response.bytes()?.to_vec())
    }
}
