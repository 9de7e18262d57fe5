//! HTTP rights-protection client
//!
//! Posts finished document bytes to an external protection service and
//! returns the protected bytes it sends back. Transport and non-success
//! responses both surface as `GenerateError::Protection`.

use async_trait::async_trait;
use pdf_letterhead::{GenerateError, RightsProtector};
use reqwest::Client;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct HttpProtector {
    client: Client,
    endpoint: String,
}

impl HttpProtector {
    pub fn new(endpoint: String) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl RightsProtector for HttpProtector {
    async fn protect(&self, document: Vec<u8>) -> pdf_letterhead::Result<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/pdf")
            .body(document)
            .send()
            .await
            .map_err(|e| GenerateError::Protection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Protection(format!(
                "service returned {status}: {body}"
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GenerateError::Protection(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}
