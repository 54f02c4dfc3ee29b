use std::time::Duration;

use reqwest::Client;
use tracing::{info, instrument};
use url::Url;

use crate::error::{Error, Result};
use crate::sync::do_sync;

/// Downloads playlist text over HTTP(S).
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)?;

        Ok(Self { client })
    }

    /// GET `url` and return the body as text. Non-2xx statuses are errors.
    #[instrument(skip_all, fields(url = %url))]
    pub fn fetch(&self, url: &Url) -> Result<String> {
        let network_error = |source| Error::Network {
            url: url.to_string(),
            source,
        };

        let body = do_sync(async {
            self.client
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .text()
                .await
        })
        .map_err(network_error)?;

        info!(bytes = body.len(), "downloaded playlist");
        Ok(body)
    }
}
