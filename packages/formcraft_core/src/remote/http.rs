use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::{Page, PageQuery, PagedSource, RemoteError};

/// Fetches `GET {base_url}/{resource}/?page={n}`.
pub struct HttpPagedSource {
    client: reqwest::Client,
    base_url: String,
    resource: String,
}

impl HttpPagedSource {
    pub fn new(base_url: impl Into<String>, resource: impl Into<String>) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("formcraft/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::Http(e.to_string()))?;
        Ok(Self::with_client(client, base_url, resource))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        resource: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            resource: resource.into(),
        }
    }

    pub fn page_url(&self, query: PageQuery) -> String {
        format!(
            "{}/{}/?page={}",
            self.base_url.trim_end_matches('/'),
            self.resource.trim_matches('/'),
            query.page
        )
    }
}

#[async_trait]
impl<T> PagedSource<T> for HttpPagedSource
where
    T: DeserializeOwned + Send + 'static,
{
    async fn fetch(&self, query: PageQuery) -> Result<Page<T>, RemoteError> {
        let url = self.page_url(query);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RemoteError::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RemoteError::NoSuchPage(query.page));
        }
        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                url,
            });
        }

        response
            .json::<Page<T>>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        let source = HttpPagedSource::with_client(reqwest::Client::new(), "https://swapi.dev/api/", "/people/");
        assert_eq!(
            source.page_url(PageQuery::new(2)),
            "https://swapi.dev/api/people/?page=2"
        );
        assert_eq!(
            source.page_url(PageQuery::new(0)),
            "https://swapi.dev/api/people/?page=1"
        );
    }
}
