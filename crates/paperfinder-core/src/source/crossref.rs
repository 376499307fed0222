use std::future::Future;
use std::pin::Pin;

use super::{FetchError, WorksSource, extract_items};
use crate::record::WorkRecord;

/// Crossref REST API client. One GET per search, no retries.
pub struct Crossref {
    client: reqwest::Client,
    mailto: Option<String>,
}

impl Crossref {
    pub fn new(client: reqwest::Client, mailto: Option<String>) -> Self {
        Self { client, mailto }
    }

    fn user_agent(&self) -> String {
        match self.mailto.as_deref() {
            Some(email) if !email.is_empty() => {
                format!("PaperFinder/{} (mailto:{})", env!("CARGO_PKG_VERSION"), email)
            }
            _ => format!("PaperFinder/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Default for Crossref {
    fn default() -> Self {
        Self::new(reqwest::Client::new(), None)
    }
}

/// Turn a works-search response into records.
///
/// Non-success status and unparseable JSON are errors; a parseable body
/// without `message.items` is an empty result.
pub async fn read_response(resp: reqwest::Response) -> Result<Vec<WorkRecord>, FetchError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status(status));
    }
    let bytes = resp.bytes().await?;
    let data: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Body(e.to_string()))?;
    Ok(extract_items(&data))
}

impl WorksSource for Crossref {
    fn name(&self) -> &str {
        "Crossref"
    }

    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<WorkRecord>, FetchError>> + Send + 'a>> {
        Box::pin(async move {
            tracing::debug!(url, "crossref request");
            let resp = self
                .client
                .get(url)
                .header("User-Agent", self.user_agent())
                .send()
                .await?;
            read_response(resp).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &'static str) -> reqwest::Response {
        let http_resp = http::Response::builder().status(status).body(body).unwrap();
        reqwest::Response::from(http_resp)
    }

    #[tokio::test]
    async fn ok_body_yields_items() {
        let resp = response(200, r#"{"message":{"items":[{"DOI":"10.1/a"},{"DOI":"10.1/b"}]}}"#);
        let items = read_response(resp).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].doi(), Some("10.1/a"));
    }

    #[tokio::test]
    async fn ok_body_without_items_is_empty() {
        let resp = response(200, r#"{"status":"ok","message":{}}"#);
        assert!(read_response(resp).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let err = read_response(response(503, "")).await.unwrap_err();
        match err {
            FetchError::Status(s) => assert_eq!(s.as_u16(), 503),
            other => panic!("expected Status, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_json_is_body_error() {
        let err = read_response(response(200, "<html>")).await.unwrap_err();
        assert!(matches!(err, FetchError::Body(_)));
    }

    #[test]
    fn user_agent_mentions_mailto() {
        let client = Crossref::new(reqwest::Client::new(), Some("me@example.org".into()));
        assert!(client.user_agent().contains("mailto:me@example.org"));
        assert!(!Crossref::default().user_agent().contains("mailto"));
    }
}
