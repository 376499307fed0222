//! Mock works source for tests.

use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{FetchError, WorksSource};
use crate::record::WorkRecord;

/// A configurable mock response for [`MockSource`].
#[derive(Clone, Debug)]
pub enum MockResponse {
    Items(Vec<WorkRecord>),
    /// Simulate a non-success HTTP status.
    Status(u16),
    /// Simulate an unparseable body.
    Malformed(String),
}

/// A hand-rolled [`WorksSource`] that replays canned responses.
///
/// Each call pops the next queued response; once the queue is empty the
/// fallback is returned forever. Requested URLs are recorded.
pub struct MockSource {
    responses: Mutex<Vec<MockResponse>>,
    fallback: MockResponse,
    delay: Option<Duration>,
    urls: Mutex<Vec<String>>,
    call_count: AtomicUsize,
}

impl MockSource {
    pub fn new(response: MockResponse) -> Self {
        Self {
            responses: Mutex::new(Vec::new()),
            fallback: response,
            delay: None,
            urls: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    pub fn items(items: Vec<WorkRecord>) -> Self {
        Self::new(MockResponse::Items(items))
    }

    /// Responses in order; the last one repeats.
    pub fn with_sequence(mut responses: Vec<MockResponse>) -> Self {
        assert!(!responses.is_empty(), "sequence must have at least one response");
        let fallback = responses[responses.len() - 1].clone();
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            ..Self::new(fallback)
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.urls.lock().map(|u| u.clone()).unwrap_or_default()
    }

    fn next_response(&self) -> MockResponse {
        match self.responses.lock() {
            Ok(mut seq) => seq.pop().unwrap_or_else(|| self.fallback.clone()),
            Err(_) => self.fallback.clone(),
        }
    }
}

impl WorksSource for MockSource {
    fn name(&self) -> &str {
        "Mock"
    }

    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<WorkRecord>, FetchError>> + Send + 'a>> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(url.to_string());
        }
        let response = self.next_response();
        let delay = self.delay;

        Box::pin(async move {
            if let Some(d) = delay {
                tokio::time::sleep(d).await;
            }
            match response {
                MockResponse::Items(items) => Ok(items),
                MockResponse::Status(code) => Err(FetchError::Status(
                    reqwest::StatusCode::from_u16(code)
                        .unwrap_or(reqwest::StatusCode::INTERNAL_SERVER_ERROR),
                )),
                MockResponse::Malformed(msg) => Err(FetchError::Body(msg)),
            }
        })
    }
}
