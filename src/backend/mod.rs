use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;

use crate::{
    error::MatchError,
    input::FileSelection,
    models::{HealthResponse, ResultSet},
};

/// The external matching service. Every call is a single attempt; nothing here
/// retries, queues or cancels.
#[async_trait]
pub trait MatchBackend: Send + Sync {
    fn name(&self) -> &str;

    async fn submit_file(&self, file: &FileSelection) -> Result<ResultSet, MatchError>;
    async fn submit_url(&self, url: &Url) -> Result<ResultSet, MatchError>;
    async fn health(&self) -> Result<HealthResponse, MatchError>;
}

pub mod http;

pub use http::HttpBackend;

pub(crate) type SharedMatchBackend = Arc<dyn MatchBackend>;

#[cfg(test)]
pub(crate) mod fake {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    /// Scripted backend: hands out queued outcomes and counts calls.
    #[derive(Default)]
    pub(crate) struct FakeBackend {
        outcomes: Mutex<Vec<Result<ResultSet, MatchError>>>,
        health: Mutex<Option<Result<HealthResponse, MatchError>>>,
        pub(crate) calls: AtomicUsize,
    }

    impl FakeBackend {
        pub(crate) fn with(outcomes: Vec<Result<ResultSet, MatchError>>) -> Self {
            let mut outcomes = outcomes;
            outcomes.reverse();
            Self {
                outcomes: Mutex::new(outcomes),
                ..Default::default()
            }
        }

        pub(crate) fn with_health(self, health: Result<HealthResponse, MatchError>) -> Self {
            *self.health.lock().unwrap() = Some(health);
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn next(&self) -> Result<ResultSet, MatchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcomes
                .lock()
                .unwrap()
                .pop()
                .expect("fake backend ran out of outcomes")
        }
    }

    #[async_trait]
    impl MatchBackend for FakeBackend {
        fn name(&self) -> &str {
            "fake"
        }

        async fn submit_file(&self, _file: &FileSelection) -> Result<ResultSet, MatchError> {
            self.next()
        }

        async fn submit_url(&self, _url: &Url) -> Result<ResultSet, MatchError> {
            self.next()
        }

        async fn health(&self) -> Result<HealthResponse, MatchError> {
            self.health
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Err(MatchError::Transport { status: 503 }))
        }
    }
}
