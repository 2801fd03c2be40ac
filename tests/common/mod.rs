#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use shrtn::application::services::ShortenerService;
use shrtn::domain::entities::{Mapping, NewMapping};
use shrtn::domain::errors::{Column, StoreError};
use shrtn::domain::repositories::MappingRepository;
use shrtn::infrastructure::persistence::InMemoryMappingRepository;
use shrtn::routes::{RouterSettings, router};
use shrtn::state::AppState;
use shrtn::utils::token_generator::RandomTokenGenerator;

pub const BASE_URL: &str = "http://sho.rt/";

pub fn create_test_service() -> Arc<ShortenerService> {
    Arc::new(ShortenerService::new(
        Arc::new(InMemoryMappingRepository::new()),
        Arc::new(RandomTokenGenerator::new()),
    ))
}

pub fn create_test_state() -> AppState {
    AppState::new(create_test_service(), BASE_URL)
}

pub fn create_test_server() -> TestServer {
    server_for(create_test_state())
}

pub fn server_for(state: AppState) -> TestServer {
    TestServer::new(router(state, RouterSettings::default())).unwrap()
}

/// Flips the case of every ASCII letter.
pub fn swap_case(token: &str) -> String {
    token
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

pub fn server_with(state: AppState, settings: RouterSettings) -> TestServer {
    TestServer::new(router(state, settings)).unwrap()
}

pub fn state_over(repository: Arc<dyn MappingRepository>) -> AppState {
    let shortener = ShortenerService::new(repository, Arc::new(RandomTokenGenerator::new()));
    AppState::new(Arc::new(shortener), BASE_URL)
}

/// How a [`StubRepository`] misbehaves.
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Lookups by token sleep for the given time, then find nothing.
    Slow(Duration),
    /// Every call fails with a backend error.
    Unreachable,
    /// Every insert reports a token collision.
    Colliding,
}

/// Mapping store double that records how many token lookups overlap.
pub struct StubRepository {
    behavior: Behavior,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
}

impl StubRepository {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            in_flight: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    /// Highest number of `find_by_short` calls seen running at once.
    pub fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    fn unreachable(&self) -> Result<(), StoreError> {
        match self.behavior {
            Behavior::Unreachable => Err(StoreError::backend(std::io::Error::other(
                "connection refused",
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl MappingRepository for StubRepository {
    async fn find_by_long(&self, _long_url: &str) -> Result<Option<Mapping>, StoreError> {
        self.unreachable()?;
        Ok(None)
    }

    async fn find_by_short(&self, _short_token: &str) -> Result<Option<Mapping>, StoreError> {
        self.unreachable()?;

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if let Behavior::Slow(delay) = self.behavior {
            tokio::time::sleep(delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(None)
    }

    async fn insert(&self, new_mapping: NewMapping) -> Result<Mapping, StoreError> {
        self.unreachable()?;

        if let Behavior::Colliding = self.behavior {
            return Err(StoreError::UniquenessViolation {
                column: Some(Column::ShortToken),
            });
        }

        Ok(Mapping::new(
            1,
            new_mapping.long_url,
            new_mapping.short_token,
            Utc::now(),
        ))
    }

    async fn count(&self) -> Result<i64, StoreError> {
        self.unreachable()?;
        Ok(0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.unreachable()
    }
}
