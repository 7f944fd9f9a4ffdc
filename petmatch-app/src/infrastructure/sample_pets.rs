use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use petmatch_errors::AppError;

use super::PetRepo;
use crate::domain::Pet;

const FIXTURE: &str = include_str!("../../../fixtures/pets.json");
const DEFAULT_LATENCY_MS: u64 = 400;

/// Bundled stand-in for the real pet service: serves a canned list with a
/// small artificial latency, and can be armed to fail exactly one fetch so
/// the error path is reachable from the CLI.
pub struct SamplePets {
    latency: Duration,
    fail_next: AtomicBool,
}

impl SamplePets {
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(DEFAULT_LATENCY_MS))
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            fail_next: AtomicBool::new(false),
        }
    }

    /// Arm the source: the next `get_pets` call reports an outage, the one
    /// after serves normally again.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

impl Default for SamplePets {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PetRepo for SamplePets {
    async fn get_pets(&self) -> Result<Vec<Pet>, AppError> {
        tokio::time::sleep(self.latency).await;

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::Unavailable("armed sample outage".to_string()));
        }

        serde_json::from_str(FIXTURE).map_err(|e| AppError::Malformed(e.to_string()))
    }
}
