//! Plant identification from a photo.
//!
//! There is no recognition model: [`MockIdentifier`] waits a fixed delay to
//! stand in for a network round trip and then picks a random catalog species.
//! Callers depend on the [`Identifier`] trait so a real provider or a
//! deterministic stub can take its place.
//!
//! Dropping the returned future abandons the identification; there is no
//! separate cancellation error.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use rand::seq::SliceRandom;

use crate::catalog::Catalog;
use crate::models::Species;

pub type IdentifyFuture<'a> = Pin<Box<dyn Future<Output = Option<Species>> + Send + 'a>>;

/// Something that can name the species in a photo.
pub trait Identifier: Send + Sync {
    /// Identify the plant in `image` (an opaque reference such as a file path
    /// or URI). Resolves to `None` when nothing was recognized.
    fn identify<'a>(&'a self, image: &'a str) -> IdentifyFuture<'a>;
}

/// Pretends to identify: sleeps, then returns a uniformly random species.
#[derive(Debug, Clone)]
pub struct MockIdentifier {
    catalog: Arc<Catalog>,
    delay: Duration,
}

impl MockIdentifier {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(2);

    pub fn new(catalog: Arc<Catalog>, delay: Duration) -> Self {
        Self { catalog, delay }
    }
}

impl Identifier for MockIdentifier {
    fn identify<'a>(&'a self, image: &'a str) -> IdentifyFuture<'a> {
        Box::pin(async move {
            if image.trim().is_empty() {
                return None;
            }
            tracing::debug!("Identifying {} (simulated, {:?})", image, self.delay);
            tokio::time::sleep(self.delay).await;

            let picked = self
                .catalog
                .species()
                .choose(&mut rand::thread_rng())
                .cloned();
            if let Some(ref species) = picked {
                tracing::info!("Identified {} as {}", image, species.name);
            }
            picked
        })
    }
}

/// Always answers with the same result.
#[derive(Debug, Clone, Default)]
pub struct FixedIdentifier {
    result: Option<Species>,
}

impl FixedIdentifier {
    pub fn new(result: Option<Species>) -> Self {
        Self { result }
    }
}

impl Identifier for FixedIdentifier {
    fn identify<'a>(&'a self, _image: &'a str) -> IdentifyFuture<'a> {
        let result = self.result.clone();
        Box::pin(async move { result })
    }
}
