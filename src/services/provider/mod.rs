pub mod dispatch;
pub mod local;
pub mod remote;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::error::ProviderError;
use crate::kernel::form::SubmissionRecord;
use crate::kernel::roast::RoastResult;

pub use dispatch::RoastDispatcher;
pub use local::LocalProvider;
pub use remote::RemoteProvider;

/// Turns a submission into a roast. One call, one answer, one error type.
#[async_trait]
pub trait RoastProvider: Send + Sync {
    fn name(&self) -> &'static str;
    async fn generate(&self, record: &SubmissionRecord) -> Result<RoastResult, ProviderError>;
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    /// Base URL of the roast service. `None` selects the local sample pool.
    pub backend_url: Option<String>,
    pub seed: Option<u64>,
    pub local_delay: Duration,
}

/// Picks the provider once, at startup.
pub fn select(config: &ProviderConfig) -> Arc<dyn RoastProvider> {
    match config.backend_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => {
            info!("Roast provider: remote ({})", url);
            Arc::new(RemoteProvider::new(url))
        }
        _ => {
            info!("Roast provider: local sample pool");
            let provider = match config.seed {
                Some(seed) => LocalProvider::with_seed(seed),
                None => LocalProvider::new(),
            };
            Arc::new(provider.with_delay(config.local_delay))
        }
    }
}
