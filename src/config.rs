use clap::{Args, Parser, Subcommand};
use std::time::Duration;

use crate::kernel::time::REVEAL_INTERVAL_MS;
use crate::outputs::presenter::PresenterConfig;
use crate::server::store::DEFAULT_MAX_STORED;
use crate::services::capability::VoiceParams;
use crate::services::provider::ProviderConfig;

#[derive(Debug, Parser)]
#[command(name = "roastme", version, about = "Fill out a form, get roasted")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    // Without a subcommand: interactive roast session in the terminal
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the roast service
    Serve(ServeArgs),
}

#[derive(Debug, Clone, Args)]
pub struct SessionArgs {
    /// Base URL of the roast service; without it roasts come from the built-in samples
    #[arg(long, env = "ROAST_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Delay between revealed roast lines
    #[arg(long, default_value_t = REVEAL_INTERVAL_MS)]
    pub reveal_interval_ms: u64,

    /// Seed for picking built-in sample roasts
    #[arg(long)]
    pub seed: Option<u64>,

    /// Simulated latency of the built-in sample provider
    #[arg(long, default_value_t = 2000)]
    pub local_delay_ms: u64,

    /// Page reference included when sharing
    #[arg(long, env = "ROAST_PAGE_URL", default_value = "http://localhost:3000/")]
    pub page_url: String,
}

impl SessionArgs {
    pub fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            backend_url: self.backend_url.clone(),
            seed: self.seed,
            local_delay: Duration::from_millis(self.local_delay_ms),
        }
    }

    pub fn presenter_config(&self) -> PresenterConfig {
        PresenterConfig {
            reveal_interval: Duration::from_millis(self.reveal_interval_ms),
            page_url: self.page_url.clone(),
            voice: VoiceParams::default(),
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "ROAST_BIND", default_value = "0.0.0.0:8001")]
    pub bind: String,

    /// Without a key every roast is the fallback roast
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    pub openai_base_url: String,

    #[arg(long, env = "ROAST_MODEL", default_value = "gpt-4")]
    pub model: String,

    /// Roasts kept for lookup by id; the oldest go first
    #[arg(long, env = "ROAST_MAX_STORED", default_value_t = DEFAULT_MAX_STORED)]
    pub max_stored: usize,
}
