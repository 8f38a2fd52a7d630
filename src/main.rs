use clap::Parser;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use roastme::config::{Cli, Command, ServeArgs, SessionArgs};
use roastme::kernel::reactor::Reactor;
use roastme::outputs::console;
use roastme::server::store::RoastStore;
use roastme::server::{self, AppState};
use roastme::services::capability::Capabilities;
use roastme::services::llm::LLMService;
use roastme::services::provider;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // The session shares the terminal with the user, so keep it quiet by default
    let default_level = match cli.command {
        Some(Command::Serve(_)) => "info",
        None => "warn",
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Some(Command::Serve(args)) => serve(args).await,
        None => session(cli.session).await,
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    tracing::info!("Roast service booting...");
    let llm = LLMService::new(args.openai_base_url, args.openai_api_key, args.model);
    let store = RoastStore::with_capacity(args.max_stored);
    server::run(&args.bind, Arc::new(AppState::with_store(llm, store))).await
}

async fn session(args: SessionArgs) -> anyhow::Result<()> {
    // Session channel
    let (tx, rx) = mpsc::channel(100);
    // Session -> front end
    let (ui_tx, ui_rx) = mpsc::unbounded_channel();

    let provider = provider::select(&args.provider_config());
    let capabilities = Capabilities::detect();
    tracing::info!("Capabilities: {:?}", capabilities);

    let mut reactor = Reactor::new(
        rx,
        tx.clone(),
        provider,
        capabilities,
        ui_tx,
        args.presenter_config(),
    );

    let front_end = tokio::spawn(console::run(ui_rx, tx));

    println!("AI ROAST ME");
    println!("Ready to get absolutely obliterated? Fill out the form and prepare for digital destruction!");
    reactor.run().await;

    let _ = front_end.await;
    Ok(())
}
