use pomo::commands::Cli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging only when debug output was asked for; otherwise
    // the msg_* macros print plain console text.
    if std::env::var("RUST_LOG").is_ok() || std::env::var("POMO_DEBUG").is_ok() {
        tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env().add_directive("pomo=debug".parse()?)).init();
    }

    Cli::menu().await
}
