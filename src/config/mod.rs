use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod settings;

pub use settings::{ServerSettings, DEFAULT_MAX_INPUT_SIZE};

/// Initialize logging system with structured output and environment-based level filtering
pub fn init_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("kantraviz=info,tokio=warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_names(false)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .compact(),
        )
        .try_init()?;

    tracing::info!("Structured logging initialized");
    Ok(())
}

/// Initialize logging for testing with reduced verbosity
pub fn init_test_logging() -> anyhow::Result<()> {
    let env_filter = EnvFilter::new("kantraviz=debug");

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_test_writer().compact())
        .try_init()
        .or_else(|_| Ok(())) // Ignore if already initialized
}
