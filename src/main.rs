use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use contentflow::config::Config;
use contentflow::error::Error;

#[actix_web::main]
async fn main() -> Result<(), Error> {
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_span_events(FmtSpan::NEW)
        .compact()
        .init();

    tracing::info!("starting with {:?}", config);
    contentflow::run(config).await
}
