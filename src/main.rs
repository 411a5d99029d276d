use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use geofence::location::providers::{DEFAULT_NOMINATIM_URL, DEFAULT_USER_AGENT};
use geofence::location::{NominatimConfig, NominatimGeocoder};
use geofence::server::{self, ServerConfig};

/// Geofence API: is the user within 100 m of a named building?
///
/// Resolves building names through OpenStreetMap Nominatim and checks
/// reported locations against a fixed radius around them.
///
/// Examples:
///   geofence
///   geofence --port 9000
///   geofence --nominatim-url http://localhost:8080 --courtesy-delay-ms 0
#[derive(Parser)]
#[command(name = "geofence", version, about, long_about = None)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on.
    #[arg(long, short = 'p', default_value_t = 8000)]
    port: u16,

    /// Nominatim base URL (the `/search` path is appended).
    #[arg(long, default_value = DEFAULT_NOMINATIM_URL)]
    nominatim_url: String,

    /// User-Agent sent to Nominatim, as its usage policy requires.
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Geocoding request timeout in seconds.
    #[arg(long, default_value_t = 10)]
    timeout_secs: u64,

    /// Pause before standalone building lookups, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    courtesy_delay_ms: u64,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "geofence=trace").
    #[arg(long, default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let geocoder = NominatimGeocoder::new(NominatimConfig {
        base_url: cli.nominatim_url,
        user_agent: cli.user_agent,
        timeout: Duration::from_secs(cli.timeout_secs),
    });

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        courtesy_delay: Duration::from_millis(cli.courtesy_delay_ms),
    };

    server::start(config, Arc::new(geocoder)).await
}
