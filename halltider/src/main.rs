use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use halltider::config::Config;
use halltider::console;
use halltider::domain::OriginTable;
use halltider::resrobot::ResRobotClient;
use halltider::web::{AppState, create_router};

/// Arrival board for a fixed ResRobot stop.
///
/// Run with: RESROBOTAPIKEY=<APIKEY> halltider [-d]
#[derive(Parser)]
#[command(name = "halltider")]
struct Cli {
    /// Print the board once with debug logging instead of starting the server
    #[arg(short = 'd')]
    debug: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = match Config::from_env(cli.debug) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let client = match ResRobotClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("failed to create ResRobot client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let origins = OriginTable::standard();

    if config.debug {
        return match console::run(&client, &origins, &config).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!(severity = ?e.severity(), "{e}");
                ExitCode::FAILURE
            }
        };
    }

    let addr = config.listen_addr;
    let app = create_router(AppState::new(client, origins, config));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Hålltider listening on http://{addr}");
    info!("  GET  /halltider  - arrivals split by direction");
    info!("  GET  /static/*   - static assets");
    info!("  GET  /health     - health check");

    match axum::serve(listener, app).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("server error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr, `info` by default and `debug` for this crate in debug
/// mode. `RUST_LOG` overrides both.
fn init_tracing(debug: bool) {
    let default = if debug { "info,halltider=debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
