use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use logo_inpaint::server::{serve, ServerConfig, DEFAULT_BODY_LIMIT, DEFAULT_PORT};
use logo_inpaint::{InpaintAlgorithm, InpaintOptions, DEFAULT_RADIUS};

#[derive(Parser)]
#[command(
    name = "logo-inpaint-server",
    about = "HTTP service: POST /inpaint with multipart image + mask, get a PNG back",
    version
)]
struct Cli {
    /// Listening port
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Neighborhood radius around each masked pixel
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    radius: u32,

    /// Inpainting algorithm variant
    #[arg(short, long, value_enum, default_value_t = InpaintAlgorithm::Telea)]
    algorithm: InpaintAlgorithm,

    /// Maximum request body size in mebibytes
    #[arg(long, default_value_t = DEFAULT_BODY_LIMIT / (1024 * 1024))]
    body_limit_mib: usize,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "logo_inpaint=info,tower_http=info".into()),
        )
        .init();

    let cli = Cli::parse();

    if cli.radius == 0 {
        eprintln!("Error: Radius must be at least 1");
        process::exit(1);
    }

    let config = ServerConfig {
        options: InpaintOptions {
            radius: cli.radius,
            algorithm: cli.algorithm,
        },
        body_limit: cli.body_limit_mib * 1024 * 1024,
    };

    if let Err(e) = serve(cli.port, config).await {
        eprintln!("Error: Server failed: {e}");
        process::exit(1);
    }
}
