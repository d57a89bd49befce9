use std::io;

use clap::Command;
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, fmt};

use structure_inspector::{ColorHelper, InspectorConfig, run};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Command::new("structure-inspector")
        .about("Print the field names and a sample of the first record in a Directus collection")
        .version(env!("CARGO_PKG_VERSION"))
        .after_help(
            "ENVIRONMENT:\n\
             \x20 DIRECT_US_ACCESS_TOKEN   Bearer token sent with the request\n\
             \x20 INSPECTOR_BASE_URL       Directus base URL (default: http://localhost:8055)\n\
             \x20 INSPECTOR_COLLECTION     Collection to inspect (default: criminal_db)\n\
             \x20 INSPECTOR_TIMEOUT_SECS   Request timeout in seconds (default: none)\n\
             \x20 INSPECTOR_COLOR          auto, always or never (default: auto)\n\n\
             Variables are also read from a .env file in the working directory.",
        )
        .get_matches();

    // Values already in the environment take precedence over .env
    dotenv::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(io::stderr)
        .init();

    let config = InspectorConfig::from_env();
    let color_helper = ColorHelper::new(config.color_mode);

    let rt = Builder::new_current_thread().enable_all().build()?;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Failures are already reported on stdout; the exit status stays 0
    rt.block_on(run(&config, &mut out, &color_helper))?;

    Ok(())
}
