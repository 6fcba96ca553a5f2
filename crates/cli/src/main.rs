use std::{io, path::PathBuf, process::ExitCode};

use {
    clap::Parser,
    clawsetup_provider_setup::run_setup,
    tracing::debug,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(
    name = "clawsetup",
    version,
    about = "Configure an LLM provider for the OpenClaw gateway"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// OpenClaw directory holding `openclaw.json` (default: ~/.openclaw).
    #[arg(long, env = "OPENCLAW_HOME")]
    openclaw_home: Option<PathBuf>,

    /// Config file to edit (overrides --openclaw-home).
    #[arg(long, env = "OPENCLAW_CONFIG_PATH")]
    config: Option<PathBuf>,
}

/// Initialise tracing. Logs go to stderr so they never interleave with the
/// prompts on stdout.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_writer(io::stderr),
            )
            .init();
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config_path =
        clawsetup_config::resolve_config_path(cli.config.as_deref(), cli.openclaw_home.as_deref())?;
    debug!(path = %config_path.display(), "using config file");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut out = io::stdout().lock();
    run_setup(&mut reader, &mut out, &config_path)?;
    Ok(())
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!(error = %err, "setup failed");
            match err.downcast_ref::<clawsetup_provider_setup::Error>() {
                Some(setup_err) if setup_err.is_user_input() => eprintln!("{setup_err}"),
                _ => eprintln!("Error: {err:#}"),
            }
            ExitCode::FAILURE
        },
    }
}
