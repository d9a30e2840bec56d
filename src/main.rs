use anyhow::Context;
use clap::Parser;
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;
use stylesweep::config::DEFAULT_CONFIG_PATH;
use stylesweep::Config;

/// Render every combination of a style sweep and screenshot each variant
#[derive(Parser, Debug)]
#[command(name = "stylesweep", version, about)]
struct Cli {
    /// Path to the JSON config
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the number of elements rendered per page
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Only write the HTML for all variants; do not start a browser
    #[arg(long)]
    html_only: bool,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::from_path(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(n) = cli.batch_size {
        config.batch_size = n;
        config.validate()?;
    }

    if cli.html_only {
        stylesweep::write_html_only(&config)?;
        return Ok(());
    }

    capture(&config)
}

#[cfg(feature = "cdp")]
fn capture(config: &Config) -> anyhow::Result<()> {
    stylesweep::capture_all::<stylesweep::cdp::CdpEngine>(config)?;
    Ok(())
}

#[cfg(not(feature = "cdp"))]
fn capture(_config: &Config) -> anyhow::Result<()> {
    Err(stylesweep::Error::Other(
        "built without a browser backend; enable the `cdp` feature or pass --html-only".into(),
    )
    .into())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
