use anyhow::Result;
use clap::Parser;
use incident_trends::cli::{Cli, Commands};
use incident_trends::commands::{self, AnalyzeConfig};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Analyze {
            csv_path,
            out,
            format,
            config,
            schema,
            top,
        } => {
            commands::handle_analyze(AnalyzeConfig {
                csv_path,
                out,
                format,
                config,
                schema,
                top,
            })?;
            Ok(())
        }
        Commands::Init { force } => commands::init_config(force),
    }
}

/// `-v` flags set the level only when RUST_LOG is absent.
fn init_logging(verbosity: u8) {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
    if std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(verbosity_level(verbosity));
    }
    builder.format_timestamp(None).init();
}

fn verbosity_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
