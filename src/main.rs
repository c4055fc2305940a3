use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use gestureforge::config::EngineConfig;
use gestureforge::error::GfResult;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file (JSON). Flags typed on the command line win.
    #[arg(global = true, long)]
    config: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run recordings through independent engines and list confirmed gestures
    Replay(cmd::replay::ReplayArgs),
    /// Show what the classifier sees in each frame of a recording
    Classify(cmd::classify::ClassifyArgs),
    /// Write a synthetic recording of a held gesture
    Simulate(cmd::simulate::SimulateArgs),
}

fn resolve_config(
    path: Option<&str>,
    cli_engine: &EngineConfig,
    sub_matches: Option<&ArgMatches>,
) -> GfResult<EngineConfig> {
    let Some(path) = path else {
        cli_engine.validate()?;
        return Ok(cli_engine.clone());
    };

    info!("⚙️  Loading engine config from: {}", path);
    let mut config = EngineConfig::load_from_file(path)?;
    if let Some(m) = sub_matches {
        config.merge_from_cli(cli_engine, m);
    }
    config.validate()?;
    Ok(config)
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    let result = match &cli.command {
        Commands::Replay(args) => {
            resolve_config(config_path, &args.engine, matches.subcommand_matches("replay"))
                .and_then(|config| cmd::replay::run(args, config))
        }
        Commands::Classify(args) => {
            resolve_config(config_path, &args.engine, matches.subcommand_matches("classify"))
                .and_then(|config| cmd::classify::run(args, config))
        }
        Commands::Simulate(args) => cmd::simulate::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
