use std::path::PathBuf;

use clap::{Parser, Subcommand};
use std::io::Write;
use yuletide_cli::{CliContext, CommandError, commands, logging, readline};
use yuletide_core::{AdventureConfig, AdventureConfigExt, CertificateFormat, MissionId, Progression};

#[derive(Parser)]
#[command(version, about = "A Christmas adventure in your terminal")]
struct Args {
    /// Load settings from this file instead of the default config location
    #[arg(long)]
    config: Option<PathBuf>,
    /// Player name shown on the certificate
    #[arg(long)]
    name: Option<String>,
    /// Seed for the random source
    #[arg(long)]
    seed: Option<u64>,
    /// Make every mission available from the start
    #[arg(long)]
    flat: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), String> {
    logging::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AdventureConfig::load_from(path).map_err(|e| e.to_string())?,
        None => AdventureConfig::load(),
    };
    if let Some(name) = args.name {
        config.player_name = name;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    if args.flat {
        config.progression = Progression::Flat;
    }
    config.validate().map_err(|e| e.to_string())?;

    let mut ctx = CliContext::new(config, args.config);
    commands::help();

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, &mut ctx).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                writeln!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Start,
    Status,
    Play {
        mission: MissionId,
    },
    Guess {
        number: u32,
    },
    Catch,
    Hang {
        slot: u32,
    },
    Certificate {
        #[arg(short, long)]
        format: Option<CertificateFormat>,
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    Config {
        /// Write the current settings to the config file
        #[arg(long)]
        save: bool,
    },
    Reset,
    Help,
    Exit,
}

async fn respond(line: &str, ctx: &mut CliContext) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "yuletide".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    let result: Result<(), CommandError> = match cli.command {
        Some(Commands::Start) => {
            commands::start(ctx);
            Ok(())
        }
        Some(Commands::Status) => {
            commands::status(ctx);
            Ok(())
        }
        Some(Commands::Play { mission }) => commands::play(ctx, mission).await,
        Some(Commands::Guess { number }) => commands::guess(ctx, number),
        Some(Commands::Catch) => {
            commands::catch(ctx);
            Ok(())
        }
        Some(Commands::Hang { slot }) => commands::hang(ctx, slot),
        Some(Commands::Certificate { format, out }) => {
            commands::certificate(ctx, format, out).map(|_| ())
        }
        Some(Commands::Config { save }) => commands::config(ctx, save),
        Some(Commands::Reset) => {
            commands::reset(ctx);
            Ok(())
        }
        Some(Commands::Help) => {
            commands::help();
            Ok(())
        }
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => Ok(()),
    };
    result.map_err(|e| e.to_string())?;
    Ok(false)
}
