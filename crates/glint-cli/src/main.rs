//! Glint CLI - run and check interaction scenes headlessly

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use commands::{simulate, validate};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Gaze-and-trigger interaction scenes, run headlessly", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene's scripted steps and print what happened
    Simulate {
        /// Path to scene file
        scene: String,

        /// Idle frames to run after the script
        #[arg(long, default_value_t = 1)]
        frames: u32,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load a scene and report setups that can never prompt
    Validate {
        /// Path to scene file
        scene: String,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Simulate {
            scene,
            frames,
            format,
        } => simulate::run(simulate::SimulateArgs {
            scene,
            frames,
            format,
        }),
        Commands::Validate { scene, format } => validate::run(&scene, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "glint", "-vv", "simulate", "study.toml", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Simulate {
                scene,
                frames,
                format,
            } => {
                assert_eq!(scene, "study.toml");
                assert_eq!(frames, 1);
                assert_eq!(format, OutputFormat::Json);
            }
            Commands::Validate { .. } => panic!("expected simulate"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["glint", "validate", "a.toml", "--format", "yaml"]).is_err());
    }
}
