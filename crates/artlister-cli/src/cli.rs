//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ArtLister - extract a props inventory from a script or office document.
#[derive(Debug, Parser)]
#[command(name = "artlister")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (defaults to config.toml next to the executable)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process one document into JSON and spreadsheet artifacts
    Process(ProcessArgs),

    /// Write a default config.toml and prompt template
    Init(InitArgs),

    /// Show the effective configuration
    Config,
}

/// Arguments for the process command.
#[derive(Debug, Parser)]
pub struct ProcessArgs {
    /// Document to process (.txt, .md, .csv, .json, .xlsx, .xls, .ods, .docx)
    pub file: PathBuf,

    /// DeepSeek API key
    #[arg(short = 'k', long, env = "DEEPSEEK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Override the output directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Override the prompt template file
    #[arg(short, long)]
    pub prompt: Option<PathBuf>,

    /// Only print the final summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Arguments for the init command.
#[derive(Debug, Parser)]
pub struct InitArgs {
    /// Overwrite existing files
    #[arg(long)]
    pub force: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_process() {
        let cli = Cli::try_parse_from([
            "artlister",
            "process",
            "scene.docx",
            "--api-key",
            "sk-test",
            "-o",
            "out",
            "--quiet",
        ])
        .unwrap();

        match cli.command {
            Command::Process(args) => {
                assert_eq!(args.file, PathBuf::from("scene.docx"));
                assert_eq!(args.api_key.as_deref(), Some("sk-test"));
                assert_eq!(args.output_dir, Some(PathBuf::from("out")));
                assert!(args.quiet);
                assert!(args.prompt.is_none());
            }
            other => panic!("Expected process command, got {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["artlister", "init", "--force", "--config", "my.toml", "--no-color"])
                .unwrap();
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
        assert!(matches!(cli.command, Command::Init(InitArgs { force: true })));
    }

    #[test]
    fn test_process_requires_file() {
        assert!(Cli::try_parse_from(["artlister", "process"]).is_err());
    }
}
