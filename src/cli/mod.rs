use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::{DEFAULT_OUTPUT_PATH, DEFAULT_PROMPT_PATH};

#[derive(Parser)]
#[command(name = "promptgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Model identifier; defaults to $OPENAI_MODEL, then gpt-4
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Answer with an offline echo client instead of calling the API
    #[arg(long, global = true)]
    pub mock_client: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send the built-in Svelte image-grid prompt and print the answer
    Inline,

    /// Send the contents of a prompt file and save the answer to a file
    File {
        #[arg(short, long, default_value = DEFAULT_PROMPT_PATH)]
        prompt: PathBuf,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,
    },
}

#[cfg(test)]
mod cli_tests {
    use super::*;

    #[test]
    fn file_command_uses_default_paths() {
        let cli = Cli::try_parse_from(["promptgen", "file"]).unwrap();
        match cli.command {
            Commands::File { prompt, output } => {
                assert_eq!(prompt, PathBuf::from("scripts/prompt.txt"));
                assert_eq!(output, PathBuf::from("src/lib/GeneratedComponent.svelte"));
            }
            Commands::Inline => panic!("expected file command"),
        }
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli =
            Cli::try_parse_from(["promptgen", "inline", "--model", "gpt-4o", "--mock-client"])
                .unwrap();
        assert!(matches!(cli.command, Commands::Inline));
        assert_eq!(cli.model.as_deref(), Some("gpt-4o"));
        assert!(cli.mock_client);
        assert!(!cli.verbose);
    }

    #[test]
    fn inline_takes_no_positional_prompt() {
        let res = Cli::try_parse_from(["promptgen", "inline", "write me a poem"]);
        assert!(res.is_err(), "inline prompt is fixed");
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["promptgen"]).is_err());
    }
}
