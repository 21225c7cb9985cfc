//! Command-line interface.

use clap::{Parser, Subcommand};
use moodcomic_core::{GenerationRequest, VoiceGender};
use std::path::PathBuf;

/// Turn a mood into a four-panel comic.
#[derive(Debug, Parser)]
#[command(name = "moodcomic", version, about)]
pub struct Cli {
    /// Configuration file replacing ./moodcomic.toml
    #[arg(short, long, global = true, env = "MOODCOMIC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Listen address, overrides server.bind
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Generate one comic and print it as JSON
    Generate {
        /// Mood or topic
        #[arg(short, long)]
        mood: String,

        /// Style tag, e.g. healing or mystery
        #[arg(short, long)]
        style: Option<String>,

        /// Narrator voice; omit for no audio
        #[arg(long, value_parser = parse_gender)]
        voice_gender: Option<VoiceGender>,

        /// Situational context echoed in the metadata
        #[arg(long)]
        context: Option<String>,
    },
}

fn parse_gender(value: &str) -> Result<VoiceGender, String> {
    match value.to_ascii_lowercase().as_str() {
        "male" => Ok(VoiceGender::Male),
        "female" => Ok(VoiceGender::Female),
        other => Err(format!("expected male or female, got {}", other)),
    }
}

impl Commands {
    /// Request described by a `generate` invocation.
    pub fn generation_request(&self) -> Option<GenerationRequest> {
        match self {
            Commands::Generate {
                mood,
                style,
                voice_gender,
                context,
            } => Some(GenerationRequest {
                mood: mood.clone(),
                style: style.clone(),
                voice_gender: *voice_gender,
                context: context.clone(),
            }),
            Commands::Serve { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_generate_command() {
        let cli = Cli::parse_from([
            "moodcomic",
            "generate",
            "--mood",
            "地鐵奇遇",
            "--style",
            "healing",
            "--voice-gender",
            "Female",
        ]);
        let request = cli.command.generation_request().unwrap();
        assert_eq!(request.mood, "地鐵奇遇");
        assert_eq!(request.voice_gender, Some(VoiceGender::Female));
        assert!(request.context.is_none());
    }

    #[test]
    fn test_parses_serve_with_global_flags() {
        let cli = Cli::parse_from(["moodcomic", "serve", "--bind", "127.0.0.1:8080", "-v"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Serve { bind: Some(ref b) } if b == "127.0.0.1:8080"));
    }

    #[test]
    fn test_rejects_unknown_gender() {
        assert!(Cli::try_parse_from(["moodcomic", "generate", "-m", "x", "--voice-gender", "robot"]).is_err());
    }
}
