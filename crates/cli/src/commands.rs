//! Command-line commands.
//!
//! Every command prints one JSON document on stdout.

use std::collections::HashSet;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde_json::{json, Value};

use subrank_core::{
    archive::best_entry_name,
    scoring::complete_year_match,
    text::{extract_relevant_name, search_keyword, to_chinese_numeral},
    MediaKind, ScoreRegistry, SubtitleCandidate,
};

#[derive(Parser, Debug)]
#[command(name = "subrank")]
#[command(about = "Score Chinese subtitle candidates against a media item", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print Prometheus metrics after the command output
    #[arg(long, global = true)]
    pub metrics: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Effective score table
    Scores {
        /// series or movie
        kind: MediaKind,
    },

    /// Acceptance threshold
    Threshold {
        /// series or movie
        kind: MediaKind,

        /// Use the threshold for hash-matched candidates
        #[arg(long)]
        hash: bool,
    },

    /// Score a candidate against its matched attributes
    Evaluate(EvaluateArgs),

    /// Latin part of a mixed Chinese/English title
    ExtractName { name: String },

    /// Chinese numeral for 1 to 99
    Numeral { n: u32 },

    /// Best subtitle in an archive listing
    Pick { members: Vec<String> },

    /// Search keyword for a provider
    Keyword {
        title: String,

        #[arg(long)]
        season: Option<u32>,

        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct EvaluateArgs {
    /// series or movie
    pub kind: MediaKind,

    /// Matched attribute names
    pub attributes: Vec<String>,

    #[arg(long, default_value = "")]
    pub provider: String,

    #[arg(long, default_value = "")]
    pub language: String,

    /// Release description of the subtitle
    #[arg(long, default_value = "")]
    pub release: String,

    #[arg(long)]
    pub uploader: Option<String>,

    /// Subtitle is for the hearing impaired
    #[arg(long)]
    pub hi: bool,

    #[arg(long)]
    pub target_year: Option<i32>,

    #[arg(long)]
    pub subtitle_year: Option<i32>,
}

impl EvaluateArgs {
    fn candidate(&self) -> SubtitleCandidate {
        SubtitleCandidate {
            provider: self.provider.clone(),
            language: self.language.clone(),
            release_info: self.release.clone(),
            uploader: self.uploader.clone(),
            hearing_impaired: self.hi,
        }
    }
}

impl Commands {
    /// Label used for the commands counter.
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Scores { .. } => "scores",
            Commands::Threshold { .. } => "threshold",
            Commands::Evaluate(_) => "evaluate",
            Commands::ExtractName { .. } => "extract-name",
            Commands::Numeral { .. } => "numeral",
            Commands::Pick { .. } => "pick",
            Commands::Keyword { .. } => "keyword",
        }
    }

    pub fn execute(&self, registry: &ScoreRegistry) -> Result<Value> {
        match self {
            Commands::Scores { kind } => {
                let table = registry.read(*kind);
                Ok(json!({
                    "kind": kind,
                    "scores": table.scores(),
                    "max_score": table.max_score(),
                    "profiles": table.custom_profile_scores(),
                }))
            }
            Commands::Threshold { kind, hash } => {
                Ok(serde_json::to_value(registry.threshold(*kind, *hash))?)
            }
            Commands::Evaluate(args) => {
                let mut guessed: HashSet<String> = args.attributes.iter().cloned().collect();
                complete_year_match(args.kind, args.target_year, args.subtitle_year, &mut guessed);
                Ok(serde_json::to_value(registry.evaluate(
                    args.kind,
                    &args.candidate(),
                    &guessed,
                ))?)
            }
            Commands::ExtractName { name } => Ok(json!(extract_relevant_name(name))),
            Commands::Numeral { n } => Ok(json!(to_chinese_numeral(*n)?)),
            Commands::Pick { members } => {
                Ok(json!(best_entry_name(members.iter().map(String::as_str))))
            }
            Commands::Keyword {
                title,
                season,
                year,
            } => Ok(json!(search_keyword(title, *season, *year))),
        }
    }
}
