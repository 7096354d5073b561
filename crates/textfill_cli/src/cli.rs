//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Generate field content from free-text instructions
#[derive(Parser)]
#[command(name = "textfill", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for scripts
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Generate content for an instruction
    Generate(GenerateArgs),
    /// Print the conversation that would be sent, without calling the API
    Prompt(GenerateArgs),
    /// Show resolved settings
    Config,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Instruction describing the content to write
    pub instruction: String,

    /// Current field value, offered to the model as context
    #[arg(long)]
    pub previous: Option<String>,

    /// Role directive (e.g. "You are a real estate agent")
    #[arg(long)]
    pub role: Option<String>,

    /// Maximum body length requested from the model
    #[arg(short, long, default_value_t = 300)]
    pub length: u32,

    /// Field kind: text, textarea or html (only html enables markup)
    #[arg(short, long, default_value = "text")]
    pub kind: String,

    /// Allowed html tags, comma separated (html fields only)
    #[arg(long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Sampling temperature
    #[arg(short, long, default_value_t = 0.7)]
    pub temperature: f32,

    /// Response language (ISO code); overrides TEXTFILL_LANGUAGE
    #[arg(long)]
    pub language: Option<String>,

    /// Model tier: basic or advanced; overrides TEXTFILL_MODEL_TIER
    #[arg(long)]
    pub tier: Option<String>,
}
