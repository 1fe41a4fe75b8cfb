use clap::{Parser, Subcommand, Args};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

#[derive(Parser)]
#[command(
    name = "testlog",
    version,
    long_version = LONG_VERSION,
    about = "Build verdicts and AI narratives from Robot Framework log.html files"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print only the report text
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a log.html and print the build report
    Analyze(AnalyzeArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct AnalyzeArgs {
    /// Path to the Robot Framework log.html
    pub log: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Text generator backend: llamacpp, ollama
    #[arg(long)]
    pub provider: Option<String>,

    /// Model identifier
    #[arg(long)]
    pub model: Option<String>,

    /// Generator endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory with stable.txt / alert.txt template overrides
    #[arg(long)]
    pub templates_dir: Option<String>,

    /// Output the full analysis outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the prompt instead of calling the generator
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    pub config: String,
}
