use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sumx",
    about = "Summarize the content from YouTube or a website",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// YouTube video URL or website URL (reads from stdin if omitted)
    pub url: Option<String>,

    /// Groq API key (falls back to the GROQ_API_KEY environment variable)
    #[arg(short, long)]
    pub api_key: Option<String>,

    /// Translate each document into English before summarizing
    #[arg(short, long)]
    pub translate: bool,

    /// Chat-completion model for translation and summarization
    #[arg(long)]
    pub model: Option<String>,

    /// Proxy for the fallback-language transcript fetch
    #[arg(long)]
    pub proxy: Option<String>,

    /// Per-request network timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Write the summary to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Show stage progress and metadata
    #[arg(short, long)]
    pub verbose: bool,
}
