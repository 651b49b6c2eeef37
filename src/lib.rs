pub mod chunker;
pub mod config;
pub mod error;
pub mod llm;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod validate;
pub mod webpage;
pub mod youtube;

use std::collections::HashMap;

use serde::Serialize;

/// Textual content extracted from one source URL
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub text: String,
    pub metadata: HashMap<String, String>,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(text: impl Into<String>, metadata: HashMap<String, String>) -> Self {
        Self {
            text: text.into(),
            metadata,
        }
    }
}

/// A bounded contiguous slice of a Document's text, fed to the model in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub text: String,
    pub order: usize,
}

/// Terminal artifact of one request
#[derive(Debug, Clone, Serialize)]
pub struct SummaryResult {
    pub text: String,
}

/// Pipeline mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Documents go to the chunker in their original language
    Summarize,
    /// Each document is rewritten into English before chunking
    SummarizeTranslate,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Summarize => write!(f, "summarize"),
            Mode::SummarizeTranslate => write!(f, "summarize+translate"),
        }
    }
}

/// Whether a URL points at a video platform we can pull transcripts from
pub fn is_video_url(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extract video ID from various YouTube URL formats
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();

    // Bare 11-character video ID
    if regex::Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap().is_match(input) {
        return Some(input.to_string());
    }

    // youtube.com/watch?v=ID
    if let Some(caps) = regex::Regex::new(r"(?:youtube\.com/watch\?.*v=)([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtu.be/ID
    if let Some(caps) = regex::Regex::new(r"youtu\.be/([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/embed/ID
    if let Some(caps) = regex::Regex::new(r"youtube\.com/embed/([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    // youtube.com/shorts/ID
    if let Some(caps) = regex::Regex::new(r"youtube\.com/shorts/([a-zA-Z0-9_-]{11})")
        .unwrap()
        .captures(input)
    {
        return Some(caps[1].to_string());
    }

    None
}
