use log::info;

use crate::chunker::TextSplitter;
use crate::error::PipelineError;
use crate::llm::{Summarizer, Translator};
use crate::loader::ContentFetcher;
use crate::validate::validate;
use crate::{Mode, SummaryResult};

/// Run one request through every stage in order: validate, load,
/// translate (mode-dependent), chunk, summarize. Each stage completes or
/// fails before the next starts; the first failure short-circuits.
///
/// The summary call stuffs all chunk text into a single prompt. It assumes
/// the combined text fits the model's context window; there is no overflow
/// handling.
pub async fn run(
    api_key: &str,
    url: &str,
    mode: Mode,
    fetcher: &dyn ContentFetcher,
    translator: &dyn Translator,
    summarizer: &dyn Summarizer,
    splitter: &TextSplitter,
) -> Result<SummaryResult, PipelineError> {
    let request = validate(api_key, url)?;

    info!("Loading content from {}", request.url);
    let mut docs = fetcher.fetch(&request.url).await?;
    info!("Loaded {} document(s)", docs.len());

    if mode == Mode::SummarizeTranslate {
        // Whole documents are translated before chunking, one call each
        for doc in &mut docs {
            info!("Translating document ({} chars)", doc.text.chars().count());
            doc.text = translator.translate(&doc.text).await?;
        }
    }

    let chunks = splitter.split_documents(&docs);
    if chunks.is_empty() {
        return Err(PipelineError::ContentUnavailable(format!(
            "no text content found at {}",
            request.url
        )));
    }
    info!("Split into {} chunk(s)", chunks.len());

    let combined = chunks.iter().map(|c| c.text.as_str()).collect::<Vec<_>>().join("\n\n");

    info!("Summarizing {} chars", combined.chars().count());
    summarizer.summarize(&combined).await
}
