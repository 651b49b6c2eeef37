use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info};
use url::Url;

use crate::error::PipelineError;
use crate::{Document, extract_video_id, is_video_url, webpage, youtube};

/// Default bound on each outbound call. Without one, a hung fetch would
/// stall the whole request forever.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const PRIMARY_LANG: &str = "en";
pub const FALLBACK_LANG: &str = "hi";

/// Boundary for content retrieval so the pipeline can run against fakes
/// and alternative backends
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<Document>, PipelineError>;
}

/// Try each strategy in order, stopping at the first success. Later
/// strategies are never invoked once one succeeds; the last error wins
/// when all fail.
pub async fn try_in_order<S, T, F, Fut>(strategies: &[S], mut attempt: F) -> eyre::Result<T>
where
    F: FnMut(&S) -> Fut,
    Fut: std::future::Future<Output = eyre::Result<T>>,
{
    let mut last_err = None;
    for (i, strategy) in strategies.iter().enumerate() {
        match attempt(strategy).await {
            Ok(val) => return Ok(val),
            Err(e) => {
                debug!("Fetch strategy {} failed: {e}", i + 1);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| eyre::eyre!("no fetch strategies configured")))
}

/// One transcript attempt: a caption language, optionally routed through
/// a proxy
#[derive(Debug, Clone)]
struct TranscriptStrategy {
    lang: String,
    proxy: Option<String>,
}

/// Real fetcher: classifies the URL and retrieves either a video transcript
/// (primary language first, fallback language through the configured proxy
/// second) or the extracted text of a generic web page.
pub struct UrlContentFetcher {
    timeout: Duration,
    proxy: Option<String>,
    fallback_lang: String,
}

impl UrlContentFetcher {
    pub fn new(timeout: Duration, proxy: Option<String>, fallback_lang: Option<String>) -> Self {
        Self {
            timeout,
            proxy,
            fallback_lang: fallback_lang.unwrap_or_else(|| FALLBACK_LANG.to_string()),
        }
    }

    async fn fetch_transcript(&self, url: &Url) -> Result<Vec<Document>, PipelineError> {
        let video_id = extract_video_id(url.as_str()).ok_or_else(|| {
            PipelineError::ContentUnavailable(format!("could not extract a video ID from {url}"))
        })?;

        let strategies = [
            TranscriptStrategy {
                lang: PRIMARY_LANG.to_string(),
                proxy: None,
            },
            TranscriptStrategy {
                lang: self.fallback_lang.clone(),
                proxy: self.proxy.clone(),
            },
        ];

        let timeout = self.timeout;
        let doc = try_in_order(&strategies, |s| {
            let video_id = video_id.clone();
            let lang = s.lang.clone();
            let proxy = s.proxy.clone();
            async move {
                info!("Trying {lang} transcript for video {video_id}");
                let client = youtube::build_client(proxy.as_deref(), timeout)?;
                youtube::fetch_transcript(&client, &video_id, &lang).await
            }
        })
        .await
        .map_err(|e| {
            PipelineError::ContentUnavailable(format!("Could not retrieve a YouTube transcript: {e}"))
        })?;

        Ok(vec![doc])
    }

    async fn fetch_webpage(&self, url: &Url) -> Result<Vec<Document>, PipelineError> {
        let client = webpage::build_client(self.timeout)
            .map_err(|e| PipelineError::ContentUnavailable(e.to_string()))?;
        let doc = webpage::fetch_page(&client, url)
            .await
            .map_err(|e| PipelineError::ContentUnavailable(e.to_string()))?;
        Ok(vec![doc])
    }
}

#[async_trait]
impl ContentFetcher for UrlContentFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<Document>, PipelineError> {
        if is_video_url(url.as_str()) {
            self.fetch_transcript(url).await
        } else {
            self.fetch_webpage(url).await
        }
    }
}
