use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

use eyre::{Result, bail};
use log::debug;
use scraper::{Html, Selector};
use url::Url;

use crate::Document;

// Browser-like request identity; some sites refuse default client UAs
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) \
Chrome/129.0.6668.90 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

static SELECTOR_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static SELECTOR_CONTENT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p, h1, h2, h3, h4, h5, h6, li, blockquote, pre").unwrap());

/// Build the client used for generic page fetches.
///
/// TLS certificate verification is deliberately disabled: it widens the set
/// of fetchable pages (self-signed and misconfigured hosts) at the cost of
/// exposing the fetch to man-in-the-middle substitution. Only page content
/// flows through this client; the API credential never does.
pub fn build_client(timeout: Duration) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .timeout(timeout)
        .build()?)
}

/// Fetch a web page and extract its readable text
pub async fn fetch_page(client: &reqwest::Client, url: &Url) -> Result<Document> {
    debug!("Fetching page: {url}");

    let html = client
        .get(url.as_str())
        .header("User-Agent", USER_AGENT)
        .header("Accept", ACCEPT)
        .header("Accept-Language", ACCEPT_LANGUAGE)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let title = extract_title(&html);
    let text = extract_text(&html);

    if text.trim().is_empty() {
        bail!("no readable text found at {url}");
    }

    let mut metadata = HashMap::new();
    metadata.insert("source".to_string(), url.to_string());
    if let Some(title) = title {
        metadata.insert("title".to_string(), title);
    }

    Ok(Document::with_metadata(text, metadata))
}

fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&SELECTOR_TITLE)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
}

/// Pull readable text from content elements in document order. Scripts,
/// styles, and nav chrome fall out naturally because only text-bearing
/// content tags are selected.
fn extract_text(html: &str) -> String {
    let doc = Html::parse_document(html);
    let mut blocks = Vec::new();

    for el in doc.select(&SELECTOR_CONTENT) {
        // Skip containers whose text is already covered by a nested match
        // (e.g. a <blockquote> wrapping <p> tags)
        if el
            .descendants()
            .filter_map(scraper::ElementRef::wrap)
            .skip(1)
            .any(|child| SELECTOR_CONTENT.matches(&child))
        {
            continue;
        }

        let text = el.text().collect::<Vec<_>>().join(" ");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
        if !text.is_empty() {
            blocks.push(text);
        }
    }

    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<html>
<head><title>A Blog Post</title><style>p { color: red; }</style></head>
<body>
  <script>var tracking = true;</script>
  <h1>Heading</h1>
  <p>First paragraph with <b>bold</b> text.</p>
  <p>Second paragraph.</p>
  <ul><li>Item one</li><li>Item two</li></ul>
</body>
</html>"#;

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title(SAMPLE), Some("A Blog Post".to_string()));
    }

    #[test]
    fn test_extract_title_missing() {
        assert_eq!(extract_title("<html><body><p>hi</p></body></html>"), None);
    }

    #[test]
    fn test_extract_text_content_tags() {
        let text = extract_text(SAMPLE);
        assert!(text.contains("Heading"));
        assert!(text.contains("First paragraph with bold text."));
        assert!(text.contains("Item one"));
    }

    #[test]
    fn test_extract_text_skips_scripts_and_styles() {
        let text = extract_text(SAMPLE);
        assert!(!text.contains("tracking"));
        assert!(!text.contains("color: red"));
    }

    #[test]
    fn test_extract_text_nested_containers_not_duplicated() {
        let html = "<html><body><blockquote><p>Quoted line</p></blockquote></body></html>";
        let text = extract_text(html);
        assert_eq!(text.matches("Quoted line").count(), 1);
    }

    #[test]
    fn test_extract_text_empty_page() {
        assert_eq!(extract_text("<html><body></body></html>"), "");
    }

    #[test]
    fn test_extract_text_whitespace_normalized() {
        let html = "<html><body><p>spaced   \n   out</p></body></html>";
        assert_eq!(extract_text(html), "spaced out");
    }
}
