use std::io::{self, BufRead};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use eyre::{Result, bail};
use log::info;

mod cli;

use cli::Cli;
use sumx::Mode;
use sumx::chunker::TextSplitter;
use sumx::llm::GroqClient;
use sumx::loader::{DEFAULT_TIMEOUT_SECS, UrlContentFetcher};
use sumx::output::present;

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("sumx.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sumx")
        .join("logs")
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let cli = Cli::parse();

    // Load config file (non-fatal if missing/invalid)
    let config = sumx::config::Config::load().unwrap_or_default();

    // CLI flags take priority over config values
    let model = cli
        .model
        .clone()
        .or(config.default_model)
        .unwrap_or_else(|| sumx::llm::DEFAULT_MODEL.to_string());
    let proxy = cli.proxy.clone().or(config.proxy_url);
    let timeout = Duration::from_secs(cli.timeout.or(config.timeout_secs).unwrap_or(DEFAULT_TIMEOUT_SECS));
    let mode = if cli.translate || config.translate.unwrap_or(false) {
        Mode::SummarizeTranslate
    } else {
        Mode::Summarize
    };

    // The credential is only ever held in memory and handed to the API
    // client; it is never logged or written to disk
    let api_key = cli
        .api_key
        .clone()
        .or_else(|| std::env::var("GROQ_API_KEY").ok())
        .unwrap_or_default();

    if cli.verbose {
        let config_path = sumx::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!("Mode: {mode}\nModel: {model}");
    }

    // Collect URLs: from arg or stdin
    let urls = if let Some(ref url) = cli.url {
        vec![url.clone()]
    } else {
        let stdin = io::stdin();
        stdin.lock().lines().collect::<Result<Vec<_>, _>>()?
    };

    if urls.is_empty() {
        bail!("no URL provided\n\nUsage: sumx <URL>\n       echo <URL> | sumx");
    }

    let fetcher = UrlContentFetcher::new(timeout, proxy, config.fallback_lang);
    let groq = GroqClient::new(&api_key, &model, timeout)?;
    let splitter = TextSplitter::default();

    // One request at a time; each must finish (or fail) before the next starts
    let mut any_failed = false;
    for url_input in &urls {
        let url_input = url_input.trim();
        if url_input.is_empty() {
            continue;
        }

        eprintln!("Loading content...");

        let result = sumx::pipeline::run(&api_key, url_input, mode, &fetcher, &groq, &groq, &splitter).await;
        let rendered = present(&result);

        match result {
            Ok(_) => {
                if let Some(ref path) = cli.output {
                    std::fs::write(path, &rendered)?;
                    if cli.verbose {
                        eprintln!("Summary written to: {}", path.display());
                    }
                } else {
                    println!("{rendered}");
                }
            }
            Err(_) => {
                any_failed = true;
                eprintln!("{rendered}");
            }
        }
    }

    if any_failed {
        std::process::exit(1);
    }

    Ok(())
}
