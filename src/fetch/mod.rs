//! Document loading.
//!
//! Reads the baseline snapshot and the per-journée match exports, either from
//! a local directory or from an HTTP base URL. The baseline is required; a
//! journée that cannot be read is logged and left out.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::AppConfig;
use crate::models::{Baseline, Corpus, Journee, JourneeId, Match};

/// File name of a journée export inside its directory.
pub const JOURNEE_DOCUMENT: &str = "tous_les_matchs.json";

/// Errors that can occur while loading documents.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid discovery pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Baseline statistics unavailable at {location}: {source}")]
    BaselineUnavailable {
        location: String,
        #[source]
        source: Box<FetchError>,
    },
}

/// Where documents are read from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Raw bytes of the document at `path`, relative to the source root.
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError>;

    /// Human-readable location of `path`, for logs and errors.
    fn describe(&self, path: &str) -> String;
}

/// Documents under a local directory.
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DocumentSource for FileSource {
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        Ok(fs::read(self.root.join(path)).await?)
    }

    fn describe(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }
}

/// Documents served under an HTTP base URL.
pub struct HttpSource {
    client: Client,
    base: Url,
}

impl HttpSource {
    pub fn new(base: Url) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("club-stats/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base: with_trailing_slash(base),
        })
    }

    fn url_for(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}{}: {}", self.base, path, e)))
    }
}

/// `Url::join` replaces the last segment unless the base ends with `/`.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[async_trait]
impl DocumentSource for HttpSource {
    async fn fetch_bytes(&self, path: &str) -> Result<Vec<u8>, FetchError> {
        let url = self.url_for(path)?;
        debug!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn describe(&self, path: &str) -> String {
        self.url_for(path)
            .map(|u| u.to_string())
            .unwrap_or_else(|_| format!("{}{}", self.base, path))
    }
}

/// Relative path of a journée export.
pub fn journee_document(id: &JourneeId) -> String {
    format!("{}/{}", id, JOURNEE_DOCUMENT)
}

/// Journées present under `data_dir`, as `J*_*/tous_les_matchs.json`.
pub fn discover_journees(data_dir: &Path) -> Result<Vec<JourneeId>, FetchError> {
    let pattern = data_dir.join("J*_*").join(JOURNEE_DOCUMENT);
    let mut ids: Vec<JourneeId> = glob::glob(&pattern.to_string_lossy())?
        .filter_map(|entry| match entry {
            Ok(path) => path
                .parent()
                .and_then(Path::file_name)
                .map(|name| JourneeId::new(name.to_string_lossy())),
            Err(e) => {
                warn!("Unreadable entry while discovering journées: {}", e);
                None
            }
        })
        .collect();
    ids.sort();
    Ok(ids)
}

/// Decode one journée export, dropping matches that do not parse.
pub fn parse_journee(id: JourneeId, bytes: &[u8]) -> Result<Journee, FetchError> {
    let raw: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    let total = raw.len();

    let matches: Vec<Match> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(m) => Some(m),
            Err(e) => {
                warn!("Skipping malformed match #{} of {}: {}", index + 1, id, e);
                None
            }
        })
        .collect();

    debug!("Journée {}: {} of {} matches decoded", id, matches.len(), total);
    Ok(Journee { id, matches })
}

/// Load the baseline and every listed journée from `source`.
pub async fn load_corpus(
    source: &dyn DocumentSource,
    baseline_path: &str,
    journees: &[JourneeId],
) -> Result<Corpus, FetchError> {
    let baseline = load_baseline(source, baseline_path)
        .await
        .map_err(|e| FetchError::BaselineUnavailable {
            location: source.describe(baseline_path),
            source: Box::new(e),
        })?;

    let mut loaded = Vec::with_capacity(journees.len());
    for id in journees {
        let path = journee_document(id);
        let result = match source.fetch_bytes(&path).await {
            Ok(bytes) => parse_journee(id.clone(), &bytes),
            Err(e) => Err(e),
        };
        match result {
            Ok(journee) => loaded.push(journee),
            Err(e) => warn!("Leaving out journée {} ({}): {}", id, source.describe(&path), e),
        }
    }

    let corpus = Corpus::new(baseline, loaded);
    info!(
        "Loaded {} baseline players and {} of {} journées",
        corpus.baseline.players.len(),
        corpus.journees().len(),
        journees.len()
    );
    Ok(corpus)
}

async fn load_baseline(source: &dyn DocumentSource, path: &str) -> Result<Baseline, FetchError> {
    let bytes = source.fetch_bytes(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Load the corpus described by the configuration.
///
/// A base URL takes precedence over the data directory. Journées are the
/// configured ones, or those discovered on disk when none are listed.
pub async fn load_from_config(config: &AppConfig) -> Result<Corpus, FetchError> {
    let source: Box<dyn DocumentSource> = match &config.base_url {
        Some(url) => Box::new(HttpSource::new(url.clone())?),
        None => Box::new(FileSource::new(&config.data_dir)),
    };

    let journees: Vec<JourneeId> = if !config.journees.is_empty() {
        config.journees.iter().map(|j| JourneeId::new(j.trim())).collect()
    } else if config.base_url.is_some() {
        warn!("No journées configured and none can be discovered over HTTP");
        Vec::new()
    } else {
        discover_journees(&config.data_dir)?
    };

    load_corpus(source.as_ref(), &config.baseline, &journees).await
}
