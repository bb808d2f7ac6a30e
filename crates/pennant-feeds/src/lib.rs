//! pennant-feeds: raw document sources for pennant.
//!
//! A feed reads one document (a file or stdin), decides which dialect it is
//! written in unless told, and splits it into [`pennant_core::RawChunk`]s in
//! document order. Each document keeps its own chunk list so the normalizer
//! can reset date context at document boundaries.

pub mod chunker;
pub mod source;

pub use chunker::{chunk, sniff};
pub use source::Source;

use pennant_core::{Dialect, RawChunk};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("failed to read {source_name}: {source}")]
    Read {
        source_name: String,
        source: std::io::Error,
    },

    #[error("stdin can only be given once")]
    StdinTwice,

    #[error("reader task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// One chunked input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub source: Source,
    pub dialect: Dialect,
    pub chunks: Vec<RawChunk>,
}

impl Document {
    /// Chunk already-read text. `dialect` overrides sniffing.
    pub fn from_text(source: Source, text: &str, dialect: Option<Dialect>) -> Self {
        let dialect = dialect.unwrap_or_else(|| sniff(text));
        let chunks = chunk(text, dialect);
        debug!(source = %source, %dialect, chunks = chunks.len(), "document chunked");
        Self { source, dialect, chunks }
    }
}

/// Read and chunk one source.
pub async fn load(source: Source, dialect: Option<Dialect>) -> Result<Document, FeedError> {
    let text = source.read().await?;
    Ok(Document::from_text(source, &text, dialect))
}

/// Read every source concurrently. Documents come back in argument order.
pub async fn load_all(sources: Vec<Source>, dialect: Option<Dialect>) -> Result<Vec<Document>, FeedError> {
    if sources.iter().filter(|s| **s == Source::Stdin).count() > 1 {
        return Err(FeedError::StdinTwice);
    }

    let total = sources.len();
    let mut set = JoinSet::new();
    for (index, source) in sources.into_iter().enumerate() {
        set.spawn(async move { (index, load(source, dialect).await) });
    }

    let mut slots: Vec<Option<Document>> = (0..total).map(|_| None).collect();
    while let Some(joined) = set.join_next().await {
        let (index, loaded) = joined?;
        slots[index] = Some(loaded?);
    }

    let documents: Vec<Document> = slots.into_iter().flatten().collect();
    info!(
        documents = documents.len(),
        chunks = documents.iter().map(|d| d.chunks.len()).sum::<usize>(),
        "inputs loaded"
    );
    Ok(documents)
}
