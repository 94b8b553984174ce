//! Collection and storage around the parsers. Fetching pages, computing
//! embeddings and persisting chunks are supplied by the caller through the
//! [`PageSource`], [`Embedder`] and [`ChunkStore`] traits.

use crate::config::{ParserConfig, SourceConfig};
use crate::error::Result;
use crate::report::{CompanyReport, SectionChunk};
use crate::sections::SectionId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Width of the zero vector stored when embedding fails.
pub const EMBEDDING_DIMENSIONS: usize = 1536;

/// Returns the text of the page region matched by `selector`, or `None`
/// when the page has no such region.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str, selector: &str) -> Result<Option<String>>;
}

#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[async_trait]
pub trait ChunkStore: Send + Sync {
    async fn insert(&self, chunk: &EmbeddedChunk) -> Result<()>;
}

/// A chunk together with the embedding of its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    #[serde(flatten)]
    pub chunk: SectionChunk,
    pub embedding: Vec<f32>,
}

pub struct Pipeline<S, E, C> {
    source: S,
    embedder: E,
    chunk_store: C,
    parser_config: ParserConfig,
    source_config: SourceConfig,
}

impl<S, E, C> Pipeline<S, E, C>
where
    S: PageSource,
    E: Embedder,
    C: ChunkStore,
{
    pub fn new(source: S, embedder: E, chunk_store: C) -> Self {
        Self {
            source,
            embedder,
            chunk_store,
            parser_config: ParserConfig::default(),
            source_config: SourceConfig::default(),
        }
    }

    pub fn with_parser_config(mut self, config: ParserConfig) -> Self {
        self.parser_config = config;
        self
    }

    pub fn with_source_config(mut self, config: SourceConfig) -> Self {
        self.source_config = config;
        self
    }

    pub fn source_config(&self) -> &SourceConfig {
        &self.source_config
    }

    /// Fetches all ten sections concurrently and parses each one. A failed
    /// fetch is treated the same as an empty region.
    pub async fn collect(&self, symbol: &str) -> CompanyReport {
        let url = self.source_config.company_url(symbol);
        let url = url.as_str();
        info!("Fetching {} sections from {}", SectionId::ALL.len(), url);

        let fetches = SectionId::ALL.into_iter().map(|section| async move {
            let text = match self.source.fetch(url, section.selector()).await {
                Ok(text) => text,
                Err(err) => {
                    warn!("Fetching {} for {} failed: {}", section, symbol, err);
                    None
                }
            };
            (section, text)
        });

        let texts = join_all(fetches).await;
        CompanyReport::from_texts(symbol, texts, &self.parser_config)
    }

    /// Embeds and stores one chunk per parsed section, returning how many
    /// were inserted. Embedding failures fall back to a zero vector; insert
    /// failures are logged and skipped.
    pub async fn store(&self, report: &CompanyReport, fetched_at: DateTime<Utc>) -> Result<usize> {
        let chunks = report.to_chunks(&self.source_config, fetched_at)?;
        let mut stored = 0;

        for chunk in chunks {
            let embedding = match self.embedder.embed(&chunk.content).await {
                Ok(embedding) => embedding,
                Err(err) => {
                    warn!("Embedding {} failed, storing zero vector: {}", chunk.url, err);
                    vec![0.0; EMBEDDING_DIMENSIONS]
                }
            };

            let embedded = EmbeddedChunk { chunk, embedding };
            match self.chunk_store.insert(&embedded).await {
                Ok(()) => {
                    stored += 1;
                    info!(
                        "Inserted chunk {} for {} - {}",
                        embedded.chunk.chunk_number, embedded.chunk.url, embedded.chunk.title
                    );
                }
                Err(err) => warn!("Inserting chunk {} failed: {}", embedded.chunk.url, err),
            }
        }

        info!("Stored {} chunks for {}", stored, report.symbol);
        Ok(stored)
    }

    /// [`collect`](Self::collect) followed by [`store`](Self::store).
    pub async fn collect_and_store(
        &self,
        symbol: &str,
        fetched_at: DateTime<Utc>,
    ) -> Result<(CompanyReport, usize)> {
        let report = self.collect(symbol).await;
        let stored = self.store(&report, fetched_at).await?;
        Ok((report, stored))
    }
}
