//! Optional etymology and definition enrichment.
//!
//! The enrichment service is an external collaborator reached through the
//! [`EnrichmentSource`] trait. [`Enricher`] wraps a source with a timeout
//! and falls back to fixed defaults on any failure, so enrichment can slow a
//! word down but never fail it.

pub mod http;
pub mod parser;

use async_trait::async_trait;
use lexiforge_common::{Definition, Etymology};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::errors::EnrichmentError;

pub use http::HttpEnrichmentSource;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A service that can describe source words.
#[async_trait]
pub trait EnrichmentSource: Send + Sync {
    async fn etymology(&self, word: &str) -> Result<Etymology, EnrichmentError>;
    async fn definition(&self, word: &str) -> Result<Definition, EnrichmentError>;
}

/// Fault-tolerant front for an optional [`EnrichmentSource`].
#[derive(Clone)]
pub struct Enricher {
    source: Option<Arc<dyn EnrichmentSource>>,
    timeout: Duration,
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("enabled", &self.source.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Enricher {
    /// An enricher that always answers with defaults.
    pub fn disabled() -> Self {
        Self {
            source: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn new(source: Arc<dyn EnrichmentSource>, timeout: Duration) -> Self {
        Self {
            source: Some(source),
            timeout,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.source.is_some()
    }

    /// Etymology for `word`: `None` when disabled, the fixed defaults
    /// ([`Etymology::fallback`]) when the service failed.
    pub async fn etymology(&self, word: &str) -> Option<Etymology> {
        let source = self.source.as_ref()?;
        match self.bounded(word, source.etymology(word)).await {
            Ok(e) => Some(e),
            Err(e) => {
                warn!(word = %word, error = %e, "Etymology enrichment failed; using defaults");
                Some(Etymology::fallback())
            }
        }
    }

    /// Definition for `word`; the placeholder when disabled or the service failed.
    pub async fn definition(&self, word: &str) -> Definition {
        let Some(source) = self.source.as_ref() else {
            return Definition::placeholder(word);
        };
        match self.bounded(word, source.definition(word)).await {
            Ok(d) => d,
            Err(e) => {
                warn!(word = %word, error = %e, "Definition enrichment failed; using placeholder");
                Definition::placeholder(word)
            }
        }
    }

    async fn bounded<T>(
        &self,
        word: &str,
        call: impl Future<Output = Result<T, EnrichmentError>>,
    ) -> Result<T, EnrichmentError> {
        debug!(word = %word, timeout_secs = self.timeout.as_secs(), "Enrichment request");
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| EnrichmentError::Timeout {
                word: word.to_string(),
                secs: self.timeout.as_secs(),
            })?
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::MockSource;
    use super::*;

    #[tokio::test]
    async fn test_disabled_uses_defaults() {
        let enricher = Enricher::disabled();
        assert!(!enricher.is_enabled());
        assert!(enricher.etymology("tree").await.is_none());
        assert_eq!(
            enricher.definition("tree").await,
            Definition::placeholder("tree")
        );
    }

    #[tokio::test]
    async fn test_successful_enrichment() {
        let enricher = Enricher::new(Arc::new(MockSource::default()), DEFAULT_TIMEOUT);
        let e = enricher.etymology("tree").await.unwrap();
        assert_eq!(e.origin, "Latin");
        let d = enricher.definition("tree").await;
        assert_eq!(d.primary, "meaning of tree");
    }

    #[tokio::test]
    async fn test_failure_falls_back() {
        let source = Arc::new(MockSource {
            fail: true,
            ..MockSource::default()
        });
        let enricher = Enricher::new(source.clone(), DEFAULT_TIMEOUT);
        let ety = enricher.etymology("tree").await.unwrap();
        assert!(ety.is_fallback());
        assert_eq!(ety, Etymology::fallback());
        assert_eq!(
            enricher.definition("tree").await,
            Definition::placeholder("tree")
        );
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let source = Arc::new(MockSource {
            stall: Some(Duration::from_secs(5)),
            ..MockSource::default()
        });
        let enricher = Enricher::new(source, Duration::from_millis(50));
        assert!(enricher.etymology("slow").await.unwrap().is_fallback());
        assert_eq!(
            enricher.definition("slow").await,
            Definition::placeholder("slow")
        );
    }
}
