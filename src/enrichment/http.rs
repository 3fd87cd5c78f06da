//! HTTP client for the enrichment service.
//!
//! One `POST {endpoint}` per request with a JSON body
//! `{"word": "...", "kind": "etymology" | "definition"}`; the service
//! answers with plain text that [`super::parser`] understands.

use async_trait::async_trait;
use lexiforge_common::{Definition, Etymology};
use serde::Serialize;

use super::EnrichmentSource;
use super::parser::{parse_definition, parse_etymology};
use crate::errors::EnrichmentError;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
enum RequestKind {
    Etymology,
    Definition,
}

#[derive(Debug, Serialize)]
struct EnrichRequest<'a> {
    word: &'a str,
    kind: RequestKind,
}

#[derive(Debug, Clone)]
pub struct HttpEnrichmentSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpEnrichmentSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn ask(&self, word: &str, kind: RequestKind) -> Result<String, EnrichmentError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .header("Accept", "text/plain")
            .header("User-Agent", "lexiforge")
            .json(&EnrichRequest { word, kind })
            .send()
            .await
            .map_err(EnrichmentError::Transport)?;

        if !resp.status().is_success() {
            return Err(EnrichmentError::Status {
                status: resp.status().as_u16(),
            });
        }

        resp.text().await.map_err(EnrichmentError::Transport)
    }
}

#[async_trait]
impl EnrichmentSource for HttpEnrichmentSource {
    async fn etymology(&self, word: &str) -> Result<Etymology, EnrichmentError> {
        let body = self.ask(word, RequestKind::Etymology).await?;
        parse_etymology(&body).ok_or_else(|| EnrichmentError::Unparseable {
            word: word.to_string(),
        })
    }

    async fn definition(&self, word: &str) -> Result<Definition, EnrichmentError> {
        let body = self.ask(word, RequestKind::Definition).await?;
        parse_definition(word, &body).ok_or_else(|| EnrichmentError::Unparseable {
            word: word.to_string(),
        })
    }
}
