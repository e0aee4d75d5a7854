//! Zero-argument tools wrapping each scrape target.
//!
//! A tool call always produces a JSON string, either
//! `{"message": ..., "count": N}` or `{"error": ...}`, so whatever drives the
//! tools (an agent, the CLI) never has to handle a Rust error.

use crate::error::ScrapeError;
use crate::models::ListingKind;
use crate::scrapers::nawy::ListingScraper;
use crate::scrapers::traits::SessionLauncher;
use crate::scrapers::types::ScrapeTarget;
use crate::writer::WriteSummary;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// What a tool call reports back
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ToolResponse {
    Success { message: String, count: usize },
    Failure { error: String },
}

impl ToolResponse {
    pub fn saved(kind: ListingKind, summary: &WriteSummary) -> Self {
        ToolResponse::Success {
            message: format!(
                "Extracted {} {} and saved to {}",
                summary.count,
                kind.record_noun(),
                summary.file_name
            ),
            count: summary.count,
        }
    }

    pub fn failed(kind: ListingKind, err: &ScrapeError) -> Self {
        let error = match err {
            ScrapeError::ContainerNotFound
            | ScrapeError::NoListings { .. }
            | ScrapeError::NoValidRecords { .. } => err.to_string(),
            other => format!("Failed to scrape {}: {}", kind.plural(), other),
        };
        ToolResponse::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ToolResponse::Success { .. })
    }

    pub fn to_json(&self) -> String {
        // Both variants are plain strings and integers.
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"error":"unserializable response"}"#.to_string())
    }
}

/// Definition handed to whoever picks tools
#[derive(Debug, Clone, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
}

/// A named callable without arguments that answers in JSON
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Runs the tool to completion and returns its JSON response.
    async fn call(&self) -> String;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
        }
    }
}

/// Runs one scrape target on the blocking pool
pub struct ScrapeTool<L> {
    target: ScrapeTarget,
    scraper: Arc<ListingScraper<L>>,
}

impl<L> ScrapeTool<L> {
    pub fn new(target: ScrapeTarget, scraper: Arc<ListingScraper<L>>) -> Self {
        Self { target, scraper }
    }
}

impl<L: SessionLauncher + 'static> ScrapeTool<L> {
    pub async fn run(&self) -> ToolResponse {
        let scraper = Arc::clone(&self.scraper);
        let target = self.target.clone();
        let kind = target.kind;

        let outcome = tokio::task::spawn_blocking(move || scraper.scrape(&target)).await;
        match outcome {
            Ok(Ok(summary)) => ToolResponse::saved(kind, &summary),
            Ok(Err(e)) => {
                error!("{} failed: {}", self.target.tool_name, e);
                ToolResponse::failed(kind, &e)
            }
            Err(join) => {
                error!("{} panicked: {}", self.target.tool_name, join);
                ToolResponse::failed(kind, &ScrapeError::Browser(join.to_string()))
            }
        }
    }
}

#[async_trait]
impl<L: SessionLauncher + 'static> Tool for ScrapeTool<L> {
    fn name(&self) -> &str {
        &self.target.tool_name
    }

    fn description(&self) -> &str {
        &self.target.description
    }

    async fn call(&self) -> String {
        self.run().await.to_json()
    }
}

/// One entry of a sequential run
#[derive(Debug, Clone, Serialize)]
pub struct ToolInvocation {
    pub tool: String,
    pub started_at: DateTime<Utc>,
    pub elapsed_ms: u128,
    pub response: ToolResponse,
}

/// Tools in registration order, looked up by name
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One tool per configured target, sharing a single scraper.
    pub fn for_targets<L: SessionLauncher + 'static>(scraper: ListingScraper<L>) -> Self {
        let targets = scraper.config().targets.clone();
        let scraper = Arc::new(scraper);
        let mut registry = Self::new();
        for target in targets {
            registry.register(ScrapeTool::new(target, Arc::clone(&scraper)));
        }
        registry
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.push(Box::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Tool> {
        self.tools.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.definition()).collect()
    }

    /// Calls the named tools one after another, each to completion.
    ///
    /// Unknown names and failing tools are recorded and the sequence goes on.
    pub async fn run_sequence<S: AsRef<str>>(&self, names: &[S]) -> Vec<ToolInvocation> {
        let mut invocations = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let started_at = Utc::now();
            let clock = Instant::now();

            let response = match self.get(name) {
                Some(tool) => {
                    info!("Calling tool `{}`", name);
                    let raw = tool.call().await;
                    serde_json::from_str(&raw).unwrap_or(ToolResponse::Failure { error: raw })
                }
                None => ToolResponse::Failure {
                    error: format!("Unknown tool: {}", name),
                },
            };

            invocations.push(ToolInvocation {
                tool: name.to_string(),
                started_at,
                elapsed_ms: clock.elapsed().as_millis(),
                response,
            });
        }
        invocations
    }
}
