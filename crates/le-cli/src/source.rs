//! Where the fixture collection comes from.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use le_core::{Channel, EventRecord};
use serde::Deserialize;

use crate::Config;

/// Built-in fixture used when nothing else is configured.
const SAMPLE_FIXTURE: &str = include_str!("../fixtures/sample.json");

/// Resolved data source, in precedence order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Remote,
    Sample,
}

/// Events and channels loaded from a source.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<EventRecord>,
    pub channels: Vec<Channel>,
}

#[derive(Deserialize)]
struct FixtureFile {
    #[serde(default)]
    events: Vec<EventRecord>,
    #[serde(default)]
    channels: Vec<Channel>,
}

impl Source {
    /// `--file` wins, then `--remote`, then the configured fixture, then the sample.
    pub fn resolve(file: Option<&Path>, remote: bool, config: &Config) -> Self {
        if let Some(path) = file {
            Self::File(path.to_path_buf())
        } else if remote {
            Self::Remote
        } else if let Some(path) = &config.fixture_path {
            Self::File(path.clone())
        } else {
            Self::Sample
        }
    }

    pub fn load(&self, config: &Config) -> Result<Dataset> {
        let dataset = match self {
            Self::File(path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                parse_fixture(&content)
                    .with_context(|| format!("invalid fixture file {}", path.display()))?
            }
            Self::Remote => fetch_remote(config)?,
            Self::Sample => parse_fixture(SAMPLE_FIXTURE).context("invalid built-in fixture")?,
        };
        tracing::debug!(
            source = ?self,
            events = dataset.records.len(),
            channels = dataset.channels.len(),
            "loaded dataset"
        );
        Ok(dataset)
    }
}

fn parse_fixture(content: &str) -> Result<Dataset> {
    let fixture: FixtureFile = serde_json::from_str(content)?;
    Ok(Dataset {
        records: fixture.events,
        channels: fixture.channels,
    })
}

fn fetch_remote(config: &Config) -> Result<Dataset> {
    let client = le_api::Client::new(config.api_base_url.clone())
        .context("failed to create feed client")?;
    let runtime = tokio::runtime::Runtime::new().context("failed to initialize tokio runtime")?;
    let feed = runtime
        .block_on(client.fetch_events(config.fetch_limit))
        .context("failed to fetch live events")?;
    tracing::info!(
        endpoint = %feed.endpoint,
        source = feed.reported_source.as_deref().unwrap_or("API"),
        events = feed.records.len(),
        "fetched live events"
    );
    Ok(Dataset {
        records: feed.records,
        channels: feed.channels,
    })
}
