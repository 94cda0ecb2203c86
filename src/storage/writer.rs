use anyhow::{Context, Result};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tracing::warn;

use crate::webhook::Lead;

const LEADS_FILE: &str = "leads.jsonl";

/// Append-only lead store: one JSON record per line under the data dir.
/// A single `append` writes one whole line, so concurrent pipeline runs
/// never interleave inside a record.
#[derive(Debug, Clone)]
pub struct LeadStore {
    data_dir: PathBuf,
}

impl LeadStore {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    fn path(&self) -> PathBuf {
        self.data_dir.join(LEADS_FILE)
    }

    pub async fn append(&self, lead: &Lead) -> Result<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .context("Failed to create data directory")?;

        let json = serde_json::to_string(lead).context("Failed to serialize lead")?;
        let line = format!("{json}\n");

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path())
            .await
            .context("Failed to open leads file")?;

        file.write_all(line.as_bytes())
            .await
            .context("Failed to write to leads file")?;

        Ok(())
    }

    /// All persisted leads, oldest first. A missing file is an empty
    /// store; individual corrupt lines are skipped, not fatal.
    pub async fn read_all(&self) -> Result<Vec<Lead>> {
        let contents = match tokio::fs::read_to_string(self.path()).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e).context("Failed to read leads file"),
        };

        let mut leads = Vec::new();
        for line in contents.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Lead>(line) {
                Ok(lead) => leads.push(lead),
                Err(e) => warn!("Skipping corrupt lead record: {e}"),
            }
        }

        Ok(leads)
    }
}
