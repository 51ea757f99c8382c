use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::core::result::FetchResult;
use crate::fetch::traits::Fetcher;

/// Replays a fetch result previously saved as a JSON document, so the
/// reporter chain can be driven without the live upstream.
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

#[async_trait]
impl Fetcher for FileFetcher {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self) -> Result<FetchResult> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("could not read result file {}", self.path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("{} is not a saved fetch result", self.path.display()))
    }
}
