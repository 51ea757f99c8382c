use anyhow::Result;
use async_trait::async_trait;

use crate::core::result::FetchResult;

/// Boundary to whatever upstream process produced a result. The reporting
/// chain never cares how a result was obtained, only that one exists.
#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<FetchResult>;
}
