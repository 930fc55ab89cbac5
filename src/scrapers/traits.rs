use crate::models::Listing;
use anyhow::Result;
use async_trait::async_trait;

/// Common trait for all listing collectors.
/// This allows easy addition of new sources or fetch strategies later.
#[async_trait]
pub trait Collector: Send + Sync {
    /// Collect every listing the source page currently shows.
    /// May legitimately return an empty vec.
    async fn collect(&self) -> Result<Vec<Listing>>;

    /// Get the name of the collector source
    fn source_name(&self) -> &'static str;
}
