use async_trait::async_trait;
use folio_types::CatalogPage;

use crate::error::Result;

/// Remote collaborator that produces the raw catalog listing.
///
/// One call to [`CatalogSource::fetch`] is one outbound request.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch(&self) -> Result<CatalogPage>;

    /// Human readable location used in log lines.
    fn describe(&self) -> String;
}
