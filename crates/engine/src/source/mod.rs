mod executor;
mod reqwest;

pub use self::executor::CatalogSource;
pub use self::reqwest::{DEFAULT_CATALOG_URL, HttpCatalogSource};
