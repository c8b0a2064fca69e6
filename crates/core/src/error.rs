use thiserror::Error;

use crate::model::{CatalogError, SummaryError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Summary(#[from] SummaryError),
}
