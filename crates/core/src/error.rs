use thiserror::Error;

use crate::model::{DateError, ProgressError, SessionError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Date(#[from] DateError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Progress(#[from] ProgressError),
}
