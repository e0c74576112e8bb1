//! Error handling for the admin console
//!
//! Every API operation funnels into [`ClientError`]; the console
//! layer turns failures into a single user-facing notice per
//! operation, with no retry and no rollback of sibling requests.

use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ResponseFormat;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: StatusCode, url: String },

    #[error("create response did not include a Location header")]
    MissingLocation,

    #[error("could not resolve resource url: {0}")]
    Url(#[from] url::ParseError),

    #[error("the {0} response format is not implemented")]
    UnsupportedFormat(ResponseFormat),
}
