use crate::model::Plane;
use std::path::PathBuf;
use thiserror::Error;

/// Failures at the edges of the viewer: direct stack lookups, session
/// payload loading and reference bitmap decoding.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("slice {index} is outside 1..={total} for the {plane} stack")]
    InvalidIndex {
        plane: Plane,
        index: usize,
        total: usize,
    },

    #[error("{}: failed to read session payload ({source})", .path.display())]
    PayloadIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse session payload: {0}")]
    PayloadParse(#[from] serde_json::Error),

    #[error("{locator}: failed to decode slice bitmap ({reason})")]
    BitmapDecode { locator: String, reason: String },

    #[error("{0}: remote slice locators are not fetched by the viewer")]
    RemoteLocator(String),

    #[error("unknown plane `{0}`")]
    UnknownPlane(String),

    #[error("unknown prediction label `{0}`")]
    UnknownLabel(String),

    #[error("unknown viewer role `{0}`")]
    UnknownRole(String),
}

impl ViewerError {
    pub fn bitmap_decode(locator: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::BitmapDecode {
            locator: locator.into(),
            reason: reason.to_string(),
        }
    }
}
