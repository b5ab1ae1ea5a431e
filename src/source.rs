//! Source retrieval for a single item.
//!
//! Parameters are validated before any path is built, so a request can only
//! ever read `<items_root>/<category>/<id>/source.tsx`.

use crate::catalog::{ItemId, ItemType, SOURCE_FILE};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("Missing type or id")]
    MissingParams,
    #[error("Invalid type")]
    InvalidType,
    #[error("Invalid id")]
    InvalidId,
    #[error("Source file not found")]
    NotFound,
}

impl SourceError {
    /// HTTP-style status: 400 for bad parameters, 404 for a missing file.
    pub fn status_code(self) -> u16 {
        match self {
            SourceError::MissingParams | SourceError::InvalidType | SourceError::InvalidId => 400,
            SourceError::NotFound => 404,
        }
    }
}

/// A validated `(type, id)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRequest {
    pub item_type: ItemType,
    pub id: ItemId,
}

impl SourceRequest {
    /// Empty strings count as missing.
    pub fn parse(item_type: Option<&str>, id: Option<&str>) -> Result<Self, SourceError> {
        let (Some(item_type), Some(id)) = (
            item_type.filter(|value| !value.is_empty()),
            id.filter(|value| !value.is_empty()),
        ) else {
            return Err(SourceError::MissingParams);
        };
        let item_type: ItemType = item_type.parse().map_err(|_| SourceError::InvalidType)?;
        let id = ItemId::parse(id).map_err(|_| SourceError::InvalidId)?;
        Ok(Self { item_type, id })
    }

    /// `<category>/<id>/source.tsx`, relative to the items root.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.item_type.dir_name())
            .join(self.id.as_str())
            .join(SOURCE_FILE)
    }
}

/// Read an item's source; the returned text always ends with a newline.
///
/// Bytes that are not valid UTF-8 decode to U+FFFD.
pub fn read_source(items_root: &Path, request: &SourceRequest) -> Result<String, SourceError> {
    let path = items_root.join(request.relative_path());
    debug!(path = %path.display(), "reading source");
    match fs::read(&path) {
        Ok(bytes) => {
            let mut source = match String::from_utf8(bytes) {
                Ok(source) => source,
                Err(err) => {
                    debug!(path = %path.display(), "source is not valid UTF-8, decoding lossily");
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                }
            };
            if !source.ends_with('\n') {
                source.push('\n');
            }
            Ok(source)
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read source file");
            Err(SourceError::NotFound)
        }
    }
}

/// JSON body of a source response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SourceResponse {
    Source { source: String },
    Error { error: String },
}

/// Validate raw parameters and read the source, yielding a status and body.
pub fn respond(items_root: &Path, item_type: Option<&str>, id: Option<&str>) -> (u16, SourceResponse) {
    let result = SourceRequest::parse(item_type, id)
        .and_then(|request| read_source(items_root, &request));
    match result {
        Ok(source) => (200, SourceResponse::Source { source }),
        Err(err) => (
            err.status_code(),
            SourceResponse::Error {
                error: err.to_string(),
            },
        ),
    }
}
