//! Public API: parse a stored document (JSON) describing a set of annotated
//! elements into canonical `ElementSpec`s for registration with the engine.
//!
//! Notes:
//! - `font_size` is the natural computed size in device-independent px.
//! - Marker classes/attributes use the vocabulary in `element::markers`.
//! - Parsing is the only fallible edge of the crate; every engine operation
//!   downstream degrades gracefully instead of erroring.

use serde::Deserialize;
use thiserror::Error;

use crate::element::ElementSpec;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("document parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("element font size must be finite and > 0 (tag '{0}')")]
    InvalidFontSize(String),
}

#[derive(Debug, Deserialize)]
struct StoredDocument {
    #[serde(default)]
    #[allow(dead_code)]
    name: Option<String>,
    elements: Vec<ElementSpec>,
}

pub fn parse_document_json(s: &str) -> Result<Vec<ElementSpec>, DocumentError> {
    let doc: StoredDocument = serde_json::from_str(s)?;
    for spec in &doc.elements {
        if !spec.font_size.is_finite() || spec.font_size <= 0.0 {
            return Err(DocumentError::InvalidFontSize(spec.tag.clone()));
        }
    }
    Ok(doc.elements)
}
