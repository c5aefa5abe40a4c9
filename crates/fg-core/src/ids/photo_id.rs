use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Opaque photo identifier assigned by the remote service.
///
/// Stable across requests for the same underlying image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhotoId(String);

impl_id!(PhotoId);

impl PhotoId {
    /// Returns `None` for blank input; feed ingestion drops such records.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self::from(trimmed))
        }
    }
}
