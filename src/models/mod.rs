pub mod link_metadata;

pub use link_metadata::LinkMetadata;

use serde::{Deserialize, Serialize};

// ============================================================================
// Task Models
// ============================================================================

/// A task attached to a class, optionally enriched with link metadata
/// scraped from the first URL found in its description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub class_id: i64,
    pub description: String,
    /// Present when the description contained a supported URL. Populated by
    /// the metadata pipeline at creation time; `None` means no URL was
    /// detected or the URL was filtered out (e.g. a PDF link).
    pub link: Option<LinkMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskDto {
    pub description: String,
}
