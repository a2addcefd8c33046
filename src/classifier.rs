//! Request id classification
//!
//! The framework hands out request ids from disjoint numeric ranges, one per
//! kind of stream. A [`RequestClassifier`] maps an id back to its
//! [`RequestCategory`]. Ranges are half-open and are checked in the order
//! preview, recording, capture; the first match wins. Ids in no range are
//! rejected rather than guessed.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{MetadataError, Result};

/// Kind of stream a request feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestCategory {
    Preview,
    Recording,
    Capture,
}

impl fmt::Display for RequestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestCategory::Preview => f.write_str("preview"),
            RequestCategory::Recording => f.write_str("recording"),
            RequestCategory::Capture => f.write_str("capture"),
        }
    }
}

/// Id ranges for each request category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestRanges {
    pub preview: Range<i32>,
    pub recording: Range<i32>,
    pub capture: Range<i32>,
}

impl Default for RequestRanges {
    fn default() -> Self {
        Self {
            preview: 10_000_000..20_000_000,
            recording: 20_000_000..30_000_000,
            capture: 30_000_000..40_000_000,
        }
    }
}

impl RequestRanges {
    fn labelled(&self) -> [(RequestCategory, &Range<i32>); 3] {
        [
            (RequestCategory::Preview, &self.preview),
            (RequestCategory::Recording, &self.recording),
            (RequestCategory::Capture, &self.capture),
        ]
    }

    /// Reject empty or overlapping ranges.
    ///
    /// The classifier itself tolerates overlap (first match wins); this is
    /// for configuration loading, where overlap is almost always a typo.
    pub fn validate(&self) -> Result<()> {
        let ranges = self.labelled();
        for (category, range) in ranges {
            if range.is_empty() {
                return Err(MetadataError::config(
                    "request_ranges",
                    format!("{} range {:?} is empty", category, range),
                ));
            }
        }
        for (i, (first, a)) in ranges.iter().enumerate() {
            for (second, b) in &ranges[i + 1..] {
                if a.start < b.end && b.start < a.end {
                    return Err(MetadataError::config(
                        "request_ranges",
                        format!("{} range {:?} overlaps {} range {:?}", first, a, second, b),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Maps request ids to categories. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct RequestClassifier {
    ranges: RequestRanges,
}

impl RequestClassifier {
    pub fn new(ranges: RequestRanges) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &RequestRanges {
        &self.ranges
    }

    /// Category of `id`, or [`MetadataError::InvalidRequestId`] when no range
    /// contains it.
    pub fn classify(&self, id: i32) -> Result<RequestCategory> {
        let category = self
            .ranges
            .labelled()
            .into_iter()
            .find(|(_, range)| range.contains(&id))
            .map(|(category, _)| category)
            .ok_or(MetadataError::InvalidRequestId { id })?;
        debug!("Request {} classified as {}", id, category);
        Ok(category)
    }
}
