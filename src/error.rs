//! Error types for metadata construction and queries.
//!
//! Every fallible operation in this crate returns [`MetadataError`]. The variants
//! map one-to-one onto the status codes the surrounding device layer expects
//! (`InvalidArgument`, `TagNotFound`, `InvalidTag`, `CapacityExceeded`,
//! `OutOfMemory`, `InvalidRequestId`), plus a few that only a typed API can
//! report (type mismatches, duplicate tags, decode failures).
//!
//! ## Error Categories
//!
//! - **Contract violations**: a builder routine referenced an unknown tag, wrote
//!   more than it measured, or passed values of the wrong type. These are
//!   programming defects and never succeed on retry.
//! - **Lookup misses**: an accessor asked for a tag the current request lacks.
//! - **Resource failures**: the exact-size allocation could not be satisfied.
//! - **Input errors**: bad arguments, malformed wire images, invalid configuration.
//!
//! ```rust
//! use shutter::{MetadataError, tags};
//!
//! let error = MetadataError::TagNotFound { tag: tags::JPEG_QUALITY };
//! assert!(!error.is_programming_defect());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::collections::TryReserveError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::{Tag, ValueType};

/// Result type alias for metadata operations.
pub type Result<T, E = MetadataError> = std::result::Result<T, E>;

/// Which reserved region of a buffer ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Slots in the entry table
    Entries,
    /// Bytes in the extra-data pool
    DataBytes,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Entries => f.write_str("entries"),
            Resource::DataBytes => f.write_str("data bytes"),
        }
    }
}

/// Main error type for metadata operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MetadataError {
    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error("Tag {tag} not found in metadata buffer")]
    TagNotFound { tag: Tag },

    #[error("Tag {tag} is not defined in the tag schema")]
    InvalidTag { tag: Tag },

    #[error("Tag {tag} holds {expected:?} values, got {found:?}")]
    TypeMismatch { tag: Tag, expected: ValueType, found: ValueType },

    #[error("Tag {tag} is already present in the buffer")]
    DuplicateTag { tag: Tag },

    #[error("Capacity exceeded adding {tag}: needs {needed} {resource}, {available} available")]
    CapacityExceeded { tag: Tag, resource: Resource, needed: usize, available: usize },

    #[error(
        "Measured and written passes disagree for {label}: {unused_entries} entries and {unused_bytes} bytes unused"
    )]
    CapacityMismatch { label: String, unused_entries: usize, unused_bytes: usize },

    #[error("Unable to allocate {entries} entries and {data_bytes} bytes of extra data")]
    OutOfMemory {
        entries: usize,
        data_bytes: usize,
        #[source]
        source: Option<TryReserveError>,
    },

    #[error("Request id {id} does not fall in any configured range")]
    InvalidRequestId { id: i32 },

    #[error("Malformed metadata in {context}: {details}")]
    Malformed { context: String, details: String },

    #[error("Invalid configuration in {context}: {details}")]
    Config { context: String, details: String },

    #[error("Configuration file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MetadataError {
    /// Returns whether this error indicates a defect in the calling code rather
    /// than a runtime condition.
    pub fn is_programming_defect(&self) -> bool {
        match self {
            MetadataError::InvalidTag { .. } => true,
            MetadataError::TypeMismatch { .. } => true,
            MetadataError::DuplicateTag { .. } => true,
            MetadataError::CapacityExceeded { .. } => true,
            MetadataError::CapacityMismatch { .. } => true,
            MetadataError::InvalidArgument { .. } => false,
            MetadataError::TagNotFound { .. } => false,
            MetadataError::OutOfMemory { .. } => false,
            MetadataError::InvalidRequestId { .. } => false,
            MetadataError::Malformed { .. } => false,
            MetadataError::Config { .. } => false,
            MetadataError::File { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            MetadataError::InvalidArgument { .. } => vec![
                "Activate a request before querying it",
                "Pass a non-empty output slice",
            ],
            MetadataError::TagNotFound { .. } => vec![
                "Check that the request was built from a default template",
                "Verify the framework populated the tag before activation",
            ],
            MetadataError::InvalidTag { .. } => vec![
                "Register vendor tags in the schema before building",
                "Check the tag constant used by the builder routine",
            ],
            MetadataError::TypeMismatch { .. } => vec![
                "Pass values of the tag's declared type",
                "Check the schema entry for the tag",
            ],
            MetadataError::DuplicateTag { .. } => {
                vec!["Remove the repeated entry from the builder routine"]
            }
            MetadataError::CapacityExceeded { .. } | MetadataError::CapacityMismatch { .. } => {
                vec![
                    "Run the same builder routine for both passes",
                    "Avoid state that changes between the two runs of a builder routine",
                ]
            }
            MetadataError::OutOfMemory { .. } => vec![
                "Release unused metadata buffers",
                "Retry once memory pressure subsides",
            ],
            MetadataError::InvalidRequestId { .. } => vec![
                "Check the configured request id ranges",
                "Verify the framework assigns ids inside those ranges",
            ],
            MetadataError::Malformed { .. } => vec![
                "Verify the wire image was produced by this crate",
                "Check for truncation in transport",
            ],
            MetadataError::Config { .. } | MetadataError::File { .. } => vec![
                "Check the device configuration file exists and is readable",
                "Validate the YAML against the documented fields",
            ],
        }
    }

    /// Helper constructor for invalid argument errors.
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        MetadataError::InvalidArgument { reason: reason.into() }
    }

    /// Helper constructor for allocation failures.
    pub fn out_of_memory(entries: usize, data_bytes: usize, source: TryReserveError) -> Self {
        MetadataError::OutOfMemory { entries, data_bytes, source: Some(source) }
    }

    /// Helper constructor for wire image decode failures.
    pub fn malformed(context: impl Into<String>, details: impl Into<String>) -> Self {
        MetadataError::Malformed { context: context.into(), details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config(context: impl Into<String>, details: impl Into<String>) -> Self {
        MetadataError::Config { context: context.into(), details: details.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tags;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn error_messages_carry_their_context(
            reason in ".*",
            id in any::<i32>(),
            needed in 1usize..4096,
            available in 0usize..4096,
        ) {
            let arg = MetadataError::invalid_argument(reason.clone());
            prop_assert!(arg.to_string().contains(&reason));

            let req = MetadataError::InvalidRequestId { id };
            prop_assert!(req.to_string().contains(&id.to_string()));

            let cap = MetadataError::CapacityExceeded {
                tag: tags::JPEG_QUALITY,
                resource: Resource::DataBytes,
                needed,
                available,
            };
            let msg = cap.to_string();
            prop_assert!(msg.contains(&needed.to_string()));
            prop_assert!(msg.contains("data bytes"));
        }
    }

    #[test]
    fn tag_errors_name_the_tag() {
        let err = MetadataError::TagNotFound { tag: tags::JPEG_GPS_TIMESTAMP };
        assert!(err.to_string().contains("android.jpeg.gpsTimestamp"));

        let err = MetadataError::InvalidTag { tag: Tag(0x7fff_0001) };
        assert!(err.to_string().contains("0x7fff0001"));
    }

    #[test]
    fn defect_classification() {
        assert!(MetadataError::DuplicateTag { tag: tags::REQUEST_ID }.is_programming_defect());
        assert!(
            MetadataError::CapacityMismatch {
                label: "test".to_string(),
                unused_entries: 1,
                unused_bytes: 0
            }
            .is_programming_defect()
        );
        assert!(!MetadataError::InvalidRequestId { id: 3 }.is_programming_defect());
        assert!(!MetadataError::TagNotFound { tag: tags::REQUEST_ID }.is_programming_defect());
    }

    #[test]
    fn out_of_memory_keeps_source() {
        let source = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = MetadataError::out_of_memory(4, 64, source);
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("64 bytes"));
    }

    #[test]
    fn error_traits_validation() {
        fn assert_send_sync_static<T: Send + Sync + 'static>() {}
        assert_send_sync_static::<MetadataError>();

        for error in [
            MetadataError::invalid_argument("x"),
            MetadataError::InvalidRequestId { id: 0 },
            MetadataError::malformed("header", "short"),
        ] {
            let suggestions = error.recovery_suggestions();
            assert!(!suggestions.is_empty());
            assert!(suggestions.iter().all(|s| s.len() > 5));
        }
    }
}
