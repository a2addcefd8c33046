//! Exact-fit camera metadata buffers for capture requests and device capabilities.
//!
//! Shutter builds and queries the tagged property buffers a camera device
//! layer exchanges with its framework: default capture request templates, the
//! static capability descriptor, and per-frame results.
//!
//! # Features
//!
//! - **Exact allocation**: every buffer is measured before it is allocated and
//!   is exactly full once written
//! - **One routine, two passes**: builders run the same code to measure and to write
//! - **Typed access**: reads are checked against each tag's declared value type
//! - **No aborts on exhaustion**: allocation failure surfaces as an error
//!
//! # Quick Start
//!
//! ```rust
//! use shutter::{DeviceConfig, MetadataManager, TemplateKind};
//! # let yaml = "camera_id: 0\nsensor:\n  focal_length: 3.37\n  physical_width: 3.6\n  physical_height: 2.7\n  max_width: 2592\n  max_height: 1944\n  picture_resolutions: [2592, 1944]\n  preview_resolutions: [640, 480]\n  available_formats: [258]\n  min_frame_duration: 33331760\n  max_frame_duration: 300000000\n  target_fps_range: [15, 30]\n";
//!
//! let config = DeviceConfig::from_yaml_str(yaml)?;
//! let mut manager = MetadataManager::from_config(config)?;
//!
//! let static_info = manager.create_static_info()?;
//! assert!(static_info.is_full());
//!
//! let request = manager.create_default_request(TemplateKind::VideoRecord)?;
//! manager.activate(&request)?;
//! assert_eq!(manager.frame_rate()?, 15);
//! assert_eq!(manager.jpeg_thumbnail_size()?, (160, 120));
//!
//! // Template requests carry id 0, which no default range contains.
//! assert!(manager.request_category().is_err());
//! # Ok::<(), shutter::MetadataError>(())
//! ```

pub mod buffer;
pub mod builder;
pub mod capabilities;
pub mod classifier;
pub mod clock;
mod codec;
pub mod config;
mod error;
pub mod formats;
pub mod manager;
pub mod sensor;
pub mod templates;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

pub use buffer::{BufferAllocator, EntryView, HeapAllocator, MetadataBuffer};
pub use builder::{Accumulator, build_two_phase, measure_or_write};
pub use capabilities::build_static_capabilities;
pub use classifier::{RequestCategory, RequestClassifier, RequestRanges};
pub use clock::{FixedClock, MonotonicClock, TimestampSource};
pub use codec::{ENTRY_SIZE, HEADER_SIZE, MAX_SPARE_DATA_BYTES, MAX_SPARE_ENTRIES};
pub use config::DeviceConfig;
pub use error::*;
pub use manager::{FRAME_METADATA_ENTRIES, MetadataManager, frame_metadata_data_bytes};
pub use sensor::SensorDescriptor;
pub use templates::{TemplateKind, TemplateOverrides, build_default_request};
pub use types::tags;
pub use types::{Rational, Tag, TagSchema, ValueType, Values};
