//! Device configuration loading
//!
//! A device is described by a small YAML document naming the camera id, the
//! sensor descriptor, and optionally the request id ranges:
//!
//! ```yaml
//! camera_id: 0
//! sensor:
//!   focal_length: 3.37
//!   physical_width: 3.6288
//!   physical_height: 2.7216
//!   max_width: 2592
//!   max_height: 1944
//!   picture_resolutions: [2592, 1944, 1280, 720]
//!   preview_resolutions: [1280, 720, 640, 480]
//!   available_formats: [258, 257, 20, 33]
//!   min_frame_duration: 33331760
//!   max_frame_duration: 300000000
//!   target_fps_range: [15, 30]
//! request_ranges:
//!   preview: { start: 10000000, end: 20000000 }
//! ```
//!
//! Ranges left out keep their defaults. Loading validates everything so that
//! a bad file fails at startup rather than on the request path.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::RequestRanges;
use crate::sensor::SensorDescriptor;
use crate::{MetadataError, Result};

/// Everything needed to construct a [`crate::MetadataManager`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    pub camera_id: u32,
    pub sensor: SensorDescriptor,
    #[serde(default)]
    pub request_ranges: RequestRanges,
}

impl DeviceConfig {
    /// Parse and validate a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: DeviceConfig = serde_yaml_ng::from_str(yaml).map_err(|e| {
            MetadataError::config("device YAML", format!("YAML parsing failed: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|source| MetadataError::File { path: path.to_path_buf(), source })?;
        let config = Self::from_yaml_str(&yaml)?;
        debug!("Loaded device config for camera {} from {}", config.camera_id, path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.sensor.validate().map_err(|e| MetadataError::config("sensor", e.to_string()))?;
        self.request_ranges.validate()
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_yaml_ng::to_string(self)
            .map_err(|e| MetadataError::config("device YAML", format!("serialization failed: {}", e)))
    }
}
