//! Tag identifiers and their section namespace

use serde::{Deserialize, Serialize};
use std::fmt;

/// First section index reserved for vendor extensions.
pub const VENDOR_SECTION_START: u16 = 0x8000;

/// 32-bit metadata tag: section index in the high half, field index in the low half.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(pub u32);

impl Tag {
    /// Compose a tag from a standard section and a field index.
    pub const fn new(section: Section, index: u16) -> Self {
        Self(((section as u32) << 16) | index as u32)
    }

    /// Compose a vendor tag. `section` is relative to [`VENDOR_SECTION_START`].
    pub const fn vendor(section: u16, index: u16) -> Self {
        Self((((VENDOR_SECTION_START | section) as u32) << 16) | index as u32)
    }

    /// Raw section index (high 16 bits).
    pub const fn section_index(&self) -> u16 {
        (self.0 >> 16) as u16
    }

    /// Field index within the section (low 16 bits).
    pub const fn index(&self) -> u16 {
        (self.0 & 0xFFFF) as u16
    }

    /// The standard section this tag belongs to, if any.
    pub const fn section(&self) -> Option<Section> {
        Section::from_index(self.section_index())
    }

    /// Whether the tag lives in the vendor range.
    pub const fn is_vendor(&self) -> bool {
        self.section_index() >= VENDOR_SECTION_START
    }

    /// Raw identifier.
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.section(), super::TagSchema::standard().info(*self)) {
            (Some(section), Some(info)) => write!(f, "{}.{}", section.name(), info.name),
            _ => write!(f, "{:#010x}", self.0),
        }
    }
}

/// Semantic groups of the standard tag namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum Section {
    ColorCorrection = 0,
    Control,
    Demosaic,
    Edge,
    Flash,
    FlashInfo,
    Geometric,
    HotPixel,
    Jpeg,
    Lens,
    LensInfo,
    NoiseReduction,
    Quirks,
    Request,
    Scaler,
    Sensor,
    SensorInfo,
    Shading,
    Statistics,
    StatisticsInfo,
    Tonemap,
}

impl Section {
    const ALL: [Section; 21] = [
        Section::ColorCorrection,
        Section::Control,
        Section::Demosaic,
        Section::Edge,
        Section::Flash,
        Section::FlashInfo,
        Section::Geometric,
        Section::HotPixel,
        Section::Jpeg,
        Section::Lens,
        Section::LensInfo,
        Section::NoiseReduction,
        Section::Quirks,
        Section::Request,
        Section::Scaler,
        Section::Sensor,
        Section::SensorInfo,
        Section::Shading,
        Section::Statistics,
        Section::StatisticsInfo,
        Section::Tonemap,
    ];

    pub const fn from_index(index: u16) -> Option<Self> {
        if (index as usize) < Self::ALL.len() { Some(Self::ALL[index as usize]) } else { None }
    }

    /// Dotted namespace prefix used in tag names.
    pub const fn name(&self) -> &'static str {
        match self {
            Section::ColorCorrection => "android.colorCorrection",
            Section::Control => "android.control",
            Section::Demosaic => "android.demosaic",
            Section::Edge => "android.edge",
            Section::Flash => "android.flash",
            Section::FlashInfo => "android.flash.info",
            Section::Geometric => "android.geometric",
            Section::HotPixel => "android.hotPixel",
            Section::Jpeg => "android.jpeg",
            Section::Lens => "android.lens",
            Section::LensInfo => "android.lens.info",
            Section::NoiseReduction => "android.noiseReduction",
            Section::Quirks => "android.quirks",
            Section::Request => "android.request",
            Section::Scaler => "android.scaler",
            Section::Sensor => "android.sensor",
            Section::SensorInfo => "android.sensor.info",
            Section::Shading => "android.shading",
            Section::Statistics => "android.statistics",
            Section::StatisticsInfo => "android.statistics.info",
            Section::Tonemap => "android.tonemap",
        }
    }
}
