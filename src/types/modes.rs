//! Enumerated values stored in byte-typed control and info tags
//!
//! Discriminants match the values the camera framework expects on the wire.

use serde::{Deserialize, Serialize};

macro_rules! byte_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:expr),* $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[repr(u8)]
        pub enum $name {
            $($(#[$vmeta])* $variant = $value),*
        }

        impl $name {
            /// Wire value of this variant.
            pub const fn value(self) -> u8 {
                self as u8
            }
        }

        impl TryFrom<u8> for $name {
            type Error = u8;

            fn try_from(raw: u8) -> Result<Self, u8> {
                match raw {
                    $(x if x == $value => Ok($name::$variant),)*
                    other => Err(other),
                }
            }
        }
    };
}

byte_enum! {
    /// Quality level shared by the processing blocks (hot pixel, demosaic,
    /// noise reduction, shading, geometric, color correction, tonemap, edge).
    pub enum ProcessingMode {
        Off = 0,
        Fast = 1,
        HighQuality = 2,
    }
}

byte_enum! {
    pub enum VideoStabilizationMode {
        Off = 0,
        On = 1,
    }
}

byte_enum! {
    pub enum CaptureIntent {
        Custom = 0,
        Preview = 1,
        StillCapture = 2,
        VideoRecord = 3,
        VideoSnapshot = 4,
        ZeroShutterLag = 5,
    }
}

byte_enum! {
    pub enum AfMode {
        Off = 0,
        Auto = 1,
        Macro = 2,
        ContinuousVideo = 3,
        ContinuousPicture = 4,
        Edof = 5,
    }
}

byte_enum! {
    pub enum AeMode {
        Off = 0,
        On = 1,
        OnAutoFlash = 2,
        OnAlwaysFlash = 3,
    }
}

byte_enum! {
    pub enum AeAntibandingMode {
        Off = 0,
        Hz50 = 1,
        Hz60 = 2,
        Auto = 3,
    }
}

byte_enum! {
    pub enum AwbMode {
        Off = 0,
        Auto = 1,
    }
}

byte_enum! {
    pub enum ControlMode {
        Off = 0,
        Auto = 1,
        UseSceneMode = 2,
    }
}

byte_enum! {
    pub enum EffectMode {
        Off = 0,
        Mono = 1,
        Negative = 2,
    }
}

byte_enum! {
    pub enum SceneMode {
        Unsupported = 0,
        FacePriority = 1,
        Action = 2,
        Portrait = 3,
        Landscape = 4,
    }
}

byte_enum! {
    pub enum FlashMode {
        Off = 0,
        Single = 1,
        Torch = 2,
    }
}

byte_enum! {
    pub enum OpticalStabilizationMode {
        Off = 0,
        On = 1,
    }
}

byte_enum! {
    pub enum LensFacing {
        Front = 0,
        Back = 1,
    }
}

byte_enum! {
    pub enum MetadataMode {
        None = 0,
        Full = 1,
    }
}

byte_enum! {
    pub enum FaceDetectMode {
        Off = 0,
        Simple = 1,
        Full = 2,
    }
}

byte_enum! {
    /// Shared by the histogram and sharpness-map statistics switches.
    pub enum StatisticsMode {
        Off = 0,
        On = 1,
    }
}
