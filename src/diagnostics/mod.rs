//! Report metadata shared by the composed operations in [`crate::pipeline`].
//!
//! Reports carry a description of the input image and a per-stage timing
//! trace next to their numeric payload.

pub mod timing;

pub use timing::{StageTiming, TimingBreakdown};

use crate::image::{ImageU8, ImageView};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub channels: usize,
}

impl InputDescriptor {
    pub fn of(image: &ImageU8<'_>) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
            channels: image.channels(),
        }
    }
}
