//! Channel reduction to a single luma plane.
//!
//! Uses the ITU-R BT.601 weights `0.299 R + 0.587 G + 0.114 B` in 14-bit
//! fixed point, `(4899 R + 9617 G + 1868 B + 8192) >> 14`, the same integer
//! form common vision libraries use for RGB to gray. A fourth channel is
//! treated as alpha and ignored.

use super::io::OwnedImageU8;
use super::{ImageU8, ImageView};
use crate::error::GridError;
use serde::{Deserialize, Serialize};

/// Order of the colour channels in an interleaved 3- or 4-channel image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    #[default]
    Rgb,
    Bgr,
}

const LUMA_SHIFT: u32 = 14;
const WR: u32 = 4899;
const WG: u32 = 9617;
const WB: u32 = 1868;
const ROUND: u32 = 1 << (LUMA_SHIFT - 1);

/// Reduce `image` to one channel. Single-channel input is copied unchanged.
pub fn to_luma(image: &ImageU8<'_>, order: ChannelOrder) -> Result<OwnedImageU8, GridError> {
    let channels = image.channels();
    if !matches!(channels, 1 | 3 | 4) {
        return Err(GridError::UnsupportedChannels { channels });
    }
    let (w, h) = (image.width(), image.height());
    let mut data = Vec::with_capacity(w * h);
    for row in image.rows() {
        if channels == 1 {
            data.extend_from_slice(row);
            continue;
        }
        data.extend(row.chunks_exact(channels).map(|px| {
            let (r, b) = match order {
                ChannelOrder::Rgb => (px[0], px[2]),
                ChannelOrder::Bgr => (px[2], px[0]),
            };
            // Weights sum to 1 << 14, so the result never exceeds 255.
            let y = WR * r as u32 + WG * px[1] as u32 + WB * b as u32 + ROUND;
            (y >> LUMA_SHIFT) as u8
        }));
    }
    Ok(OwnedImageU8::new(w, h, 1, data))
}
