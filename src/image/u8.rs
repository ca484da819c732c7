use crate::error::ImageError;

/// Borrowed 8-bit image view: `h` rows of `w` pixels with `channels`
/// interleaved samples each. Construction validates the buffer shape, so
/// every accessor below is in bounds.
#[derive(Clone, Copy, Debug)]
pub struct ImageU8<'a> {
    w: usize,
    h: usize,
    channels: usize,
    stride: usize, // samples between rows
    data: &'a [u8],
}

impl<'a> ImageU8<'a> {
    /// Tightly packed view (`stride == w * channels`).
    pub fn new(w: usize, h: usize, channels: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        let stride = w
            .checked_mul(channels)
            .ok_or(ImageError::DimensionOverflow {
                width: w,
                height: h,
                channels,
            })?;
        Self::with_stride(w, h, channels, stride, data)
    }

    /// Single-channel tightly packed view.
    pub fn gray(w: usize, h: usize, data: &'a [u8]) -> Result<Self, ImageError> {
        Self::new(w, h, 1, data)
    }

    /// View with an explicit row stride (in samples).
    pub fn with_stride(
        w: usize,
        h: usize,
        channels: usize,
        stride: usize,
        data: &'a [u8],
    ) -> Result<Self, ImageError> {
        if channels == 0 {
            return Err(ImageError::ZeroChannels);
        }
        let overflow = ImageError::DimensionOverflow {
            width: w,
            height: h,
            channels,
        };
        let row_len = w.checked_mul(channels).ok_or_else(|| overflow.clone())?;
        if stride < row_len {
            return Err(ImageError::StrideTooSmall {
                stride,
                row_len,
                width: w,
                channels,
            });
        }
        // The last row only needs `row_len` samples, not a full stride.
        let required = match h {
            0 => 0,
            _ => stride
                .checked_mul(h - 1)
                .and_then(|v| v.checked_add(row_len))
                .ok_or(overflow)?,
        };
        if data.len() < required {
            return Err(ImageError::BufferTooShort {
                width: w,
                height: h,
                channels,
                stride,
                required,
                actual: data.len(),
            });
        }
        Ok(Self {
            w,
            h,
            channels,
            stride,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize, c: usize) -> u8 {
        self.data[y * self.stride + x * self.channels + c]
    }

    /// Samples of pixels `[x0, x1)` on row `y`, channels interleaved.
    #[inline]
    pub fn span(&self, y: usize, x0: usize, x1: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start + x0 * self.channels..start + x1 * self.channels]
    }

    /// Smallest and largest sample, `None` for an empty image.
    pub fn sample_range(&self) -> Option<(u8, u8)> {
        use crate::image::traits::ImageView;
        self.rows().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl<'a> crate::image::traits::ImageView for ImageU8<'a> {
    type Pixel = u8;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn channels(&self) -> usize {
        self.channels
    }
    #[inline]
    fn stride(&self) -> usize {
        self.stride
    }
    #[inline]
    fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.data[start..start + self.w * self.channels]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[u8]> {
        let row_len = self.w * self.channels;
        (self.stride == row_len).then_some(&self.data[..row_len * self.h])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageView;

    #[test]
    fn rejects_short_buffer() {
        let data = vec![0u8; 11];
        let err = ImageU8::new(4, 3, 1, &data).unwrap_err();
        assert!(matches!(
            err,
            ImageError::BufferTooShort {
                required: 12,
                actual: 11,
                ..
            }
        ));
    }

    #[test]
    fn rejects_zero_channels_and_narrow_stride() {
        let data = vec![0u8; 16];
        assert_eq!(
            ImageU8::new(4, 4, 0, &data).unwrap_err(),
            ImageError::ZeroChannels
        );
        assert!(matches!(
            ImageU8::with_stride(4, 2, 2, 7, &data),
            Err(ImageError::StrideTooSmall { row_len: 8, .. })
        ));
    }

    #[test]
    fn strided_rows_skip_padding() {
        // Two rows of 2 RGB pixels, padded to a stride of 8 samples.
        let data = [
            1, 2, 3, 4, 5, 6, 99, 99, //
            7, 8, 9, 10, 11, 12,
        ];
        let img = ImageU8::with_stride(2, 2, 3, 8, &data).unwrap();
        assert_eq!(img.row(1), &[7, 8, 9, 10, 11, 12]);
        assert_eq!(img.get(1, 0, 2), 6);
        assert_eq!(img.span(1, 1, 2), &[10, 11, 12]);
        assert!(img.as_slice().is_none());
        assert_eq!(img.sample_range(), Some((1, 12)));
    }

    #[test]
    fn empty_image_is_valid() {
        let img = ImageU8::gray(0, 0, &[]).unwrap();
        assert_eq!(img.rows().count(), 0);
        assert_eq!(img.sample_range(), None);
    }
}
