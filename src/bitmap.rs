//! Single-pixel access to raw bitmap buffers
//!
//! A thin format-dispatch layer over a row-major byte buffer, enough to peek
//! and poke individual pixels for the few effects that need framebuffer
//! access. Only the 1-bit and 8-bit formats are fully implemented; the
//! multi-bit palette formats never appeared on the hardware this was written
//! for and remain unimplemented.

/// Pixel layout of a bitmap buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 1 bit per pixel, LSB first within each byte; 0 = black, 1 = white
    OneBit,
    /// 1 bit per pixel indexing a 2-entry palette
    OneBitPalette,
    /// 2 bits per pixel indexing a 4-entry palette (unimplemented)
    TwoBitPalette,
    /// 4 bits per pixel indexing a 16-entry palette (unimplemented)
    FourBitPalette,
    /// 8 bits per pixel, raw value
    EightBit,
}

/// Mutable view over a row-major pixel buffer.
pub struct PixelBuffer<'a> {
    data: &'a mut [u8],
    width: usize,
    height: usize,
    /// Bytes per row
    stride: usize,
    format: PixelFormat,
    palette: &'a [u8],
}

impl<'a> PixelBuffer<'a> {
    pub fn new(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        format: PixelFormat,
    ) -> Self {
        debug_assert!(stride * height <= data.len());
        Self {
            data,
            width,
            height,
            stride,
            format,
            palette: &[],
        }
    }

    /// Attach a palette for the palette-indexed formats.
    pub fn with_palette(mut self, palette: &'a [u8]) -> Self {
        self.palette = palette;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read one pixel. `None` when the coordinate is out of bounds or the
    /// format is unimplemented. Palette formats return the palette entry.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let row = &self.data[y * self.stride..(y + 1) * self.stride];
        match self.format {
            PixelFormat::OneBit => Some((row[x / 8] >> (x % 8)) & 1),
            PixelFormat::OneBitPalette => {
                let index = ((row[x / 8] >> (x % 8)) & 1) as usize;
                self.palette.get(index).copied()
            }
            PixelFormat::TwoBitPalette | PixelFormat::FourBitPalette => None,
            PixelFormat::EightBit => Some(row[x]),
        }
    }

    /// Write one pixel. Out-of-bounds coordinates and unimplemented formats
    /// are ignored. For 1-bit formats any nonzero value sets the bit.
    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        if x >= self.width || y >= self.height {
            return;
        }

        let row = &mut self.data[y * self.stride..(y + 1) * self.stride];
        match self.format {
            PixelFormat::OneBit | PixelFormat::OneBitPalette => {
                let mask = 1 << (x % 8);
                if value != 0 {
                    row[x / 8] |= mask;
                } else {
                    row[x / 8] &= !mask;
                }
            }
            PixelFormat::TwoBitPalette | PixelFormat::FourBitPalette => {}
            PixelFormat::EightBit => row[x] = value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_bit_round_trip() {
        let mut data = [0u8; 8]; // 16x4, stride 2
        let mut buffer = PixelBuffer::new(&mut data, 16, 4, 2, PixelFormat::OneBit);

        assert_eq!(buffer.get(10, 2), Some(0));
        buffer.set(10, 2, 1);
        assert_eq!(buffer.get(10, 2), Some(1));
        // neighbors untouched
        assert_eq!(buffer.get(9, 2), Some(0));
        assert_eq!(buffer.get(11, 2), Some(0));
        assert_eq!(buffer.get(10, 1), Some(0));

        buffer.set(10, 2, 0);
        assert_eq!(buffer.get(10, 2), Some(0));
    }

    #[test]
    fn test_one_bit_lsb_first_layout() {
        let mut data = [0u8; 2];
        let mut buffer = PixelBuffer::new(&mut data, 16, 1, 2, PixelFormat::OneBit);

        buffer.set(0, 0, 1);
        buffer.set(9, 0, 1);
        assert_eq!(data, [0b0000_0001, 0b0000_0010]);
    }

    #[test]
    fn test_eight_bit_round_trip() {
        let mut data = [0u8; 12]; // 4x3
        let mut buffer = PixelBuffer::new(&mut data, 4, 3, 4, PixelFormat::EightBit);

        buffer.set(3, 2, 0xC3);
        assert_eq!(buffer.get(3, 2), Some(0xC3));
        assert_eq!(buffer.get(2, 2), Some(0));
    }

    #[test]
    fn test_one_bit_palette_lookup() {
        let mut data = [0b0000_0010u8];
        let palette = [0x11, 0xEE];
        let buffer =
            PixelBuffer::new(&mut data, 8, 1, 1, PixelFormat::OneBitPalette).with_palette(&palette);

        assert_eq!(buffer.get(0, 0), Some(0x11));
        assert_eq!(buffer.get(1, 0), Some(0xEE));
    }

    #[test]
    fn test_unimplemented_formats_are_inert() {
        let mut data = [0u8; 4];
        let mut buffer = PixelBuffer::new(&mut data, 4, 1, 4, PixelFormat::TwoBitPalette);

        assert_eq!(buffer.get(0, 0), None);
        buffer.set(0, 0, 0xFF);
        assert_eq!(data, [0u8; 4]);
    }

    #[test]
    fn test_out_of_bounds_access_is_safe() {
        let mut data = [0u8; 4];
        let mut buffer = PixelBuffer::new(&mut data, 4, 1, 4, PixelFormat::EightBit);

        assert_eq!(buffer.get(4, 0), None);
        assert_eq!(buffer.get(0, 1), None);
        buffer.set(4, 0, 0xFF); // ignored
        assert_eq!(data, [0u8; 4]);
    }
}
