use crate::utils::mem_reader::MemReader;

use super::TypeParseError;

pub const CURSOR_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorPixel {
    Black,
    White,
    Transparent,
    Invert,
}

impl CursorPixel {
    fn from_bits(transparency: bool, color: bool) -> Self {
        match (transparency, color) {
            (false, false) => CursorPixel::Black,
            (false, true) => CursorPixel::White,
            (true, false) => CursorPixel::Transparent,
            (true, true) => CursorPixel::Invert,
        }
    }
}

/// A 16x16 SCI0 mouse cursor.
#[derive(Debug, Clone)]
pub struct Cursor {
    hotspot_x: u16,
    hotspot_y: u16,
    pixels: [[CursorPixel; CURSOR_SIZE]; CURSOR_SIZE],
}

impl Cursor {
    /// Parses the hotspot followed by sixteen transparency rows and sixteen
    /// color rows. The most significant bit of a row is its leftmost pixel.
    pub fn from_bytes(data: &[u8]) -> Result<Self, TypeParseError> {
        let mut reader = MemReader::new(data);
        let hotspot_x = reader.read_u16_le()?;
        let hotspot_y = reader.read_u16_le()?;
        let transparency: Vec<u16> = reader.read_values("cursor transparency", CURSOR_SIZE)?;
        let color: Vec<u16> = reader.read_values("cursor color", CURSOR_SIZE)?;

        let mut pixels = [[CursorPixel::Black; CURSOR_SIZE]; CURSOR_SIZE];
        for (y, row) in pixels.iter_mut().enumerate() {
            for (x, pixel) in row.iter_mut().enumerate() {
                let mask = 0x8000 >> x;
                *pixel = CursorPixel::from_bits(
                    transparency[y] & mask != 0,
                    color[y] & mask != 0,
                );
            }
        }
        Ok(Cursor {
            hotspot_x,
            hotspot_y,
            pixels,
        })
    }

    #[must_use]
    pub fn hotspot(&self) -> (u16, u16) {
        (self.hotspot_x, self.hotspot_y)
    }

    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> CursorPixel {
        self.pixels[y][x]
    }

    #[must_use]
    pub fn rows(&self) -> &[[CursorPixel; CURSOR_SIZE]; CURSOR_SIZE] {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use datalit::datalit;

    use super::*;

    #[test]
    fn decodes_mask_planes() {
        let data = datalit! {
            @endian = le,
            3u16, 5u16,       // hotspot
            0x00FFu16,        // row 0: left half opaque, right half clear
            0xFFFFu16,
            0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16,
            0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16, 0xFFFFu16,
            0x0F0Fu16,        // row 0 color
            0x0000u16,
            0u16, 0u16, 0u16, 0u16, 0u16, 0u16, 0u16,
            0u16, 0u16, 0u16, 0u16, 0u16, 0u16, 0u16,
        };
        let cursor = Cursor::from_bytes(&data).unwrap();
        assert_eq!(cursor.hotspot(), (3, 5));
        assert_eq!(cursor.pixel(0, 0), CursorPixel::Black);
        assert_eq!(cursor.pixel(4, 0), CursorPixel::White);
        assert_eq!(cursor.pixel(8, 0), CursorPixel::Transparent);
        assert_eq!(cursor.pixel(15, 0), CursorPixel::Invert);
        assert!(cursor.rows()[1..]
            .iter()
            .flatten()
            .all(|&p| p == CursorPixel::Transparent));
    }

    #[test]
    fn truncated_cursor_is_an_error() {
        assert!(Cursor::from_bytes(&[0; 40]).is_err());
    }
}
