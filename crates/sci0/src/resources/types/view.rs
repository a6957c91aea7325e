use crate::utils::mem_reader::MemReader;

use super::TypeParseError;

/// Cels larger than a full 320x200 screen are treated as corrupt.
const MAX_CEL_PIXELS: usize = 320 * 200;

/// A single image of a view, with one palette index per pixel.
#[derive(Debug, Clone)]
pub struct Cel {
    width: u16,
    height: u16,
    x_shift: i8,
    y_shift: i8,
    transparent_color: u8,
    pixels: Vec<u8>,
}

impl Cel {
    fn read_at(data: &MemReader<'_>, offset: u16) -> Result<Self, TypeParseError> {
        let mut reader = data.sub_reader_range("cel", usize::from(offset)..)?;
        let width = reader.read_u16_le()?;
        let height = reader.read_u16_le()?;
        let x_shift = reader.read_i8()?;
        let y_shift = reader.read_i8()?;
        let transparent_color = reader.read_u8()?;

        let pixel_count = usize::from(width) * usize::from(height);
        if pixel_count > MAX_CEL_PIXELS {
            return Err(TypeParseError::CelTooLarge {
                width,
                height,
                limit: MAX_CEL_PIXELS,
            });
        }

        // Each byte is a run: the high nibble counts pixels of the color in
        // the low nibble.
        let mut pixels = Vec::with_capacity(pixel_count);
        while pixels.len() < pixel_count {
            let run = reader.read_u8()?;
            let count = usize::from(run >> 4).min(pixel_count - pixels.len());
            pixels.resize(pixels.len() + count, run & 0x0F);
        }

        Ok(Cel {
            width,
            height,
            x_shift,
            y_shift,
            transparent_color,
            pixels,
        })
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The placement adjustment relative to the object's position.
    #[must_use]
    pub fn shift(&self) -> (i8, i8) {
        (self.x_shift, self.y_shift)
    }

    #[must_use]
    pub fn transparent_color(&self) -> u8 {
        self.transparent_color
    }

    /// Pixels in row-major order.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> u8 {
        self.pixels[usize::from(y) * usize::from(self.width) + usize::from(x)]
    }
}

#[derive(Debug, Clone)]
pub struct Loop {
    mirrored: bool,
    cels: Vec<Cel>,
}

impl Loop {
    fn read_at(data: &MemReader<'_>, offset: u16, mirrored: bool) -> Result<Self, TypeParseError> {
        let mut reader = data.sub_reader_range("loop", usize::from(offset)..)?;
        let cel_count = reader.read_u16_le()?;
        let _reserved = reader.read_u16_le()?;
        let cel_offsets: Vec<u16> = reader.read_values("cel offsets", usize::from(cel_count))?;
        let cels = cel_offsets
            .into_iter()
            .map(|cel_offset| Cel::read_at(data, cel_offset))
            .collect::<Result<_, _>>()?;
        Ok(Loop { mirrored, cels })
    }

    /// Whether the loop is drawn as a horizontal mirror image.
    #[must_use]
    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    #[must_use]
    pub fn cels(&self) -> &[Cel] {
        &self.cels
    }
}

/// An SCI0 view: a set of animation loops, each a sequence of cels.
#[derive(Debug, Clone)]
pub struct View {
    mirror_mask: u16,
    loops: Vec<Loop>,
}

impl View {
    pub fn from_bytes(data: &[u8]) -> Result<Self, TypeParseError> {
        let data = MemReader::new(data);
        let mut header = data.clone();
        let loop_count = header.read_u16_le()?;
        let mirror_mask = header.read_u16_le()?;
        let mut reserved = [0u8; 4];
        header.read_exact("view reserved", &mut reserved)?;
        let loop_offsets: Vec<u16> = header.read_values("loop offsets", usize::from(loop_count))?;

        let loops = loop_offsets
            .into_iter()
            .enumerate()
            .map(|(index, offset)| {
                let mirrored = index < 16 && (mirror_mask >> index) & 1 != 0;
                Loop::read_at(&data, offset, mirrored)
            })
            .collect::<Result<_, _>>()?;
        Ok(View { mirror_mask, loops })
    }

    #[must_use]
    pub fn mirror_mask(&self) -> u16 {
        self.mirror_mask
    }

    #[must_use]
    pub fn loops(&self) -> &[Loop] {
        &self.loops
    }
}
