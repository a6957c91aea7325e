//! A cursor for parsing little-endian binary structures out of a byte slice.

use std::ops::{Bound, RangeBounds};

pub trait FromFixedBytes: Sized {
    const SIZE: usize;
    fn parse(bytes: &[u8]) -> Self;
}

macro_rules! impl_fixed_bytes_for_num {
    ($($num:ty),*) => {
        $(
            impl FromFixedBytes for $num {
                const SIZE: usize = std::mem::size_of::<$num>();

                fn parse(bytes: &[u8]) -> Self {
                    let mut byte_array = [0u8; <Self as FromFixedBytes>::SIZE];
                    byte_array.copy_from_slice(&bytes[..<Self as FromFixedBytes>::SIZE]);
                    Self::from_le_bytes(byte_array)
                }
            }
        )*
    };
}

impl_fixed_bytes_for_num!(i8, u8, u16, u32);

#[derive(Debug, thiserror::Error)]
pub enum MemReaderError {
    #[error(
        "Not enough data for {context} at offset {offset:#x}. Needed {required}, but only {available} available."
    )]
    NotEnoughData {
        context: String,
        offset: usize,
        required: usize,
        available: usize,
    },
    #[error("Invalid data at offset {offset:#x}: {message}")]
    InvalidData { offset: usize, message: String },
}

pub type Result<T> = std::result::Result<T, MemReaderError>;

/// Types that can be read from the front of a [`MemReader`].
pub trait Parse: Sized {
    fn parse(reader: &mut MemReader<'_>) -> Result<Self>;
}

macro_rules! impl_read_int {
    ($name:ident, $ty:ty) => {
        pub fn $name(&mut self) -> Result<$ty> {
            self.read_value(stringify!($ty))
        }
    };
}

/// A read cursor over a borrowed byte slice.
///
/// Offsets reported in errors are relative to the slice the root reader was
/// created with, so errors from sub-readers still point at the right place in
/// the original file.
#[derive(Debug, Clone)]
pub struct MemReader<'a> {
    data: &'a [u8],
    pos: usize,
    base_offset: usize,
}

impl<'a> MemReader<'a> {
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        MemReader {
            data,
            pos: 0,
            base_offset: 0,
        }
    }

    #[must_use]
    pub fn tell(&self) -> usize {
        self.pos
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Create an `InvalidData` error pointing at the current position.
    #[must_use]
    pub fn create_invalid_data_error_msg<M: Into<String>>(&self, message: M) -> MemReaderError {
        MemReaderError::InvalidData {
            offset: self.base_offset + self.pos,
            message: message.into(),
        }
    }

    fn not_enough_data(&self, context: &str, required: usize) -> MemReaderError {
        MemReaderError::NotEnoughData {
            context: context.to_string(),
            offset: self.base_offset + self.pos,
            required,
            available: self.remaining(),
        }
    }

    /// Reads exactly `len` bytes, returning a slice borrowed from the
    /// underlying data.
    pub fn read_slice(&mut self, context: &str, len: usize) -> Result<&'a [u8]> {
        if self.remaining() < len {
            return Err(self.not_enough_data(context, len));
        }
        let slice = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub fn read_exact(&mut self, context: &str, buf: &mut [u8]) -> Result<()> {
        buf.copy_from_slice(self.read_slice(context, buf.len())?);
        Ok(())
    }

    pub fn read_value<T: FromFixedBytes>(&mut self, context: &str) -> Result<T> {
        let bytes = self.read_slice(context, T::SIZE)?;
        Ok(T::parse(bytes))
    }

    /// Reads `count` consecutive values.
    pub fn read_values<T: FromFixedBytes>(&mut self, context: &str, count: usize) -> Result<Vec<T>> {
        if self.remaining() < count.saturating_mul(T::SIZE) {
            return Err(self.not_enough_data(context, count.saturating_mul(T::SIZE)));
        }
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(self.read_value(context)?);
        }
        Ok(values)
    }

    impl_read_int!(read_u8, u8);
    impl_read_int!(read_i8, i8);
    impl_read_int!(read_u16_le, u16);
    impl_read_int!(read_u32_le, u32);

    /// Creates a reader over a range of the whole underlying data,
    /// independent of the current position.
    pub fn sub_reader_range<R>(&self, context: &str, range: R) -> Result<MemReader<'a>>
    where
        R: RangeBounds<usize>,
    {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start + 1,
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end + 1,
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.data.len(),
        };
        if start > end || end > self.data.len() {
            return Err(self.create_invalid_data_error_msg(format!(
                "{context}: range {start:#x}..{end:#x} is outside of {} bytes",
                self.data.len()
            )));
        }
        Ok(MemReader {
            data: &self.data[start..end],
            pos: 0,
            base_offset: self.base_offset + start,
        })
    }
}
