//! Bit packing for building compressed streams in tests.

#[derive(Debug, Clone, Copy)]
pub(super) enum BitOrder {
    /// Least significant bit first, as LZW codes are stored.
    LsbFirst,
    /// Most significant bit first, as the Huffman bitstream is stored.
    MsbFirst,
}

#[derive(Debug)]
pub(super) struct BitPacker {
    order: BitOrder,
    output: Vec<u8>,
    pending: u8,
    pending_len: u8,
}

impl BitPacker {
    pub(super) fn new(order: BitOrder) -> Self {
        BitPacker {
            order,
            output: Vec::new(),
            pending: 0,
            pending_len: 0,
        }
    }

    pub(super) fn push_bit(&mut self, bit: bool) {
        if bit {
            self.pending |= match self.order {
                BitOrder::LsbFirst => 1 << self.pending_len,
                BitOrder::MsbFirst => 0x80 >> self.pending_len,
            };
        }
        self.pending_len += 1;
        if self.pending_len == 8 {
            self.output.push(self.pending);
            self.pending = 0;
            self.pending_len = 0;
        }
    }

    /// Pushes the low `width` bits of `value`. LSB-first streams take them
    /// starting from bit 0, MSB-first streams from bit `width - 1`.
    pub(super) fn push_bits(&mut self, width: u8, value: u64) {
        assert!(width <= 64);
        let bit_at = |i: u8| (value >> i) & 1 != 0;
        match self.order {
            BitOrder::LsbFirst => (0..width).for_each(|i| self.push_bit(bit_at(i))),
            BitOrder::MsbFirst => (0..width).rev().for_each(|i| self.push_bit(bit_at(i))),
        }
    }

    pub(super) fn push_byte(&mut self, byte: u8) {
        self.push_bits(8, u64::from(byte));
    }

    /// Returns the packed bytes, zero-padding the final partial byte.
    pub(super) fn finish(mut self) -> Vec<u8> {
        if self.pending_len > 0 {
            self.output.push(self.pending);
        }
        self.output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_in_both_orders() {
        let mut lsb = BitPacker::new(BitOrder::LsbFirst);
        lsb.push_bits(9, 0x101);
        assert_eq!(lsb.finish(), [0x01, 0x01]);

        let mut msb = BitPacker::new(BitOrder::MsbFirst);
        msb.push_bits(3, 0b101);
        msb.push_byte(0xFF);
        assert_eq!(msb.finish(), [0xBF, 0xE0]);
    }
}
