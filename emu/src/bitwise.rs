/// Helper methods to manipulate the bits of a byte,
/// the index (`bit_idx`) goes from lsb to msb (right to left).
pub trait Bits: Copy {
    fn get_bit(self, bit_idx: u8) -> bool;

    fn set_bit(&mut self, bit_idx: u8, value: bool);
}

impl Bits for u8 {
    fn get_bit(self, bit_idx: u8) -> bool {
        debug_assert!(bit_idx < 8);
        self & (1 << bit_idx) != 0
    }

    fn set_bit(&mut self, bit_idx: u8, value: bool) {
        debug_assert!(bit_idx < 8);
        let mask = 1 << bit_idx;
        if value {
            *self |= mask;
        } else {
            *self &= !mask;
        }
    }
}
