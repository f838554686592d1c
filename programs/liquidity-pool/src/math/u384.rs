use uint::construct_uint;

use super::U192;

construct_uint! {
    /// 384-bit intermediate for products and square roots of `U192` values.
    pub(crate) struct U384(6);
}

impl From<U192> for U384 {
    fn from(value: U192) -> Self {
        let [low, mid, high] = value.limbs;
        U384([low, mid, high, 0, 0, 0])
    }
}

impl U384 {
    /// Low 192 bits, `None` if anything above them is set.
    pub(crate) fn to_u192(self) -> Option<U192> {
        let U384(limbs) = self;
        if limbs[3..].iter().any(|&limb| limb != 0) {
            return None;
        }
        Some(U192::new([limbs[0], limbs[1], limbs[2]]))
    }

    /// Shift left by `bits`, `None` if a set bit would be shifted out.
    pub(crate) fn checked_shl_bits(self, bits: usize) -> Option<Self> {
        if self.is_zero() {
            return Some(self);
        }
        if self.bits() + bits > 384 {
            return None;
        }
        Some(self << bits)
    }

    /// Floor square root. The root of any 384-bit value fits in 192 bits.
    pub(crate) fn floor_sqrt(self) -> U192 {
        let U384(limbs) = self.integer_sqrt();
        U192::new([limbs[0], limbs[1], limbs[2]])
    }
}
