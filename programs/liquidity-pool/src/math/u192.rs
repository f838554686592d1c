use std::cmp::Ordering;

use anchor_lang::prelude::*;

use super::u384::U384;

/// Unsigned 192-bit integer held as three little-endian 64-bit limbs.
#[derive(AnchorSerialize, AnchorDeserialize, InitSpace, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct U192 {
    pub limbs: [u64; 3],
}

impl U192 {
    pub const ZERO: U192 = U192 { limbs: [0; 3] };
    pub const MAX: U192 = U192 { limbs: [u64::MAX; 3] };

    pub const fn new(limbs: [u64; 3]) -> Self {
        U192 { limbs }
    }

    pub const fn from_u64(value: u64) -> Self {
        U192 {
            limbs: [value, 0, 0],
        }
    }

    pub const fn from_u128(value: u128) -> Self {
        U192 {
            limbs: [value as u64, (value >> 64) as u64, 0],
        }
    }

    /// Exact product of two `u64` values.
    pub const fn multiply(lhs: u64, rhs: u64) -> Self {
        U192::from_u128((lhs as u128) * (rhs as u128))
    }

    pub fn to_u64(&self) -> Option<u64> {
        if self.limbs[1] != 0 || self.limbs[2] != 0 {
            return None;
        }
        Some(self.limbs[0])
    }

    pub fn to_u128(&self) -> Option<u128> {
        if self.limbs[2] != 0 {
            return None;
        }
        Some(((self.limbs[1] as u128) << 64) | self.limbs[0] as u128)
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&limb| limb == 0)
    }

    pub fn checked_add(&self, other: &U192) -> Option<U192> {
        (U384::from(*self) + U384::from(*other)).to_u192()
    }

    pub fn checked_sub(&self, other: &U192) -> Option<U192> {
        U384::from(*self)
            .checked_sub(U384::from(*other))
            .and_then(U384::to_u192)
    }

    /// Product through a 384-bit intermediate; `None` if it does not fit back into 192 bits.
    pub fn checked_mul(&self, other: &U192) -> Option<U192> {
        (U384::from(*self) * U384::from(*other)).to_u192()
    }

    /// Floor division by a single limb.
    pub fn checked_div_u64(&self, divisor: u64) -> Option<U192> {
        U384::from(*self)
            .checked_div(U384::from(divisor))
            .and_then(U384::to_u192)
    }

    /// Integer square root, rounded down.
    pub fn sqrt(&self) -> U192 {
        U384::from(*self).floor_sqrt()
    }
}

impl PartialOrd for U192 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for U192 {
    fn cmp(&self, other: &Self) -> Ordering {
        U384::from(*self).cmp(&U384::from(*other))
    }
}
