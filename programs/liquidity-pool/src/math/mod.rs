//! Wide integer arithmetic used to track pool invariants.
//!
//! `U192` is the storage type of both invariant snapshots. Values are Q64.128
//! fixed point: the top limb holds the integer part, the two low limbs hold the
//! fraction. Intermediates that exceed 192 bits are carried in a crate-private
//! 384-bit integer and never leave this module.

mod q64_128;
mod u192;
mod u384;

pub use q64_128::*;
pub use u192::*;
