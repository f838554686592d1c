use super::u384::U384;
use super::U192;

/// Q64.128 square root of the exact product `lhs * rhs`.
///
/// Computed as `floor(sqrt((lhs * rhs) << 256))`, so the integer part is
/// `floor(sqrt(lhs * rhs))` and the low limbs carry 128 fractional bits.
pub fn sqrt_product_q64_128(lhs: u64, rhs: u64) -> U192 {
    let product = U384::from((lhs as u128) * (rhs as u128));
    // (lhs * rhs) < 2^128, so the shifted value stays below 2^384.
    (product << 256).floor_sqrt()
}

/// Q64.128 square root of `numerator / denominator`.
///
/// The ratio is truncated to Q64.128 first and then square-rooted, matching
/// the stored `base_quote_ratio_sqrt` snapshot bit for bit. Returns `None`
/// for a zero denominator.
pub fn sqrt_ratio_q64_128(numerator: u64, denominator: u64) -> Option<U192> {
    let ratio = U192::new([0, 0, numerator]).checked_div_u64(denominator)?;
    U384::from(ratio).checked_shl_bits(128).map(U384::floor_sqrt)
}
