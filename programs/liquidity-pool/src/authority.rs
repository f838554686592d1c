use anchor_lang::prelude::*;

use crate::errors::AmmError;

/// Fails with `Unauthorized` unless `signer` is one of `allowed`.
pub fn require_one_of(signer: &Pubkey, allowed: &[Pubkey]) -> Result<()> {
    require!(allowed.contains(signer), AmmError::Unauthorized);
    Ok(())
}
