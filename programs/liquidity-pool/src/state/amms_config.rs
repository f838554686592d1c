use anchor_lang::prelude::*;

use crate::constants::MAX_BASIS_POINTS;
use crate::errors::AmmError;

/// Fee schedule shared by every pool created against it.
#[account]
#[derive(InitSpace, Default)]
pub struct AmmsConfig {
    bump: u8,

    /// Manager counter value at creation, part of this account's address
    pub id: u64,

    /// Only key allowed to collect protocol fees from pools using this config
    fee_authority: Pubkey,

    protocol_fee_rate_basis_points: u16,
    providers_fee_rate_basis_points: u16,
}

impl AmmsConfig {
    pub const SEED: &'static [u8] = b"amms_config";

    pub fn initialize(
        &mut self,
        fee_authority: Pubkey,
        protocol_fee_rate_basis_points: u16,
        providers_fee_rate_basis_points: u16,
        id: u64,
        bump: u8,
    ) -> Result<()> {
        Self::validate_rates(protocol_fee_rate_basis_points, providers_fee_rate_basis_points)?;
        self.bump = bump;
        self.id = id;
        self.fee_authority = fee_authority;
        self.protocol_fee_rate_basis_points = protocol_fee_rate_basis_points;
        self.providers_fee_rate_basis_points = providers_fee_rate_basis_points;
        Ok(())
    }

    /// Both rates together must stay strictly below 100%.
    fn validate_rates(protocol: u16, providers: u16) -> Result<()> {
        let total = (protocol as u32) + (providers as u32);
        require!(total < MAX_BASIS_POINTS as u32, AmmError::RateExceedsLimit);
        Ok(())
    }

    pub fn update_fee_authority(&mut self, new_fee_authority: Pubkey) {
        self.fee_authority = new_fee_authority;
    }

    pub fn update_protocol_fee_rate(&mut self, new_protocol_fee_rate_basis_points: u16) -> Result<()> {
        Self::validate_rates(
            new_protocol_fee_rate_basis_points,
            self.providers_fee_rate_basis_points,
        )?;
        self.protocol_fee_rate_basis_points = new_protocol_fee_rate_basis_points;
        Ok(())
    }

    pub fn update_providers_fee_rate(&mut self, new_providers_fee_rate_basis_points: u16) -> Result<()> {
        Self::validate_rates(
            self.protocol_fee_rate_basis_points,
            new_providers_fee_rate_basis_points,
        )?;
        self.providers_fee_rate_basis_points = new_providers_fee_rate_basis_points;
        Ok(())
    }

    pub fn require_fee_authority(&self, signer: &Pubkey) -> Result<()> {
        require_keys_eq!(*signer, self.fee_authority, AmmError::Unauthorized);
        Ok(())
    }

    fn fee_from_rate(amount: u64, rate_basis_points: u16) -> Result<u64> {
        let fee = (amount as u128)
            .checked_mul(rate_basis_points as u128)
            .ok_or(AmmError::ArithmeticOverflow)?
            / MAX_BASIS_POINTS as u128;
        Ok(fee as u64)
    }

    /// `floor(amount * protocol_rate / 10000)`
    pub fn calculate_protocol_fee(&self, amount: u64) -> Result<u64> {
        Self::fee_from_rate(amount, self.protocol_fee_rate_basis_points)
    }

    /// `floor(amount * providers_rate / 10000)`
    pub fn calculate_providers_fee(&self, amount: u64) -> Result<u64> {
        Self::fee_from_rate(amount, self.providers_fee_rate_basis_points)
    }

    #[inline]
    pub fn bump(&self) -> u8 {
        self.bump
    }

    #[inline]
    pub fn fee_authority(&self) -> Pubkey {
        self.fee_authority
    }

    #[inline]
    pub fn protocol_fee_rate_basis_points(&self) -> u16 {
        self.protocol_fee_rate_basis_points
    }

    #[inline]
    pub fn providers_fee_rate_basis_points(&self) -> u16 {
        self.providers_fee_rate_basis_points
    }
}
