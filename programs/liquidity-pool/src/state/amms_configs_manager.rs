use anchor_lang::prelude::*;

use crate::authority::require_one_of;
use crate::errors::AmmError;

/// Deployment-wide registry of fee schedules and the admin hierarchy.
#[account]
#[derive(InitSpace, Default)]
pub struct AmmsConfigsManager {
    /// Delegated admin: creates configs and rotates itself
    authority: Pubkey,

    /// Super-admin: everything `authority` can do, plus rotating both roles
    head_authority: Pubkey,

    /// Id the next config will receive
    configs_count: u64,

    bump: u8,
}

impl AmmsConfigsManager {
    pub const SEED: &'static [u8] = b"amms_configs_manager";

    pub fn initialize(&mut self, authority: Pubkey, head_authority: Pubkey, bump: u8) -> Result<()> {
        require!(
            self.head_authority == Pubkey::default(),
            AmmError::AlreadyExists
        );
        self.authority = authority;
        self.head_authority = head_authority;
        self.configs_count = 0;
        self.bump = bump;
        Ok(())
    }

    /// Accepts either admin role.
    pub fn require_authority(&self, signer: &Pubkey) -> Result<()> {
        require_one_of(signer, &[self.authority, self.head_authority])
    }

    pub fn require_head_authority(&self, signer: &Pubkey) -> Result<()> {
        require_one_of(signer, &[self.head_authority])
    }

    pub fn update_authority(&mut self, signer: &Pubkey, new_authority: Pubkey) -> Result<()> {
        self.require_authority(signer)?;
        self.authority = new_authority;
        Ok(())
    }

    pub fn update_head_authority(&mut self, signer: &Pubkey, new_head_authority: Pubkey) -> Result<()> {
        self.require_head_authority(signer)?;
        self.head_authority = new_head_authority;
        Ok(())
    }

    pub fn increment_configs_count(&mut self) -> Result<()> {
        self.configs_count = self
            .configs_count
            .checked_add(1)
            .ok_or(AmmError::ArithmeticOverflow)?;
        Ok(())
    }

    #[inline]
    pub fn authority(&self) -> Pubkey {
        self.authority
    }

    #[inline]
    pub fn head_authority(&self) -> Pubkey {
        self.head_authority
    }

    #[inline]
    pub fn configs_count(&self) -> u64 {
        self.configs_count
    }

    #[inline]
    pub fn bump(&self) -> u8 {
        self.bump
    }
}
