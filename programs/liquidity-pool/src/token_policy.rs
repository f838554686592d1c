//! Mint admission and transfer-fee arithmetic.
//!
//! A mint is tradable when it has no freeze authority and every extension it
//! carries is on the allow-list below. A `TransferFeeConfig` extension is
//! accepted, and its fee schedule is returned so callers can book reserves by
//! what the token program actually delivers.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_spl::token_2022::spl_token_2022::{
    self,
    extension::{
        transfer_fee::TransferFeeConfig, BaseStateWithExtensions, ExtensionType,
        StateWithExtensions,
    },
};

use crate::constants::MAX_BASIS_POINTS;
use crate::errors::AmmError;

/// Extensions that cannot move or lock tokens held by a pool vault.
pub const ALLOWED_TRADABLE_EXTENSIONS: &[ExtensionType] = &[
    ExtensionType::TransferFeeConfig,
    ExtensionType::ImmutableOwner,
    ExtensionType::MetadataPointer,
    ExtensionType::TokenMetadata,
    ExtensionType::GroupPointer,
    ExtensionType::TokenGroup,
    ExtensionType::GroupMemberPointer,
    ExtensionType::TokenGroupMember,
];

/// Proportional transfer fee with an absolute cap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferFeeSchedule {
    basis_points: u16,
    maximum_fee: u64,
}

impl TransferFeeSchedule {
    pub const fn new(basis_points: u16, maximum_fee: u64) -> Self {
        Self {
            basis_points,
            maximum_fee,
        }
    }

    pub fn basis_points(&self) -> u16 {
        self.basis_points
    }

    pub fn maximum_fee(&self) -> u64 {
        self.maximum_fee
    }

    /// Fee withheld by the token program on a transfer of `amount`.
    /// Rounds up, then caps at `maximum_fee`.
    pub fn fee(&self, amount: u64) -> Result<u64> {
        if self.basis_points == 0 || amount == 0 {
            return Ok(0);
        }
        let numerator = (amount as u128)
            .checked_mul(self.basis_points as u128)
            .ok_or(AmmError::ArithmeticOverflow)?;
        let denominator = MAX_BASIS_POINTS as u128;
        let raw_fee = numerator
            .checked_add(denominator - 1)
            .ok_or(AmmError::ArithmeticOverflow)?
            / denominator;
        let raw_fee = u64::try_from(raw_fee).map_err(|_| AmmError::ArithmeticOverflow)?;
        Ok(raw_fee.min(self.maximum_fee))
    }

    pub fn amount_after_fee(&self, amount: u64) -> Result<u64> {
        let fee = self.fee(amount)?;
        amount
            .checked_sub(fee)
            .ok_or(AmmError::ArithmeticOverflow.into())
    }
}

/// Net amount a transfer of `amount` delivers under an optional fee schedule.
pub fn apply_transfer_fee(amount: u64, schedule: Option<&TransferFeeSchedule>) -> Result<u64> {
    match schedule {
        Some(schedule) => schedule.amount_after_fee(amount),
        None => Ok(amount),
    }
}

/// Outcome of inspecting a mint's extension list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MintExtensionPolicy {
    None,
    TransferFee(TransferFeeSchedule),
    Forbidden(ExtensionType),
}

impl MintExtensionPolicy {
    /// The first extension outside the allow-list wins. A transfer fee only
    /// shows up when a schedule was read from the mint.
    pub fn classify(extensions: &[ExtensionType], transfer_fee: Option<TransferFeeSchedule>) -> Self {
        if let Some(kind) = extensions
            .iter()
            .find(|kind| !ALLOWED_TRADABLE_EXTENSIONS.contains(*kind))
        {
            return Self::Forbidden(*kind);
        }
        match transfer_fee {
            Some(schedule) => Self::TransferFee(schedule),
            None => Self::None,
        }
    }

    pub fn admit(self) -> Result<Option<TransferFeeSchedule>> {
        match self {
            Self::None => Ok(None),
            Self::TransferFee(schedule) => Ok(Some(schedule)),
            Self::Forbidden(kind) => {
                msg!("Mint carries forbidden extension {:?}", kind);
                err!(AmmError::InvalidMint)
            }
        }
    }
}

pub fn require_no_freeze_authority(freeze_authority: &COption<Pubkey>) -> Result<()> {
    require!(freeze_authority.is_none(), AmmError::InvalidMint);
    Ok(())
}

fn require_supported_token_program(mint: &AccountInfo) -> Result<()> {
    require!(
        *mint.owner == anchor_spl::token::ID || *mint.owner == anchor_spl::token_2022::ID,
        AmmError::UnsupportedTokenProgram
    );
    Ok(())
}

/// Reads the mint's extensions and the transfer fee in force this epoch.
pub fn read_mint_policy(mint: &AccountInfo) -> Result<MintExtensionPolicy> {
    require_supported_token_program(mint)?;
    let data = mint.try_borrow_data()?;
    let state = StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&data)?;
    require_no_freeze_authority(&state.base.freeze_authority)?;

    let extensions = state.get_extension_types()?;
    let transfer_fee = match state.get_extension::<TransferFeeConfig>() {
        Ok(config) => {
            let epoch = Clock::get()?.epoch;
            let fee = config.get_epoch_fee(epoch);
            Some(TransferFeeSchedule::new(
                u16::from(fee.transfer_fee_basis_points),
                u64::from(fee.maximum_fee),
            ))
        }
        Err(_) => None,
    };
    Ok(MintExtensionPolicy::classify(&extensions, transfer_fee))
}

/// Full admission check run when a pool is created.
pub fn admit_mint(mint: &AccountInfo) -> Result<Option<TransferFeeSchedule>> {
    read_mint_policy(mint)?.admit()
}

/// Fee schedule of an already admitted mint. Legacy token mints never carry one.
pub fn transfer_fee_schedule(mint: &AccountInfo) -> Result<Option<TransferFeeSchedule>> {
    if *mint.owner != anchor_spl::token_2022::ID {
        return Ok(None);
    }
    let data = mint.try_borrow_data()?;
    let state = StateWithExtensions::<spl_token_2022::state::Mint>::unpack(&data)?;
    match state.get_extension::<TransferFeeConfig>() {
        Ok(config) => {
            let fee = config.get_epoch_fee(Clock::get()?.epoch);
            Ok(Some(TransferFeeSchedule::new(
                u16::from(fee.transfer_fee_basis_points),
                u64::from(fee.maximum_fee),
            )))
        }
        Err(_) => Ok(None),
    }
}
