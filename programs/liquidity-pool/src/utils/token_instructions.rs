use anchor_lang::prelude::*;
use anchor_spl::token::{self, Burn, MintTo, Token};
use anchor_spl::token_interface::{
    self, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::errors::AmmError;
use crate::token_policy::{apply_transfer_fee, transfer_fee_schedule};

/// A `transfer_checked` CPI prepared ahead of execution.
///
/// Construction checks the source balance and reads the mint's transfer fee,
/// so handlers can book net amounts and fail before any token moves.
pub struct TransferTokensInstruction<'info> {
    amount: u64,
    amount_after_fee: u64,
    decimals: u8,
    mint: AccountInfo<'info>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
}

impl<'info> TransferTokensInstruction<'info> {
    pub fn try_new(
        amount: u64,
        mint: &InterfaceAccount<'info, Mint>,
        from: &InterfaceAccount<'info, TokenAccount>,
        authority: AccountInfo<'info>,
        to: &InterfaceAccount<'info, TokenAccount>,
        token_program: &Interface<'info, TokenInterface>,
    ) -> Result<Self> {
        require!(from.amount >= amount, AmmError::InsufficientFunds);
        let mint_info = mint.to_account_info();
        let fee_schedule = transfer_fee_schedule(&mint_info)?;
        let amount_after_fee = apply_transfer_fee(amount, fee_schedule.as_ref())?;
        Ok(Self {
            amount,
            amount_after_fee,
            decimals: mint.decimals,
            mint: mint_info,
            from: from.to_account_info(),
            to: to.to_account_info(),
            authority,
            token_program: token_program.to_account_info(),
        })
    }

    #[inline]
    pub fn amount(&self) -> u64 {
        self.amount
    }

    /// What the destination account will actually be credited.
    #[inline]
    pub fn amount_after_fee(&self) -> u64 {
        self.amount_after_fee
    }

    pub fn execute(&self, signer_seeds: Option<&[&[&[u8]]]>) -> Result<()> {
        let accounts = TransferChecked {
            from: self.from.clone(),
            mint: self.mint.clone(),
            to: self.to.clone(),
            authority: self.authority.clone(),
        };
        let cpi_context = match signer_seeds {
            Some(seeds) => CpiContext::new_with_signer(self.token_program.clone(), accounts, seeds),
            None => CpiContext::new(self.token_program.clone(), accounts),
        };
        token_interface::transfer_checked(cpi_context, self.amount, self.decimals)
    }
}

/// Mints LP tokens with the pool as mint authority.
pub fn mint_lp_tokens<'info>(
    amount: u64,
    lp_mint: &InterfaceAccount<'info, Mint>,
    to: &InterfaceAccount<'info, TokenAccount>,
    cp_amm: AccountInfo<'info>,
    lp_token_program: &Program<'info, Token>,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    token::mint_to(
        CpiContext::new_with_signer(
            lp_token_program.to_account_info(),
            MintTo {
                mint: lp_mint.to_account_info(),
                to: to.to_account_info(),
                authority: cp_amm,
            },
            signer_seeds,
        ),
        amount,
    )
}

/// Burns LP tokens owned by the signer.
pub fn burn_lp_tokens<'info>(
    amount: u64,
    lp_mint: &InterfaceAccount<'info, Mint>,
    from: &InterfaceAccount<'info, TokenAccount>,
    owner: AccountInfo<'info>,
    lp_token_program: &Program<'info, Token>,
) -> Result<()> {
    require!(from.amount >= amount, AmmError::InsufficientFunds);
    token::burn(
        CpiContext::new(
            lp_token_program.to_account_info(),
            Burn {
                mint: lp_mint.to_account_info(),
                from: from.to_account_info(),
                authority: owner,
            },
        ),
        amount,
    )
}
