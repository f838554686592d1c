use crate::constants::{ANCHOR_DISCRIMINATOR, CP_AMM_INITIALIZE_FEE_LAMPORTS, LP_MINT_DECIMALS};
use crate::errors::AmmError;
use crate::state::cp_amm::{CpAmmBumps, CpAmmKeys};
use crate::state::{AmmsConfig, AmmsConfigsManager, CpAmm};
use crate::token_policy::admit_mint;
use anchor_lang::prelude::*;
use anchor_lang::system_program;
use anchor_spl::token::Token;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Create an unlaunched pool for a base/quote pair.
///
/// Anyone may create a pool. The creator pays a fixed fee to the manager's
/// head authority and is the only key allowed to launch it later.
pub(crate) fn process(ctx: Context<InitializeCpAmm>) -> Result<()> {
    let base_fee = admit_mint(&ctx.accounts.base_mint.to_account_info())?;
    let quote_fee = admit_mint(&ctx.accounts.quote_mint.to_account_info())?;
    require!(
        ctx.accounts.signer.lamports() >= CP_AMM_INITIALIZE_FEE_LAMPORTS,
        AmmError::InsufficientFunds
    );

    let keys = CpAmmKeys {
        creator: ctx.accounts.signer.key(),
        amms_config: ctx.accounts.amms_config.key(),
        base_mint: ctx.accounts.base_mint.key(),
        quote_mint: ctx.accounts.quote_mint.key(),
        lp_mint: ctx.accounts.lp_mint.key(),
        base_vault: ctx.accounts.cp_amm_base_vault.key(),
        quote_vault: ctx.accounts.cp_amm_quote_vault.key(),
        locked_lp_vault: ctx.accounts.cp_amm_locked_lp_vault.key(),
    };
    let bumps = CpAmmBumps {
        cp_amm: ctx.bumps.cp_amm,
        base_vault: ctx.bumps.cp_amm_base_vault,
        quote_vault: ctx.bumps.cp_amm_quote_vault,
        locked_lp_vault: ctx.bumps.cp_amm_locked_lp_vault,
    };
    ctx.accounts.cp_amm.initialize(keys, bumps)?;

    system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            system_program::Transfer {
                from: ctx.accounts.signer.to_account_info(),
                to: ctx.accounts.fee_authority.to_account_info(),
            },
        ),
        CP_AMM_INITIALIZE_FEE_LAMPORTS,
    )?;

    msg!(
        "Pool initialized - base transfer fee: {:?}, quote transfer fee: {:?}",
        base_fee,
        quote_fee
    );
    emit!(InitializeCpAmmEvent {
        creator: keys.creator,
        cp_amm: ctx.accounts.cp_amm.key(),
        amms_config: keys.amms_config,
        base_mint: keys.base_mint,
        quote_mint: keys.quote_mint,
        lp_mint: keys.lp_mint,
        base_vault: keys.base_vault,
        quote_vault: keys.quote_vault,
        locked_lp_vault: keys.locked_lp_vault,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeCpAmm<'info> {
    /// Pool creator, pays rent and the bootstrap fee
    #[account(mut)]
    pub signer: Signer<'info>,

    #[account(
        seeds = [AmmsConfigsManager::SEED],
        bump = amms_configs_manager.bump()
    )]
    pub amms_configs_manager: Box<Account<'info, AmmsConfigsManager>>,

    /// Must be a config this program issued through the manager
    #[account(
        seeds = [AmmsConfig::SEED, amms_config.id.to_le_bytes().as_ref()],
        bump = amms_config.bump(),
        constraint = amms_config.id < amms_configs_manager.configs_count() @ AmmError::InvalidAccount
    )]
    pub amms_config: Box<Account<'info, AmmsConfig>>,

    /// CHECK: Receives the bootstrap fee, pinned to the head authority
    #[account(
        mut,
        address = amms_configs_manager.head_authority() @ AmmError::InvalidAccount
    )]
    pub fee_authority: UncheckedAccount<'info>,

    #[account(mint::token_program = base_token_program)]
    pub base_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mint::token_program = quote_token_program,
        constraint = quote_mint.key() != base_mint.key() @ AmmError::InvalidMint
    )]
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Pool state, addressed by its LP mint
    #[account(
        init,
        payer = signer,
        space = ANCHOR_DISCRIMINATOR + CpAmm::INIT_SPACE,
        seeds = [CpAmm::SEED, lp_mint.key().as_ref()],
        bump
    )]
    pub cp_amm: Box<Account<'info, CpAmm>>,

    /// Fresh keypair; the pool becomes its only mint authority
    #[account(
        init,
        payer = signer,
        mint::decimals = LP_MINT_DECIMALS,
        mint::authority = cp_amm,
        mint::token_program = lp_token_program,
    )]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = signer,
        seeds = [CpAmm::VAULT_SEED, cp_amm.key().as_ref(), base_mint.key().as_ref()],
        bump,
        token::mint = base_mint,
        token::authority = cp_amm,
        token::token_program = base_token_program,
    )]
    pub cp_amm_base_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init,
        payer = signer,
        seeds = [CpAmm::VAULT_SEED, cp_amm.key().as_ref(), quote_mint.key().as_ref()],
        bump,
        token::mint = quote_mint,
        token::authority = cp_amm,
        token::token_program = quote_token_program,
    )]
    pub cp_amm_quote_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Only ever credited: no instruction debits this vault
    #[account(
        init,
        payer = signer,
        seeds = [CpAmm::VAULT_SEED, cp_amm.key().as_ref(), lp_mint.key().as_ref()],
        bump,
        token::mint = lp_mint,
        token::authority = cp_amm,
        token::token_program = lp_token_program,
    )]
    pub cp_amm_locked_lp_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub base_token_program: Interface<'info, TokenInterface>,
    pub quote_token_program: Interface<'info, TokenInterface>,
    pub lp_token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct InitializeCpAmmEvent {
    pub creator: Pubkey,
    pub cp_amm: Pubkey,
    pub amms_config: Pubkey,
    pub base_mint: Pubkey,
    pub quote_mint: Pubkey,
    pub lp_mint: Pubkey,
    pub base_vault: Pubkey,
    pub quote_vault: Pubkey,
    pub locked_lp_vault: Pubkey,
    pub timestamp: i64,
}
