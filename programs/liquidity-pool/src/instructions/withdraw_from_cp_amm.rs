use crate::errors::AmmError;
use crate::math::U192;
use crate::state::CpAmm;
use crate::utils::token_instructions::{burn_lp_tokens, TransferTokensInstruction};
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token::Token;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Burn LP tokens for a pro rata share of both reserves
pub(crate) fn process(ctx: Context<WithdrawFromCpAmm>, lp_tokens: u64) -> Result<()> {
    let payload = ctx.accounts.cp_amm.get_withdraw_payload(lp_tokens)?;

    msg!(
        "Withdraw - LP tokens: {}, base out: {}, quote out: {}",
        lp_tokens,
        payload.base_withdraw_amount(),
        payload.quote_withdraw_amount()
    );

    let accounts = &ctx.accounts;
    let base_transfer = TransferTokensInstruction::try_new(
        payload.base_withdraw_amount(),
        &accounts.base_mint,
        &accounts.cp_amm_base_vault,
        accounts.cp_amm.to_account_info(),
        &accounts.signer_base_account,
        &accounts.base_token_program,
    )?;
    let quote_transfer = TransferTokensInstruction::try_new(
        payload.quote_withdraw_amount(),
        &accounts.quote_mint,
        &accounts.cp_amm_quote_vault,
        accounts.cp_amm.to_account_info(),
        &accounts.signer_quote_account,
        &accounts.quote_token_program,
    )?;

    burn_lp_tokens(
        lp_tokens,
        &accounts.lp_mint,
        &accounts.signer_lp_account,
        accounts.signer.to_account_info(),
        &accounts.lp_token_program,
    )?;

    let cp_amm_seeds = accounts.cp_amm.seeds();
    let signer_seeds: &[&[&[u8]]] = &[&cp_amm_seeds];
    base_transfer.execute(Some(signer_seeds))?;
    quote_transfer.execute(Some(signer_seeds))?;

    ctx.accounts.cp_amm.withdraw(payload);
    let cp_amm = &ctx.accounts.cp_amm;

    emit!(WithdrawFromCpAmmEvent {
        provider: ctx.accounts.signer.key(),
        cp_amm: cp_amm.key(),
        lp_tokens_burned: lp_tokens,
        base_withdrawn: base_transfer.amount(),
        quote_withdrawn: quote_transfer.amount(),
        base_liquidity: cp_amm.base_liquidity(),
        quote_liquidity: cp_amm.quote_liquidity(),
        lp_tokens_supply: cp_amm.lp_tokens_supply(),
        constant_product_sqrt: cp_amm.constant_product_sqrt(),
        base_quote_ratio_sqrt: cp_amm.base_quote_ratio_sqrt(),
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct WithdrawFromCpAmm<'info> {
    #[account(mut)]
    pub signer: Signer<'info>,

    pub base_mint: Box<InterfaceAccount<'info, Mint>>,
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(mut)]
    pub lp_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = base_mint,
        associated_token::authority = signer,
        associated_token::token_program = base_token_program,
    )]
    pub signer_base_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = quote_mint,
        associated_token::authority = signer,
        associated_token::token_program = quote_token_program,
    )]
    pub signer_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        token::mint = lp_mint,
        token::authority = signer,
        token::token_program = lp_token_program,
    )]
    pub signer_lp_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [CpAmm::SEED, cp_amm.lp_mint.as_ref()],
        bump = cp_amm.bump(),
        constraint = cp_amm.is_launched() @ AmmError::NotLaunched,
        constraint = cp_amm.base_mint() == base_mint.key() @ AmmError::InvalidAccount,
        constraint = cp_amm.quote_mint() == quote_mint.key() @ AmmError::InvalidAccount,
        constraint = cp_amm.lp_mint == lp_mint.key() @ AmmError::InvalidAccount,
    )]
    pub cp_amm: Box<Account<'info, CpAmm>>,

    #[account(
        mut,
        seeds = [CpAmm::VAULT_SEED, cp_amm.key().as_ref(), base_mint.key().as_ref()],
        bump = cp_amm.base_vault_bump()
    )]
    pub cp_amm_base_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        seeds = [CpAmm::VAULT_SEED, cp_amm.key().as_ref(), quote_mint.key().as_ref()],
        bump = cp_amm.quote_vault_bump()
    )]
    pub cp_amm_quote_vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub base_token_program: Interface<'info, TokenInterface>,
    pub quote_token_program: Interface<'info, TokenInterface>,
    pub lp_token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct WithdrawFromCpAmmEvent {
    pub provider: Pubkey,
    pub cp_amm: Pubkey,
    pub lp_tokens_burned: u64,
    pub base_withdrawn: u64,
    pub quote_withdrawn: u64,
    pub base_liquidity: u64,
    pub quote_liquidity: u64,
    pub lp_tokens_supply: u64,
    pub constant_product_sqrt: U192,
    pub base_quote_ratio_sqrt: U192,
    pub timestamp: i64,
}
