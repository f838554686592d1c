use crate::errors::AmmError;
use crate::state::{AmmsConfig, CpAmm};
use crate::utils::token_instructions::TransferTokensInstruction;
use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

/// Send accrued protocol fees to the config's fee authority.
pub(crate) fn process(ctx: Context<CollectFeesFromCpAmm>) -> Result<()> {
    ctx.accounts
        .amms_config
        .require_fee_authority(&ctx.accounts.signer.key())?;
    let payload = ctx.accounts.cp_amm.get_collect_fees_payload()?;
    let protocol_base_fees = payload.protocol_base_fees();
    let protocol_quote_fees = payload.protocol_quote_fees();

    msg!(
        "Collect fees - base: {}, quote: {}",
        protocol_base_fees,
        protocol_quote_fees
    );

    let accounts = &ctx.accounts;
    let base_transfer = if protocol_base_fees > 0 {
        Some(TransferTokensInstruction::try_new(
            protocol_base_fees,
            &accounts.base_mint,
            &accounts.cp_amm_base_vault,
            accounts.cp_amm.to_account_info(),
            &accounts.fee_authority_base_account,
            &accounts.base_token_program,
        )?)
    } else {
        None
    };
    let quote_transfer = if protocol_quote_fees > 0 {
        Some(TransferTokensInstruction::try_new(
            protocol_quote_fees,
            &accounts.quote_mint,
            &accounts.cp_amm_quote_vault,
            accounts.cp_amm.to_account_info(),
            &accounts.fee_authority_quote_account,
            &accounts.quote_token_program,
        )?)
    } else {
        None
    };

    let cp_amm_seeds = accounts.cp_amm.seeds();
    let signer_seeds: &[&[&[u8]]] = &[&cp_amm_seeds];
    for transfer in [base_transfer, quote_transfer].iter().flatten() {
        transfer.execute(Some(signer_seeds))?;
    }

    ctx.accounts.cp_amm.collect_fees(payload);

    emit!(CollectFeesFromCpAmmEvent {
        fee_authority: ctx.accounts.signer.key(),
        cp_amm: ctx.accounts.cp_amm.key(),
        protocol_base_fees_collected: protocol_base_fees,
        protocol_quote_fees_collected: protocol_quote_fees,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct CollectFeesFromCpAmm<'info> {
    /// The config's fee authority
    #[account(
        mut,
        constraint = signer.key() == amms_config.fee_authority() @ AmmError::Unauthorized
    )]
    pub signer: Signer<'info>,

    pub base_mint: Box<InterfaceAccount<'info, Mint>>,
    pub quote_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = base_mint,
        associated_token::authority = signer,
        associated_token::token_program = base_token_program,
    )]
    pub fee_authority_base_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = signer,
        associated_token::mint = quote_mint,
        associated_token::authority = signer,
        associated_token::token_program = quote_token_program,
    )]
    pub fee_authority_quote_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        seeds = [AmmsConfig::SEED, amms_config.id.to_le_bytes().as_ref()],
        bump = amms_config.bump()
    )]
    pub amms_config: Box<Account<'info, AmmsConfig>>,

    #[account(
        mut,
        seeds = [CpAmm::SEED, cp_amm.lp_mint.as_ref()],
        bump = cp_amm.bump(),
        constraint = cp_amm.amms_config() == amms_config.key() @ AmmError::InvalidAccount,
        constraint = cp_amm.base_mint() == base_mint.key() @ AmmError::InvalidAccount,
        constraint = cp_amm.quote_mint() == quote_mint.key() @ AmmError::InvalidAccount,
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
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

#[event]
pub struct CollectFeesFromCpAmmEvent {
    pub fee_authority: Pubkey,
    pub cp_amm: Pubkey,
    pub protocol_base_fees_collected: u64,
    pub protocol_quote_fees_collected: u64,
    pub timestamp: i64,
}
