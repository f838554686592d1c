use crate::constants::ANCHOR_DISCRIMINATOR;
use crate::errors::AmmError;
use crate::program::LiquidityPool;
use crate::state::AmmsConfigsManager;
use anchor_lang::prelude::*;

/// Claim the manager singleton. Only the program's upgrade authority may do
/// this, and it must name itself head authority.
pub(crate) fn process(ctx: Context<InitializeAmmsConfigsManager>) -> Result<()> {
    ctx.accounts.amms_configs_manager.initialize(
        ctx.accounts.authority.key(),
        ctx.accounts.head_authority.key(),
        ctx.bumps.amms_configs_manager,
    )?;

    let manager = &ctx.accounts.amms_configs_manager;
    msg!(
        "Configs manager initialized - authority: {}, head authority: {}",
        manager.authority(),
        manager.head_authority()
    );
    emit!(InitializeAmmsConfigsManagerEvent {
        signer: ctx.accounts.signer.key(),
        authority: manager.authority(),
        head_authority: manager.head_authority(),
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct InitializeAmmsConfigsManager<'info> {
    /// Program upgrade authority, pays for the account
    #[account(
        mut,
        constraint = program_data.upgrade_authority_address == Some(signer.key()) @ AmmError::Unauthorized
    )]
    pub signer: Signer<'info>,

    #[account(
        init,
        payer = signer,
        space = ANCHOR_DISCRIMINATOR + AmmsConfigsManager::INIT_SPACE,
        seeds = [AmmsConfigsManager::SEED],
        bump
    )]
    pub amms_configs_manager: Box<Account<'info, AmmsConfigsManager>>,

    /// CHECK: Delegated authority can be any key
    pub authority: UncheckedAccount<'info>,

    /// CHECK: Must be the signer itself
    #[account(constraint = head_authority.key() == signer.key() @ AmmError::Unauthorized)]
    pub head_authority: UncheckedAccount<'info>,

    pub program_data: Account<'info, ProgramData>,

    #[account(
        constraint = liquidity_pool_program.programdata_address()? == Some(program_data.key()) @ AmmError::InvalidAccount
    )]
    pub liquidity_pool_program: Program<'info, LiquidityPool>,

    pub system_program: Program<'info, System>,
}

#[event]
pub struct InitializeAmmsConfigsManagerEvent {
    pub signer: Pubkey,
    pub authority: Pubkey,
    pub head_authority: Pubkey,
    pub timestamp: i64,
}
