use crate::state::AmmsConfigsManager;
use anchor_lang::prelude::*;

/// Rotate the delegated authority. Either admin role may sign.
pub(crate) fn process(ctx: Context<UpdateAmmsConfigsManagerAuthority>) -> Result<()> {
    let signer = ctx.accounts.signer.key();
    let new_authority = ctx.accounts.new_authority.key();
    ctx.accounts
        .amms_configs_manager
        .update_authority(&signer, new_authority)?;

    msg!("Manager authority set to {}", new_authority);
    emit!(UpdateAmmsConfigsManagerAuthorityEvent {
        signer,
        new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });
    Ok(())
}

#[derive(Accounts)]
pub struct UpdateAmmsConfigsManagerAuthority<'info> {
    pub signer: Signer<'info>,

    #[account(
        mut,
        seeds = [AmmsConfigsManager::SEED],
        bump = amms_configs_manager.bump()
    )]
    pub amms_configs_manager: Box<Account<'info, AmmsConfigsManager>>,

    /// CHECK: Any key can become the delegated authority
    pub new_authority: UncheckedAccount<'info>,
}

#[event]
pub struct UpdateAmmsConfigsManagerAuthorityEvent {
    pub signer: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}
