use anchor_lang::prelude::*;

#[error_code]
pub enum AmmError {
    #[msg("Signer does not hold the authority required for this operation")]
    Unauthorized,

    #[msg("Account does not match its expected address or owner")]
    InvalidAccount,

    #[msg("Mint is not admissible for trading")]
    InvalidMint,

    #[msg("Mint is owned by an unsupported token program")]
    UnsupportedTokenProgram,

    #[msg("Account has already been initialized")]
    AlreadyExists,

    #[msg("Pool has already been launched")]
    AlreadyLaunched,

    #[msg("Pool has not been launched yet")]
    NotLaunched,

    #[msg("Insufficient balance to complete the operation")]
    InsufficientFunds,

    #[msg("Provided liquidity does not match the pool's token ratio")]
    RatioMismatch,

    #[msg("Launch liquidity is below the bootstrap floor")]
    BelowBootstrapFloor,

    #[msg("Output amount deviates from the estimate by more than the allowed slippage")]
    SlippageExceeded,

    #[msg("Swap would drain the output reserve")]
    ReserveWouldBeDrained,

    #[msg("There are no protocol fees to collect")]
    NothingToCollect,

    #[msg("Combined fee rate must stay below 100%")]
    RateExceedsLimit,

    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    #[msg("Arithmetic overflow")]
    ArithmeticOverflow,
}
