/// Size of the Anchor account discriminator prefix.
pub const ANCHOR_DISCRIMINATOR: usize = 8;

/// Denominator of every basis-point rate.
pub const MAX_BASIS_POINTS: u16 = 10_000;

/// Decimals of every pool's LP mint. One whole LP token is locked at launch.
pub const LP_MINT_DECIMALS: u8 = 5;

/// Launch liquidity must be at least this many times the locked liquidity.
pub const BOOTSTRAP_LIQUIDITY_MULTIPLIER: u64 = 4;

/// Lamports paid by a pool creator to the head authority (0.1 SOL).
pub const CP_AMM_INITIALIZE_FEE_LAMPORTS: u64 = 100_000_000;
