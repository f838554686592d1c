#![allow(dead_code)]

use anchor_lang::prelude::Pubkey;
use liquidity_pool::state::cp_amm::{CpAmmBumps, CpAmmKeys};
use liquidity_pool::state::{AmmsConfig, CpAmm};

pub fn pool_keys() -> CpAmmKeys {
    CpAmmKeys {
        creator: Pubkey::new_unique(),
        amms_config: Pubkey::new_unique(),
        base_mint: Pubkey::new_unique(),
        quote_mint: Pubkey::new_unique(),
        lp_mint: Pubkey::new_unique(),
        base_vault: Pubkey::new_unique(),
        quote_vault: Pubkey::new_unique(),
        locked_lp_vault: Pubkey::new_unique(),
    }
}

pub fn initialized_pool() -> CpAmm {
    let mut cp_amm = CpAmm::default();
    cp_amm
        .initialize(pool_keys(), CpAmmBumps::default())
        .expect("fresh pool initializes");
    cp_amm
}

pub fn launched_pool(base_liquidity: u64, quote_liquidity: u64) -> CpAmm {
    let mut cp_amm = initialized_pool();
    let payload = cp_amm
        .get_launch_payload(base_liquidity, quote_liquidity)
        .expect("launch above the bootstrap floor");
    cp_amm.launch(payload);
    cp_amm
}

pub fn fee_schedule(protocol: u16, providers: u16) -> AmmsConfig {
    let mut config = AmmsConfig::default();
    config
        .initialize(Pubkey::new_unique(), protocol, providers, 0, 255)
        .expect("valid fee schedule");
    config
}

/// Reference integer square root, independent of the crate's wide math.
pub fn isqrt(value: u128) -> u128 {
    if value < 2 {
        return value;
    }
    let mut x = value;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + value / x) / 2;
    }
    x
}
