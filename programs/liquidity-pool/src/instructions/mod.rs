pub mod admin;
pub mod collect_fees_from_cp_amm;
pub mod initialize_cp_amm;
pub mod launch_cp_amm;
pub mod provide_to_cp_amm;
pub mod swap_in_cp_amm;
pub mod withdraw_from_cp_amm;

pub use admin::*;
pub use collect_fees_from_cp_amm::*;
pub use initialize_cp_amm::*;
pub use launch_cp_amm::*;
pub use provide_to_cp_amm::*;
pub use swap_in_cp_amm::*;
pub use withdraw_from_cp_amm::*;
