mod amms_config;
mod amms_configs_manager;
pub mod cp_amm;

pub use amms_config::*;
pub use amms_configs_manager::*;
pub use cp_amm::CpAmm;
