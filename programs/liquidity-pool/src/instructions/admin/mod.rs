pub mod initialize_amms_config;
pub mod initialize_amms_configs_manager;
pub mod update_amms_config_fee_authority;
pub mod update_amms_config_protocol_fee_rate;
pub mod update_amms_config_providers_fee_rate;
pub mod update_amms_configs_manager_authority;
pub mod update_amms_configs_manager_head_authority;

pub use initialize_amms_config::*;
pub use initialize_amms_configs_manager::*;
pub use update_amms_config_fee_authority::*;
pub use update_amms_config_protocol_fee_rate::*;
pub use update_amms_config_providers_fee_rate::*;
pub use update_amms_configs_manager_authority::*;
pub use update_amms_configs_manager_head_authority::*;
