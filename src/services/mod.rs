pub mod asset_list_presenter;
pub mod balance_formatter;
pub mod collaborators;
pub mod effect_recorder;
pub mod network_config;
pub mod token_actions;
pub mod units;
pub mod wallet_state_service;
