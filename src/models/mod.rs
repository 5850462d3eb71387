pub mod api_response;
pub mod asset;
pub mod display;
pub mod effect;
pub mod price_context;
pub mod wallet_state;
