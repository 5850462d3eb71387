use std::sync::Arc;

use actix_web::web;

use crate::services::{
    network_config::NetworkRegistry, token_actions::TokenListShell,
    wallet_state_service::WalletStateStore,
};

mod handlers;

/// Shared by every worker.
pub struct AppState {
    pub store: Arc<WalletStateStore>,
    pub shell: TokenListShell,
    pub registry: NetworkRegistry,
}

impl AppState {
    pub fn new(store: Arc<WalletStateStore>, registry: NetworkRegistry) -> Self {
        Self {
            shell: TokenListShell::new(store.clone()),
            store,
            registry,
        }
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .service(handlers::get_assets)
            .service(handlers::update_state)
            .service(handlers::press_asset)
            .service(handlers::long_press_asset)
            .service(handlers::answer_removal)
            .service(handlers::add_token)
            .service(handlers::buy),
    );
}
