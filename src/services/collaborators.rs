//! Seams to everything the token list invokes but does not own.

use async_trait::async_trait;
use serde_json::Value;

use crate::{errors::CustomError, models::asset::Asset};

/// Whether the fiat on-ramp is offered for a chain.
pub trait BuyAvailability: Send + Sync {
    fn allowed_to_buy(&self, chain_id: u64) -> bool;
}

pub trait Navigator: Send + Sync {
    fn navigate_to_detail(&self, asset: &Asset);
    fn navigate_to_add_asset(&self);
    fn navigate_to_buy(&self);
}

#[async_trait]
pub trait TokenRemover: Send + Sync {
    /// Remove the token from the list and stop it from being auto-detected again.
    async fn remove_and_ignore_token(&self, address: &str) -> Result<(), CustomError>;
}

pub trait Notifier: Send + Sync {
    fn show_confirmation(&self, title: &str, body: &str);
    fn show_error(&self, title: &str, body: &str);
}

pub trait AnalyticsSink: Send + Sync {
    fn track_event(&self, name: &str, metadata: Value);
}

impl<F> BuyAvailability for F
where
    F: Fn(u64) -> bool + Send + Sync,
{
    fn allowed_to_buy(&self, chain_id: u64) -> bool {
        self(chain_id)
    }
}
