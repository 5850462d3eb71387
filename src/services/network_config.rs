use std::collections::HashSet;

use log::debug;

use crate::services::collaborators::BuyAvailability;

/// Chains on which the fiat on-ramp is offered, as configured.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    buy_allowed: HashSet<u64>,
}

impl NetworkRegistry {
    pub fn new(buy_allowed_chain_ids: &[u64]) -> Self {
        debug!("buying enabled on chains {:?}", buy_allowed_chain_ids);
        Self {
            buy_allowed: buy_allowed_chain_ids.iter().copied().collect(),
        }
    }
}

impl BuyAvailability for NetworkRegistry {
    fn allowed_to_buy(&self, chain_id: u64) -> bool {
        self.buy_allowed.contains(&chain_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_configured_chains_allow_buying() {
        let registry = NetworkRegistry::new(&[1]);
        assert!(registry.allowed_to_buy(1));
        assert!(!registry.allowed_to_buy(137));
        assert!(!registry.allowed_to_buy(999));
    }

    #[test]
    fn any_configured_chain_id_is_honoured() {
        let registry = NetworkRegistry::new(&[10, 42161]);
        assert!(registry.allowed_to_buy(10));
        assert!(registry.allowed_to_buy(42161));
        assert!(!registry.allowed_to_buy(1));
    }
}
