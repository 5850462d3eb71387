use std::sync::Mutex;

use log::{info, warn};
use serde_json::Value;

use crate::{
    models::{
        asset::Asset,
        effect::{Effect, EffectKind, NavigationIntent},
    },
    services::collaborators::{AnalyticsSink, Navigator, Notifier},
};

/// Collects the effects of one request so the client can carry them out.
#[derive(Debug, Default)]
pub struct EffectRecorder {
    effects: Mutex<Vec<Effect>>,
}

impl EffectRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, kind: EffectKind) {
        match self.effects.lock() {
            Ok(mut effects) => effects.push(Effect::new(kind)),
            Err(_) => warn!("effect log poisoned, dropping {:?}", kind),
        }
    }

    pub fn take(&self) -> Vec<Effect> {
        self.effects
            .lock()
            .map(|mut effects| std::mem::take(&mut *effects))
            .unwrap_or_default()
    }

    pub fn kinds(&self) -> Vec<EffectKind> {
        self.effects
            .lock()
            .map(|effects| effects.iter().map(|e| e.kind.clone()).collect())
            .unwrap_or_default()
    }
}

impl Navigator for EffectRecorder {
    fn navigate_to_detail(&self, asset: &Asset) {
        self.push(EffectKind::Navigate(NavigationIntent::AssetDetail {
            asset: asset.clone(),
        }));
    }

    fn navigate_to_add_asset(&self) {
        self.push(EffectKind::Navigate(NavigationIntent::AddAsset {
            asset_type: "token".to_string(),
        }));
    }

    fn navigate_to_buy(&self) {
        self.push(EffectKind::Navigate(NavigationIntent::FiatOnRamp));
    }
}

impl Notifier for EffectRecorder {
    fn show_confirmation(&self, title: &str, body: &str) {
        self.push(EffectKind::Notice {
            title: title.to_string(),
            body: body.to_string(),
            is_error: false,
        });
    }

    fn show_error(&self, title: &str, body: &str) {
        self.push(EffectKind::Notice {
            title: title.to_string(),
            body: body.to_string(),
            is_error: true,
        });
    }
}

impl AnalyticsSink for EffectRecorder {
    fn track_event(&self, name: &str, metadata: Value) {
        info!(target: "analytics", "{} {}", name, metadata);
        self.push(EffectKind::Analytics {
            name: name.to_string(),
            metadata,
        });
    }
}
