use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::asset::Asset;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "route", rename_all = "snake_case")]
pub enum NavigationIntent {
    AssetDetail { asset: Asset },
    AddAsset { asset_type: String },
    FiatOnRamp,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectKind {
    Navigate(NavigationIntent),
    Notice {
        title: String,
        body: String,
        is_error: bool,
    },
    Analytics {
        name: String,
        metadata: Value,
    },
}

/// A side effect the caller is expected to carry out.
#[derive(Debug, Clone, Serialize)]
pub struct Effect {
    pub id: Uuid,
    pub emitted_at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: EffectKind,
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            emitted_at: Utc::now(),
            kind,
        }
    }
}
