use std::sync::Arc;

use actix_web::{get, post, put, web, HttpResponse};
use log::info;
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::{
    errors::CustomError,
    models::{
        api_response::{accepted_response, success_response},
        asset::{normalize_address, Asset},
        display::AssetListView,
        effect::Effect,
        wallet_state::WalletStateUpdate,
    },
    services::{
        asset_list_presenter::AssetListPresenter,
        collaborators::BuyAvailability,
        effect_recorder::EffectRecorder,
        token_actions::await_removal,
    },
};

#[derive(Deserialize)]
pub struct AssetRef {
    #[serde(default)]
    address: Option<String>,
}

#[derive(Deserialize)]
pub struct RemovalAnswer {
    index: usize,
    #[serde(default = "default_wait")]
    wait: bool,
}

fn default_wait() -> bool {
    true
}

#[derive(Debug, Serialize)]
struct EffectsResponse {
    effects: Vec<Effect>,
}

#[derive(Debug, Serialize)]
struct RemovalStarted {
    address: String,
}

fn render(data: &AppState) -> Result<AssetListView, CustomError> {
    let snapshot = data.store.snapshot()?;
    Ok(AssetListPresenter::build_view(
        &snapshot.assets,
        &snapshot.context,
        &snapshot.settings,
        &data.registry,
    ))
}

/// The asset as the list shows it, falling back to the stored one when the
/// zero-balance filter hides it.
fn resolve_asset(data: &AppState, address: Option<&str>) -> Result<Asset, CustomError> {
    let key = address
        .map(normalize_address)
        .unwrap_or_else(|| "0x".to_string());
    let view = render(data)?;
    match view.lines.into_iter().find(|line| line.key == key) {
        Some(line) => Ok(line.asset),
        None => data.store.find_asset(address),
    }
}

#[get("/assets")]
pub async fn get_assets(data: web::Data<AppState>) -> Result<HttpResponse, CustomError> {
    Ok(success_response(render(&data)?))
}

#[put("/state")]
pub async fn update_state(
    data: web::Data<AppState>,
    update: web::Json<WalletStateUpdate>,
) -> Result<HttpResponse, CustomError> {
    data.store.apply(update.into_inner())?;
    Ok(success_response(render(&data)?))
}

#[post("/assets/press")]
pub async fn press_asset(
    data: web::Data<AppState>,
    asset_ref: web::Json<AssetRef>,
) -> Result<HttpResponse, CustomError> {
    let asset = resolve_asset(&data, asset_ref.address.as_deref())?;
    let recorder = EffectRecorder::new();
    data.shell.on_item_press(&asset, &recorder);
    Ok(success_response(EffectsResponse {
        effects: recorder.take(),
    }))
}

#[post("/assets/long-press")]
pub async fn long_press_asset(
    data: web::Data<AppState>,
    asset_ref: web::Json<AssetRef>,
) -> Result<HttpResponse, CustomError> {
    let asset = data.store.find_asset(asset_ref.address.as_deref())?;
    let sheet = data.shell.show_remove_menu(&asset)?;
    Ok(success_response(sheet))
}

#[post("/assets/removal")]
pub async fn answer_removal(
    data: web::Data<AppState>,
    answer: web::Json<RemovalAnswer>,
) -> Result<HttpResponse, CustomError> {
    let recorder = Arc::new(EffectRecorder::new());

    let Some(started) = data.shell.on_action_sheet_press(answer.index, recorder.clone())? else {
        return Ok(success_response(EffectsResponse { effects: Vec::new() }));
    };

    if !answer.wait {
        info!("removal of {} continues in the background", started.address);
        return Ok(accepted_response(RemovalStarted {
            address: started.address,
        }));
    }

    await_removal(started.task).await?;
    Ok(success_response(EffectsResponse {
        effects: recorder.take(),
    }))
}

#[post("/assets/add")]
pub async fn add_token(data: web::Data<AppState>) -> Result<HttpResponse, CustomError> {
    let recorder = EffectRecorder::new();
    data.shell.go_to_add_token(&recorder, &recorder);
    Ok(success_response(EffectsResponse {
        effects: recorder.take(),
    }))
}

#[post("/buy")]
pub async fn buy(data: web::Data<AppState>) -> Result<HttpResponse, CustomError> {
    let chain_id = data.store.snapshot()?.settings.chain_id;
    if !data.registry.allowed_to_buy(chain_id) {
        return Err(CustomError::BuyNotAllowedError(chain_id));
    }

    let recorder = EffectRecorder::new();
    data.shell.go_to_buy(&recorder, &recorder);
    Ok(success_response(EffectsResponse {
        effects: recorder.take(),
    }))
}
