use std::sync::{Arc, Mutex};

use actix_web::rt::{self, task::JoinHandle};
use log::{error, info, warn};
use serde::Serialize;
use serde_json::json;

use crate::{
    errors::CustomError,
    messages::{self, analytics},
    models::asset::Asset,
    services::collaborators::{AnalyticsSink, Navigator, Notifier, TokenRemover},
};

/// Index of the destructive option in the removal sheet.
pub const REMOVE_OPTION_INDEX: usize = 0;

/// Handle to a removal running on the actix runtime.
pub type RemovalTask = JoinHandle<Result<String, CustomError>>;

/// A removal that has been spawned, with the address it was spawned for.
#[derive(Debug)]
pub struct StartedRemoval {
    pub address: String,
    pub task: RemovalTask,
}

#[derive(Debug, Clone, Serialize)]
pub struct RemovalSheet {
    pub title: String,
    pub options: Vec<String>,
    pub destructive_button_index: usize,
    pub cancel_button_index: usize,
    pub token: Asset,
}

/// Carries out what the user does on the token list.
///
/// Holds the one piece of UI state the list needs: which token the removal
/// sheet was opened for.
pub struct TokenListShell {
    remover: Arc<dyn TokenRemover>,
    token_to_remove: Mutex<Option<Asset>>,
}

impl TokenListShell {
    pub fn new(remover: Arc<dyn TokenRemover>) -> Self {
        Self {
            remover,
            token_to_remove: Mutex::new(None),
        }
    }

    pub fn on_item_press(&self, asset: &Asset, navigator: &dyn Navigator) {
        info!("opening detail for {}", asset.symbol);
        navigator.navigate_to_detail(asset);
    }

    /// Long-press handler. The native asset has none.
    pub fn show_remove_menu(&self, asset: &Asset) -> Result<RemovalSheet, CustomError> {
        if !asset.is_removable() {
            return Err(CustomError::NativeAssetNotRemovableError);
        }

        let mut pending = self
            .token_to_remove
            .lock()
            .map_err(|_| CustomError::InternalServerError)?;
        *pending = Some(asset.clone());

        Ok(RemovalSheet {
            title: messages::REMOVE_TOKEN_TITLE.to_string(),
            options: vec![messages::REMOVE.to_string(), messages::CANCEL.to_string()],
            destructive_button_index: REMOVE_OPTION_INDEX,
            cancel_button_index: 1,
            token: asset.clone(),
        })
    }

    pub fn pending_removal(&self) -> Option<Asset> {
        self.token_to_remove
            .lock()
            .ok()
            .and_then(|pending| pending.clone())
    }

    /// Returns the running removal when the destructive option was chosen.
    pub fn on_action_sheet_press(
        &self,
        index: usize,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Option<StartedRemoval>, CustomError> {
        let token = self
            .token_to_remove
            .lock()
            .map_err(|_| CustomError::InternalServerError)?
            .take()
            .ok_or(CustomError::NoPendingRemovalError)?;

        if index != REMOVE_OPTION_INDEX {
            info!("removal of {} cancelled", token.symbol);
            return Ok(None);
        }

        self.remove_token(&token, notifier).map(Some)
    }

    /// Spawn the removal. The notice follows its outcome.
    pub fn remove_token(
        &self,
        token: &Asset,
        notifier: Arc<dyn Notifier>,
    ) -> Result<StartedRemoval, CustomError> {
        let address = token
            .address
            .clone()
            .ok_or(CustomError::NativeAssetNotRemovableError)?;
        let remover = Arc::clone(&self.remover);

        info!("removing token {} ({})", token.symbol, address);
        let target = address.clone();
        let task = rt::spawn(async move {
            match remover.remove_and_ignore_token(&target).await {
                Ok(()) => {
                    notifier.show_confirmation(
                        messages::TOKEN_REMOVED_TITLE,
                        messages::TOKEN_REMOVED_DESC,
                    );
                    Ok(target)
                }
                Err(e) => {
                    warn!("failed to remove token {}: {}", target, e);
                    notifier.show_error(messages::TOKEN_REMOVAL_FAILED_TITLE, &e.to_string());
                    Err(CustomError::RemovalFailedError {
                        address: target,
                        reason: e.to_string(),
                    })
                }
            }
        });

        Ok(StartedRemoval { address, task })
    }

    pub fn go_to_add_token(&self, navigator: &dyn Navigator, tracker: &dyn AnalyticsSink) {
        navigator.navigate_to_add_asset();
        tracker.track_event(analytics::WALLET_ADD_TOKENS, json!({}));
    }

    pub fn go_to_buy(&self, navigator: &dyn Navigator, tracker: &dyn AnalyticsSink) {
        navigator.navigate_to_buy();
        tracker.track_event(analytics::WALLET_BUY_ETH, json!({}));
        tracker.track_event(
            analytics::ONRAMP_OPENED,
            json!({
                "button_location": analytics::BUTTON_LOCATION_HOME,
                "button_copy": messages::BUY_NATIVE,
            }),
        );
    }
}

/// Wait for a removal and flatten the join error.
pub async fn await_removal(task: RemovalTask) -> Result<String, CustomError> {
    task.await.map_err(|e| {
        error!("removal task did not complete: {}", e);
        CustomError::InternalServerError
    })?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::effect::{EffectKind, NavigationIntent},
        services::effect_recorder::EffectRecorder,
    };
    use async_trait::async_trait;

    struct StubRemover {
        fail: bool,
        removed: Mutex<Vec<String>>,
    }

    impl StubRemover {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                removed: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TokenRemover for StubRemover {
        async fn remove_and_ignore_token(&self, address: &str) -> Result<(), CustomError> {
            if self.fail {
                return Err(CustomError::TokenNotFoundError(address.to_string()));
            }
            self.removed.lock().unwrap().push(address.to_string());
            Ok(())
        }
    }

    fn token() -> Asset {
        Asset::token("0x000000000000000000000000000000000000000a", "AAA", 18)
    }

    #[test]
    fn native_asset_has_no_remove_menu() {
        let shell = TokenListShell::new(StubRemover::new(false));
        let err = shell.show_remove_menu(&Asset::native("ETH", "1")).unwrap_err();
        assert_eq!(err, CustomError::NativeAssetNotRemovableError);
        assert!(shell.pending_removal().is_none());
    }

    #[test]
    fn long_press_opens_sheet_for_tokens() {
        let shell = TokenListShell::new(StubRemover::new(false));
        let sheet = shell.show_remove_menu(&token()).unwrap();
        assert_eq!(sheet.options[sheet.destructive_button_index], messages::REMOVE);
        assert_eq!(sheet.options[sheet.cancel_button_index], messages::CANCEL);
        assert_eq!(shell.pending_removal(), Some(token()));
    }

    #[test]
    fn item_press_navigates_to_detail() {
        let shell = TokenListShell::new(StubRemover::new(false));
        let recorder = EffectRecorder::new();
        shell.on_item_press(&token(), &recorder);
        assert_eq!(
            recorder.kinds(),
            vec![EffectKind::Navigate(NavigationIntent::AssetDetail { asset: token() })]
        );
    }

    #[actix_web::test]
    async fn cancel_clears_pending_without_removing() {
        let remover = StubRemover::new(false);
        let shell = TokenListShell::new(remover.clone());
        let recorder = Arc::new(EffectRecorder::new());

        shell.show_remove_menu(&token()).unwrap();
        let started = shell.on_action_sheet_press(1, recorder.clone()).unwrap();

        assert!(started.is_none());
        assert!(shell.pending_removal().is_none());
        assert!(remover.removed.lock().unwrap().is_empty());
        assert!(recorder.kinds().is_empty());
    }

    #[actix_web::test]
    async fn confirm_removes_and_notifies() {
        let remover = StubRemover::new(false);
        let shell = TokenListShell::new(remover.clone());
        let recorder = Arc::new(EffectRecorder::new());

        shell.show_remove_menu(&token()).unwrap();
        let started = shell
            .on_action_sheet_press(REMOVE_OPTION_INDEX, recorder.clone())
            .unwrap()
            .unwrap();
        assert_eq!(started.address, "0x000000000000000000000000000000000000000a");
        let removed = await_removal(started.task).await.unwrap();

        assert_eq!(removed, "0x000000000000000000000000000000000000000a");
        assert_eq!(remover.removed.lock().unwrap().len(), 1);
        assert_eq!(
            recorder.kinds(),
            vec![EffectKind::Notice {
                title: messages::TOKEN_REMOVED_TITLE.to_string(),
                body: messages::TOKEN_REMOVED_DESC.to_string(),
                is_error: false,
            }]
        );
    }

    #[actix_web::test]
    async fn failed_removal_is_reported() {
        let shell = TokenListShell::new(StubRemover::new(true));
        let recorder = Arc::new(EffectRecorder::new());

        shell.show_remove_menu(&token()).unwrap();
        let started = shell.on_action_sheet_press(0, recorder.clone()).unwrap().unwrap();
        let err = await_removal(started.task).await.unwrap_err();

        assert!(matches!(err, CustomError::RemovalFailedError { .. }));
        match recorder.kinds().as_slice() {
            [EffectKind::Notice { is_error, title, .. }] => {
                assert!(*is_error);
                assert_eq!(title, messages::TOKEN_REMOVAL_FAILED_TITLE);
            }
            other => panic!("unexpected effects: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn started_removal_keeps_its_address_when_sheet_reopens() {
        let shell = TokenListShell::new(StubRemover::new(false));
        let recorder = Arc::new(EffectRecorder::new());
        let other = Asset::token("0x000000000000000000000000000000000000000b", "BBB", 18);

        shell.show_remove_menu(&token()).unwrap();
        let started = shell.on_action_sheet_press(0, recorder.clone()).unwrap().unwrap();
        shell.show_remove_menu(&other).unwrap();

        assert_eq!(started.address, "0x000000000000000000000000000000000000000a");
        assert_eq!(await_removal(started.task).await.unwrap(), started.address);
        assert_eq!(shell.pending_removal(), Some(other));
    }

    #[test]
    fn confirm_without_sheet_is_rejected() {
        let shell = TokenListShell::new(StubRemover::new(false));
        let recorder = Arc::new(EffectRecorder::new());
        let err = shell.on_action_sheet_press(0, recorder).unwrap_err();
        assert_eq!(err, CustomError::NoPendingRemovalError);
    }

    #[test]
    fn buy_navigates_and_tracks() {
        let shell = TokenListShell::new(StubRemover::new(false));
        let recorder = EffectRecorder::new();
        shell.go_to_buy(&recorder, &recorder);

        let kinds = recorder.kinds();
        assert_eq!(kinds[0], EffectKind::Navigate(NavigationIntent::FiatOnRamp));
        assert_eq!(kinds.len(), 3);
        match &kinds[2] {
            EffectKind::Analytics { name, metadata } => {
                assert_eq!(name, analytics::ONRAMP_OPENED);
                assert_eq!(metadata["button_location"], "Home Screen");
            }
            other => panic!("unexpected effect: {:?}", other),
        }
    }

    #[test]
    fn add_token_navigates_and_tracks() {
        let shell = TokenListShell::new(StubRemover::new(false));
        let recorder = EffectRecorder::new();
        shell.go_to_add_token(&recorder, &recorder);

        assert_eq!(
            recorder.kinds()[0],
            EffectKind::Navigate(NavigationIntent::AddAsset {
                asset_type: "token".to_string()
            })
        );
    }
}
