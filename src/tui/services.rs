use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::core::auth::SessionUser;
use crate::core::notify::Toast;
use crate::core::prefs::PrefStore;
use crate::core::reply::{ReplyTransport, SimulatedReplyTransport};

use super::events::AppEvent;

/// Centralized handle to the app's collaborators.
///
/// Created once at startup, then passed by ref to views. The reply
/// transport sits behind a trait object so a real mail relay can replace
/// the simulation without touching the views.
pub struct Services {
    pub session: SessionUser,
    pub prefs: PrefStore,
    pub replies: Arc<dyn ReplyTransport>,
    pub event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl Services {
    pub fn new(config: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let data_dir = config.data_dir();
        log::info!("Initializing services with data dir: {}", data_dir.display());

        Self {
            session: config.session_user(),
            prefs: PrefStore::new(&data_dir),
            replies: Arc::new(SimulatedReplyTransport::default()),
            event_tx,
        }
    }

    /// Queue a toast for the overlay.
    pub fn toast(&self, toast: Toast) {
        let _ = self.event_tx.send(AppEvent::Toast(toast));
    }
}
