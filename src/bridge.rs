use std::sync::{Arc, Mutex};
use std::time::Duration;

use secrecy::ExposeSecret;

use avatar_session_types::{AvatarEvent, EmbedAction, EmbedMessage, InboundMessage};

pub mod config;
pub(crate) mod consts;

pub use config::{EmbedConfig, EmbedConfigBuilder};

/// Sender half of the listener's intake channel, handed out by `activate`
/// and `retry`. The hosting surface feeds every cross-origin message
/// through here; the bridge keeps no clone of its own, so dropping the
/// last sender reads as the provider going away.
pub type IntakeTx = tokio::sync::mpsc::Sender<InboundMessage>;
type EventTx = tokio::sync::broadcast::Sender<AvatarEvent>;
pub type EventRx = tokio::sync::broadcast::Receiver<AvatarEvent>;

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("embed bridge is already active")]
    AlreadyActive,
    #[error("embed bridge is not active")]
    NotActive,
    #[error("provider api key is empty")]
    MissingApiKey,
}

/// Readiness flags for one activation, readable from outside the listener
/// task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedFlags {
    pub ready: bool,
    pub load_error: bool,
    pub embed_visible: bool,
}

/// Bridge between the provider's embedded player and the session logic.
///
/// Each activation owns exactly one listener task; `retry` and
/// `deactivate` tear that task down before anything else happens, so no
/// callback can ever outlive its activation.
pub struct EmbedBridge {
    config: EmbedConfig,
    event_tx: Option<EventTx>,
    flags: Arc<Mutex<EmbedFlags>>,
    listen_handle: Option<tokio::task::JoinHandle<()>>,
}

impl EmbedBridge {
    pub fn new(config: EmbedConfig) -> Self {
        Self {
            config,
            event_tx: None,
            flags: Arc::new(Mutex::new(EmbedFlags::default())),
            listen_handle: None,
        }
    }

    pub fn config(&self) -> &EmbedConfig {
        &self.config
    }

    /// Starts one embed-loading sequence: a fresh intake channel, the
    /// mount delay, and the loading watchdog. Returns the only intake
    /// sender; the listener treats the channel closing as the provider
    /// going away.
    pub fn activate(&mut self) -> Result<IntakeTx, BridgeError> {
        if self.listen_handle.is_some() {
            return Err(BridgeError::AlreadyActive);
        }
        if self.config.api_key().expose_secret().is_empty() {
            return Err(BridgeError::MissingApiKey);
        }

        let (event_tx, _) = tokio::sync::broadcast::channel(self.config.capacity());
        self.event_tx = Some(event_tx.clone());
        Ok(self.spawn_listener(event_tx))
    }

    /// Resets flags and restarts the mount delay and watchdog. The
    /// previous listener is aborted first, so there is never more than one
    /// listening at a time. Subscribers keep their event receivers; the
    /// intake channel is fresh, so senders from the failed attempt go
    /// quietly dead.
    pub fn retry(&mut self) -> Result<IntakeTx, BridgeError> {
        let event_tx = self.event_tx.clone().ok_or(BridgeError::NotActive)?;
        if let Some(handle) = self.listen_handle.take() {
            handle.abort();
        }
        Ok(self.spawn_listener(event_tx))
    }

    /// Unregisters the listener and cancels any pending timers. Safe to
    /// call repeatedly and required on every exit path from the hosting
    /// view.
    pub fn deactivate(&mut self) {
        if let Some(handle) = self.listen_handle.take() {
            handle.abort();
        }
        self.event_tx = None;
        self.reset_flags();
    }

    pub fn is_active(&self) -> bool {
        self.listen_handle.is_some()
    }

    /// Subscribes to the typed avatar event channel.
    pub fn events(&self) -> Result<EventRx, BridgeError> {
        match self.event_tx {
            Some(ref tx) => Ok(tx.subscribe()),
            None => Err(BridgeError::NotActive),
        }
    }

    pub fn flags(&self) -> EmbedFlags {
        self.flags.lock().map(|f| *f).unwrap_or_default()
    }

    fn spawn_listener(&mut self, event_tx: EventTx) -> IntakeTx {
        let (intake_tx, intake_rx) = tokio::sync::mpsc::channel(self.config.capacity());
        self.reset_flags();

        let flags = self.flags.clone();
        let trusted_origin = self.config.trusted_origin().to_string();
        let mount_delay = self.config.mount_delay();
        let load_timeout = self.config.load_timeout();
        self.listen_handle = Some(tokio::spawn(listen(
            intake_rx,
            event_tx,
            flags,
            trusted_origin,
            mount_delay,
            load_timeout,
        )));
        intake_tx
    }

    fn reset_flags(&self) {
        if let Ok(mut flags) = self.flags.lock() {
            *flags = EmbedFlags::default();
        } else {
            tracing::error!("failed to reset embed flags");
        }
    }
}

impl Drop for EmbedBridge {
    fn drop(&mut self) {
        self.deactivate();
    }
}

struct ListenState {
    mounted: bool,
    ready: bool,
    load_error: bool,
}

async fn listen(
    mut intake_rx: tokio::sync::mpsc::Receiver<InboundMessage>,
    event_tx: EventTx,
    flags: Arc<Mutex<EmbedFlags>>,
    trusted_origin: String,
    mount_delay: Duration,
    load_timeout: Duration,
) {
    let mount = tokio::time::sleep(mount_delay);
    tokio::pin!(mount);
    let watchdog = tokio::time::sleep(load_timeout);
    tokio::pin!(watchdog);

    let mut state = ListenState {
        mounted: false,
        ready: false,
        load_error: false,
    };

    loop {
        tokio::select! {
            _ = &mut mount, if !state.mounted => {
                state.mounted = true;
                set_flags(&flags, |f| f.embed_visible = true);
                tracing::debug!("embed surface allowed to render");
            }
            // The watchdog races the `init` message against the same flag:
            // whichever fires first wins and the loser becomes a no-op.
            _ = &mut watchdog, if !state.ready && !state.load_error => {
                state.load_error = true;
                set_flags(&flags, |f| f.load_error = true);
                tracing::warn!("avatar embed loading timed out after {:?}", load_timeout);
                emit(&event_tx, AvatarEvent::LoadError);
            }
            message = intake_rx.recv() => {
                match message {
                    Some(message) => apply_message(message, &trusted_origin, &mut state, &flags, &event_tx),
                    None => {
                        if state.ready {
                            tracing::warn!("embed control channel dropped while connected");
                            emit(&event_tx, AvatarEvent::Disconnected);
                        }
                        break;
                    }
                }
            }
        }
    }
}

fn apply_message(
    message: InboundMessage,
    trusted_origin: &str,
    state: &mut ListenState,
    flags: &Arc<Mutex<EmbedFlags>>,
    event_tx: &EventTx,
) {
    if message.origin != trusted_origin {
        tracing::debug!(origin = %message.origin, "dropping message from untrusted origin");
        return;
    }

    let action = match serde_json::from_value::<EmbedMessage>(message.data) {
        Ok(EmbedMessage::StreamingEmbed { action }) => action,
        Err(e) => {
            tracing::debug!("ignoring unrecognized embed message: {}", e);
            return;
        }
    };

    // A failed activation is dead: once the watchdog has fired, nothing
    // from the embed may surface until the user retries.
    if state.load_error {
        tracing::debug!(?action, "dropping embed message after load error");
        return;
    }

    match action {
        EmbedAction::Init => {
            if state.ready {
                tracing::debug!("duplicate init from embed");
                return;
            }
            state.ready = true;
            set_flags(flags, |f| f.ready = true);
            tracing::info!("avatar embed initialized");
            emit(event_tx, AvatarEvent::Ready);
        }
        EmbedAction::Show => emit(event_tx, AvatarEvent::Shown),
        EmbedAction::Hide => emit(event_tx, AvatarEvent::Hidden),
    }
}

fn set_flags(flags: &Arc<Mutex<EmbedFlags>>, update: impl FnOnce(&mut EmbedFlags)) {
    if let Ok(mut guard) = flags.lock() {
        update(&mut guard);
    } else {
        tracing::error!("failed to update embed flags");
    }
}

fn emit(event_tx: &EventTx, event: AvatarEvent) {
    if let Err(e) = event_tx.send(event) {
        tracing::debug!("no subscribers for avatar event: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tokio::sync::broadcast::error::TryRecvError;

    fn test_config() -> EmbedConfig {
        EmbedConfig::builder()
            .with_api_key("demo-key")
            .with_trusted_origin("https://labs.heygen.com")
            .build()
    }

    fn init_message() -> InboundMessage {
        InboundMessage::new(
            "https://labs.heygen.com",
            json!({"type": "streaming-embed", "action": "init"}),
        )
    }

    async fn settle() {
        // Let the listener task drain its intake queue.
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn init_before_watchdog_emits_ready_and_no_load_error() {
        let mut bridge = EmbedBridge::new(test_config());
        let intake = bridge.activate().unwrap();
        let mut events = bridge.events().unwrap();

        intake.send(init_message()).await.unwrap();
        assert_eq!(events.recv().await.unwrap(), AvatarEvent::Ready);
        assert!(bridge.flags().ready);

        // Run past the watchdog deadline; it must stay silent.
        tokio::time::sleep(Duration::from_secs(20)).await;
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
        assert!(!bridge.flags().load_error);
    }

    #[tokio::test(start_paused = true)]
    async fn watchdog_fires_once_and_late_init_is_ignored() {
        let mut bridge = EmbedBridge::new(test_config());
        let intake = bridge.activate().unwrap();
        let mut events = bridge.events().unwrap();

        assert_eq!(events.recv().await.unwrap(), AvatarEvent::LoadError);
        assert!(bridge.flags().load_error);

        // A ready message arriving after the error must not surface.
        intake.send(init_message()).await.unwrap();
        settle().await;
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
        assert!(!bridge.flags().ready);
    }

    #[tokio::test(start_paused = true)]
    async fn untrusted_origin_and_malformed_messages_are_dropped() {
        let mut bridge = EmbedBridge::new(test_config());
        let intake = bridge.activate().unwrap();
        let mut events = bridge.events().unwrap();

        intake
            .send(InboundMessage::new(
                "https://evil.example.com",
                json!({"type": "streaming-embed", "action": "init"}),
            ))
            .await
            .unwrap();
        intake
            .send(InboundMessage::new(
                "https://labs.heygen.com",
                json!({"type": "other-widget", "action": "init"}),
            ))
            .await
            .unwrap();
        intake
            .send(InboundMessage::new(
                "https://labs.heygen.com",
                json!({"type": "streaming-embed", "action": "INIT"}),
            ))
            .await
            .unwrap();

        settle().await;
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
        assert_eq!(bridge.flags(), EmbedFlags::default());
    }

    #[tokio::test(start_paused = true)]
    async fn show_and_hide_map_to_shown_and_hidden() {
        let mut bridge = EmbedBridge::new(test_config());
        let intake = bridge.activate().unwrap();
        let mut events = bridge.events().unwrap();

        intake.send(init_message()).await.unwrap();
        intake
            .send(InboundMessage::new(
                "https://labs.heygen.com",
                json!({"type": "streaming-embed", "action": "show"}),
            ))
            .await
            .unwrap();
        intake
            .send(InboundMessage::new(
                "https://labs.heygen.com",
                json!({"type": "streaming-embed", "action": "hide"}),
            ))
            .await
            .unwrap();

        assert_eq!(events.recv().await.unwrap(), AvatarEvent::Ready);
        assert_eq!(events.recv().await.unwrap(), AvatarEvent::Shown);
        assert_eq!(events.recv().await.unwrap(), AvatarEvent::Hidden);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_error_produces_a_fresh_attempt() {
        let mut bridge = EmbedBridge::new(test_config());
        let _stale = bridge.activate().unwrap();
        let mut events = bridge.events().unwrap();

        assert_eq!(events.recv().await.unwrap(), AvatarEvent::LoadError);

        let intake = bridge.retry().unwrap();
        assert_eq!(bridge.flags(), EmbedFlags::default());

        intake.send(init_message()).await.unwrap();
        assert_eq!(events.recv().await.unwrap(), AvatarEvent::Ready);
        assert!(bridge.flags().ready);
    }

    #[tokio::test(start_paused = true)]
    async fn channel_drop_after_ready_surfaces_disconnected() {
        let mut bridge = EmbedBridge::new(test_config());
        let intake = bridge.activate().unwrap();
        let mut events = bridge.events().unwrap();

        intake.send(init_message()).await.unwrap();
        assert_eq!(events.recv().await.unwrap(), AvatarEvent::Ready);

        // The hosting surface holds the only sender; dropping it is how a
        // provider-side teardown reaches the listener.
        drop(intake);
        assert_eq!(events.recv().await.unwrap(), AvatarEvent::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn activate_twice_is_rejected_and_deactivate_is_idempotent() {
        let mut bridge = EmbedBridge::new(test_config());
        let _intake = bridge.activate().unwrap();
        assert!(matches!(bridge.activate(), Err(BridgeError::AlreadyActive)));

        bridge.deactivate();
        bridge.deactivate();
        assert!(!bridge.is_active());
        assert!(bridge.events().is_err());
    }

    #[tokio::test]
    async fn empty_api_key_is_rejected() {
        let config = EmbedConfig::builder().with_api_key("").build();
        let mut bridge = EmbedBridge::new(config);
        assert!(matches!(bridge.activate(), Err(BridgeError::MissingApiKey)));
    }
}
