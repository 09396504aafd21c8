use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use avatar_session_types::{AvatarEvent, ConnectionState, SessionMetrics, VoiceChatFlags};

use crate::bridge::{BridgeError, EmbedBridge, EmbedConfig, EventRx, IntakeTx};
use crate::camera::{CameraCapture, CameraError, MediaDevices, MediaStream};
use crate::session::{SessionController, SessionError};

/// How long the simulated avatar keeps "speaking" after a sent message in
/// demo mode.
const SIMULATED_SPEECH: Duration = Duration::from_secs(3);

#[derive(Debug, thiserror::Error)]
pub enum TrainingError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// One activation lifetime of the training view: owns the embed bridge,
/// the camera capture and the session controller, and keeps them
/// consistent until `end` tears everything down.
pub struct TrainingSession<D: MediaDevices> {
    controller: Arc<Mutex<SessionController>>,
    bridge: EmbedBridge,
    camera: CameraCapture<D>,
    forward_handle: Option<tokio::task::JoinHandle<()>>,
    timer_handle: Option<tokio::task::JoinHandle<()>>,
    speech_handle: Option<tokio::task::JoinHandle<()>>,
}

impl<D: MediaDevices> TrainingSession<D> {
    pub fn new(config: EmbedConfig, devices: D) -> Self {
        Self {
            controller: Arc::new(Mutex::new(SessionController::new())),
            bridge: EmbedBridge::new(config),
            camera: CameraCapture::new(devices),
            forward_handle: None,
            timer_handle: None,
            speech_handle: None,
        }
    }

    /// Starts the session: moves to connecting, activates the embed bridge
    /// and the camera without gating one on the other, and returns the
    /// intake sender the hosting surface feeds provider messages through.
    pub async fn start(&mut self) -> Result<IntakeTx, TrainingError> {
        lock(&self.controller).start_session()?;

        let intake = match self.bridge.activate() {
            Ok(intake) => intake,
            Err(e) => {
                // Surfaced exactly like a load failure: error state plus
                // the retry affordance.
                lock(&self.controller).handle_avatar_event(AvatarEvent::LoadError);
                return Err(e.into());
            }
        };
        let events = self.bridge.events()?;
        self.spawn_forwarder(events);
        self.spawn_timer();

        // The bridge is already listening; the camera prompt suspends only
        // this call, and its failure stays local to the camera flags.
        match self.camera.activate().await {
            Ok(_) => lock(&self.controller).camera_ready(),
            Err(e) => {
                lock(&self.controller).camera_failed(matches!(e, CameraError::PermissionDenied))
            }
        }

        Ok(intake)
    }

    /// User-triggered retry from the error state: resets the bridge before
    /// re-entering connecting, and hands back the fresh intake sender.
    pub fn retry(&mut self) -> Result<IntakeTx, TrainingError> {
        {
            let controller = lock(&self.controller);
            if controller.state != ConnectionState::Error {
                return Err(SessionError::InvalidTransition {
                    action: "retry",
                    state: controller.state,
                }
                .into());
            }
        }
        let intake = self.bridge.retry()?;
        lock(&self.controller).retry()?;
        Ok(intake)
    }

    /// The user-triggered camera "Try Again" action; independent of the
    /// avatar side.
    pub async fn retry_camera(&mut self) -> Result<MediaStream, CameraError> {
        let result = self.camera.retry().await;
        match &result {
            Ok(_) => lock(&self.controller).camera_ready(),
            // The stream is still live; the flags already describe it.
            Err(CameraError::AlreadyActive) => {}
            Err(e) => {
                lock(&self.controller).camera_failed(matches!(e, CameraError::PermissionDenied))
            }
        }
        result
    }

    /// Tears down camera, bridge and timers synchronously, then returns
    /// the controller to disconnected. Idempotent; runs on every exit path
    /// (including drop).
    pub fn end(&mut self) {
        self.camera.deactivate();
        self.bridge.deactivate();
        for handle in [
            self.forward_handle.take(),
            self.timer_handle.take(),
            self.speech_handle.take(),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
        lock(&self.controller).end_session();
    }

    /// Simulated text send: counts the message and keeps the avatar
    /// "speaking" for a few seconds, as the demo mode does.
    pub fn send_message(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        if !lock(&self.controller).send_message() {
            return false;
        }

        if let Some(handle) = self.speech_handle.take() {
            handle.abort();
        }
        let controller = self.controller.clone();
        self.speech_handle = Some(tokio::spawn(async move {
            tokio::time::sleep(SIMULATED_SPEECH).await;
            let mut controller = lock(&controller);
            if controller.flags.is_avatar_speaking {
                controller.handle_avatar_event(AvatarEvent::AvatarStoppedSpeaking);
            }
        }));
        true
    }

    pub fn start_voice_chat(&self) {
        lock(&self.controller).start_voice_chat();
    }

    pub fn stop_voice_chat(&self) {
        lock(&self.controller).stop_voice_chat();
    }

    pub fn toggle_mute(&self) {
        lock(&self.controller).toggle_mute();
    }

    pub fn interrupt_avatar(&self) {
        lock(&self.controller).interrupt_avatar();
    }

    pub fn state(&self) -> ConnectionState {
        lock(&self.controller).state
    }

    pub fn metrics(&self) -> SessionMetrics {
        lock(&self.controller).metrics.clone()
    }

    pub fn voice_flags(&self) -> VoiceChatFlags {
        lock(&self.controller).flags
    }

    pub fn avatar_ready(&self) -> bool {
        lock(&self.controller).avatar_ready
    }

    pub fn camera_ready(&self) -> bool {
        lock(&self.controller).camera_ready
    }

    pub fn camera_denied(&self) -> bool {
        lock(&self.controller).camera_denied
    }

    pub fn camera_stream(&self) -> Option<MediaStream> {
        self.camera.stream().cloned()
    }

    pub fn embed_config(&self) -> &EmbedConfig {
        self.bridge.config()
    }

    fn spawn_forwarder(&mut self, mut events: EventRx) {
        if let Some(handle) = self.forward_handle.take() {
            handle.abort();
        }
        let controller = self.controller.clone();
        self.forward_handle = Some(tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => lock(&controller).handle_avatar_event(event),
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!("avatar event stream lagged by {}", n);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
        }));
    }

    fn spawn_timer(&mut self) {
        if let Some(handle) = self.timer_handle.take() {
            handle.abort();
        }
        let controller = self.controller.clone();
        self.timer_handle = Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick of a tokio interval completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                lock(&controller).tick();
            }
        }));
    }
}

impl<D: MediaDevices> Drop for TrainingSession<D> {
    fn drop(&mut self) {
        self.end();
    }
}

fn lock(controller: &Arc<Mutex<SessionController>>) -> MutexGuard<'_, SessionController> {
    controller
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}
