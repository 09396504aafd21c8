use avatar_session_types::{
    AvatarEvent, ConnectionState, SessionMetrics, SessionStatus, VoiceChatFlags,
};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: ConnectionState,
    },
}

/// The session state machine. Exclusively owns `ConnectionState`; every
/// other component reports in through events or reads snapshots out.
///
/// Camera readiness is deliberately tracked as an independent flag: the
/// connected transition is gated on the avatar alone.
#[derive(Debug, Default)]
pub struct SessionController {
    pub state: ConnectionState,
    pub avatar_ready: bool,
    pub camera_ready: bool,
    pub camera_denied: bool,
    pub stream_attached: bool,
    pub embed_visible: bool,
    pub flags: VoiceChatFlags,
    pub metrics: SessionMetrics,
}

impl SessionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// disconnected → connecting. The caller starts camera and embed
    /// activation concurrently once this returns.
    pub fn start_session(&mut self) -> Result<(), SessionError> {
        match self.state {
            ConnectionState::Disconnected => {
                self.state = ConnectionState::Connecting;
                self.metrics = SessionMetrics::new();
                Ok(())
            }
            state => Err(SessionError::InvalidTransition {
                action: "start session",
                state,
            }),
        }
    }

    /// connected → disconnected, restoring the freshly-created shape. The
    /// caller tears down camera and bridge before treating the transition
    /// as complete.
    pub fn end_session(&mut self) {
        self.metrics.status = SessionStatus::Completed;
        let metrics = self.metrics.clone();
        *self = Self::new();
        self.metrics = metrics;
    }

    /// error → connecting. The caller resets the bridge first.
    pub fn retry(&mut self) -> Result<(), SessionError> {
        match self.state {
            ConnectionState::Error => {
                self.state = ConnectionState::Connecting;
                self.avatar_ready = false;
                self.embed_visible = false;
                Ok(())
            }
            state => Err(SessionError::InvalidTransition {
                action: "retry",
                state,
            }),
        }
    }

    /// Applies one typed avatar event. Events that do not fit the current
    /// state are dropped; only `Ready`, `LoadError` and `Disconnected` can
    /// move `ConnectionState`.
    pub fn handle_avatar_event(&mut self, event: AvatarEvent) {
        match event {
            AvatarEvent::Ready => match self.state {
                ConnectionState::Connecting => {
                    self.avatar_ready = true;
                    self.state = ConnectionState::Connected;
                    tracing::info!("avatar ready, session connected");
                }
                state => {
                    tracing::debug!(?state, "ignoring avatar ready signal");
                }
            },
            AvatarEvent::LoadError => {
                if self.state == ConnectionState::Connecting {
                    self.state = ConnectionState::Error;
                    tracing::warn!("avatar failed to load, session errored");
                }
            }
            AvatarEvent::Disconnected => {
                // An unexpected drop while connected is surfaced, never
                // silently ignored and never auto-retried.
                if self.state == ConnectionState::Connected {
                    self.state = ConnectionState::Error;
                    self.avatar_ready = false;
                    tracing::warn!("avatar dropped unexpectedly, session errored");
                }
            }
            AvatarEvent::Shown => self.embed_visible = true,
            AvatarEvent::Hidden => self.embed_visible = false,
            AvatarEvent::StreamAttached => self.stream_attached = true,
            AvatarEvent::AvatarStartedSpeaking => self.flags.is_avatar_speaking = true,
            AvatarEvent::AvatarStoppedSpeaking => self.flags.is_avatar_speaking = false,
            AvatarEvent::UserStartedSpeaking => self.flags.is_user_speaking = true,
            AvatarEvent::UserStoppedSpeaking => self.flags.is_user_speaking = false,
            AvatarEvent::MessageReceived(text) => {
                self.metrics.messages_exchanged += 1;
                tracing::debug!(chars = text.len(), "message relayed by provider");
            }
        }
    }

    pub fn camera_ready(&mut self) {
        self.camera_ready = true;
        self.camera_denied = false;
    }

    pub fn camera_failed(&mut self, denied: bool) {
        self.camera_ready = false;
        self.camera_denied = denied;
    }

    /// Counts one simulated outbound message. Fire-and-forget: no
    /// round-trip, no timeout.
    pub fn send_message(&mut self) -> bool {
        if self.state != ConnectionState::Connected {
            return false;
        }
        self.metrics.messages_exchanged += 1;
        self.flags.is_avatar_speaking = true;
        true
    }

    pub fn start_voice_chat(&mut self) {
        if self.state == ConnectionState::Connected {
            self.flags.is_voice_chat_active = true;
        }
    }

    pub fn stop_voice_chat(&mut self) {
        self.flags.is_voice_chat_active = false;
        self.flags.is_input_muted = false;
    }

    /// Mute is only meaningful while voice chat is active; toggles outside
    /// that window leave state untouched.
    pub fn toggle_mute(&mut self) {
        if self.flags.is_voice_chat_active {
            self.flags.is_input_muted = !self.flags.is_input_muted;
        }
    }

    pub fn interrupt_avatar(&mut self) {
        self.flags.is_avatar_speaking = false;
    }

    /// One elapsed second while the training view is mounted.
    pub fn tick(&mut self) {
        self.metrics.duration_secs += 1;
    }
}
