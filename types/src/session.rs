/// Connection state of one training session. Owned exclusively by the
/// session controller; everyone else reads snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl Default for ConnectionState {
    fn default() -> Self {
        ConnectionState::Disconnected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

/// Per-session counters, discarded when the training view unmounts.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionMetrics {
    pub duration_secs: u64,
    pub messages_exchanged: u32,
    pub status: SessionStatus,
}

impl SessionMetrics {
    pub fn new() -> Self {
        Self {
            duration_secs: 0,
            messages_exchanged: 0,
            status: SessionStatus::Active,
        }
    }
}

impl Default for SessionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Voice-chat UI flags. Independently settable; muting is only meaningful
/// while voice chat is active, which the controller enforces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VoiceChatFlags {
    pub is_voice_chat_active: bool,
    pub is_input_muted: bool,
    pub is_avatar_speaking: bool,
    pub is_user_speaking: bool,
}
