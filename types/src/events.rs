/// A raw cross-origin message as delivered by the hosting surface.
///
/// The bridge filters on `origin` before it even looks at the payload, so
/// untrusted senders can never influence state.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct InboundMessage {
    pub origin: String,
    pub data: serde_json::Value,
}

impl InboundMessage {
    pub fn new(origin: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            origin: origin.into(),
            data,
        }
    }
}

/// Control messages posted by the provider's embedded player.
///
/// The tag and the action strings are an exact, case-sensitive contract;
/// anything that does not deserialize here is dropped by the bridge.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum EmbedMessage {
    #[serde(rename = "streaming-embed")]
    StreamingEmbed { action: EmbedAction },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbedAction {
    Init,
    Show,
    Hide,
}

/// The single typed event channel between the avatar integration and the
/// session logic. Replaces the provider SDK's string-keyed emitter so the
/// session can match exhaustively.
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarEvent {
    /// The embed finished initializing and can take a conversation.
    Ready,
    /// The embedded player expanded into view.
    Shown,
    /// The embedded player collapsed.
    Hidden,
    /// The loading watchdog fired before `Ready` arrived.
    LoadError,
    /// The control channel dropped after the embed was already ready.
    Disconnected,
    /// The provider attached its media stream to the playback surface.
    StreamAttached,
    AvatarStartedSpeaking,
    AvatarStoppedSpeaking,
    UserStartedSpeaking,
    UserStoppedSpeaking,
    /// A transcribed or typed utterance relayed by the provider.
    MessageReceived(String),
}
