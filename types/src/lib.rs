pub mod events;
pub mod review;
pub mod scenario;
pub mod session;

pub use events::{AvatarEvent, EmbedAction, EmbedMessage, InboundMessage};
pub use session::{ConnectionState, SessionMetrics, SessionStatus, VoiceChatFlags};
