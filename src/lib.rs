pub mod bridge;
pub mod camera;
pub mod content;
pub mod router;
pub mod scoring;
pub mod session;
pub mod training;

pub use avatar_session_types as types;

pub use bridge::{EmbedBridge, EmbedConfig, EmbedConfigBuilder};
pub use camera::{CameraCapture, DemoDevices, MediaDevices};
pub use router::{View, ViewRouter};
pub use scoring::{DemoScores, ScoringProvider};
pub use session::SessionController;
pub use training::TrainingSession;
