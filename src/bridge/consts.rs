use std::time::Duration;

pub const AVATAR_API_KEY: &str = "AVATAR_API_KEY";

pub const EMBED_ORIGIN: &str = "https://labs.heygen.com";
pub const EMBED_PATH: &str = "/guest/streaming-embed";

/// How long the embed gets to post `init` before the watchdog declares a
/// load failure.
pub const LOAD_TIMEOUT: Duration = Duration::from_secs(15);
/// Delay before the embed surface is allowed to render, so the hosting
/// view has finished mounting.
pub const MOUNT_DELAY: Duration = Duration::from_millis(500);
