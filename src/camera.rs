use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

#[derive(Debug, thiserror::Error)]
pub enum CameraError {
    #[error("camera permission denied")]
    PermissionDenied,
    #[error("camera capture is already active")]
    AlreadyActive,
    #[error("camera device failed: {0}")]
    Device(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    User,
    Environment,
}

/// Constraints requested from the platform when acquiring the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub facing: Facing,
    pub audio: bool,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            ideal_width: 1280,
            ideal_height: 720,
            facing: Facing::User,
            audio: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Video,
    Audio,
}

/// One track of an acquired stream. Clones share the underlying state, so
/// a stop through any handle is visible everywhere.
#[derive(Debug, Clone)]
pub struct MediaTrack {
    kind: TrackKind,
    stopped: Arc<AtomicBool>,
}

impl MediaTrack {
    pub fn new(kind: TrackKind) -> Self {
        Self {
            kind,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Handle to a live local stream. The capture component owns the primary
/// handle; clones handed to the display surface observe track state but
/// are expected to leave teardown to the owner.
#[derive(Debug, Clone, Default)]
pub struct MediaStream {
    tracks: Vec<MediaTrack>,
}

impl MediaStream {
    pub fn new(tracks: Vec<MediaTrack>) -> Self {
        Self { tracks }
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    pub fn stop_all(&self) {
        for track in &self.tracks {
            track.stop();
        }
    }
}

/// Platform seam for acquiring local media. Real acquisition is a
/// permission-gated platform capability; tests mock this and the demo
/// binary uses [`DemoDevices`].
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MediaDevices {
    async fn open(&self, constraints: &StreamConstraints) -> Result<MediaStream, CameraError>;
}

/// Grant-or-deny stand-in for the platform device layer, matching the
/// original demo mode where no real provider credentials exist.
#[derive(Debug, Clone, Default)]
pub struct DemoDevices {
    deny: bool,
}

impl DemoDevices {
    pub fn granting() -> Self {
        Self { deny: false }
    }

    pub fn denying() -> Self {
        Self { deny: true }
    }
}

#[async_trait]
impl MediaDevices for DemoDevices {
    async fn open(&self, constraints: &StreamConstraints) -> Result<MediaStream, CameraError> {
        if self.deny {
            return Err(CameraError::PermissionDenied);
        }
        let mut tracks = vec![MediaTrack::new(TrackKind::Video)];
        if constraints.audio {
            tracks.push(MediaTrack::new(TrackKind::Audio));
        }
        Ok(MediaStream::new(tracks))
    }
}

/// Local camera capture: acquires the stream, holds the only owning
/// handle, and releases every track on deactivation.
pub struct CameraCapture<D: MediaDevices> {
    devices: D,
    constraints: StreamConstraints,
    stream: Option<MediaStream>,
    permission_denied: bool,
}

impl<D: MediaDevices> CameraCapture<D> {
    pub fn new(devices: D) -> Self {
        Self::with_constraints(devices, StreamConstraints::default())
    }

    pub fn with_constraints(devices: D, constraints: StreamConstraints) -> Self {
        Self {
            devices,
            constraints,
            stream: None,
            permission_denied: false,
        }
    }

    /// Requests the local stream. On success the handle is stored and a
    /// clone returned for display. One failed attempt is final until the
    /// user explicitly retries.
    pub async fn activate(&mut self) -> Result<MediaStream, CameraError> {
        if self.stream.is_some() {
            return Err(CameraError::AlreadyActive);
        }

        match self.devices.open(&self.constraints).await {
            Ok(stream) => {
                self.permission_denied = false;
                self.stream = Some(stream.clone());
                tracing::info!("local camera stream acquired");
                Ok(stream)
            }
            Err(e) => {
                if matches!(e, CameraError::PermissionDenied) {
                    self.permission_denied = true;
                }
                tracing::warn!("camera activation failed: {}", e);
                Err(e)
            }
        }
    }

    /// Stops every held track and clears the handle. Idempotent; called on
    /// every exit path from the owning view.
    pub fn deactivate(&mut self) {
        if let Some(stream) = self.stream.take() {
            stream.stop_all();
            tracing::debug!("local camera stream released");
        }
    }

    /// The user-triggered "Try Again" action.
    pub async fn retry(&mut self) -> Result<MediaStream, CameraError> {
        self.permission_denied = false;
        self.activate().await
    }

    pub fn is_ready(&self) -> bool {
        self.stream.is_some()
    }

    pub fn permission_denied(&self) -> bool {
        self.permission_denied
    }

    pub fn stream(&self) -> Option<&MediaStream> {
        self.stream.as_ref()
    }
}

impl<D: MediaDevices> Drop for CameraCapture<D> {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn activate_then_deactivate_stops_every_track() {
        let mut camera = CameraCapture::new(DemoDevices::granting());
        let stream = camera.activate().await.unwrap();
        assert!(camera.is_ready());
        assert_eq!(stream.tracks().len(), 2);
        assert!(stream.tracks().iter().all(|t| !t.is_stopped()));

        camera.deactivate();
        assert!(!camera.is_ready());
        // The display surface's clone observes the stop.
        assert!(stream.tracks().iter().all(|t| t.is_stopped()));
    }

    #[tokio::test]
    async fn deactivate_is_idempotent() {
        let mut camera = CameraCapture::new(DemoDevices::granting());
        camera.deactivate();
        let _ = camera.activate().await.unwrap();
        camera.deactivate();
        camera.deactivate();
        assert!(!camera.is_ready());
    }

    #[tokio::test]
    async fn permission_denial_sets_flag_and_does_not_auto_retry() {
        let mut devices = MockMediaDevices::new();
        devices
            .expect_open()
            .times(1)
            .returning(|_| Err(CameraError::PermissionDenied));

        let mut camera = CameraCapture::new(devices);
        assert!(matches!(
            camera.activate().await,
            Err(CameraError::PermissionDenied)
        ));
        assert!(camera.permission_denied());
        assert!(!camera.is_ready());
        // No second call to open: mockall enforces times(1) on drop.
    }

    #[tokio::test]
    async fn retry_after_denial_runs_one_fresh_attempt() {
        let mut devices = MockMediaDevices::new();
        let mut seq = mockall::Sequence::new();
        devices
            .expect_open()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(CameraError::PermissionDenied));
        devices
            .expect_open()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(MediaStream::new(vec![MediaTrack::new(TrackKind::Video)])));

        let mut camera = CameraCapture::new(devices);
        assert!(camera.activate().await.is_err());
        assert!(camera.permission_denied());

        let stream = camera.retry().await.unwrap();
        assert!(!camera.permission_denied());
        assert_eq!(stream.tracks().len(), 1);
    }

    #[tokio::test]
    async fn activate_while_active_does_not_leak_a_second_stream() {
        let mut camera = CameraCapture::new(DemoDevices::granting());
        let first = camera.activate().await.unwrap();
        assert!(matches!(
            camera.activate().await,
            Err(CameraError::AlreadyActive)
        ));
        camera.deactivate();
        assert!(first.tracks().iter().all(|t| t.is_stopped()));
    }

    #[tokio::test]
    async fn audio_track_is_skipped_when_constraints_disable_audio() {
        let constraints = StreamConstraints {
            audio: false,
            ..StreamConstraints::default()
        };
        let mut camera = CameraCapture::with_constraints(DemoDevices::granting(), constraints);
        let stream = camera.activate().await.unwrap();
        assert_eq!(stream.tracks().len(), 1);
        assert_eq!(stream.tracks()[0].kind(), TrackKind::Video);
    }
}
