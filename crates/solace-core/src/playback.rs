//! Playback session registry.
//!
//! The platform plays one guided-practice audio track at a time. This is the
//! only process-wide mutable state in the workspace: a registry holding at
//! most one active playback handle. Starting a new session stops and
//! replaces the previous one. The registry is an injectable service object,
//! not a global; embedders construct one and share it.

use std::sync::Mutex;

/// Seam to the actual audio backend. Implementations must stop cleanly when
/// asked more than once.
pub trait PlaybackHandle: Send {
    /// Stop playback and release the underlying resource.
    fn stop(&mut self);
}

struct ActiveSession {
    track_id: String,
    handle: Box<dyn PlaybackHandle>,
}

/// Registry guarding the single active playback session.
#[derive(Default)]
pub struct PlaybackRegistry {
    active: Mutex<Option<ActiveSession>>,
}

impl PlaybackRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin playing `track_id`, stopping any session already active.
    ///
    /// Returns the track id of the session that was replaced, if any.
    pub fn begin(&self, track_id: &str, handle: Box<dyn PlaybackHandle>) -> Option<String> {
        let mut guard = self.lock();
        let replaced = guard.take().map(|mut session| {
            session.handle.stop();
            session.track_id
        });
        *guard = Some(ActiveSession {
            track_id: track_id.to_string(),
            handle,
        });
        replaced
    }

    /// Stop the active session, if any, returning its track id.
    pub fn stop(&self) -> Option<String> {
        self.lock().take().map(|mut session| {
            session.handle.stop();
            session.track_id
        })
    }

    /// Track id of the currently active session.
    pub fn active_track(&self) -> Option<String> {
        self.lock().as_ref().map(|s| s.track_id.clone())
    }

    pub fn is_active(&self) -> bool {
        self.lock().is_some()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<ActiveSession>> {
        // A poisoned lock only means a panic elsewhere; the Option inside is
        // still coherent.
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct CountingHandle {
        stops: Arc<AtomicU32>,
    }

    impl PlaybackHandle for CountingHandle {
        fn stop(&mut self) {
            self.stops.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn handle(stops: &Arc<AtomicU32>) -> Box<dyn PlaybackHandle> {
        Box::new(CountingHandle {
            stops: Arc::clone(stops),
        })
    }

    #[test]
    fn begin_replaces_and_stops_previous() {
        let registry = PlaybackRegistry::new();
        let first_stops = Arc::new(AtomicU32::new(0));
        let second_stops = Arc::new(AtomicU32::new(0));

        assert_eq!(registry.begin("track-a", handle(&first_stops)), None);
        assert_eq!(registry.active_track().as_deref(), Some("track-a"));

        let replaced = registry.begin("track-b", handle(&second_stops));
        assert_eq!(replaced.as_deref(), Some("track-a"));
        assert_eq!(first_stops.load(Ordering::SeqCst), 1);
        assert_eq!(second_stops.load(Ordering::SeqCst), 0);
        assert_eq!(registry.active_track().as_deref(), Some("track-b"));
    }

    #[test]
    fn stop_clears_the_session() {
        let registry = PlaybackRegistry::new();
        let stops = Arc::new(AtomicU32::new(0));

        registry.begin("track-a", handle(&stops));
        assert!(registry.is_active());

        assert_eq!(registry.stop().as_deref(), Some("track-a"));
        assert_eq!(stops.load(Ordering::SeqCst), 1);
        assert!(!registry.is_active());
        assert_eq!(registry.stop(), None);
    }

    #[test]
    fn replaced_handle_is_stopped_exactly_once() {
        let registry = PlaybackRegistry::new();
        let stops = Arc::new(AtomicU32::new(0));

        registry.begin("track-a", handle(&stops));
        registry.begin("track-b", handle(&Arc::new(AtomicU32::new(0))));
        registry.stop();

        assert_eq!(stops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn registry_is_shareable_across_threads() {
        let registry = Arc::new(PlaybackRegistry::new());
        let stops = Arc::new(AtomicU32::new(0));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                let stops = Arc::clone(&stops);
                std::thread::spawn(move || {
                    registry.begin(&format!("track-{i}"), handle(&stops));
                })
            })
            .collect();
        for h in handles {
            h.join().expect("thread should not panic");
        }

        // Four sessions started, exactly one remains active.
        assert!(registry.is_active());
        assert_eq!(stops.load(Ordering::SeqCst), 3);
    }
}
