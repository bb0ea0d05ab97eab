//! First-visit loader gate.
//!
//! The loader runs at most once per browsing session. The session flag is
//! what enforces that, not the component instance, so a remount before the
//! gate resolves still sees the flag once it has been written.

use std::time::Duration;

use crate::{
    motion::MotionPreference,
    storage::{Persistence, LOADER_SEEN_KEY, LOADER_SEEN_VALUE},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unresolved,
    ShowingLoader,
    Ready,
}

/// How long the loader reveal runs and how long it lingers afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderTimings {
    pub reveal: Duration,
    pub settle: Duration,
}

impl LoaderTimings {
    pub fn for_preference(preference: MotionPreference) -> Self {
        if preference.is_reduced() {
            Self {
                reveal: Duration::from_millis(400),
                settle: Duration::from_millis(100),
            }
        } else {
            Self {
                reveal: Duration::from_millis(1_200),
                settle: Duration::from_millis(300),
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct FirstVisitGate {
    state: GateState,
    flag_written: bool,
    session: Persistence,
}

impl FirstVisitGate {
    pub fn new(session: Persistence) -> Self {
        Self {
            state: GateState::Unresolved,
            flag_written: false,
            session,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn shows_content(&self) -> bool {
        self.state == GateState::Ready
    }

    pub fn shows_loader(&self) -> bool {
        self.state == GateState::ShowingLoader
    }

    /// Resolves the gate from the session flag. Later calls are no-ops.
    pub fn mount(&mut self) -> GateState {
        if self.state != GateState::Unresolved {
            return self.state;
        }

        let seen = self.session.get(LOADER_SEEN_KEY).is_some();
        self.state = if seen {
            GateState::Ready
        } else {
            GateState::ShowingLoader
        };

        tracing::debug!(seen, state = ?self.state, "first-visit gate resolved");
        self.state
    }

    /// The reveal animation finished; remember that the loader ran.
    pub fn reveal_finished(&mut self) {
        if self.state == GateState::ShowingLoader {
            self.write_flag();
        }
    }

    /// The settle delay elapsed; let the content through.
    pub fn settled(&mut self) -> GateState {
        if self.state == GateState::ShowingLoader {
            self.write_flag();
            self.state = GateState::Ready;
        }
        self.state
    }

    fn write_flag(&mut self) {
        if !self.flag_written {
            // A failed write only means the loader may run again next session.
            self.session.set(LOADER_SEEN_KEY, LOADER_SEEN_VALUE);
            self.flag_written = true;
        }
    }
}

impl PartialEq for FirstVisitGate {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state && self.flag_written == other.flag_written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{tests::ReadOnlyStorage, MemoryStorage, StorageBackend};

    fn session(storage: &MemoryStorage) -> Persistence {
        Persistence::new("session", storage.clone())
    }

    fn run_loader(gate: &mut FirstVisitGate) {
        gate.reveal_finished();
        gate.settled();
    }

    #[test]
    fn first_mount_shows_loader_then_content() {
        let storage = MemoryStorage::new();
        let mut gate = FirstVisitGate::new(session(&storage));

        assert_eq!(gate.state(), GateState::Unresolved);
        assert!(!gate.shows_content());

        assert_eq!(gate.mount(), GateState::ShowingLoader);
        assert!(!gate.shows_content());

        gate.reveal_finished();
        assert_eq!(storage.get(LOADER_SEEN_KEY).as_deref(), Some(LOADER_SEEN_VALUE));
        assert_eq!(gate.state(), GateState::ShowingLoader);

        assert_eq!(gate.settled(), GateState::Ready);
        assert!(gate.shows_content());
    }

    #[test]
    fn loader_shown_at_most_once_per_session() {
        let storage = MemoryStorage::new();
        let mut loader_frames = 0;

        for _ in 0..5 {
            let mut gate = FirstVisitGate::new(session(&storage));
            if gate.mount() == GateState::ShowingLoader {
                loader_frames += 1;
                run_loader(&mut gate);
            }
            assert_eq!(gate.state(), GateState::Ready);
        }

        assert_eq!(loader_frames, 1);
    }

    #[test]
    fn remount_after_reveal_skips_loader() {
        let storage = MemoryStorage::new();
        let mut first = FirstVisitGate::new(session(&storage));
        first.mount();
        first.reveal_finished();

        let mut second = FirstVisitGate::new(session(&storage));
        assert_eq!(second.mount(), GateState::Ready);
    }

    #[test]
    fn ready_is_terminal() {
        let mut gate = FirstVisitGate::new(Persistence::memory("session"));
        gate.mount();
        run_loader(&mut gate);

        assert_eq!(gate.mount(), GateState::Ready);
        gate.reveal_finished();
        assert_eq!(gate.settled(), GateState::Ready);
    }

    #[test]
    fn settle_before_mount_is_ignored() {
        let mut gate = FirstVisitGate::new(Persistence::memory("session"));
        assert_eq!(gate.settled(), GateState::Unresolved);
        assert_eq!(gate.mount(), GateState::ShowingLoader);
    }

    #[test]
    fn flag_write_failure_still_reaches_ready() {
        let mut gate = FirstVisitGate::new(Persistence::new("session", ReadOnlyStorage::default()));

        assert_eq!(gate.mount(), GateState::ShowingLoader);
        run_loader(&mut gate);

        assert_eq!(gate.state(), GateState::Ready);
    }

    #[test]
    fn reduced_motion_shortens_timings() {
        let full = LoaderTimings::for_preference(MotionPreference::Full);
        let reduced = LoaderTimings::for_preference(MotionPreference::Reduced);

        assert!(reduced.reveal < full.reveal);
        assert!(reduced.settle < full.settle);
        assert_eq!(full.settle, Duration::from_millis(300));
    }
}
