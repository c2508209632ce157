use crate::session::SessionState;

/// Notification emitted by the session for the rendering boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    StateChanged {
        from: SessionState,
        to: SessionState,
    },
    /// A new snapshot replaced the previous one.
    SnapshotPublished { generation: u64 },
    /// A user-visible failure; the last good snapshot is still current.
    Failed { message: String },
}

impl SessionEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            SessionEvent::StateChanged { .. } => "state_changed",
            SessionEvent::SnapshotPublished { .. } => "snapshot_published",
            SessionEvent::Failed { .. } => "failed",
        }
    }
}

/// Ordered event log, drained by the consumer.
#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<SessionEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: SessionEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
