/// Result of ticking a node once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The node has more work to do and must be re-ticked.
    Running,
    Success,
    Failure,
}

impl Status {
    pub fn is_terminal(self) -> bool {
        !matches!(self, Status::Running)
    }
}

/// Lifecycle state of a node between ticks.
///
/// `Uninitialised` is the state before the first tick; after that a node is
/// always in the state matching its last returned status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    Uninitialised,
    Running,
    Success,
    Failure,
}

impl From<Status> for NodeState {
    fn from(status: Status) -> Self {
        match status {
            Status::Running => NodeState::Running,
            Status::Success => NodeState::Success,
            Status::Failure => NodeState::Failure,
        }
    }
}
