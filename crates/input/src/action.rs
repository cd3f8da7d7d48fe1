/// Amount a single nudge changes the tracked scalar by.
pub const NUDGE_STEP: f64 = 0.1;

/// Direction of a keyboard nudge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NudgeDirection {
    Left,
    Right,
}

impl NudgeDirection {
    /// Signed delta applied per event.
    pub fn delta(self) -> f64 {
        match self {
            Self::Left => -NUDGE_STEP,
            Self::Right => NUDGE_STEP,
        }
    }
}

/// Platform-neutral key identity. Apps translate their windowing keys into this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

/// A high-level action produced from input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Nudge the tracked position scalar.
    Nudge(NudgeDirection),
    /// Cancel the run loop.
    Stop,
    /// No-op (unbound key).
    Noop,
}

/// Map a key press to an action.
pub fn map_key(key: Key) -> Action {
    let action = match key {
        Key::ArrowLeft => Action::Nudge(NudgeDirection::Left),
        Key::ArrowRight => Action::Nudge(NudgeDirection::Right),
        Key::Escape => Action::Stop,
        Key::Other => Action::Noop,
    };
    tracing::trace!(?key, ?action, "mapped key");
    action
}
