#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Lifecycle {
    #[default]
    Closed,
    Open,
}

/// Why the dropdown closed. Only `Tab` leaves the host's default focus movement alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseReason {
    Commit,
    Escape,
    Outside,
    Tab,
    Toggle,
    Disabled,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DropdownLifecycle {
    state: Lifecycle,
}

impl DropdownLifecycle {
    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == Lifecycle::Open
    }

    /// `closed -> open`. Returns `false` when already open; repeated activation is a no-op.
    pub fn open(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.state = Lifecycle::Open;
        tracing::debug!("dropdown opened");
        true
    }

    /// `open -> closed`. Returns `false` when already closed.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }
        self.state = Lifecycle::Closed;
        tracing::debug!(?reason, "dropdown closed");
        true
    }
}
