//! Per-turn command budget.

/// Counts mutating commands against the per-turn limit.
///
/// The last operation of every turn is reserved for the end-of-turn wait, so a
/// command may be issued only while `used + 1 < limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandBudget {
    limit: u32,
    used: u32,
}

impl CommandBudget {
    /// A fresh budget for a turn.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self { limit, used: 0 }
    }

    /// A budget with some operations already spent by the caller.
    #[must_use]
    pub const fn with_used(limit: u32, used: u32) -> Self {
        Self { limit, used }
    }

    /// Whether one more command fits.
    #[must_use]
    pub const fn can_issue(&self) -> bool {
        self.used.saturating_add(1) < self.limit
    }

    /// Commands that can still be issued this turn.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.limit.saturating_sub(1).saturating_sub(self.used)
    }

    /// Operations spent so far.
    #[must_use]
    pub const fn used(&self) -> u32 {
        self.used
    }

    /// The per-turn limit, wait included.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Spend one operation.
    pub fn charge(&mut self) {
        self.used = self.used.saturating_add(1);
    }

    /// Start a new turn.
    pub fn reset(&mut self) {
        self.used = 0;
    }
}
