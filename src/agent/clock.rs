//! Game boundary detection from the turns-remaining counter.

/// What a new turns-remaining reading means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// The counter did not step down by one: a new game has started.
    NewGame,
    /// The same game goes on.
    Continue,
}

/// Tracks the turns-remaining counter between turns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnClock {
    last: Option<u32>,
}

impl TurnClock {
    /// A clock that has seen no reading yet.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Record a reading.
    ///
    /// The first reading after [`TurnClock::reset`] always continues the game the
    /// caller just loaded.
    pub fn observe(&mut self, turns_remaining: u32) -> ClockEvent {
        let event = match self.last {
            Some(last) if last.checked_sub(1) != Some(turns_remaining) => ClockEvent::NewGame,
            _ => ClockEvent::Continue,
        };
        self.last = match event {
            ClockEvent::NewGame => None,
            ClockEvent::Continue => Some(turns_remaining),
        };
        event
    }

    /// Forget the last reading, after reloading the state for a new game.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_continues() {
        let mut clock = TurnClock::new();
        assert_eq!(clock.observe(10), ClockEvent::Continue);
        assert_eq!(clock.observe(9), ClockEvent::Continue);
        assert_eq!(clock.observe(8), ClockEvent::Continue);
    }

    #[test]
    fn test_jump_starts_new_game() {
        let mut clock = TurnClock::new();
        clock.observe(2);
        clock.observe(1);
        assert_eq!(clock.observe(500), ClockEvent::NewGame);
        // After a new game the next reading is taken as the baseline.
        assert_eq!(clock.observe(499), ClockEvent::Continue);
        assert_eq!(clock.observe(498), ClockEvent::Continue);
    }

    #[test]
    fn test_repeated_reading_is_new_game() {
        let mut clock = TurnClock::new();
        clock.observe(5);
        assert_eq!(clock.observe(5), ClockEvent::NewGame);
        clock.observe(0);
        clock.reset();
        assert_eq!(clock.observe(0), ClockEvent::Continue);
    }
}
