//! Cancellable per-item countdown.
//!
//! The engine never blocks: presentation schedules real time and delivers
//! discrete ticks back with the token it was handed when the timer was
//! armed. Arming replaces and invalidates any previous timer, so a tick
//! carrying a stale token is inert and can never fire into a newer item's
//! state.

/// Ticks on the timed-challenge countdown, one per time unit.
pub const QUESTION_TICKS: u32 = 10;

/// Ticks the feedback for an answered item stays on screen.
pub const FEEDBACK_TICKS: u32 = 4;

/// Identifies one arming of a [`Countdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// Result of delivering one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// The token belongs to a cancelled or replaced timer; nothing changed.
    Stale,
    /// The countdown is still running.
    Running { remaining: u32 },
    /// The countdown just reached zero and disarmed itself.
    Expired,
}

/// Single-slot countdown owned by the active session.
#[derive(Debug, Default)]
pub struct Countdown {
    next_token: u64,
    active: Option<(TimerToken, u32)>,
}

impl Countdown {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the countdown for `ticks` ticks, cancelling any previous timer.
    ///
    /// The returned token must accompany every tick delivery.
    pub fn arm(&mut self, ticks: u32) -> TimerToken {
        let token = TimerToken(self.next_token);
        self.next_token += 1;
        self.active = Some((token, ticks));
        token
    }

    /// Disarm the countdown. Ticks for the old token become stale.
    pub fn cancel(&mut self) {
        self.active = None;
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.active.is_some()
    }

    /// Token of the currently armed timer, if any.
    #[must_use]
    pub fn token(&self) -> Option<TimerToken> {
        self.active.map(|(token, _)| token)
    }

    /// Deliver one tick for `token`.
    pub fn tick(&mut self, token: TimerToken) -> CountdownTick {
        match self.active {
            Some((armed, remaining)) if armed == token => {
                if remaining <= 1 {
                    self.active = None;
                    CountdownTick::Expired
                } else {
                    self.active = Some((armed, remaining - 1));
                    CountdownTick::Running {
                        remaining: remaining - 1,
                    }
                }
            }
            _ => CountdownTick::Stale,
        }
    }
}
