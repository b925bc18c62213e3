//! Start countdown as a tick-driven state machine.
//!
//! `Idle → Counting(3) → Counting(2) → Counting(1) → Go → Racing`.
//! The only transition the race cares about is entering `Go`.

use gridrush_core::constants::{COUNTDOWN_START, COUNTDOWN_STEP_SECS, GO_BANNER_SECS, TICK_RATE};
use gridrush_core::enums::CountdownState;
use gridrush_core::events::RaceEvent;

#[derive(Debug, Clone, Default)]
pub struct Countdown {
    state: CountdownState,
    ticks_in_state: u64,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    /// Begin counting from the top. Ignored unless idle.
    pub fn start(&mut self, events: &mut Vec<RaceEvent>) {
        if self.state != CountdownState::Idle {
            return;
        }
        self.enter(CountdownState::Counting(COUNTDOWN_START));
        events.push(RaceEvent::CountdownTick {
            remaining: COUNTDOWN_START,
        });
    }

    /// Return to idle without emitting anything.
    pub fn reset(&mut self) {
        self.enter(CountdownState::Idle);
    }

    /// Advance by one tick. Returns true on the tick the race starts.
    pub fn advance(&mut self, events: &mut Vec<RaceEvent>) -> bool {
        let hold_ticks = match self.state {
            CountdownState::Idle | CountdownState::Racing => return false,
            CountdownState::Counting(_) => secs_to_ticks(COUNTDOWN_STEP_SECS),
            CountdownState::Go => secs_to_ticks(GO_BANNER_SECS),
        };

        self.ticks_in_state += 1;
        if self.ticks_in_state < hold_ticks {
            return false;
        }

        match self.state {
            CountdownState::Counting(n) if n > 1 => {
                self.enter(CountdownState::Counting(n - 1));
                events.push(RaceEvent::CountdownTick { remaining: n - 1 });
                false
            }
            CountdownState::Counting(_) => {
                self.enter(CountdownState::Go);
                events.push(RaceEvent::Go);
                true
            }
            CountdownState::Go => {
                self.enter(CountdownState::Racing);
                false
            }
            CountdownState::Idle | CountdownState::Racing => false,
        }
    }

    fn enter(&mut self, state: CountdownState) {
        self.state = state;
        self.ticks_in_state = 0;
    }
}

/// Convert seconds to ticks.
fn secs_to_ticks(secs: f64) -> u64 {
    ((secs * TICK_RATE as f64).round() as u64).max(1)
}
