// SPDX-License-Identifier: MIT
// Copyright (c) 2026 blinken contributors

//! Two-state toggle loop over a digital output line.

use embedded_hal::digital::OutputPin;

use crate::delay;

/// Logical level the blinker drives next.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineState {
    /// Drive the line high on the next step.
    High,
    /// Drive the line low on the next step.
    Low,
}

impl LineState {
    const fn toggled(self) -> Self {
        match self {
            LineState::High => LineState::Low,
            LineState::Low => LineState::High,
        }
    }
}

/// Alternates one output line between high and low, spinning for
/// `half_period` loop iterations after each edge.
///
/// Strictly sequential: drive, wait, flip, repeat. No timer, no
/// interrupt, no exit.
pub struct Blinker<L> {
    line: L,
    half_period: u32,
    state: LineState,
}

impl<L: OutputPin> Blinker<L> {
    /// A blinker that drives `line` high on its first step. Callers that
    /// have just forced the line high get a full high half-period before
    /// the first visible edge.
    pub fn new(line: L, half_period: u32) -> Self {
        Self {
            line,
            half_period,
            state: LineState::High,
        }
    }

    /// Level the next [`step`](Self::step) will drive.
    pub fn state(&self) -> LineState {
        self.state
    }

    /// One half-cycle: drive the current level, busy-wait, arm the
    /// opposite level.
    pub fn step(&mut self) {
        match self.state {
            LineState::High => {
                self.line.set_high().ok();
            }
            LineState::Low => {
                self.line.set_low().ok();
            }
        }
        delay::spin_wait(self.half_period);
        self.state = self.state.toggled();
    }

    /// Run the toggle loop forever.
    pub fn run(mut self) -> ! {
        loop {
            self.step();
        }
    }
}
