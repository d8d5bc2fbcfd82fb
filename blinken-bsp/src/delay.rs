// SPDX-License-Identifier: MIT
// Copyright (c) 2026 blinken contributors

//! Uncalibrated spin delay.
//!
//! The only timing primitive here is a counted busy-loop. Its real-time
//! length is a property of the CPU clock and the compiled loop body, not
//! of any hardware timer, so treat the count as a unitless knob: bigger
//! is longer, twice the count is twice the wait, and that is all that is
//! promised.

use core::ptr::{read_volatile, write_volatile};

/// Rough cost of one spin iteration in CPU cycles (volatile load, test,
/// decrement, volatile store, branch on a Cortex-M3). Good to an order
/// of magnitude, no better.
pub const SPIN_LOOP_CYCLES: u32 = 6;

/// Busy-wait for `count` loop iterations. A count of zero returns
/// immediately.
///
/// The counter lives in a stack slot accessed through volatile reads and
/// writes, which pins the loop in place at any optimization level.
pub fn spin_wait(count: u32) {
    let mut remaining = count;
    let counter = &mut remaining as *mut u32;
    loop {
        let n = unsafe { read_volatile(counter) };
        if n == 0 {
            break;
        }
        unsafe { write_volatile(counter, n - 1) };
    }
}

/// Estimate of [`spin_wait`]`(count)` in microseconds on a core running
/// at `cpu_hz`.
///
/// Deterministic arithmetic over [`SPIN_LOOP_CYCLES`]: exactly linear in
/// `count`, accurate on real silicon only to an order of magnitude.
pub const fn estimated_half_period_us(count: u32, cpu_hz: u32) -> u64 {
    (count as u64 * SPIN_LOOP_CYCLES as u64) * 1_000_000 / cpu_hz as u64
}
