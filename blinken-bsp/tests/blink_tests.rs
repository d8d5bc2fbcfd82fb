// SPDX-License-Identifier: MIT
// Copyright (c) 2026 blinken contributors

//! Unit tests for the toggle loop, driving a real output line over an
//! in-memory register block.

use core::convert::Infallible;
use std::cell::Cell;
use std::rc::Rc;

use blinken_bsp::blink::{Blinker, LineState};
use blinken_bsp::gpio::{Pins, Port, PortRegisters};
use embedded_hal::digital::{ErrorType, OutputPin};

const LED_PINS: Pins = Pins::P8.union(Pins::P9);

// Keep the busy-wait short; these tests step the loop thousands of times.
const TEST_SPINS: u32 = 4;

#[test]
fn test_new_blinker_drives_high_first() {
    let mut regs = PortRegisters::new_reset();
    let port = unsafe { Port::from_regs(&mut regs) };
    let line = port.output_line(Pins::P8);

    let blinker = Blinker::new(line, TEST_SPINS);

    assert_eq!(blinker.state(), LineState::High);
}

#[test]
fn test_first_step_keeps_a_forced_high_line_high() {
    let mut regs = PortRegisters::new_reset();
    let port = unsafe { Port::from_regs(&mut regs) };
    let mut line = port.output_line(Pins::P8);

    // Startup forces both latches high before the loop begins.
    line.assign_raw(LED_PINS);
    assert_eq!(port.read_odr(), 0x0300);

    let mut blinker = Blinker::new(line, TEST_SPINS);
    blinker.step();

    assert_eq!(port.read_odr(), 0x0300);
    assert_eq!(blinker.state(), LineState::Low);
}

#[test]
fn test_line_alternates_each_step() {
    let mut regs = PortRegisters::new_reset();
    let port = unsafe { Port::from_regs(&mut regs) };
    let mut line = port.output_line(Pins::P8);
    line.assign_raw(LED_PINS);

    let mut blinker = Blinker::new(line, TEST_SPINS);
    for i in 0..10 {
        blinker.step();
        let p8_high = port.read_odr() & 0x0100 != 0;
        assert_eq!(p8_high, i % 2 == 0, "step {i}");
    }
}

#[test]
fn test_untoggled_pin_stays_latched() {
    let mut regs = PortRegisters::new_reset();
    let port = unsafe { Port::from_regs(&mut regs) };
    let mut line = port.output_line(Pins::P8);
    line.assign_raw(LED_PINS);

    let mut blinker = Blinker::new(line, TEST_SPINS);

    // The loop only owns pin 8; pin 9 keeps its startup level forever.
    for _ in 0..50 {
        blinker.step();
        assert_eq!(port.read_odr() & 0x0200, 0x0200);
    }
}

#[test]
fn test_state_cycles_between_two_levels() {
    let mut regs = PortRegisters::new_reset();
    let port = unsafe { Port::from_regs(&mut regs) };
    let line = port.output_line(Pins::P8);

    let mut blinker = Blinker::new(line, TEST_SPINS);
    let mut expected = LineState::High;
    for _ in 0..1000 {
        assert_eq!(blinker.state(), expected);
        blinker.step();
        expected = match expected {
            LineState::High => LineState::Low,
            LineState::Low => LineState::High,
        };
    }
}

/// Call-counting stand-in for a pin, for checking the blinker against
/// any `OutputPin` implementation. Counters are shared so the test can
/// read them while the blinker owns the pin.
struct CountingPin {
    highs: Rc<Cell<u32>>,
    lows: Rc<Cell<u32>>,
}

impl ErrorType for CountingPin {
    type Error = Infallible;
}

impl OutputPin for CountingPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.lows.set(self.lows.get() + 1);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.highs.set(self.highs.get() + 1);
        Ok(())
    }
}

#[test]
fn test_blinker_drives_any_output_pin() {
    let highs = Rc::new(Cell::new(0));
    let lows = Rc::new(Cell::new(0));
    let pin = CountingPin {
        highs: Rc::clone(&highs),
        lows: Rc::clone(&lows),
    };

    let mut blinker = Blinker::new(pin, TEST_SPINS);
    for _ in 0..6 {
        blinker.step();
    }

    // Six steps starting from High: high, low, high, low, high, low.
    assert_eq!(highs.get(), 3);
    assert_eq!(lows.get(), 3);
}
