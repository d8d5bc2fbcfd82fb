// SPDX-License-Identifier: MIT
// Copyright (c) 2026 blinken contributors

//! Board support for the STM32VLDISCOVERY blink firmware.
//!
//! Everything talks to the STM32F10x GPIO and RCC blocks through
//! `#[repr(C)]` register structs and raw volatile pointers. On the
//! target those structs are mapped over the real peripherals; on the
//! host the tests point the same handles at plain values in memory, so
//! the register-level behavior is checked without hardware.

#![no_std]

pub mod blink;
pub mod delay;
pub mod gpio;
pub mod rcc;

// Re-export commonly used types
pub use blink::{Blinker, LineState};
pub use delay::spin_wait;
pub use gpio::{DriveMode, OutputConfig, OutputLine, Pins, Port, PortId, Speed};
pub use rcc::Rcc;
