// SPDX-License-Identifier: MIT
// Copyright (c) 2026 blinken contributors

//! Register-level GPIO for the STM32F10x ports.
//!
//! The port register block is a `#[repr(C)]` struct matching the RM0041
//! layout, so the same access code drives the real MMIO block on the
//! target and a `PortRegisters` value in ordinary memory under the host
//! tests.

use core::convert::Infallible;
use core::ptr::{addr_of_mut, NonNull};

use bitflags::bitflags;

/// Base address of the first port register block (GPIOA); the remaining
/// ports follow at a fixed stride.
const GPIO_BASE: u32 = 0x4001_0800;
const GPIO_PORT_STRIDE: u32 = 0x400;

/// GPIO ports available on the STM32F100 medium-density parts.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PortId {
    A,
    B,
    C,
    D,
    E,
}

impl PortId {
    /// Physical address of this port's register block.
    pub fn register_block(self) -> *mut PortRegisters {
        (GPIO_BASE + GPIO_PORT_STRIDE * self as u32) as *mut PortRegisters
    }
}

/// GPIO port register block (STM32F10x).
#[repr(C)]
pub struct PortRegisters {
    /// 0x00: configuration register low (pins 0-7)
    pub crl: u32,
    /// 0x04: configuration register high (pins 8-15)
    pub crh: u32,
    /// 0x08: input data register
    pub idr: u32,
    /// 0x0C: output data register
    pub odr: u32,
    /// 0x10: bit set/reset register
    pub bsrr: u32,
    /// 0x14: bit reset register
    pub brr: u32,
    /// 0x18: configuration lock register
    pub lckr: u32,
}

impl PortRegisters {
    /// A block in its documented reset state: every pin a floating
    /// input (CRL/CRH = 0x4444_4444), data registers cleared.
    pub const fn new_reset() -> Self {
        Self {
            crl: 0x4444_4444,
            crh: 0x4444_4444,
            idr: 0,
            odr: 0,
            bsrr: 0,
            brr: 0,
            lckr: 0,
        }
    }
}

bitflags! {
    /// Pin selection bitmask within a 16-pin port, one bit per line.
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Pins: u16 {
        const P0 = 1 << 0;
        const P1 = 1 << 1;
        const P2 = 1 << 2;
        const P3 = 1 << 3;
        const P4 = 1 << 4;
        const P5 = 1 << 5;
        const P6 = 1 << 6;
        const P7 = 1 << 7;
        const P8 = 1 << 8;
        const P9 = 1 << 9;
        const P10 = 1 << 10;
        const P11 = 1 << 11;
        const P12 = 1 << 12;
        const P13 = 1 << 13;
        const P14 = 1 << 14;
        const P15 = 1 << 15;
    }
}

/// Output driver mode (the CNF field of an output pin).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveMode {
    /// Actively drives both logic levels.
    PushPull,
    /// Drives low only; high is released to the external pull-up.
    OpenDrain,
}

impl DriveMode {
    const fn cnf_bits(self) -> u32 {
        match self {
            DriveMode::PushPull => 0b00,
            DriveMode::OpenDrain => 0b01,
        }
    }
}

/// Output slew-rate class (the MODE field of an output pin). Higher
/// classes switch faster and draw more power.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    Max2MHz,
    Max10MHz,
    Max50MHz,
}

impl Speed {
    const fn mode_bits(self) -> u32 {
        match self {
            Speed::Max10MHz => 0b01,
            Speed::Max2MHz => 0b10,
            Speed::Max50MHz => 0b11,
        }
    }
}

/// One-shot configuration record for a group of output pins on a single
/// port.
///
/// The constructor takes every field, so a record cannot exist in a
/// partially filled state; build it once and hand it to [`Port::apply`].
#[derive(Clone, Copy, Debug)]
pub struct OutputConfig {
    pins: Pins,
    drive: DriveMode,
    speed: Speed,
}

impl OutputConfig {
    pub const fn new(pins: Pins, drive: DriveMode, speed: Speed) -> Self {
        Self { pins, drive, speed }
    }

    pub const fn pins(&self) -> Pins {
        self.pins
    }

    pub const fn drive(&self) -> DriveMode {
        self.drive
    }

    pub const fn speed(&self) -> Speed {
        self.speed
    }

    /// The 4-bit CNF/MODE field written for each configured pin.
    const fn field_bits(&self) -> u32 {
        (self.drive.cnf_bits() << 2) | self.speed.mode_bits()
    }
}

/// Replace the 4-bit configuration field of every selected pin in one
/// CRL/CRH word, leaving the other pins' fields untouched.
fn config_word(current: u32, pins_byte: u16, field: u32) -> u32 {
    let mut word = current;
    for pin in 0..8 {
        if pins_byte & (1 << pin) != 0 {
            let shift = pin * 4;
            word &= !(0xF << shift);
            word |= field << shift;
        }
    }
    word
}

/// Handle to one GPIO port's register block.
pub struct Port {
    regs: NonNull<PortRegisters>,
}

impl Port {
    /// Wraps a register block.
    ///
    /// # Safety
    ///
    /// `regs` must point to a GPIO register block that stays valid for
    /// the lifetime of the handle: either the MMIO block of a clocked
    /// port, or a [`PortRegisters`] in memory for tests.
    pub unsafe fn from_regs(regs: *mut PortRegisters) -> Self {
        Self {
            regs: NonNull::new_unchecked(regs),
        }
    }

    /// Handle to the MMIO register block of `id`.
    ///
    /// # Safety
    ///
    /// The port clock must be enabled (see [`crate::rcc::Rcc`]) before
    /// the registers respond, and nothing else may be driving this
    /// port's registers concurrently.
    pub unsafe fn mmio(id: PortId) -> Self {
        Self::from_regs(id.register_block())
    }

    fn crl_ptr(&self) -> *mut u32 {
        unsafe { addr_of_mut!((*self.regs.as_ptr()).crl) }
    }

    fn crh_ptr(&self) -> *mut u32 {
        unsafe { addr_of_mut!((*self.regs.as_ptr()).crh) }
    }

    fn odr_ptr(&self) -> *mut u32 {
        unsafe { addr_of_mut!((*self.regs.as_ptr()).odr) }
    }

    /// Apply an output configuration to this port's control registers.
    ///
    /// One read-modify-write per affected register; pins outside the
    /// record's mask keep their configuration. Applying the same record
    /// twice is a no-op the second time.
    pub fn apply(&mut self, cfg: &OutputConfig) {
        let field = cfg.field_bits();
        let bits = cfg.pins().bits();

        let low = bits & 0x00FF;
        if low != 0 {
            let crl = self.crl_ptr();
            unsafe { crl.write_volatile(config_word(crl.read_volatile(), low, field)) };
        }

        let high = bits >> 8;
        if high != 0 {
            let crh = self.crh_ptr();
            unsafe { crh.write_volatile(config_word(crh.read_volatile(), high, field)) };
        }
    }

    /// The "digital output line" capability over this port's output
    /// data register. `pins` is usually a single pin.
    ///
    /// Nothing ties the line to a prior [`Port::apply`]; a line over an
    /// unconfigured pin writes the output latch without any electrical
    /// effect.
    pub fn output_line(&self, pins: Pins) -> OutputLine {
        OutputLine {
            regs: self.regs,
            pins,
        }
    }

    /// Current output data register contents.
    pub fn read_odr(&self) -> u32 {
        unsafe { self.odr_ptr().read_volatile() }
    }

    /// Current low configuration register contents.
    pub fn read_crl(&self) -> u32 {
        unsafe { self.crl_ptr().read_volatile() }
    }

    /// Current high configuration register contents.
    pub fn read_crh(&self) -> u32 {
        unsafe { self.crh_ptr().read_volatile() }
    }
}

/// A set of output latches on one port, driven through the ODR.
pub struct OutputLine {
    regs: NonNull<PortRegisters>,
    pins: Pins,
}

impl OutputLine {
    fn odr_ptr(&self) -> *mut u32 {
        unsafe { addr_of_mut!((*self.regs.as_ptr()).odr) }
    }

    pub fn pins(&self) -> Pins {
        self.pins
    }

    /// Drive the line's pins high. Read-modify-write: other bits of the
    /// output register are left alone.
    pub fn set_high(&mut self) {
        let odr = self.odr_ptr();
        unsafe { odr.write_volatile(odr.read_volatile() | u32::from(self.pins.bits())) };
    }

    /// Drive the line's pins low. Read-modify-write: other bits of the
    /// output register are left alone.
    pub fn set_low(&mut self) {
        let odr = self.odr_ptr();
        unsafe { odr.write_volatile(odr.read_volatile() & !u32::from(self.pins.bits())) };
    }

    /// Assign `pattern` to the **whole** output data register.
    ///
    /// Unlike [`set_high`](Self::set_high)/[`set_low`](Self::set_low)
    /// this overwrites every bit of the register, including pins this
    /// line does not own. Keep it for one-time startup forcing where
    /// clobbering the rest of the port is the intent.
    pub fn assign_raw(&mut self, pattern: Pins) {
        unsafe { self.odr_ptr().write_volatile(u32::from(pattern.bits())) };
    }
}

impl embedded_hal::digital::ErrorType for OutputLine {
    type Error = Infallible;
}

impl embedded_hal::digital::OutputPin for OutputLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        OutputLine::set_low(self);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        OutputLine::set_high(self);
        Ok(())
    }
}
