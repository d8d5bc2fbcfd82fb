// SPDX-License-Identifier: MIT
// Copyright (c) 2026 blinken contributors

//! Reset and clock control, reduced to the one job this firmware has
//! for it: gating the GPIO port clocks on the APB2 bus.

use core::ptr::{addr_of_mut, NonNull};

use crate::gpio::PortId;

const RCC_BASE: u32 = 0x4002_1000;

/// RCC register block (STM32F100, value-line).
#[repr(C)]
pub struct RccRegisters {
    /// 0x00: clock control register
    pub cr: u32,
    /// 0x04: clock configuration register
    pub cfgr: u32,
    /// 0x08: clock interrupt register
    pub cir: u32,
    /// 0x0C: APB2 peripheral reset register
    pub apb2rstr: u32,
    /// 0x10: APB1 peripheral reset register
    pub apb1rstr: u32,
    /// 0x14: AHB peripheral clock enable register
    pub ahbenr: u32,
    /// 0x18: APB2 peripheral clock enable register
    pub apb2enr: u32,
    /// 0x1C: APB1 peripheral clock enable register
    pub apb1enr: u32,
    /// 0x20: backup domain control register
    pub bdcr: u32,
    /// 0x24: control/status register
    pub csr: u32,
}

impl RccRegisters {
    /// A block with every peripheral clock gated off, as after reset.
    pub const fn new_reset() -> Self {
        Self {
            cr: 0,
            cfgr: 0,
            cir: 0,
            apb2rstr: 0,
            apb1rstr: 0,
            ahbenr: 0,
            apb2enr: 0,
            apb1enr: 0,
            bdcr: 0,
            csr: 0,
        }
    }
}

/// Handle to the clock controller.
pub struct Rcc {
    regs: NonNull<RccRegisters>,
}

impl Rcc {
    /// Wraps a register block.
    ///
    /// # Safety
    ///
    /// `regs` must point to an RCC register block that stays valid for
    /// the lifetime of the handle: the MMIO block, or an in-memory
    /// [`RccRegisters`] for tests.
    pub unsafe fn from_regs(regs: *mut RccRegisters) -> Self {
        Self {
            regs: NonNull::new_unchecked(regs),
        }
    }

    /// Handle to the MMIO register block.
    ///
    /// # Safety
    ///
    /// Nothing else may be driving the clock controller concurrently.
    pub unsafe fn mmio() -> Self {
        Self::from_regs(RCC_BASE as *mut RccRegisters)
    }

    fn apb2enr_ptr(&self) -> *mut u32 {
        unsafe { addr_of_mut!((*self.regs.as_ptr()).apb2enr) }
    }

    /// Enable the bus clock of one GPIO port. Idempotent; other enable
    /// bits are preserved.
    ///
    /// Must happen before the port's registers are touched: an unclocked
    /// port ignores writes and reads back zero.
    pub fn enable_port(&mut self, id: PortId) {
        // IOPAEN is APB2ENR bit 2, then one bit per port in order.
        let mask = 1u32 << (2 + id as u32);
        let apb2enr = self.apb2enr_ptr();
        unsafe { apb2enr.write_volatile(apb2enr.read_volatile() | mask) };
    }

    /// Current APB2 clock-enable register contents.
    pub fn read_apb2enr(&self) -> u32 {
        unsafe { self.apb2enr_ptr().read_volatile() }
    }
}
