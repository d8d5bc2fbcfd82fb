// SPDX-License-Identifier: MIT
// Copyright (c) 2026 blinken contributors

#![no_std]
#![no_main]

use blinken_bsp::delay::estimated_half_period_us;
use blinken_bsp::{Blinker, DriveMode, OutputConfig, Pins, Port, PortId, Rcc, Speed};
use cortex_m as _;
use defmt_rtt as _;
use panic_probe as _;

defmt::timestamp!("{=u64:us}", { 0 });

use cortex_m_rt::entry;

/// Core clock out of reset (HSI). This firmware never touches the PLL.
const CPU_HZ: u32 = 8_000_000;

/// Busy-loop iterations per half-period of the blink.
const HALF_PERIOD_SPINS: u32 = 1_000_000;

/// PC8/PC9 carry the discovery board's LD4 (blue) and LD3 (green).
const LED_PINS: Pins = Pins::P8.union(Pins::P9);

#[entry]
fn main() -> ! {
    defmt::println!("Blink firmware init (STM32VLDISCOVERY)");

    let mut rcc = unsafe { Rcc::mmio() };

    rcc.enable_port(PortId::C);
    let mut gpioc = unsafe { Port::mmio(PortId::C) };
    gpioc.apply(&OutputConfig::new(
        LED_PINS,
        DriveMode::PushPull,
        Speed::Max50MHz,
    ));

    rcc.enable_port(PortId::A);
    let mut gpioa = unsafe { Port::mmio(PortId::A) };
    gpioa.apply(&OutputConfig::new(
        Pins::P8,
        DriveMode::PushPull,
        Speed::Max50MHz,
    ));

    // Kept from the original board code: the LEDs sit on port C, which is
    // configured above and then never written again. The loop below drives
    // port A instead, where only pin 8 is configured as an output; PA9's
    // output latch is set once at startup and never cleared.
    defmt::warn!("LEDs are on PC8/PC9 but the toggle loop drives PA8 (PA9 stays latched high)");

    let mut line = gpioa.output_line(Pins::P8);
    line.assign_raw(LED_PINS);

    defmt::println!(
        "Toggling PA8 every {} spins (about {} ms at {} Hz)",
        HALF_PERIOD_SPINS,
        estimated_half_period_us(HALF_PERIOD_SPINS, CPU_HZ) / 1000,
        CPU_HZ
    );

    Blinker::new(line, HALF_PERIOD_SPINS).run()
}
