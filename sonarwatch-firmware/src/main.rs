//! Sonarwatch - Ultrasonic Obstacle Detector Firmware
//!
//! Measures distance with an HC-SR04 every period, shows it on an HD44780
//! 16x2 display, and lights an indicator when something is closer than the
//! configured threshold. Pin roles and timing come from `detector.toml`,
//! compiled in by the build script.
//!
//! Everything runs on the main task as a blocking loop; the executor only
//! hosts it, and the embassy time driver supplies the microsecond clock.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use {defmt_rtt as _, panic_probe as _};

use sonarwatch_core::config::PinConfig;
use sonarwatch_core::{Cycle, Detector, Timer};
use sonarwatch_drivers::display::Hd44780;
use sonarwatch_drivers::indicator::GpioIndicator;
use sonarwatch_drivers::sensor::HcSr04;
use sonarwatch_hal_rp2040::{PinBank, RpInput, RpOutput, UptimeCounter};

/// Configuration generated from detector.toml
mod config {
    use sonarwatch_core::config::{DetectorConfig, DisplayPins, PinConfig, PinMap};

    include!(concat!(env!("OUT_DIR"), "/detector_config.rs"));
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Sonarwatch firmware starting...");

    let config = config::DETECTOR_CONFIG;
    info!(
        "Config: threshold={}cm period={}ms echo_timeout={}us",
        config.threshold_cm, config.period_ms, config.echo_timeout_us
    );

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let mut bank = PinBank::new(p);
    info!("Peripherals initialized");

    let pins = config.pins;

    let sensor = HcSr04::new(
        output(&mut bank, pins.trigger),
        input(&mut bank, pins.echo),
        config.echo_timeout_us,
    );
    let display = Hd44780::new(
        output(&mut bank, pins.display.rs),
        output(&mut bank, pins.display.en),
        pins.display.data.map(|pin| output(&mut bank, pin)),
    );
    let indicator = GpioIndicator::new(output(&mut bank, pins.indicator), pins.indicator.inverted);

    let mut timer = Timer::new(UptimeCounter::new());
    let mut detector = Detector::new(sensor, display, indicator, config);

    detector.init(&mut timer);
    info!("Display initialized, entering detector loop");

    detector.run(&mut timer, log_cycle);
}

/// Take a pin from the bank as an output parked at its inactive level
fn output(bank: &mut PinBank, pin: PinConfig) -> RpOutput<'static> {
    let gpio = unwrap!(bank.take(pin.pin));
    RpOutput(Output::new(gpio, Level::from(pin.inverted)))
}

/// Take a pin from the bank as an input
fn input(bank: &mut PinBank, pin: PinConfig) -> RpInput<'static> {
    let gpio = unwrap!(bank.take(pin.pin));
    let pull = if pin.pull_up { Pull::Up } else { Pull::None };
    RpInput(Input::new(gpio, pull))
}

fn log_cycle(cycle: &Cycle) {
    if let Some(fault) = cycle.fault {
        warn!("Sensor fault: {}", fault);
        return;
    }

    debug!(
        "Distance: {}cm, indicator {}",
        cycle.distance_cm,
        if cycle.indicator_on { "on" } else { "off" }
    );
    if !cycle.in_range {
        trace!("Reading outside rated range");
    }
}
