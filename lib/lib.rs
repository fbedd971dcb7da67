#![cfg_attr(not(test), no_std)]

#[cfg(target_os = "none")]
use defmt_rtt as _; // global logger
#[cfg(target_os = "none")]
use panic_probe as _;

pub mod display;
pub mod error;
pub mod histogram;
pub mod hw;
pub mod jitter;
pub mod plot;
pub mod sampler;

/// Number of readings collected before the analysis runs.
pub const NUM_READINGS: usize = 1000;
/// 12-bit ADC, readings are in `[0, ADC_RANGE)`.
pub const ADC_RANGE: usize = 4096;
pub const SAMPLE_RATE_HZ: u32 = 100;
pub const CLOCK_RATE_HZ: u32 = 1_000_000;

#[cfg(target_os = "none")]
mod timestamp {
    use core::sync::atomic::{AtomicUsize, Ordering};

    static COUNT: AtomicUsize = AtomicUsize::new(0);
    defmt::timestamp!("{=usize}", {
        let n = COUNT.load(Ordering::Relaxed);
        COUNT.store(n + 1, Ordering::Relaxed);
        n
    });
}
