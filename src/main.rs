#![no_main]
#![no_std]

use lib::display::Display;
use lib::error::{Error, Result};
use lib::histogram::Histogram;
use lib::hw::{HwLcd, IliError};
use lib::jitter::Intervals;
use lib::plot::{self, PlotGeometry};
use lib::ADC_RANGE;

const TITLE: &str = "ADC PMF";

#[rtic::app(device = stm32g0xx_hal::stm32, peripherals = true)]
mod app {
    use lib::display::Display;
    use lib::histogram::Histogram;
    use lib::hw::{
        init_clock, init_lcd, Adc, AdcConfig, FreeRunningClock, HeartbeatPin, HwLcd,
        LcdInterface, Oversampling, ProfilePin, TickTimer,
    };
    use lib::jitter;
    use lib::sampler::{ClockSource, SampleLog, Sampler};
    use lib::{ADC_RANGE, CLOCK_RATE_HZ, NUM_READINGS, SAMPLE_RATE_HZ};
    use stm32g0xx_hal::timer::delay::DelayExt;
    use stm32g0xx_hal::gpio::{GpioExt, Speed};
    use stm32g0xx_hal::hal::digital::v2::ToggleableOutputPin;
    use stm32g0xx_hal::time::U32Ext;

    #[shared]
    struct Shared {
        log: SampleLog<NUM_READINGS>,
    }

    #[local]
    struct Local {
        sampler: Sampler<Adc, FreeRunningClock>,
        tick_timer: TickTimer,
        profile: ProfilePin,
        heartbeat: HeartbeatPin,
        display: Display<HwLcd>,
    }

    #[init]
    fn init(cx: init::Context) -> (Shared, Local, init::Monotonics) {
        let core: cortex_m::Peripherals = cx.core;
        let device: stm32g0xx_hal::stm32::Peripherals = cx.device;

        // Clock
        let mut rcc = init_clock(device.RCC);
        let mut delay = core.SYST.delay(&mut rcc);

        // GPIO
        let gpioa = device.GPIOA.split(&mut rcc);
        let gpiob = device.GPIOB.split(&mut rcc);
        let profile = gpioa.pa6.into_push_pull_output();
        let heartbeat = gpioa.pa7.into_push_pull_output();

        // LCD
        let interface = LcdInterface::new(
            gpiob.pb0.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb1.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb2.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb3.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb4.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb5.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb6.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb7.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb8.into_push_pull_output().set_speed(Speed::VeryHigh),
            gpiob.pb9.into_push_pull_output().set_speed(Speed::VeryHigh),
        );
        let lcd = init_lcd(
            interface,
            gpioa.pa4.into_push_pull_output(),
            gpioa.pa5.into_push_pull_output(),
            &mut delay,
        )
        .unwrap();
        let display = Display::new(lcd).unwrap();

        // ADC
        let adc = Adc::new(
            device.ADC,
            AdcConfig::new(gpioa.pa0, Oversampling::X64),
            &mut rcc,
            &mut delay,
        );

        // Timestamps and ticks
        let mut clock = FreeRunningClock::new(device.TIM3, CLOCK_RATE_HZ.hz(), &mut rcc);
        clock.start();
        let mut tick_timer = TickTimer::new(device.TIM6, SAMPLE_RATE_HZ.hz(), &mut rcc);
        tick_timer.start();

        defmt::info!(
            "sampling {=usize} readings at {=u32} Hz",
            NUM_READINGS,
            SAMPLE_RATE_HZ
        );

        (
            Shared {
                log: SampleLog::new(),
            },
            Local {
                sampler: Sampler::new(adc, clock),
                tick_timer,
                profile,
                heartbeat,
                display,
            },
            init::Monotonics(),
        )
    }

    #[idle(
        shared = [log],
        local = [display, heartbeat, histogram: Histogram<ADC_RANGE> = Histogram::new()]
    )]
    fn idle(mut cx: idle::Context) -> ! {
        while !cx.shared.log.lock(|log| log.is_full()) {
            cx.local.heartbeat.toggle().ok();
        }
        defmt::info!("acquisition complete");

        // Ticks still fire but no longer append, the log is frozen
        let histogram = cx.local.histogram;
        let intervals = cx.shared.log.lock(|log| {
            histogram.tally(log.values());
            jitter::intervals(log.timestamps(), FreeRunningClock::COUNTER)
        });

        super::report(cx.local.display, histogram, intervals).unwrap();

        loop {
            cortex_m::asm::wfi();
        }
    }

    #[task(binds = TIM6, shared = [log], local = [sampler, tick_timer, profile])]
    fn tick(mut cx: tick::Context) {
        let profile: &mut ProfilePin = cx.local.profile;
        let sampler: &mut Sampler<Adc, FreeRunningClock> = cx.local.sampler;

        profile.toggle().ok();
        cx.local.tick_timer.unpend();
        cx.shared.log.lock(|log| sampler.tick(log));
        profile.toggle().ok();
    }
}

fn report(
    display: &mut Display<HwLcd>,
    histogram: &Histogram<ADC_RANGE>,
    intervals: Option<Intervals>,
) -> Result<(), IliError> {
    let intervals = intervals.ok_or(Error::NotEnoughSamples)?;
    let geometry =
        PlotGeometry::new(histogram, Display::<HwLcd>::WIDTH).ok_or(Error::NotEnoughSamples)?;

    defmt::info!(
        "intervals {}, jitter {=u32} ticks",
        intervals,
        intervals.jitter()
    );
    defmt::info!("{}", geometry);
    if histogram.rejected() > 0 {
        defmt::warn!("{=usize} readings out of range", histogram.rejected());
    }

    plot::render(display, histogram, &geometry, TITLE, intervals.jitter())
}
