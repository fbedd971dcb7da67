use stm32g0xx_hal::hal::timer::CountDown;
use stm32g0xx_hal::rcc::Rcc;
use stm32g0xx_hal::stm32g0::stm32g070::{RCC, TIM3, TIM6};
use stm32g0xx_hal::time::Hertz;
use stm32g0xx_hal::timer::{Timer, TimerExt};

use crate::jitter::Counter;
use crate::sampler::ClockSource;

/// Periodic update interrupt that drives the sampler.
pub struct TickTimer {
    timer: Timer<TIM6>,
    freq: Hertz,
}

impl TickTimer {
    pub fn new(pac_tim: TIM6, freq: Hertz, rcc: &mut Rcc) -> Self {
        TickTimer {
            timer: pac_tim.timer(rcc),
            freq,
        }
    }

    pub fn start(&mut self) {
        self.timer.clear_irq();
        self.timer.listen();
        self.timer.start(self.freq);
    }

    pub fn unpend(&mut self) {
        self.timer.clear_irq();
    }
}

/// TIM3 counting up over its full 16-bit range at `rate`.
pub struct FreeRunningClock {
    timer: TIM3,
}

impl FreeRunningClock {
    pub fn new(pac_timer: TIM3, rate: Hertz, rcc: &mut Rcc) -> Self {
        FreeRunningClock::enable_clock_and_reset(rcc);
        let mut clock = FreeRunningClock { timer: pac_timer };
        let prescaler = rcc.clocks.apb_tim_clk.0 / rate.0 - 1;
        clock.configure(prescaler as u16);
        clock
    }

    pub fn start(&mut self) {
        self.timer.cr1.modify(|_, w| w.cen().set_bit());
    }

    fn configure(&mut self, prescaler: u16) {
        // Up-counting, no clock division
        self.timer.cr1.write(|w| unsafe {
            w.dir().clear_bit();
            w.ckd().bits(0b00)
        });
        self.timer.psc.write(|w| unsafe { w.psc().bits(prescaler) });
        // Set ARR to max value
        self.timer
            .arr
            .write(|w| unsafe { w.arr_l().bits(u16::max_value()) });

        // Trigger update event to load the registers
        self.timer.cr1.modify(|_, w| w.urs().set_bit());
        self.timer.egr.write(|w| w.ug().set_bit());
        self.timer.cr1.modify(|_, w| w.urs().clear_bit());
    }

    fn enable_clock_and_reset(_: &mut Rcc) {
        let rcc = unsafe { &(*RCC::ptr()) };
        rcc.apbenr1.modify(|_, w| w.tim3en().set_bit());
        rcc.apbrstr1.modify(|_, w| w.tim3rst().set_bit());
        rcc.apbrstr1.modify(|_, w| w.tim3rst().clear_bit());
    }
}

impl ClockSource for FreeRunningClock {
    const COUNTER: Counter = Counter::up(16);

    fn now(&mut self) -> u32 {
        self.timer.cnt.read().cnt_l().bits() as u32
    }
}
