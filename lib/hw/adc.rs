use stm32g0xx_hal::analog::adc::Adc as HalAdc;
use stm32g0xx_hal::hal::adc::Channel as AdcChannel;
use stm32g0xx_hal::hal::blocking::delay::DelayUs;
use stm32g0xx_hal::rcc::Rcc;
use stm32g0xx_hal::stm32g0::stm32g070::{ADC, RCC};

use crate::sampler::SampleSource;

/// Hardware averaging of consecutive conversions, shifted back to 12 bits.
#[derive(Clone, Copy, Debug, defmt::Format)]
pub enum Oversampling {
    None,
    X4,
    X16,
    X64,
}

impl Oversampling {
    fn bits(self) -> Option<(u8, u8)> {
        match self {
            Oversampling::None => None,
            Oversampling::X4 => Some((0b001, 2)),
            Oversampling::X16 => Some((0b011, 4)),
            Oversampling::X64 => Some((0b101, 6)),
        }
    }
}

pub struct AdcConfig<I> {
    input: I,
    oversampling: Oversampling,
}

impl<I> AdcConfig<I>
where
    I: AdcChannel<HalAdc, ID = u8>,
{
    pub fn new(input: I, oversampling: Oversampling) -> Self {
        AdcConfig {
            input,
            oversampling,
        }
    }
}

/// Software triggered single channel conversion, one per [`SampleSource::read_sample`].
pub struct Adc<I> {
    adc: ADC,
    _input: I,
}

impl<I> Adc<I>
where
    I: AdcChannel<HalAdc, ID = u8>,
{
    pub fn new<D: DelayUs<u8>>(
        pac_adc: ADC,
        config: AdcConfig<I>,
        rcc: &mut Rcc,
        delay: &mut D,
    ) -> Self {
        Adc::<I>::enable_clock_and_reset(rcc);
        let mut adc = Adc {
            adc: pac_adc,
            _input: config.input,
        };
        adc.disable();
        adc.enable_vreg(delay);
        adc.calibrate();
        adc.set_oversampling(config.oversampling);
        adc.enable();
        adc.configure();
        defmt::debug!("ADC ready, oversampling {}", config.oversampling);
        adc
    }

    fn convert(&mut self) -> u16 {
        self.adc.isr.write(|w| w.eoc().set_bit());
        self.adc.cr.modify(|_, w| w.adstart().set_bit());
        while self.adc.isr.read().eoc().bit_is_clear() {}
        // Reading DR clears EOC
        self.adc.dr.read().regular_data().bits()
    }

    fn configure(&mut self) {
        self.adc.cfgr1.write(|w| unsafe {
            // Software trigger
            w.exten().bits(0b00);
            // Right alignment
            w.align().clear_bit();
            // 12-bit resolution
            w.res().bits(0b00);
            // Single conversion
            w.cont().clear_bit()
        });
        // 160.5 cycles for the best precision
        self.adc.smpr.write(|w| unsafe { w.smp1().bits(0b111) });
        // Select input channel
        self.adc.isr.write(|w| w.ccrdy().set_bit());
        self.adc
            .chselr()
            .write(|w| unsafe { w.chsel().bits(1 << I::channel()) });
        while self.adc.isr.read().ccrdy().bit_is_clear() {}
    }

    fn set_oversampling(&mut self, oversampling: Oversampling) {
        match oversampling.bits() {
            Some((ratio, shift)) => self.adc.cfgr2.modify(|_, w| unsafe {
                w.ovsr().bits(ratio);
                w.ovss().bits(shift);
                w.ovse().set_bit()
            }),
            None => self.adc.cfgr2.modify(|_, w| w.ovse().clear_bit()),
        }
    }

    fn enable_clock_and_reset(_: &mut Rcc) {
        let rcc = unsafe { &(*RCC::ptr()) };
        rcc.apbenr2.modify(|_, w| w.adcen().set_bit());
        rcc.apbrstr2.modify(|_, w| w.adcrst().set_bit());
        rcc.apbrstr2.modify(|_, w| w.adcrst().clear_bit());
    }

    fn enable_vreg<D: DelayUs<u8>>(&mut self, delay: &mut D) {
        self.adc.cr.modify(|_, w| w.advregen().set_bit());
        // Max starting time declared by stm32g070 datasheet is 20 us
        delay.delay_us(20);
    }

    fn enable(&mut self) {
        self.adc.isr.write(|w| w.adrdy().set_bit());
        self.adc.cr.modify(|_, w| w.aden().set_bit());
        while self.adc.isr.read().adrdy().bit_is_clear() {}
    }

    fn disable(&mut self) {
        let cr = self.adc.cr.read();
        if cr.aden().bit_is_clear() {
            return;
        }
        if cr.adstart().bit_is_set() {
            self.adc.cr.modify(|_, w| w.adstp().set_bit());
        }
        self.adc.cr.modify(|_, w| w.addis().set_bit());
        while self.adc.cr.read().aden().bit_is_set() {}
        self.adc.isr.write(|w| w.adrdy().set_bit());
    }

    fn calibrate(&mut self) {
        self.adc.cr.modify(|_, w| w.adcal().set_bit());
        while self.adc.isr.read().eocal().bit_is_clear() {}
        self.adc.isr.write(|w| w.eocal().set_bit());
    }
}

impl<I> SampleSource for Adc<I>
where
    I: AdcChannel<HalAdc, ID = u8>,
{
    fn read_sample(&mut self) -> u16 {
        self.convert()
    }
}
