use heapless::Vec;

use crate::jitter::Counter;

/// Produces one reading per tick, in `[0, ADC_RANGE)` for a healthy converter.
pub trait SampleSource {
    fn read_sample(&mut self) -> u16;
}

/// Free-running counter read as the timestamp of a reading.
pub trait ClockSource {
    const COUNTER: Counter;

    fn now(&mut self) -> u32;
}

pub struct SampleLog<const N: usize> {
    timestamps: Vec<u32, N>,
    values: Vec<u16, N>,
}

impl<const N: usize> SampleLog<N> {
    pub const fn new() -> Self {
        SampleLog {
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Appends a reading, returns `false` and leaves the log untouched once full.
    pub fn record(&mut self, timestamp: u32, value: u16) -> bool {
        if self.is_full() {
            return false;
        }
        // Both have the same length, neither push can fail here
        let _ = self.timestamps.push(timestamp);
        let _ = self.values.push(value);
        true
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.len() == N
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn timestamps(&self) -> &[u32] {
        &self.timestamps
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }
}

impl<const N: usize> Default for SampleLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Sampler<S, C> {
    source: S,
    clock: C,
}

impl<S, C> Sampler<S, C>
where
    S: SampleSource,
    C: ClockSource,
{
    pub fn new(source: S, clock: C) -> Self {
        Sampler { source, clock }
    }

    /// Runs once per tick. The conversion always happens, the reading is
    /// only logged while there is room left.
    pub fn tick<const N: usize>(&mut self, log: &mut SampleLog<N>) -> bool {
        let value = self.source.read_sample();
        let timestamp = self.clock.now();
        log.record(timestamp, value)
    }
}
