use core::ops::RangeInclusive;

/// Occurrence count per raw reading, over the whole `[0, R)` range.
pub struct Histogram<const R: usize> {
    occurrences: [u32; R],
    bounds: Option<(u16, u16)>,
    mode: u32,
    tallied: usize,
    rejected: usize,
}

impl<const R: usize> Histogram<R> {
    pub const fn new() -> Self {
        Histogram {
            occurrences: [0; R],
            bounds: None,
            mode: 0,
            tallied: 0,
            rejected: 0,
        }
    }

    /// Rebuilds the table from `values`. Readings outside `[0, R)` are
    /// counted as rejected and left out of every other figure.
    pub fn tally(&mut self, values: &[u16]) {
        self.occurrences = [0; R];
        self.mode = 0;
        self.tallied = 0;
        self.rejected = 0;

        // Range of x values
        self.bounds = values
            .iter()
            .copied()
            .filter(|&value| (value as usize) < R)
            .fold(None, |bounds, value| match bounds {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            });

        // Occurrences, the reading is the index
        for &value in values {
            match self.occurrences.get_mut(value as usize) {
                Some(occurrences) => {
                    *occurrences = occurrences.saturating_add(1);
                    self.mode = self.mode.max(*occurrences);
                    self.tallied += 1;
                }
                None => self.rejected += 1,
            }
        }
    }

    pub fn occurrences(&self, value: u16) -> u32 {
        self.occurrences.get(value as usize).copied().unwrap_or(0)
    }

    pub fn value_range(&self) -> Option<RangeInclusive<u16>> {
        self.bounds.map(|(min, max)| min..=max)
    }

    /// Range of y values over the observed readings, gaps included.
    pub fn occurrence_range(&self) -> Option<(u32, u32)> {
        let bars = self.bars()?;
        let (min, max) = bars.fold((u32::MAX, 0), |(min, max), occurrences| {
            (min.min(occurrences), max.max(occurrences))
        });
        Some((min, max))
    }

    pub fn bars(&self) -> Option<impl Iterator<Item = u32> + '_> {
        let (min, max) = self.bounds?;
        Some(self.occurrences[min as usize..=max as usize].iter().copied())
    }

    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn tallied(&self) -> usize {
        self.tallied
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl<const R: usize> Default for Histogram<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampler::SampleLog;

    #[test]
    fn counts_each_reading() {
        let mut histogram = Histogram::<8>::new();
        histogram.tally(&[1, 1, 2, 3, 3, 3]);

        assert_eq!(histogram.value_range(), Some(1..=3));
        assert_eq!(histogram.occurrences(0), 0);
        assert_eq!(histogram.occurrences(1), 2);
        assert_eq!(histogram.occurrences(2), 1);
        assert_eq!(histogram.occurrences(3), 3);
        assert_eq!(histogram.occurrences(4), 0);
        assert_eq!(histogram.mode(), 3);
        assert_eq!(histogram.occurrence_range(), Some((1, 3)));
        assert_eq!(histogram.bars().unwrap().collect::<Vec<_>>(), [2, 1, 3]);
    }

    #[test]
    fn gaps_count_as_zero_occurrences() {
        let mut histogram = Histogram::<16>::new();
        histogram.tally(&[4, 4, 9]);

        assert_eq!(histogram.value_range(), Some(4..=9));
        assert_eq!(histogram.occurrence_range(), Some((0, 2)));
        assert_eq!(
            histogram.bars().unwrap().collect::<Vec<_>>(),
            [2, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn sum_of_bars_matches_log_length() {
        let mut log = SampleLog::<10>::new();
        for (i, value) in [7, 3, 3, 5, 7, 7, 4, 3, 6, 7, 1, 1].iter().enumerate() {
            log.record(i as u32, *value);
        }
        assert!(log.is_full());

        let mut histogram = Histogram::<16>::new();
        histogram.tally(log.values());

        let sum: usize = histogram.bars().unwrap().map(|n| n as usize).sum();
        assert_eq!(sum, log.len());
        assert_eq!(histogram.tallied(), log.len());
        // Readings dropped by the full log are not in the table
        assert_eq!(histogram.occurrences(1), 0);
        assert_eq!(histogram.mode(), 4);
    }

    #[test]
    fn out_of_range_readings_are_rejected() {
        let mut histogram = Histogram::<4>::new();
        histogram.tally(&[0, 3, 4, 9, 3]);

        assert_eq!(histogram.value_range(), Some(0..=3));
        assert_eq!(histogram.tallied(), 3);
        assert_eq!(histogram.rejected(), 2);
        assert_eq!(histogram.occurrences(9), 0);
        assert_eq!(histogram.mode(), 2);
    }

    #[test]
    fn constant_stream() {
        let mut histogram = Histogram::<4096>::new();
        histogram.tally(&[2048; 100]);

        assert_eq!(histogram.value_range(), Some(2048..=2048));
        assert_eq!(histogram.occurrence_range(), Some((100, 100)));
        assert_eq!(histogram.mode(), 100);
    }

    #[test]
    fn counts_past_u16_range() {
        let readings = vec![5u16; 70_000];
        let mut histogram = Histogram::<8>::new();
        histogram.tally(&readings);

        let sum: u64 = histogram.bars().unwrap().map(u64::from).sum();
        assert_eq!(sum, 70_000);
        assert_eq!(histogram.tallied(), 70_000);
        assert_eq!(histogram.mode(), 70_000);
        assert_eq!(histogram.occurrence_range(), Some((70_000, 70_000)));
    }

    #[test]
    fn retally_starts_over() {
        let mut histogram = Histogram::<8>::new();
        histogram.tally(&[1, 1, 1]);
        histogram.tally(&[5, 6]);

        assert_eq!(histogram.occurrences(1), 0);
        assert_eq!(histogram.value_range(), Some(5..=6));
        assert_eq!(histogram.mode(), 1);
        assert_eq!(histogram.tallied(), 2);
    }

    #[test]
    fn empty() {
        let mut histogram = Histogram::<8>::default();
        histogram.tally(&[]);

        assert_eq!(histogram.value_range(), None);
        assert_eq!(histogram.occurrence_range(), None);
        assert!(histogram.bars().is_none());
        assert_eq!(histogram.mode(), 0);
    }
}
