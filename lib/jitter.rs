#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub enum CountDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Counter {
    pub direction: CountDirection,
    /// Width of the counter register, `1..=32`.
    pub bits: u32,
}

impl Counter {
    pub const fn up(bits: u32) -> Self {
        Counter {
            direction: CountDirection::Up,
            bits,
        }
    }

    pub const fn down(bits: u32) -> Self {
        Counter {
            direction: CountDirection::Down,
            bits,
        }
    }

    /// Ticks from `earlier` to `later` modulo the counter width, negative if
    /// `later` was read first.
    pub fn interval(&self, earlier: u32, later: u32) -> i32 {
        let elapsed = match self.direction {
            CountDirection::Up => later.wrapping_sub(earlier),
            CountDirection::Down => earlier.wrapping_sub(later),
        };
        // Sign-extend from the register width
        let shift = 32 - self.bits.clamp(1, 32);
        ((elapsed << shift) as i32) >> shift
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(target_os = "none", derive(defmt::Format))]
pub struct Intervals {
    pub smallest: i32,
    pub largest: i32,
}

impl Intervals {
    pub fn jitter(&self) -> u32 {
        (self.largest as i64 - self.smallest as i64) as u32
    }
}

/// `None` unless there are at least two timestamps.
pub fn intervals(timestamps: &[u32], counter: Counter) -> Option<Intervals> {
    let first = counter.interval(*timestamps.first()?, *timestamps.get(1)?);
    let mut intervals = Intervals {
        smallest: first,
        largest: first,
    };

    for pair in timestamps.windows(2) {
        let difference = counter.interval(pair[0], pair[1]);
        if difference < intervals.smallest {
            intervals.smallest = difference;
        }
        if difference > intervals.largest {
            intervals.largest = difference;
        }
    }

    Some(intervals)
}

pub fn jitter(timestamps: &[u32], counter: Counter) -> Option<u32> {
    intervals(timestamps, counter).map(|intervals| intervals.jitter())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn spread_of_intervals() {
        let intervals = intervals(&[0, 10, 25, 30], Counter::up(32)).unwrap();
        assert_eq!(
            intervals,
            Intervals {
                smallest: 5,
                largest: 15
            }
        );
        assert_eq!(intervals.jitter(), 10);
    }

    #[test]
    fn regular_ticks_have_no_jitter() {
        let timestamps: Vec<u32> = (0..100).map(|i| i * 10_000).collect();
        assert_eq!(jitter(&timestamps, Counter::up(32)), Some(0));
    }

    #[test]
    fn down_counter() {
        assert_eq!(jitter(&[30, 20, 5, 0], Counter::down(32)), Some(10));
        // Same readings taken as an up-counter are all negative intervals
        let intervals = intervals(&[30, 20, 5, 0], Counter::up(32)).unwrap();
        assert_eq!(intervals.smallest, -15);
        assert_eq!(intervals.largest, -5);
        assert_eq!(intervals.jitter(), 10);
    }

    #[test]
    fn wrap_of_narrow_counter() {
        // 16-bit up-counter wrapping between the first two readings
        assert_eq!(jitter(&[65_530, 4, 14, 24], Counter::up(16)), Some(0));
        // 24-bit down-counter, like SysTick
        assert_eq!(
            jitter(&[5, 0x00FF_FFFB, 0x00FF_FFF1], Counter::down(24)),
            Some(0)
        );
    }

    #[test]
    fn interval_sign() {
        let counter = Counter::up(16);
        assert_eq!(counter.interval(10, 0), -10);
        assert_eq!(counter.interval(0, 10), 10);
        assert_eq!(counter.interval(65_535, 0), 1);
        assert_eq!(Counter::down(16).interval(0, 65_535), 1);
    }

    #[test]
    fn extreme_intervals_do_not_overflow() {
        let intervals = intervals(&[0, i32::MAX as u32, 0], Counter::up(32)).unwrap();
        assert_eq!(intervals.largest, i32::MAX);
        assert_eq!(intervals.smallest, -i32::MAX);
        assert_eq!(intervals.jitter(), u32::MAX - 1);
    }

    #[test]
    fn not_enough_timestamps() {
        assert_eq!(jitter(&[], Counter::up(32)), None);
        assert_eq!(jitter(&[42], Counter::up(32)), None);
        assert_eq!(jitter(&[42, 50], Counter::up(32)), Some(0));
    }

    #[test]
    fn invariant_to_offset() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut now: u32 = 0;
            let timestamps: Vec<u32> = (0..50)
                .map(|_| {
                    now = now.wrapping_add(rng.gen_range(9_900..10_100));
                    now
                })
                .collect();
            let expected = jitter(&timestamps, Counter::up(32));

            let offset: u32 = rng.gen();
            let shifted: Vec<u32> = timestamps.iter().map(|t| t.wrapping_add(offset)).collect();
            assert_eq!(jitter(&shifted, Counter::up(32)), expected);

            let narrow: Vec<u32> = shifted.iter().map(|t| t & 0xFFFF).collect();
            assert_eq!(jitter(&narrow, Counter::up(16)), expected);
        }
    }
}
