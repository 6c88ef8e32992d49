use std::collections::VecDeque;
use std::time::SystemTime;

pub const HISTORY_CAPACITY: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub timestamp: SystemTime,
    pub spo2: u8,
    pub heart_rate: u16,
    pub pulse_rate: u16,
    pub perfusion_index: f32,
}

/// Past readings, newest first.
#[derive(Debug, Clone, Default)]
pub struct History {
    readings: VecDeque<Reading>,
}

impl History {
    pub fn new() -> Self {
        History { readings: VecDeque::with_capacity(HISTORY_CAPACITY) }
    }

    pub fn push(&mut self, reading: Reading) {
        self.readings.push_front(reading);
        self.readings.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn latest(&self) -> Option<&Reading> {
        self.readings.front()
    }

    /// The `count` most recent readings, newest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &Reading> {
        self.readings.iter().take(count)
    }

    /// SpO2 values of the `count` most recent readings in chronological order (oldest first),
    /// which is the order a sparkline plots them in.
    pub fn spo2_trend(&self, count: usize) -> Vec<u8> {
        let mut values: Vec<u8> = self.recent(count).map(|reading| reading.spo2).collect();
        values.reverse();
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn reading(index: u64) -> Reading {
        Reading {
            timestamp: SystemTime::UNIX_EPOCH + Duration::from_secs(index),
            spo2: 90 + (index % 10) as u8,
            heart_rate: 60 + index as u16,
            pulse_rate: 12,
            perfusion_index: 4.0,
        }
    }

    #[test]
    fn newest_reading_comes_first() {
        let mut history = History::new();
        history.push(reading(1));
        history.push(reading(2));

        assert_eq!(history.latest(), Some(&reading(2)));
        let order: Vec<u16> = history.recent(10).map(|r| r.heart_rate).collect();
        assert_eq!(order, vec![62, 61]);
    }

    #[test]
    fn oldest_reading_is_evicted_past_capacity() {
        let mut history = History::new();
        for index in 0..51 {
            history.push(reading(index));
        }

        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.latest(), Some(&reading(50)));
        // reading 0 was evicted, reading 1 is now the oldest
        assert_eq!(history.recent(HISTORY_CAPACITY).last(), Some(&reading(1)));

        let timestamps: Vec<SystemTime> = history.recent(HISTORY_CAPACITY).map(|r| r.timestamp).collect();
        assert!(timestamps.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn trend_is_chronological_and_bounded() {
        let mut history = History::new();
        for index in 0..30 {
            history.push(reading(index));
        }

        let trend = history.spo2_trend(20);
        assert_eq!(trend.len(), 20);
        // readings 10..30, oldest first
        let expected: Vec<u8> = (10..30).map(|index| reading(index).spo2).collect();
        assert_eq!(trend, expected);
    }

    #[test]
    fn empty_history() {
        let history = History::new();
        assert!(history.is_empty());
        assert_eq!(history.latest(), None);
        assert!(history.spo2_trend(20).is_empty());
    }
}
