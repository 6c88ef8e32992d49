use std::time::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::device::constants::{
    HEART_RATE_RANGE, PERFUSION_INDEX_RANGE, PULSE_RATE_RANGE, SIGNAL_BARS, TARGET_SPO2_RANGE,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vitals {
    pub heart_rate: u16,
    pub pulse_rate: u16,
    pub perfusion_index: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalQuality {
    pub strength: u8, // [1, SIGNAL_BARS]
    pub finger_placed: bool,
}

impl SignalQuality {
    pub fn is_good(&self) -> bool {
        self.finger_placed && self.strength >= 3
    }
}

impl Default for SignalQuality {
    fn default() -> Self {
        SignalQuality {
            strength: 3,
            finger_placed: true,
        }
    }
}

/// Where the measurement values come from. The dashboard only talks to this trait, so a source
/// backed by real hardware can replace the simulated one without touching the measurement flow.
pub trait SignalSource {
    /// The SpO2 value a new measurement will settle on.
    fn target_spo2(&mut self) -> u8;

    /// Heart rate, pulse rate and perfusion index recorded when a measurement completes.
    fn vitals(&mut self) -> Vitals;

    /// Signal strength and finger placement at `at` (time since the dashboard was created).
    fn signal_quality(&mut self, at: Duration) -> SignalQuality;

    /// Small offset added to the displayed SpO2 while a measurement is running.
    fn jitter(&mut self, at: Duration) -> f32;
}

pub struct SimulatedSource {
    rng: StdRng,
}

impl SimulatedSource {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        SimulatedSource { rng }
    }
}

fn millis(at: Duration) -> f32 {
    at.as_secs_f32() * 1000.0
}

impl SignalSource for SimulatedSource {
    fn target_spo2(&mut self) -> u8 {
        self.rng.gen_range(TARGET_SPO2_RANGE.0..=TARGET_SPO2_RANGE.1)
    }

    fn vitals(&mut self) -> Vitals {
        // draw tenths so that the perfusion index always has exactly one decimal
        let pi_min = (PERFUSION_INDEX_RANGE.0 * 10.0).round() as u16;
        let pi_max = (PERFUSION_INDEX_RANGE.1 * 10.0).round() as u16;

        Vitals {
            heart_rate: self.rng.gen_range(HEART_RATE_RANGE.0..=HEART_RATE_RANGE.1),
            pulse_rate: self.rng.gen_range(PULSE_RATE_RANGE.0..=PULSE_RATE_RANGE.1),
            perfusion_index: f32::from(self.rng.gen_range(pi_min..=pi_max)) / 10.0,
        }
    }

    fn signal_quality(&mut self, at: Duration) -> SignalQuality {
        let ms = millis(at);

        let strength = 3.5 + (ms / 900.0).sin() * 1.5 + self.rng.gen_range(-0.5..0.5);
        let strength = strength
            .round()
            .clamp(1.0, f32::from(SIGNAL_BARS)) as u8;

        let placement = (ms / 2300.0).sin() + self.rng.gen_range(-0.2..0.2);

        SignalQuality {
            strength,
            finger_placed: placement > -0.8,
        }
    }

    fn jitter(&mut self, at: Duration) -> f32 {
        (millis(at) / 300.0).sin() * 0.4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitals_stay_within_their_ranges() {
        let mut source = SimulatedSource::new(Some(7));

        for _ in 0..500 {
            let target = source.target_spo2();
            assert!((96..=99).contains(&target), "target {}", target);

            let vitals = source.vitals();
            assert!((62..=89).contains(&vitals.heart_rate), "heart rate {}", vitals.heart_rate);
            assert!((10..=17).contains(&vitals.pulse_rate), "pulse rate {}", vitals.pulse_rate);
            assert!(
                vitals.perfusion_index >= 3.0 && vitals.perfusion_index <= 6.0,
                "perfusion index {}", vitals.perfusion_index,
            );
            let tenths = vitals.perfusion_index * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-4);
        }
    }

    #[test]
    fn signal_strength_fits_the_indicator() {
        let mut source = SimulatedSource::new(Some(11));

        for step in 0..2_000 {
            let quality = source.signal_quality(Duration::from_millis(step * 100));
            assert!((1..=5).contains(&quality.strength), "strength {}", quality.strength);
        }
    }

    #[test]
    fn seeded_sources_repeat_themselves() {
        let mut a = SimulatedSource::new(Some(42));
        let mut b = SimulatedSource::new(Some(42));

        for step in 0..50 {
            let at = Duration::from_millis(step * 100);
            assert_eq!(a.target_spo2(), b.target_spo2());
            assert_eq!(a.vitals(), b.vitals());
            assert_eq!(a.signal_quality(at), b.signal_quality(at));
        }
    }

    #[test]
    fn jitter_is_small() {
        let mut source = SimulatedSource::new(Some(1));
        for step in 0..100 {
            assert!(source.jitter(Duration::from_millis(step * 37)).abs() <= 0.4);
        }
    }

    #[test]
    fn good_signal_needs_placement_and_three_bars() {
        assert!(SignalQuality { strength: 3, finger_placed: true }.is_good());
        assert!(!SignalQuality { strength: 2, finger_placed: true }.is_good());
        assert!(!SignalQuality { strength: 5, finger_placed: false }.is_good());
    }
}
