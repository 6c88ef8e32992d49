use std::time::{Duration, SystemTime};

use oximeter_dashboard::dashboard::model::Dashboard;
use oximeter_dashboard::device::source::SimulatedSource;
use oximeter_dashboard::device::types::{Device, DeviceState};
use oximeter_dashboard::measure::history::{Reading, HISTORY_CAPACITY};
use oximeter_dashboard::measure::simulator::{Phase, COMPLETE_HOLD, TICK_INTERVAL};

fn connected_dashboard() -> Dashboard {
    let mut dashboard = Dashboard::new(Device::mock(), SystemTime::UNIX_EPOCH);
    dashboard.set_device_state(DeviceState::Connected);
    dashboard
}

/// Runs one measurement starting at `start` and returns the reading and the time it completed.
fn run_measurement(dashboard: &mut Dashboard, source: &mut SimulatedSource, start: Duration) -> (Reading, Duration) {
    assert!(dashboard.start_measurement(source, start));

    let mut at = start;
    let mut last_progress = 0.0;
    loop {
        at += TICK_INTERVAL;
        let reading = dashboard.tick(source, at);

        let progress = dashboard.progress();
        assert!(progress >= last_progress, "progress went from {} to {}", last_progress, progress);
        assert!(dashboard.displayed_spo2() <= 100);
        last_progress = progress;

        if let Some(reading) = reading {
            assert_eq!(progress, 100.0);
            return (reading, at);
        }
    }
}

#[test]
fn every_measurement_lands_in_range() {
    for seed in 0..40 {
        let mut dashboard = connected_dashboard();
        let mut source = SimulatedSource::new(Some(seed));

        let (reading, completed_at) = run_measurement(&mut dashboard, &mut source, Duration::ZERO);

        assert!((96..=99).contains(&reading.spo2), "spo2 {}", reading.spo2);
        assert!((62..=89).contains(&reading.heart_rate), "heart rate {}", reading.heart_rate);
        assert!((10..=17).contains(&reading.pulse_rate), "pulse rate {}", reading.pulse_rate);
        assert!((3.0..=6.0).contains(&reading.perfusion_index), "pi {}", reading.perfusion_index);
        assert_eq!(completed_at, Duration::from_secs(6));
        assert_eq!(dashboard.history().latest(), Some(&reading));
    }
}

#[test]
fn starting_twice_is_a_no_op() {
    let mut dashboard = connected_dashboard();
    let mut source = SimulatedSource::new(Some(5));

    assert!(dashboard.start_measurement(&mut source, Duration::ZERO));
    dashboard.tick(&mut source, Duration::from_millis(1_500));
    let before = dashboard.phase().clone();

    assert!(!dashboard.start_measurement(&mut source, Duration::from_millis(1_600)));
    assert_eq!(dashboard.phase(), &before);

    if let Phase::Measuring(session) = dashboard.phase() {
        assert_eq!(session.started_at, Duration::ZERO);
    } else {
        panic!("expected a running measurement");
    }
}

#[test]
fn history_keeps_the_fifty_newest_readings() {
    let mut dashboard = connected_dashboard();
    let mut source = SimulatedSource::new(Some(8));

    let mut start = Duration::ZERO;
    let mut readings = Vec::new();
    for _ in 0..(HISTORY_CAPACITY + 1) {
        let (reading, completed_at) = run_measurement(&mut dashboard, &mut source, start);
        readings.push(reading);

        // wait out the result on screen before measuring again
        let idle_at = completed_at + COMPLETE_HOLD;
        dashboard.tick(&mut source, idle_at);
        assert_eq!(dashboard.phase(), &Phase::Idle);
        start = idle_at;
    }

    let history = dashboard.history();
    assert_eq!(history.len(), HISTORY_CAPACITY);

    let stored: Vec<&Reading> = history.recent(HISTORY_CAPACITY).collect();
    let expected: Vec<&Reading> = readings.iter().rev().take(HISTORY_CAPACITY).collect();
    assert_eq!(stored, expected);
    assert!(!stored.contains(&&readings[0]));
}

#[test]
fn battery_drains_to_zero_and_stays_there() {
    let mut dashboard = connected_dashboard();

    for _ in 0..500 {
        dashboard.drain_battery();
    }

    assert_eq!(dashboard.device().battery, 0);
}

#[test]
fn disconnecting_blocks_new_measurements() {
    let mut dashboard = connected_dashboard();
    let mut source = SimulatedSource::new(Some(2));

    dashboard.set_device_state(DeviceState::Scanning);
    assert!(!dashboard.device().connected);
    assert!(!dashboard.start_measurement(&mut source, Duration::ZERO));

    dashboard.set_device_state(DeviceState::Connected);
    assert!(dashboard.start_measurement(&mut source, Duration::ZERO));
}
