use std::time::{Duration, SystemTime};
use log::{debug, info};

use crate::config::types::ThemeMode;
use crate::dashboard::activity::Activity;
use crate::dashboard::notification::Notification;
use crate::dashboard::report::build_report;
use crate::device::source::{SignalQuality, SignalSource, Vitals};
use crate::device::types::{Device, DeviceState};
use crate::measure::breathing::GuidedBreathing;
use crate::measure::health::{classify, HealthStatus};
use crate::measure::history::{History, Reading};
use crate::measure::simulator::{MeasurementSession, Phase, COMPLETE_HOLD, STABLE_TENTHS_CAP};

pub const APP_NAME: &str = "Oximeter";

const INITIAL_SPO2: f32 = 98.0;
const INITIAL_VITALS: Vitals = Vitals {
    heart_rate: 72,
    pulse_rate: 14,
    perfusion_index: 4.2,
};

/// State of the dashboard page. Widgets only read from it, every change goes through one of the
/// actions below. Time is passed in as the duration since `epoch`, the moment the dashboard was
/// created, so the whole flow can be driven without real timers.
#[derive(Debug, Clone)]
pub struct Dashboard {
    epoch: SystemTime,
    device: Device,
    device_state: DeviceState,
    history: History,
    phase: Phase,
    displayed_spo2: f32,
    vitals: Vitals,
    signal: SignalQuality,
    stable_tenths: u16,
    notification: Option<Notification>,
    activity: Activity,
    theme: ThemeMode,
    breathing: GuidedBreathing,
}

impl Dashboard {
    pub fn new(device: Device, epoch: SystemTime) -> Self {
        let device_state = if device.connected { DeviceState::Connected } else { DeviceState::Initial };

        Dashboard {
            epoch,
            device,
            device_state,
            history: History::new(),
            phase: Phase::Idle,
            displayed_spo2: INITIAL_SPO2,
            vitals: INITIAL_VITALS,
            signal: SignalQuality::default(),
            stable_tenths: 0,
            notification: None,
            activity: Activity::default(),
            theme: ThemeMode::default(),
            breathing: GuidedBreathing::new(),
        }
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn device_state(&self) -> &DeviceState {
        &self.device_state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_measuring(&self) -> bool {
        self.phase.is_measuring()
    }

    pub fn can_measure(&self) -> bool {
        self.phase == Phase::Idle && self.device.connected
    }

    pub fn progress(&self) -> f32 {
        match &self.phase {
            Phase::Idle => 0.0,
            Phase::Measuring(session) => session.progress,
            Phase::Complete { .. } => 100.0,
        }
    }

    pub fn displayed_spo2(&self) -> u8 {
        self.displayed_spo2.round().clamp(0.0, 100.0) as u8
    }

    pub fn vitals(&self) -> &Vitals {
        &self.vitals
    }

    pub fn health(&self) -> HealthStatus {
        classify(self.displayed_spo2(), self.vitals.heart_rate)
    }

    pub fn signal(&self) -> &SignalQuality {
        &self.signal
    }

    pub fn stable_seconds(&self) -> f32 {
        f32::from(self.stable_tenths) / 10.0
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn activity(&self) -> Activity {
        self.activity
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn breathing(&self) -> &GuidedBreathing {
        &self.breathing
    }

    /// Time since the dashboard was created, for wall clock `now`.
    pub fn elapsed(&self, now: SystemTime) -> Duration {
        now.duration_since(self.epoch).unwrap_or(Duration::ZERO)
    }

    /// True while something is pending that the measurement tick has to advance.
    pub fn needs_ticks(&self) -> bool {
        self.phase != Phase::Idle || self.notification.is_some()
    }

    /// Starts a measurement at `at`. Does nothing (and returns false) if a measurement is already
    /// running, its result is still being shown, or the oximeter is not connected.
    pub fn start_measurement(&mut self, source: &mut dyn SignalSource, at: Duration) -> bool {
        if !self.can_measure() {
            debug!("Ignoring measure request in phase {:?}", self.phase);
            return false;
        }

        let target = source.target_spo2();
        info!("Starting measurement from {:.1}% towards {}%", self.displayed_spo2, target);

        self.phase = Phase::Measuring(MeasurementSession::new(self.displayed_spo2, target, at));
        self.notification = None;
        true
    }

    /// Advances the dashboard to `at`. Returns the new reading if a measurement completed.
    pub fn tick(&mut self, source: &mut dyn SignalSource, at: Duration) -> Option<Reading> {
        if self.notification.as_ref().is_some_and(|notification| notification.is_expired(at)) {
            self.notification = None;
        }

        match &mut self.phase {
            Phase::Idle => None,
            Phase::Complete { until } => {
                if at >= *until {
                    self.phase = Phase::Idle;
                }
                None
            },
            Phase::Measuring(session) => {
                let finished = session.step(at);

                self.signal = source.signal_quality(at);
                self.stable_tenths = if self.signal.is_good() {
                    (self.stable_tenths + 1).min(STABLE_TENTHS_CAP)
                } else {
                    0
                };

                if finished {
                    let target = session.target_value;
                    Some(self.complete(source, target, at))
                }
                else {
                    let value = session.interpolate(session.progress) + source.jitter(at);
                    self.displayed_spo2 = value.clamp(0.0, 100.0);
                    None
                }
            },
        }
    }

    fn complete(&mut self, source: &mut dyn SignalSource, target: u8, at: Duration) -> Reading {
        let vitals = source.vitals();
        let reading = Reading {
            timestamp: self.epoch + at,
            spo2: target,
            heart_rate: vitals.heart_rate,
            pulse_rate: vitals.pulse_rate,
            perfusion_index: vitals.perfusion_index,
        };

        info!(
            "Measurement complete: SpO2 {}% HR {} PR {} PI {:.1}",
            reading.spo2, reading.heart_rate, reading.pulse_rate, reading.perfusion_index,
        );

        self.displayed_spo2 = f32::from(target);
        self.vitals = vitals;
        self.history.push(reading.clone());
        self.phase = Phase::Complete { until: at + COMPLETE_HOLD };

        let message = format!("SpO₂ {}% · HR {} bpm", reading.spo2, reading.heart_rate);
        self.notification = Some(Notification::new("Measurement complete", message, "✅", at));

        reading
    }

    pub fn notify(&mut self, title: impl Into<String>, message: impl Into<String>, icon: &'static str, at: Duration) {
        self.notification = Some(Notification::new(title, message, icon, at));
    }

    pub fn set_device_state(&mut self, state: DeviceState) {
        self.device.connected = state == DeviceState::Connected;
        self.device_state = state;
    }

    pub fn drain_battery(&mut self) {
        self.device.drain_battery();
    }

    pub fn set_activity(&mut self, activity: Activity) {
        self.activity = activity;
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.theme = theme;
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        self.theme = self.theme.toggled();
        self.theme
    }

    pub fn advance_breathing(&mut self) {
        self.breathing.advance();
    }

    pub fn report(&self) -> String {
        let (spo2, heart_rate) = match self.history.latest() {
            Some(reading) => (reading.spo2, reading.heart_rate),
            None => (self.displayed_spo2(), self.vitals.heart_rate),
        };

        build_report(APP_NAME, self.activity, spo2, heart_rate, &self.history)
    }
}
