use std::fmt::Write;
use humantime::format_rfc3339_seconds;

use crate::dashboard::activity::Activity;
use crate::measure::history::{History, Reading};

/// Number of history entries included in a shared report.
pub const REPORT_ENTRIES: usize = 10;

pub fn report_line(reading: &Reading) -> String {
    format!(
        "{} · SpO₂ {}% · HR {} bpm · PR {} · PI {:.1}",
        format_rfc3339_seconds(reading.timestamp),
        reading.spo2,
        reading.heart_rate,
        reading.pulse_rate,
        reading.perfusion_index,
    )
}

pub fn build_report(app_name: &str, activity: Activity, spo2: u8, heart_rate: u16, history: &History) -> String {
    let mut report = format!(
        "{} Report\nActivity: {}\nLatest: SpO₂ {}% · HR {} bpm\nRecent measurements:",
        app_name, activity, spo2, heart_rate,
    );

    for reading in history.recent(REPORT_ENTRIES) {
        // writing to a String cannot fail
        let _ = write!(report, "\n{}", report_line(reading));
    }

    report
}
