use std::path::PathBuf;
use std::time::Instant;
use iced::{Event};

use crate::config::types::Config;
use crate::dashboard::activity::Activity;
use crate::device::types::DeviceEvent;

#[derive(Debug, Clone)]
pub enum Message {
    EventOccurred(Event),
    ConfigLoadComplete((Config, Option<String>)), // error message if loading failed
    ConfigSaveComplete(Option<String>), // error message if saving failed
    NoticeConfirmed,
    DeviceEvent(DeviceEvent),
    SecondElapsed,
    Tick,
    Frame(Instant),
    Measure,
    ToggleTheme,
    ActivitySelected(Activity),
    Sos,
    SosComplete(bool), // true if the dialer was opened
    ShareReport,
    ShareComplete(Result<PathBuf, String>),
}
