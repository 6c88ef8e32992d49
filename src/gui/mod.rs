pub mod application;
pub mod open;
pub mod panels;
pub mod share;
pub mod sparkline;
pub mod style;
pub mod types;
pub mod waveform;
