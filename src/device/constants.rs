/**
 * How long (milliseconds) the simulated link spends scanning before it finds the oximeter.
 */
pub const SCAN_DELAY: u64 = 800;

/**
 * How long (milliseconds) the simulated link spends connecting to the oximeter.
 */
pub const CONNECT_DELAY: u64 = 600;

/**
 * How often (milliseconds) the connected oximeter loses one percent of battery.
 */
pub const BATTERY_DRAIN_INTERVAL: u64 = 60_000;

/**
 * Inclusive range of the SpO2 value a measurement settles on.
 */
pub const TARGET_SPO2_RANGE: (u8, u8) = (96, 99);

/**
 * Inclusive range of the heart rate (bpm) reported at the end of a measurement.
 */
pub const HEART_RATE_RANGE: (u16, u16) = (62, 89);

/**
 * Inclusive range of the pulse rate reported at the end of a measurement.
 */
pub const PULSE_RATE_RANGE: (u16, u16) = (10, 17);

/**
 * Inclusive range of the perfusion index reported at the end of a measurement.
 */
pub const PERFUSION_INDEX_RANGE: (f32, f32) = (3.0, 6.0);

/**
 * Number of bars of the signal strength indicator.
 */
pub const SIGNAL_BARS: u8 = 5;
