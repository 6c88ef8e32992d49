use std::time::Duration;
use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{Color, Point, Rectangle, Renderer, Theme};

use crate::gui::style::{is_dark, PLETH_RED, PLETH_RED_DARK};

const GRID_SIZE: f32 = 12.0;
const RESTING_BPM: f32 = 62.0;

/// Scrolling pleth trace. Only the scroll offset and the clock are state, everything else is
/// derived when drawing.
#[derive(Debug, Clone, Default)]
pub struct Waveform {
    offset: f32,
    clock_ms: f32,
    measuring: bool,
}

impl Waveform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the trace by one animation frame.
    pub fn advance(&mut self, dt: Duration, measuring: bool) {
        let speed = if measuring { 1.0 } else { 0.9 };
        let dt = dt.as_secs_f32();

        self.offset += dt * 60.0 * speed;
        self.clock_ms += dt * 1000.0;
        self.measuring = measuring;
    }

    pub fn amplitude(&self) -> f32 {
        if self.measuring { 34.0 } else { 10.0 }
    }

    pub fn bpm(&self) -> f32 {
        if self.measuring {
            78.0 + (self.clock_ms / 1400.0).sin() * 6.0 + (self.clock_ms / 1100.0).cos() * 2.0
        }
        else {
            RESTING_BPM
        }
    }

    pub fn view(&self) -> WaveformProgram<'_> {
        WaveformProgram { waveform: self }
    }
}

/// Shape of one beat: gaussian widths and gains of the systolic spike and the dicrotic hump.
#[derive(Debug, Clone, Copy)]
pub struct BeatShape {
    pub spike_width: f32,
    pub spike_gain: f32,
    pub hump_width: f32,
    pub hump_gain: f32,
}

pub const TRACE: BeatShape = BeatShape { spike_width: 0.015, spike_gain: 2.2, hump_width: 0.06, hump_gain: 0.45 };
pub const GLOW: BeatShape = BeatShape { spike_width: 0.03, spike_gain: 1.6, hump_width: 0.08, hump_gain: 0.35 };

/// Height above the midline of the trace at scrolled position `i`.
pub fn trace_height(i: f32, spacing: f32, amplitude: f32, shape: BeatShape) -> f32 {
    let phase = i.rem_euclid(spacing) / spacing;
    let spike = (-((phase - 0.12) / shape.spike_width).powi(2)).exp() * amplitude * shape.spike_gain;
    let hump = (-((phase - 0.32) / shape.hump_width).powi(2)).exp() * amplitude * shape.hump_gain;
    let baseline = (i / 140.0).sin() * (amplitude * 0.15) + (i / 18.0).sin() * 0.6;

    spike + hump + baseline
}

/// Distance in pixels between two beats for a trace `width` pixels wide.
pub fn beat_spacing(width: f32, bpm: f32) -> f32 {
    (width / (bpm / 60.0) * 1.1).max(44.0)
}

pub struct WaveformProgram<'a> {
    waveform: &'a Waveform,
}

impl<'a, Message> canvas::Program<Message> for WaveformProgram<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let width = bounds.width;
        let height = bounds.height;
        let mid = height * 0.5;
        let dark = is_dark(theme);

        let grid_color = if dark {
            Color::from_rgba(0.580, 0.639, 0.722, 0.06)
        } else {
            Color::from_rgba(0.059, 0.090, 0.165, 0.06)
        };

        let grid = Path::new(|builder| {
            let mut x = 0.0;
            while x < width {
                builder.move_to(Point::new(x + 0.5, 0.0));
                builder.line_to(Point::new(x + 0.5, height));
                x += GRID_SIZE;
            }

            let mut y = 0.0;
            while y < height {
                builder.move_to(Point::new(0.0, y + 0.5));
                builder.line_to(Point::new(width, y + 0.5));
                y += GRID_SIZE;
            }
        });
        frame.stroke(&grid, Stroke::default().with_color(grid_color).with_width(1.0));

        let waveform = self.waveform;
        let amplitude = waveform.amplitude();
        let bpm = waveform.bpm();
        let spacing = beat_spacing(width, bpm);
        let line_color = if dark { PLETH_RED_DARK } else { PLETH_RED };

        let trace = Path::new(|builder| {
            let mut x = 0.0;
            while x <= width {
                let y = mid - trace_height(x + waveform.offset, spacing, amplitude, TRACE);
                if x == 0.0 {
                    builder.move_to(Point::new(x, y));
                } else {
                    builder.line_to(Point::new(x, y));
                }
                x += 1.0;
            }
        });
        frame.stroke(&trace, Stroke::default().with_color(line_color).with_width(2.2));

        // wide translucent copy of the trace acts as a glow
        let glow_spacing = (width / (bpm / 60.0) * 0.75).max(40.0);
        let glow = Path::new(|builder| {
            let mut x = 0.0;
            while x <= width {
                let y = mid - trace_height(x + waveform.offset, glow_spacing, amplitude, GLOW);
                if x == 0.0 {
                    builder.move_to(Point::new(x, y));
                } else {
                    builder.line_to(Point::new(x, y));
                }
                x += 4.0;
            }
        });
        frame.stroke(&glow, Stroke::default().with_color(Color { a: 0.12, ..line_color }).with_width(6.0));

        if waveform.measuring {
            let alpha = 0.35 + (waveform.clock_ms / 420.0).sin().abs() * 0.5;
            let radius = 3.0 + (waveform.clock_ms / 600.0).sin().abs() * 2.0;
            frame.fill(&Path::circle(Point::new(14.0, mid), radius), Color { a: alpha, ..line_color });
        }

        vec![frame.into_geometry()]
    }
}
