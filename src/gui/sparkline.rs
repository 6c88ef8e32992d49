use iced::mouse;
use iced::widget::canvas::{self, Frame, Geometry, Path, Stroke};
use iced::{Point, Rectangle, Renderer, Theme};

use crate::gui::style::OXI_ORANGE;

/// Points of a polyline through `data`, scaled to fill `width` x `height`. The vertical span is at
/// least 1 so that a flat series does not divide by zero.
pub fn sparkline_points(data: &[u8], width: f32, height: f32) -> Vec<Point> {
    let (Some(min), Some(max)) = (data.iter().min(), data.iter().max()) else {
        return vec![];
    };

    let min = f32::from(*min);
    let span = (f32::from(*max) - min).max(1.0);
    let step = if data.len() > 1 { width / (data.len() - 1) as f32 } else { 0.0 };

    data.iter()
        .enumerate()
        .map(|(index, value)| {
            Point::new(index as f32 * step, height - (f32::from(*value) - min) / span * height)
        })
        .collect()
}

pub struct Sparkline {
    pub data: Vec<u8>,
}

impl<Message> canvas::Program<Message> for Sparkline {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let mut points = sparkline_points(&self.data, bounds.width, bounds.height);

        // a single reading is drawn as a flat line across the whole width
        if let [point] = points.as_slice() {
            let y = point.y;
            points = vec![Point::new(0.0, y), Point::new(bounds.width, y)];
        }

        if points.len() > 1 {
            let line = Path::new(|builder| {
                builder.move_to(points[0]);
                for point in &points[1..] {
                    builder.line_to(*point);
                }
            });
            frame.stroke(&line, Stroke::default().with_color(OXI_ORANGE).with_width(2.0));
        }

        vec![frame.into_geometry()]
    }
}
