use iced::{Background, Border, Color, Shadow, Theme, Vector};
use iced::widget::button::{self, StyleSheet as ButtonStyleSheet};
use iced::widget::container::{self, StyleSheet as ContainerStyleSheet};

use crate::measure::health::HealthStatus;

const fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color { r, g, b, a: 1.0 }
}

pub const OXI_ORANGE: Color = rgb(0.976, 0.451, 0.086);
pub const PLETH_RED: Color = rgb(0.863, 0.149, 0.149);
pub const PLETH_RED_DARK: Color = rgb(0.937, 0.267, 0.267);
pub const EMERALD: Color = rgb(0.063, 0.725, 0.506);
pub const AMBER: Color = rgb(0.851, 0.467, 0.024);

pub fn is_dark(theme: &Theme) -> bool {
    let background = theme.palette().background;
    background.r + background.g + background.b < 1.5
}

pub fn health_color(status: HealthStatus) -> Color {
    match status {
        HealthStatus::Normal => rgb(0.082, 0.502, 0.239),
        HealthStatus::Low => rgb(0.706, 0.325, 0.035),
        HealthStatus::Critical => rgb(0.725, 0.110, 0.110),
    }
}

pub struct TextButtonStyleSheet;

impl ButtonStyleSheet for TextButtonStyleSheet {
    type Style = Theme;

    fn active(&self, style: &Self::Style) -> button::Appearance {
        button::Appearance {
            shadow_offset: Default::default(),
            background: None,
            text_color: style.palette().text,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 0.0.into(),
            },
            shadow: Shadow::default(),
        }
    }
}

pub struct MeasureButtonStyleSheet;

impl ButtonStyleSheet for MeasureButtonStyleSheet {
    type Style = Theme;

    fn active(&self, _style: &Self::Style) -> button::Appearance {
        button::Appearance {
            shadow_offset: Vector::new(0.0, 2.0),
            background: Some(Background::Color(OXI_ORANGE)),
            text_color: Color::WHITE,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 12.0.into(),
            },
            shadow: Shadow::default(),
        }
    }

    fn disabled(&self, style: &Self::Style) -> button::Appearance {
        let active = self.active(style);

        button::Appearance {
            background: Some(Background::Color(Color { a: 0.5, ..OXI_ORANGE })),
            ..active
        }
    }
}

/// Rounded surface used for the cards of the dashboard.
pub struct CardStyleSheet;

impl ContainerStyleSheet for CardStyleSheet {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let palette = style.extended_palette();

        container::Appearance {
            text_color: None,
            background: Some(Background::Color(palette.background.weak.color)),
            border: Border {
                color: palette.background.strong.color,
                width: 1.0,
                radius: 16.0.into(),
            },
            shadow: Shadow::default(),
        }
    }
}

pub struct BadgeStyleSheet {
    pub status: HealthStatus,
}

impl ContainerStyleSheet for BadgeStyleSheet {
    type Style = Theme;

    fn appearance(&self, _style: &Self::Style) -> container::Appearance {
        let color = health_color(self.status);

        container::Appearance {
            text_color: Some(color),
            background: Some(Background::Color(Color { a: 0.12, ..color })),
            border: Border {
                color,
                width: 1.0,
                radius: 999.0.into(),
            },
            shadow: Shadow::default(),
        }
    }
}

/// One bar of the signal strength indicator.
pub struct SignalBarStyleSheet {
    pub filled: bool,
}

impl ContainerStyleSheet for SignalBarStyleSheet {
    type Style = Theme;

    fn appearance(&self, style: &Self::Style) -> container::Appearance {
        let color = if self.filled { EMERALD } else { style.extended_palette().background.strong.color };

        container::Appearance {
            text_color: None,
            background: Some(Background::Color(color)),
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: 2.0.into(),
            },
            shadow: Shadow::default(),
        }
    }
}
