use iced::mouse;
use iced::theme;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path};
use iced::widget::{
    Column, PickList, button, column, container, horizontal_space, progress_bar, row, text,
};
use iced::{Alignment, Color, Element, Length, Rectangle, Renderer, Theme};

use crate::config::types::ThemeMode;
use crate::dashboard::activity::Activity;
use crate::dashboard::model::Dashboard;
use crate::dashboard::notification::Notification;
use crate::device::constants::SIGNAL_BARS;
use crate::device::source::SignalQuality;
use crate::device::types::DeviceState;
use crate::gui::sparkline::Sparkline;
use crate::gui::style::{
    AMBER, BadgeStyleSheet, CardStyleSheet, EMERALD, MeasureButtonStyleSheet, SignalBarStyleSheet,
    TextButtonStyleSheet,
};
use crate::gui::types::Message;
use crate::measure::breathing::GuidedBreathing;
use crate::measure::health::HealthStatus;
use crate::measure::history::History;
use crate::measure::simulator::{stability_percent, stability_remaining};

const TREND_LENGTH: usize = 20;
const RECENT_LENGTH: usize = 5;

const INSTRUCTIONS: [&str; 5] = [
    "• Place finger gently, do not press hard",
    "• Ensure finger is warm and clean (no nail polish)",
    "• Keep hand relaxed and below heart level",
    "• Keep finger on sensor until the red light turns off",
    "⚠️ Make sure the device is connected before starting",
];

fn card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(theme::Container::Custom(Box::new(CardStyleSheet)))
        .into()
}

pub fn device_status(dashboard: &Dashboard) -> Element<'_, Message> {
    let device = dashboard.device();

    let (symbol, state) = match dashboard.device_state() {
        DeviceState::Initial => ("⚠️", "Disconnected"),
        DeviceState::Scanning => ("⚠️", "Scanning…"),
        DeviceState::Connecting => ("…", "Connecting…"),
        DeviceState::Connected => ("ᛒ", "Connected"),
    };
    let state_color = if device.connected { EMERALD } else { Color::from_rgb(0.937, 0.267, 0.267) };

    row![
        text(symbol).size(18),
        column![
            text(&device.name).size(14),
            text(state).size(12).style(state_color),
        ],
        horizontal_space(),
        progress_bar(0.0..=100.0, f32::from(device.battery))
            .width(96)
            .height(8),
        text(format!("{}%", device.battery))
            .size(12)
            .style(if device.battery_low() { AMBER } else { EMERALD }),
    ]
        .spacing(10)
        .align_items(Alignment::Center)
        .into()
}

pub fn theme_toggle<'a>(theme_mode: ThemeMode) -> Element<'a, Message> {
    let label = match theme_mode {
        ThemeMode::Dark => "☾ Dark",
        ThemeMode::Light => "☀ Light",
    };

    button(text(label).size(12))
        .style(theme::Button::Custom(Box::new(TextButtonStyleSheet)))
        .on_press(Message::ToggleTheme)
        .into()
}

fn stat_card<'a>(label: &'a str, value: String, unit: &'a str) -> Element<'a, Message> {
    card(
        column![
            text(label).size(12),
            row![
                text(value).size(26),
                text(unit).size(12),
            ].spacing(4).align_items(Alignment::End),
        ].spacing(4)
    )
}

pub fn health_badge<'a>(status: HealthStatus) -> Element<'a, Message> {
    container(
        text(format!("{} {}", status.icon(), status)).size(12)
    )
        .padding([4, 10])
        .style(theme::Container::Custom(Box::new(BadgeStyleSheet { status })))
        .into()
}

pub fn stats(dashboard: &Dashboard) -> Element<'_, Message> {
    let vitals = dashboard.vitals();

    column![
        row![
            text("Latest reading").size(14),
            horizontal_space(),
            health_badge(dashboard.health()),
        ].align_items(Alignment::Center),

        row![
            stat_card("SpO₂", dashboard.displayed_spo2().to_string(), "%"),
            stat_card("Heart rate", vitals.heart_rate.to_string(), "bpm"),
        ].spacing(12),

        row![
            stat_card("Pulse rate", vitals.pulse_rate.to_string(), "/min"),
            stat_card("Perfusion index", format!("{:.1}", vitals.perfusion_index), "PI"),
        ].spacing(12),
    ]
        .spacing(12)
        .into()
}

pub fn signal_indicator<'a>(signal: &SignalQuality) -> Element<'a, Message> {
    let bars = (1..=SIGNAL_BARS).map(|bar| {
        container(text(""))
            .width(6)
            .height(f32::from(4 + bar * 3))
            .style(theme::Container::Custom(Box::new(SignalBarStyleSheet { filled: bar <= signal.strength })))
            .into()
    });

    let (placement, color) = if signal.finger_placed {
        ("Good placement", EMERALD)
    } else {
        ("Adjust finger", AMBER)
    };

    row![
        iced::widget::Row::with_children(bars.collect::<Vec<Element<'a, Message>>>())
            .spacing(2)
            .align_items(Alignment::End),
        text(placement).size(12).style(color),
    ]
        .spacing(12)
        .align_items(Alignment::Center)
        .into()
}

pub fn stability_timer<'a>(stable_seconds: f32) -> Element<'a, Message> {
    let remaining = stability_remaining(stable_seconds);
    let label = if remaining > 0.0 {
        format!("{:.0}s", remaining)
    } else {
        "Ready".to_string()
    };

    column![
        row![
            text("Signal stability").size(12),
            horizontal_space(),
            text(label).size(12),
        ],
        progress_bar(0.0..=100.0, stability_percent(stable_seconds)).height(6),
    ]
        .spacing(4)
        .into()
}

fn notification_bubble(notification: &Notification) -> Element<'_, Message> {
    card(
        column![
            text(format!("{} {}", notification.icon, notification.title)).size(14),
            text(&notification.message).size(12),
        ]
            .spacing(4)
            .align_items(Alignment::Center)
            .width(Length::Fill)
    )
}

pub fn measure_panel(dashboard: &Dashboard) -> Element<'_, Message> {
    let label = if dashboard.is_measuring() { "Measuring…" } else { "Measure Oxygen" };

    let mut measure_button = button(
        text(label).size(16).width(Length::Fill).horizontal_alignment(iced::alignment::Horizontal::Center)
    )
        .padding(12)
        .width(Length::Fill)
        .style(theme::Button::Custom(Box::new(MeasureButtonStyleSheet)));

    if dashboard.can_measure() {
        measure_button = measure_button.on_press(Message::Measure);
    }

    let body: Element<Message> = if dashboard.is_measuring() {
        column![
            progress_bar(0.0..=100.0, dashboard.progress()).height(12),
            signal_indicator(dashboard.signal()),
            stability_timer(dashboard.stable_seconds()),
        ]
            .spacing(12)
            .into()
    }
    else if let Some(notification) = dashboard.notification() {
        notification_bubble(notification)
    }
    else if !dashboard.device().connected {
        text("Waiting for the oximeter to connect…").size(12).into()
    }
    else {
        text("Tap to start a measurement").size(12).into()
    };

    column![measure_button, body]
        .spacing(16)
        .align_items(Alignment::Center)
        .into()
}

pub fn instructions<'a>() -> Element<'a, Message> {
    let mut lines: Vec<Element<'a, Message>> = vec![text("Important Instructions").size(14).into()];
    for line in INSTRUCTIONS {
        lines.push(text(line).size(12).into());
    }

    card(Column::with_children(lines).spacing(6))
}

pub fn history_panel(history: &History) -> Element<'_, Message> {
    if history.is_empty() {
        return card(text("No measurements yet").size(12));
    }

    let recent: Vec<Element<'_, Message>> = history.recent(RECENT_LENGTH).map(|reading| {
        row![
            text(humantime::format_rfc3339_seconds(reading.timestamp).to_string()).size(12),
            horizontal_space(),
            text(format!("{}% · {} bpm", reading.spo2, reading.heart_rate)).size(12),
        ].into()
    }).collect();

    card(
        column![
            row![
                text(format!("History ({})", history.len())).size(14),
                horizontal_space(),
            ],
            Canvas::new(Sparkline { data: history.spo2_trend(TREND_LENGTH) })
                .width(Length::Fill)
                .height(32),
            Column::with_children(recent).spacing(4),
        ].spacing(10)
    )
}

struct BreathingCircle {
    scale: f32,
}

impl canvas::Program<Message> for BreathingCircle {
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
        let center = frame.center();
        // the largest scale (inhale) fills the canvas
        let radius = bounds.width.min(bounds.height) / 2.0 / 1.15 * self.scale;
        frame.fill(&Path::circle(center, radius), Color { a: 0.85, ..EMERALD });
        frame.fill(&Path::circle(center, radius * 0.4), Color::WHITE);
        vec![frame.into_geometry()]
    }
}

pub fn guided_breathing(breathing: &GuidedBreathing) -> Element<'_, Message> {
    card(
        column![
            row![
                text("Guided Breathing").size(14),
                horizontal_space(),
                text("4-4-6-2").size(12),
            ],
            row![
                Canvas::new(BreathingCircle { scale: breathing.scale() })
                    .width(46)
                    .height(46),
                column![
                    text(breathing.phase().to_string()).size(14),
                    text(format!("{}s", breathing.remaining())).size(12),
                ],
            ]
                .spacing(12)
                .align_items(Alignment::Center),
        ].spacing(10)
    )
}

pub fn actions(activity: Activity) -> Element<'static, Message> {
    row![
        PickList::new(Activity::all(), Some(activity), Message::ActivitySelected).width(130),
        horizontal_space(),
        button(text("Share report").size(14))
            .style(theme::Button::Primary)
            .on_press(Message::ShareReport),
        button(text("SOS").size(14))
            .style(theme::Button::Destructive)
            .on_press(Message::Sos),
    ]
        .spacing(10)
        .align_items(Alignment::Center)
        .into()
}
