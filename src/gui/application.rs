use iced::{Alignment, Application, Command, Element, Length, Settings, Size, Subscription, clipboard, window};
use iced::event::{self, Event};
use iced::time::{every as iced_time_every};
use iced::theme::Theme;
use iced::widget::{button, column, container, horizontal_rule, row, scrollable, text, Canvas};
use iced::window::icon;
use std::time::{Duration, Instant, SystemTime};
use log::{error, info, warn};
use tokio_util::sync::{CancellationToken};

use crate::config::io::{ConfigIO};
use crate::config::types::{Config, ThemeMode};
use crate::dashboard::model::Dashboard;
use crate::device::connection::connect_device_subscription;
use crate::device::source::SimulatedSource;
use crate::device::types::{Device, DeviceEvent};
use crate::error::AppRunError;
use crate::gui::open::{open_link, SOS_LINK};
use crate::gui::panels;
use crate::gui::share::share_report;
use crate::gui::types::Message;
use crate::gui::waveform::Waveform;
use crate::measure::simulator::TICK_INTERVAL;

const WINDOW_TITLE: &str = concat!("Oximeter Dashboard ", env!("CARGO_PKG_VERSION"));

// longest gap between two animation frames that still moves the waveform smoothly, for example
// after the window was minimized
const MAX_FRAME_GAP: Duration = Duration::from_millis(250);

pub struct ApplicationFlags {
    pub config_io: ConfigIO,
    pub seed: Option<u64>,
    pub theme_override: Option<ThemeMode>,
}

pub struct OximeterApplication {
    // this token is cancelled upon exit
    app_cancel: CancellationToken,

    // messages that the user must click away
    notices: Vec<String>,

    // current config, might not be saved to disk yet
    config_io: ConfigIO,
    config: Config,
    config_dirty: bool,
    // this flag is used to make sure that a user is not spammed with save configuration errors
    displayed_config_save_error: bool,
    // window to close once the pending config save has finished
    close_after_save: Option<window::Id>,
    // a theme passed on the command line wins over the stored theme until the user toggles it
    theme_override: Option<ThemeMode>,

    source: SimulatedSource,
    dashboard: Dashboard,
    waveform: Waveform,
    last_frame: Option<Instant>,
}

impl OximeterApplication {
    fn before_close(&mut self) {
        self.app_cancel.cancel();
    }

    fn close(&mut self, id: window::Id) -> Command<Message> {
        if self.config_dirty {
            info!("Saving config before closing");
            self.config_dirty = false;
            self.close_after_save = Some(id);
            return self.save_config();
        }

        self.before_close();
        window::close(id)
    }

    fn now(&self) -> Duration {
        self.dashboard.elapsed(SystemTime::now())
    }

    fn load_config(&self) -> Command<Message> {
        let config_io = self.config_io.clone();

        let fut = async move {
            match config_io.read().await {
                Ok(config) => (config, None),
                Err(err) => {
                    let mut error_message: Option<String> = None;

                    if err.is_file_not_found_error() {
                        // this is probably the first start of the app
                        info!("Config file not found, using defaults");
                    } else {
                        error!("Failed to load config: {:?}", &err);
                        error_message = Some(format!("Failed to load config: {}", &err));
                    }
                    (Config::default(), error_message)
                }
            }
        };

        Command::perform(fut, Message::ConfigLoadComplete)
    }

    fn save_config(&self) -> Command<Message> {
        let config = self.config.clone();
        let config_io = self.config_io.clone();

        let fut = async move {
            match config_io.save(config).await {
                Ok(_) => None,
                Err(err) => {
                    error!("Failed to save config: {:?}", &err);
                    Some(format!("Failed to save config: {}", &err))
                },
            }
        };

        Command::perform(fut, Message::ConfigSaveComplete)
    }

    fn call_emergency(&self) -> Command<Message> {
        let fut = async move {
            match open_link(SOS_LINK).await {
                Ok(_) => true,
                Err(err) => {
                    error!("Failed to open {}: {:?}", SOS_LINK, &err);
                    false
                },
            }
        };

        Command::perform(fut, Message::SosComplete)
    }

    fn share(&self) -> Command<Message> {
        let report = self.dashboard.report();

        let fut = async move {
            share_report(report).await.map_err(|err| {
                warn!("Failed to share report: {:?}", &err);
                err.to_string()
            })
        };

        Command::perform(fut, Message::ShareComplete)
    }
}

impl Application for OximeterApplication {
    type Executor = iced::executor::Default;
    type Message = Message;
    type Theme = Theme;
    type Flags = ApplicationFlags;

    fn new(flags: ApplicationFlags) -> (OximeterApplication, Command<Self::Message>) {
        let mut dashboard = Dashboard::new(Device::mock(), SystemTime::now());
        if let Some(theme_mode) = flags.theme_override {
            dashboard.set_theme(theme_mode);
        }

        let app = OximeterApplication {
            app_cancel: CancellationToken::new(),
            notices: Vec::new(),
            config_io: flags.config_io,
            config: Config::default(),
            config_dirty: false,
            displayed_config_save_error: false,
            close_after_save: None,
            theme_override: flags.theme_override,
            source: SimulatedSource::new(flags.seed),
            dashboard,
            waveform: Waveform::new(),
            last_frame: None,
        };

        let command = app.load_config();
        (app, command)
    }

    fn title(&self) -> String {
        String::from(WINDOW_TITLE)
    }

    fn theme(&self) -> Theme {
        match self.dashboard.theme() {
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::Light => Theme::Light,
        }
    }

    fn update(&mut self, message: Message) -> Command<Self::Message> {
        match message {
            Message::ConfigLoadComplete((config, error_message)) => {
                info!("Config load complete");
                if self.theme_override.is_none() {
                    self.dashboard.set_theme(config.theme_or_default());
                }
                self.config = config;
                if let Some(error_message) = error_message {
                    self.notices.push(error_message);
                }
            },
            Message::ConfigSaveComplete(error_message) => {
                if let Some(id) = self.close_after_save.take() {
                    self.before_close();
                    return window::close(id);
                }

                if !self.displayed_config_save_error {
                    if let Some(error_message) = error_message {
                        self.displayed_config_save_error = true;
                        self.notices.push(error_message);
                    }
                }
            },
            Message::NoticeConfirmed => {
                if !self.notices.is_empty() {
                    self.notices.remove(0);
                }
            },
            Message::EventOccurred(Event::Window(id, window::Event::CloseRequested)) => {
                info!("Close requested");
                return self.close(id);
            },
            Message::EventOccurred(_) => {},
            Message::DeviceEvent(DeviceEvent::StateChange(state)) => {
                self.dashboard.set_device_state(state);
            },
            Message::DeviceEvent(DeviceEvent::BatteryDrained) => {
                self.dashboard.drain_battery();
            },
            Message::SecondElapsed => {
                self.dashboard.advance_breathing();

                if self.config_dirty {
                    self.config_dirty = false;
                    return self.save_config();
                }
            },
            Message::Tick => {
                let at = self.now();
                self.dashboard.tick(&mut self.source, at);
            },
            Message::Frame(now) => {
                let dt = match self.last_frame {
                    Some(last) => now.saturating_duration_since(last).min(MAX_FRAME_GAP),
                    None => Duration::ZERO,
                };
                self.last_frame = Some(now);
                self.waveform.advance(dt, self.dashboard.is_measuring());
            },
            Message::Measure => {
                let at = self.now();
                self.dashboard.start_measurement(&mut self.source, at);
            },
            Message::ToggleTheme => {
                let theme_mode = self.dashboard.toggle_theme();
                info!("Switching to {} theme", theme_mode);
                self.theme_override = None;
                self.config.theme = Some(theme_mode);
                self.config_dirty = true;
            },
            Message::ActivitySelected(activity) => {
                self.dashboard.set_activity(activity);
            },
            Message::Sos => {
                return self.call_emergency();
            },
            Message::SosComplete(opened) => {
                if !opened {
                    let at = self.now();
                    self.dashboard.notify(
                        "Call emergency services",
                        "Could not open the dialer. Call 112 from your phone.",
                        "☎",
                        at,
                    );
                }
            },
            Message::ShareReport => {
                return self.share();
            },
            Message::ShareComplete(result) => {
                let at = self.now();

                match result {
                    Ok(path) => {
                        info!("Report shared as {}", path.to_string_lossy());
                        self.dashboard.notify("Report shared", path.to_string_lossy(), "📄", at);
                    },
                    Err(_) => {
                        self.dashboard.notify("Share failed", "Report copied to clipboard", "📋", at);
                        return clipboard::write(self.dashboard.report());
                    },
                }
            },
        }

        Command::none()
    }

    fn subscription(&self) -> Subscription<Message> {
        let mut subscriptions = vec![
            event::listen().map(Message::EventOccurred),
            iced_time_every(Duration::from_secs(1)).map(|_| Message::SecondElapsed),
            window::frames().map(Message::Frame),
            connect_device_subscription(self.app_cancel.clone()).map(Message::DeviceEvent),
        ];

        if self.dashboard.needs_ticks() {
            subscriptions.push(iced_time_every(TICK_INTERVAL).map(|_| Message::Tick));
        }

        Subscription::batch(subscriptions)
    }

    fn view(&self) -> Element<Message> {
        if let Some(notice) = self.notices.first() {
            return container(
                column![
                    text(notice),

                    button(text("Okay"))
                        .on_press(Message::NoticeConfirmed),

                ].align_items(Alignment::Center).spacing(20),
            )
            .width(Length::Fill)
            .padding(20)
            .into()
        }

        let dashboard = &self.dashboard;

        let content = column![
            row![
                container(panels::device_status(dashboard)).width(Length::Fill),
                panels::theme_toggle(dashboard.theme()),
            ]
                .spacing(12)
                .align_items(Alignment::Center),

            horizontal_rule(10),

            Canvas::new(self.waveform.view())
                .width(Length::Fill)
                .height(176),

            panels::stats(dashboard),
            panels::measure_panel(dashboard),
            panels::instructions(),
            panels::history_panel(dashboard.history()),
            panels::guided_breathing(dashboard.breathing()),

            horizontal_rule(10),

            panels::actions(dashboard.activity()),
        ]
            .spacing(20)
            .padding(20)
            .width(Length::Fill);

        scrollable(content).into()
    }
}

// orange disc with a white ring, the oximeter's indicator light
fn make_icon() -> Option<icon::Icon> {
    const SIZE: u32 = 32;
    let mut rgba = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    let center = (SIZE as f32 - 1.0) / 2.0;

    for y in 0..SIZE {
        for x in 0..SIZE {
            let distance = ((x as f32 - center).powi(2) + (y as f32 - center).powi(2)).sqrt();
            let pixel: [u8; 4] = if distance > 15.5 {
                [0, 0, 0, 0]
            } else if (7.0..9.5).contains(&distance) {
                [255, 255, 255, 255]
            } else {
                [249, 115, 22, 255]
            };
            rgba.extend_from_slice(&pixel);
        }
    }

    match icon::from_rgba(rgba, SIZE, SIZE) {
        Ok(icon) => Some(icon),
        Err(err) => {
            warn!("Failed to create window icon: {:?}", err);
            None
        },
    }
}

pub fn run_application(config_io: ConfigIO, seed: Option<u64>, theme_override: Option<ThemeMode>) -> Result<(), AppRunError> {
    let mut config_io = config_io;
    let mut config_locker = config_io.locker()?;
    let _lock_guard = config_locker.lock()?;

    let flags = ApplicationFlags { config_io, seed, theme_override };
    let mut settings = Settings::with_flags(flags);

    // handle exits ourselves (Event::CloseRequested)
    settings.id = Some("oximeter-dashboard".to_string());
    settings.window.exit_on_close_request = false;
    settings.window.size = Size::new(480.0, 860.0);
    settings.window.min_size = Some(Size::new(420.0, 600.0));
    settings.window.icon = make_icon();

    // this function will call process::exit() unless there was a startup error
    OximeterApplication::run(settings)?;
    Ok(())
}
