use std::convert::Infallible;
use iced::subscription::{self, Subscription};
use futures::SinkExt;
use futures::channel::mpsc::Sender;
use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;
use tokio::time::{sleep, Duration};

use crate::device::constants::{BATTERY_DRAIN_INTERVAL, CONNECT_DELAY, SCAN_DELAY};
use crate::device::types::{DeviceEvent, DeviceState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    Scanning,
    Connecting,
    Connected,
}

impl LinkState {
    fn device_state(&self) -> DeviceState {
        match self {
            LinkState::Scanning => DeviceState::Scanning,
            LinkState::Connecting => DeviceState::Connecting,
            LinkState::Connected => DeviceState::Connected,
        }
    }
}

/// How long to wait in `state` and which state follows it.
fn next_step(state: LinkState) -> (Duration, LinkState) {
    match state {
        LinkState::Scanning => (Duration::from_millis(SCAN_DELAY), LinkState::Connecting),
        LinkState::Connecting => (Duration::from_millis(CONNECT_DELAY), LinkState::Connected),
        LinkState::Connected => (Duration::from_millis(BATTERY_DRAIN_INTERVAL), LinkState::Connected),
    }
}

async fn send_event(sender: &mut Sender<DeviceEvent>, event: DeviceEvent) -> bool {
    match sender.send(event).await {
        Ok(_) => true,
        Err(err) => {
            warn!("Failed to send DeviceEvent: {:?}", err);
            false
        },
    }
}

async fn connect_device(cancel: CancellationToken, mut sender: Sender<DeviceEvent>) -> Infallible {
    let mut link_state = LinkState::Scanning;
    let mut previous_device_state: Option<DeviceState> = None;

    'mainloop: loop {
        let device_state = link_state.device_state();

        if previous_device_state.as_ref() != Some(&device_state) {
            info!("Device link state: {:?}", device_state);
            if !send_event(&mut sender, DeviceEvent::StateChange(device_state.clone())).await {
                break 'mainloop;
            }
            previous_device_state = Some(device_state);
        }

        let (delay, next_state) = next_step(link_state);

        tokio::select! {
            _ = cancel.cancelled() => {
                break 'mainloop;
            },
            _ = sleep(delay) => {},
        }

        if link_state == LinkState::Connected && next_state == LinkState::Connected {
            debug!("Battery drained by one percent");
            if !send_event(&mut sender, DeviceEvent::BatteryDrained).await {
                break 'mainloop;
            }
        }

        link_state = next_state;
    }

    info!("Device link stopped");

    // note: subscription::channel expects the future to never resolve (Infallible)
    std::future::pending().await
}

pub fn connect_device_subscription(cancel: CancellationToken) -> Subscription<DeviceEvent> {
    struct Connect;

    subscription::channel(
        std::any::TypeId::of::<Connect>(),
        64,
        move |subscription_sender| {
            let cancel2 = cancel.clone();

            async move {
                connect_device(cancel2, subscription_sender).await
            }
        },
    )
}
