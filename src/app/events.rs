use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use tokio::time::interval;

use crate::domain::weather::WeatherReport;

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickClock,
    Input(Event),
    FetchSucceeded { request_id: u64, report: WeatherReport },
    FetchFailed { request_id: u64, message: String },
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_frame_task(tx: tokio::sync::mpsc::Sender<AppEvent>, fps: u8) {
    let fps = fps.max(15);
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

/// Drives the once-per-second redraw of the city clock.
pub fn start_clock_task(tx: tokio::sync::mpsc::Sender<AppEvent>) {
    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1));
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickClock).await.is_err() {
                break;
            }
        }
    });
}
