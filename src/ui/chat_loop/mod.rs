//! Main chat event loop
//!
//! The loop owns the [`App`] outright: terminal events and backend results
//! both arrive over channels and are applied here, one at a time, before
//! the next frame is drawn.

mod keybindings;
mod lifecycle;

pub use self::keybindings::{handle_key_event, handle_paste, KeyResult};

use self::lifecycle::{restore_terminal, setup_terminal, ChatTerminal};

use crate::api::QaClient;
use crate::core::app::App;
use crate::core::ask_service::{AskService, ServiceEvent};
use crate::core::config::Config;
use crate::ui::renderer::ui;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const MAX_FPS: u64 = 60;
/// Redraw at least this often so the header clock stays current.
const CLOCK_REFRESH: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopControl {
    Continue { redraw: bool },
    Exit,
}

fn spawn_event_reader(
    event_tx: mpsc::UnboundedSender<Event>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while !cancel.is_cancelled() {
            // Use a short timeout to prevent blocking
            match event::poll(Duration::from_millis(10)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                    Err(err) => debug!(error = %err, "Failed to read terminal event"),
                },
                Ok(false) => tokio::task::yield_now().await,
                Err(err) => {
                    warn!(error = %err, "Terminal event polling failed");
                    break;
                }
            }
        }
    })
}

fn apply_terminal_event(app: &mut App, service: &AskService, ev: Event) -> LoopControl {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            match handle_key_event(app, &key) {
                KeyResult::Exit => return LoopControl::Exit,
                KeyResult::Submit(command) => {
                    service.spawn_ask(command.request_id, command.question);
                }
                KeyResult::Handled | KeyResult::NotHandled => {}
            }
            LoopControl::Continue { redraw: true }
        }
        Event::Paste(text) => {
            handle_paste(app, &text);
            LoopControl::Continue { redraw: true }
        }
        Event::Resize(_, _) => LoopControl::Continue { redraw: true },
        _ => LoopControl::Continue { redraw: false },
    }
}

fn process_terminal_events(
    app: &mut App,
    service: &AskService,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
) -> LoopControl {
    let mut redraw = false;
    while let Ok(ev) = event_rx.try_recv() {
        match apply_terminal_event(app, service, ev) {
            LoopControl::Exit => return LoopControl::Exit,
            LoopControl::Continue { redraw: r } => redraw |= r,
        }
    }
    LoopControl::Continue { redraw }
}

fn process_service_events(
    app: &mut App,
    service_rx: &mut mpsc::UnboundedReceiver<ServiceEvent>,
) -> bool {
    let mut received_any = false;
    while let Ok(event) = service_rx.try_recv() {
        app.apply_service_event(event);
        received_any = true;
    }
    received_any
}

async fn drive(
    terminal: &mut ChatTerminal,
    app: &mut App,
    service: &AskService,
    event_rx: &mut mpsc::UnboundedReceiver<Event>,
    service_rx: &mut mpsc::UnboundedReceiver<ServiceEvent>,
) -> io::Result<()> {
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now()
        .checked_sub(CLOCK_REFRESH)
        .unwrap_or_else(Instant::now);
    let mut request_redraw = true;

    loop {
        let now = Instant::now();
        let since_draw = now.duration_since(last_draw);
        let animating = app.is_animating(now);
        if (request_redraw || animating || since_draw >= CLOCK_REFRESH)
            && since_draw >= frame_duration
        {
            terminal.draw(|f| ui(f, app))?;
            last_draw = now;
            request_redraw = false;
        }

        let terminal_outcome = process_terminal_events(app, service, event_rx);
        let redraw_for_input = match terminal_outcome {
            LoopControl::Exit => return Ok(()),
            LoopControl::Continue { redraw } => redraw,
        };
        let received_any = process_service_events(app, service_rx);
        let pruned = app.notifications.prune(Instant::now());

        let busy = redraw_for_input || received_any || pruned;
        if busy {
            request_redraw = true;
        } else {
            tokio::time::sleep(frame_duration).await;
        }
    }
}

pub async fn run_chat(config: Config, base_url: String) -> Result<(), Box<dyn Error>> {
    let client = QaClient::new(base_url.clone(), config.timeout())?;
    let (service, mut service_rx) = AskService::new(Arc::new(client));
    let mut app = App::new(base_url, &config);
    info!(base_url = %app.base_url, "Starting chat session");
    service.spawn_suggestions();

    let mut terminal = setup_terminal()?;

    let cancel = CancellationToken::new();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<Event>();
    let reader = spawn_event_reader(event_tx, cancel.clone());

    let result = drive(
        &mut terminal,
        &mut app,
        &service,
        &mut event_rx,
        &mut service_rx,
    )
    .await;

    cancel.cancel();
    if let Err(err) = reader.await {
        debug!(error = %err, "Event reader task ended abnormally");
    }
    restore_terminal(&mut terminal)?;

    info!(answered = app.message_count, "Chat session ended");
    result.map_err(Into::into)
}
