//! Async runtime.
//!
//! Event loop that drives terminal I/O and executes the actions produced by
//! the [`App`] state machine. Uses `tokio::select!` to multiplex terminal
//! events, completions from spawned API calls, and a periodic tick.
//!
//! Every API call runs on its own task so the UI never blocks on the
//! network; results come back as [`AppEvent`]s over a channel.

use std::{
    io::{self, Stdout, stdout},
    sync::Arc,
    time::Duration,
};

use crossterm::{
    ExecutableCommand,
    event::{Event, EventStream, KeyCode, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use haulage_api::{ApiClient, ApiError, LoginFailure, Session, TokenStore, TripAnnouncer};
use haulage_app::{App, AppAction, AppEvent, KeyInput};
use haulage_core::{FieldErrors, NewTrip, TripAction, TripId, TripStatus};
use ratatui::{Terminal, backend::CrosstermBackend};
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{server::ServerHandle, ui};

const EVENT_CHANNEL_CAPACITY: usize = 32;
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// I/O error from terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Async runtime for the TUI.
///
/// Manages terminal setup/teardown and the main event loop. API calls are
/// spawned as tasks that report back through the event channel, so a slow
/// server never freezes input handling.
pub struct Runtime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    app: App,
    client: ApiClient,
    store: Arc<dyn TokenStore>,
    announcer: Arc<dyn TripAnnouncer>,
    events_tx: mpsc::Sender<AppEvent>,
    events_rx: mpsc::Receiver<AppEvent>,
    demo: Option<ServerHandle>,
}

impl Runtime {
    /// Set up the terminal and wire the runtime together.
    ///
    /// Pass a [`ServerHandle`] to keep an in-process demo server alive for
    /// the lifetime of the runtime.
    pub fn new(
        app: App,
        client: ApiClient,
        store: Arc<dyn TokenStore>,
        announcer: Arc<dyn TripAnnouncer>,
        demo: Option<ServerHandle>,
    ) -> Result<Self, RuntimeError> {
        enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;

        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        Ok(Self { terminal, app, client, store, announcer, events_tx, events_rx, demo })
    }

    /// Run the main event loop until the app asks to quit.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        let actions = self.app.bootstrap();
        if self.execute(actions)? {
            return Ok(());
        }

        let mut event_stream = EventStream::new();
        let mut tick_interval = tokio::time::interval(TICK_INTERVAL);

        loop {
            let should_quit = tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_terminal_event(event)?,
                        Some(Err(e)) => return Err(RuntimeError::Io(e)),
                        None => true,
                    }
                }

                // Completions from spawned API calls
                Some(event) = self.events_rx.recv() => {
                    let actions = self.app.handle(event);
                    self.execute(actions)?
                }

                // Periodic tick
                _ = tick_interval.tick() => {
                    let actions = self.app.handle(AppEvent::Tick);
                    self.execute(actions)?
                }
            };

            if should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Handle a terminal event and return whether to quit.
    fn handle_terminal_event(&mut self, event: Event) -> Result<bool, RuntimeError> {
        let app_event = match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                match Self::convert_key(key.code) {
                    Some(input) => AppEvent::Key(input),
                    None => return Ok(false),
                }
            },
            Event::Resize(cols, rows) => AppEvent::Resize(cols, rows),
            _ => return Ok(false),
        };

        let actions = self.app.handle(app_event);
        self.execute(actions)
    }

    /// Convert crossterm `KeyCode` to `KeyInput`.
    fn convert_key(code: KeyCode) -> Option<KeyInput> {
        match code {
            KeyCode::Char(c) => Some(KeyInput::Char(c)),
            KeyCode::Enter => Some(KeyInput::Enter),
            KeyCode::Backspace => Some(KeyInput::Backspace),
            KeyCode::Tab => Some(KeyInput::Tab),
            KeyCode::Esc => Some(KeyInput::Esc),
            KeyCode::Left => Some(KeyInput::Left),
            KeyCode::Right => Some(KeyInput::Right),
            KeyCode::Up => Some(KeyInput::Up),
            KeyCode::Down => Some(KeyInput::Down),
            _ => None,
        }
    }

    /// Execute actions returned by the app. Returns true if should quit.
    fn execute(&mut self, actions: Vec<AppAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                AppAction::Render => self.render()?,
                AppAction::Quit => return Ok(true),
                AppAction::FetchTrips => self.spawn_fetch(),
                AppAction::SubmitTransition { id, action, status } => {
                    self.spawn_transition(id, action, status);
                },
                AppAction::SubmitCreate { draft } => self.spawn_create(draft),
                AppAction::SubmitLogin { email, password } => self.spawn_login(email, password),
                AppAction::Announce { draft } => self.spawn_announce(draft),
                AppAction::StoreToken { session } => self.store_token(&session),
            }
        }
        Ok(false)
    }

    /// Fetch the trip list on a background task.
    fn spawn_fetch(&self) {
        let Some(session) = self.app.session().cloned() else {
            tracing::warn!("trip fetch requested without a session");
            return;
        };
        let client = self.client.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let event = match client.list_trips(&session).await {
                Ok(trips) => AppEvent::TripsLoaded { trips },
                Err(err) => {
                    tracing::warn!("trip fetch failed: {err}");
                    AppEvent::TripsLoadFailed { message: err.to_string() }
                },
            };
            let _ = tx.send(event).await;
        });
    }

    /// Submit a status transition on a background task.
    fn spawn_transition(&self, id: TripId, action: TripAction, status: TripStatus) {
        let Some(session) = self.app.session().cloned() else {
            tracing::warn!("transition requested without a session");
            return;
        };
        let client = self.client.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let event = match client.update_trip_status(id, status, &session).await {
                Ok(_) => AppEvent::TransitionApplied { id, action },
                Err(err) => {
                    tracing::warn!("trip {action} failed: {err}");
                    AppEvent::TransitionFailed { id, action }
                },
            };
            let _ = tx.send(event).await;
        });
    }

    /// Submit a new trip on a background task.
    fn spawn_create(&self, draft: NewTrip) {
        let client = self.client.clone();
        let session = self.app.session().cloned();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let event = match client.create_trip(&draft, session.as_ref()).await {
                Ok(trip) => AppEvent::TripCreated { trip },
                Err(ApiError::Validation(field_errors)) => {
                    AppEvent::TripCreateFailed { field_errors }
                },
                Err(err) => {
                    tracing::warn!("trip creation failed: {err}");
                    AppEvent::TripCreateFailed { field_errors: FieldErrors::new() }
                },
            };
            let _ = tx.send(event).await;
        });
    }

    /// Submit login credentials on a background task.
    fn spawn_login(&self, email: String, password: String) {
        let client = self.client.clone();
        let tx = self.events_tx.clone();

        tokio::spawn(async move {
            let event = match client.login(&email, &password).await {
                Ok(session) => AppEvent::LoginSucceeded { session },
                Err(err) => {
                    tracing::debug!("login failed: {err}");
                    AppEvent::LoginFailed { failure: LoginFailure::from(&err) }
                },
            };
            let _ = tx.send(event).await;
        });
    }

    /// Announce a created trip on a background task. Failures are logged
    /// and never surface in the UI.
    fn spawn_announce(&self, draft: NewTrip) {
        let announcer = Arc::clone(&self.announcer);

        tokio::spawn(async move {
            if let Err(err) = announcer.announce(&draft).await {
                tracing::warn!("trip announcement failed: {err}");
            }
        });
    }

    /// Persist the session token after a successful login.
    fn store_token(&self, session: &Session) {
        if let Err(err) = self.store.save(session) {
            tracing::warn!("failed to persist session token: {err}");
        }
    }

    /// Render the UI.
    fn render(&mut self) -> Result<(), RuntimeError> {
        self.terminal.draw(|frame| {
            ui::render(frame, &self.app);
        })?;
        Ok(())
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if let Some(ref demo) = self.demo {
            demo.stop();
        }

        let _ = disable_raw_mode();
        let _ = stdout().execute(LeaveAlternateScreen);
    }
}
