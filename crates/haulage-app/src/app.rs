//! Top-level application state machine.
//!
//! [`App`] routes events to the screen that owns them and switches screens:
//! login until a session exists, then the driver dashboard or the creation
//! form depending on the actor's role. Completion events always reach the
//! owning screen, active or not.
//!
//! This is a pure state machine: it consumes [`crate::AppEvent`] inputs and
//! produces [`crate::AppAction`] instructions for the runtime to execute.

use haulage_api::Session;
use haulage_core::{ActorRole, LifecyclePolicy};

use crate::{AppAction, AppEvent, CreateForm, Dashboard, KeyInput, LoginForm, Screen};

/// Top-level application state machine.
#[derive(Debug, Clone)]
pub struct App {
    /// Screen with input focus.
    screen: Screen,
    /// Session from login or restore. `None` until logged in.
    session: Option<Session>,
    /// Role of the acting user.
    role: ActorRole,
    /// Driver trip list.
    dashboard: Dashboard,
    /// Trip creation form.
    create: CreateForm,
    /// Credential entry.
    login: LoginForm,
    /// Terminal dimensions (columns, rows).
    terminal_size: (u16, u16),
}

impl App {
    /// Create an App for the given actor.
    ///
    /// With a restored session [`App::bootstrap`] skips the login screen;
    /// without one the app starts at credential entry.
    pub fn new(role: ActorRole, policy: LifecyclePolicy, session: Option<Session>) -> Self {
        Self {
            screen: Screen::Login,
            session,
            role,
            dashboard: Dashboard::new(role, policy),
            create: CreateForm::new(),
            login: LoginForm::new(),
            terminal_size: (80, 24),
        }
    }

    /// Enter the initial screen. Called once before the event loop.
    pub fn bootstrap(&mut self) -> Vec<AppAction> {
        if self.session.is_some() {
            self.enter_home_screen()
        } else {
            vec![AppAction::Render]
        }
    }

    /// Process an event and return actions.
    pub fn handle(&mut self, event: AppEvent) -> Vec<AppAction> {
        match event {
            AppEvent::Key(key) => self.on_key(key),
            AppEvent::Tick => {
                if self.screen == Screen::Login && self.login.on_tick() {
                    return self.enter_home_screen();
                }
                vec![]
            },
            AppEvent::Resize(cols, rows) => {
                self.terminal_size = (cols, rows);
                vec![AppAction::Render]
            },
            AppEvent::TripsLoaded { trips } => self.dashboard.on_trips_loaded(trips),
            AppEvent::TripsLoadFailed { message } => self.dashboard.on_trips_load_failed(message),
            AppEvent::TransitionApplied { id, action } => {
                self.dashboard.on_transition_applied(id, action)
            },
            AppEvent::TransitionFailed { action, .. } => {
                self.dashboard.on_transition_failed(action)
            },
            AppEvent::TripCreated { .. } => self.create.on_created(),
            AppEvent::TripCreateFailed { field_errors } => {
                self.create.on_create_failed(field_errors)
            },
            AppEvent::LoginSucceeded { session } => {
                self.session = Some(session.clone());
                self.login.on_login_succeeded(session)
            },
            AppEvent::LoginFailed { failure } => self.login.on_login_failed(failure),
        }
    }

    fn on_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        if key == KeyInput::Esc {
            return vec![AppAction::Quit];
        }
        match self.screen {
            Screen::Login => self.login_key(key),
            Screen::Dashboard => self.dashboard_key(key),
            Screen::Create => self.create_key(key),
        }
    }

    fn login_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Char(c) => self.login.input_char(c),
            KeyInput::Backspace => self.login.backspace(),
            KeyInput::Tab | KeyInput::Up | KeyInput::Down => self.login.toggle_focus(),
            KeyInput::Enter => self.login.submit(),
            _ => vec![],
        }
    }

    fn dashboard_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Up => self.dashboard.cursor_up(),
            KeyInput::Down => self.dashboard.cursor_down(),
            KeyInput::Enter => match self.dashboard.trip_under_cursor().map(|trip| trip.id) {
                Some(id) => self.dashboard.select(id),
                None => vec![],
            },
            KeyInput::Char('a') => match self.dashboard.trip_under_cursor().map(|trip| trip.id) {
                Some(id) => self.dashboard.accept(id),
                None => vec![],
            },
            KeyInput::Char('s') => self.dashboard.start(),
            KeyInput::Char('e') => self.dashboard.end(),
            KeyInput::Char('r') => self.dashboard.refresh(),
            KeyInput::Char('x') => self.dashboard.dismiss_feedback(),
            KeyInput::Tab => self.switch_screen(Screen::Create),
            _ => vec![],
        }
    }

    fn create_key(&mut self, key: KeyInput) -> Vec<AppAction> {
        match key {
            KeyInput::Up => self.create.focus_prev(),
            KeyInput::Down => self.create.focus_next(),
            KeyInput::Left => self.create.vehicle_prev(),
            KeyInput::Right => self.create.vehicle_next(),
            KeyInput::Enter => self.create.submit(),
            KeyInput::Backspace => self.create.backspace(),
            KeyInput::Char(c) => self.create.input_char(c),
            KeyInput::Tab => self.switch_screen(Screen::Dashboard),
            KeyInput::Esc => vec![],
        }
    }

    /// Entering the dashboard always refetches, mirroring a list view that
    /// fetches on mount.
    fn switch_screen(&mut self, screen: Screen) -> Vec<AppAction> {
        self.screen = screen;
        if screen == Screen::Dashboard {
            self.dashboard.refresh()
        } else {
            vec![AppAction::Render]
        }
    }

    fn enter_home_screen(&mut self) -> Vec<AppAction> {
        if self.role.may_advance() {
            self.switch_screen(Screen::Dashboard)
        } else {
            self.switch_screen(Screen::Create)
        }
    }

    /// Screen with input focus.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Current session. `None` until logged in.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Role of the acting user.
    pub fn role(&self) -> ActorRole {
        self.role
    }

    /// Driver trip list state.
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// Trip creation form state.
    pub fn create_form(&self) -> &CreateForm {
        &self.create
    }

    /// Login form state.
    pub fn login_form(&self) -> &LoginForm {
        &self.login
    }

    /// Terminal dimensions (columns, rows).
    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }
}
