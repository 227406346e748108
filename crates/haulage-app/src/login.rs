//! Login form state machine.
//!
//! Exchanges credentials for a bearer token. Success shows a banner, asks
//! the runtime to persist the token, and redirects to the dashboard after a
//! fixed delay counted in ticks. A 401 gets the invalid-credentials
//! message; transport and unexpected failures get the generic one.

use haulage_api::{LoginFailure, Session};
use haulage_core::FieldErrors;

use crate::{AppAction, state::Feedback};

/// Ticks the success banner stays up before the redirect. At the runtime's
/// 100 ms tick rate this is a 2 s delay.
pub const REDIRECT_TICKS: u8 = 20;

const REQUIRED_MSG: &str = "This field is required.";
const SUCCESS_MSG: &str = "Login successful! Redirecting to the dashboard...";
const INVALID_CREDENTIALS_MSG: &str = "Invalid email or password. Please try again.";
const GENERIC_MSG: &str = "An error occurred. Please try again later.";

/// Login form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    /// Account email.
    Email,
    /// Account password.
    Password,
}

impl LoginField {
    /// Wire name, matching server error maps.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Password => "password",
        }
    }

    /// Label for rendering.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Email => "Email",
            Self::Password => "Password",
        }
    }
}

/// Login form state machine.
#[derive(Debug, Clone)]
pub struct LoginForm {
    email: String,
    password: String,
    focus: LoginField,
    submitting: bool,
    feedback: Option<Feedback>,
    field_errors: FieldErrors,
    /// Ticks left until the post-login redirect. `None` when idle.
    redirect_in: Option<u8>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginForm {
    /// Empty form focused on the email field.
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
            submitting: false,
            feedback: None,
            field_errors: FieldErrors::new(),
            redirect_in: None,
        }
    }

    /// Toggle focus between email and password.
    pub fn toggle_focus(&mut self) -> Vec<AppAction> {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
        vec![AppAction::Render]
    }

    /// Append a character to the focused field.
    pub fn input_char(&mut self, c: char) -> Vec<AppAction> {
        match self.focus {
            LoginField::Email => self.email.push(c),
            LoginField::Password => self.password.push(c),
        }
        vec![AppAction::Render]
    }

    /// Delete the last character of the focused field.
    pub fn backspace(&mut self) -> Vec<AppAction> {
        match self.focus {
            LoginField::Email => self.email.pop(),
            LoginField::Password => self.password.pop(),
        };
        vec![AppAction::Render]
    }

    /// Submit the credentials.
    pub fn submit(&mut self) -> Vec<AppAction> {
        if self.submitting {
            return vec![];
        }

        let mut errors = FieldErrors::new();
        for field in [LoginField::Email, LoginField::Password] {
            if self.value(field).trim().is_empty() {
                errors.insert(field.key().to_string(), vec![REQUIRED_MSG.to_string()]);
            }
        }
        if !errors.is_empty() {
            self.field_errors = errors;
            return vec![AppAction::Render];
        }

        self.submitting = true;
        self.feedback = None;
        self.field_errors.clear();
        vec![
            AppAction::SubmitLogin { email: self.email.clone(), password: self.password.clone() },
            AppAction::Render,
        ]
    }

    /// Credentials were exchanged for a token. Fields clear, the token goes
    /// to the store, and the redirect countdown starts.
    pub fn on_login_succeeded(&mut self, session: Session) -> Vec<AppAction> {
        self.submitting = false;
        self.email.clear();
        self.password.clear();
        self.field_errors.clear();
        self.feedback = Some(Feedback::success(SUCCESS_MSG));
        self.redirect_in = Some(REDIRECT_TICKS);
        vec![AppAction::StoreToken { session }, AppAction::Render]
    }

    /// Login failed. Entered values persist.
    pub fn on_login_failed(&mut self, failure: LoginFailure) -> Vec<AppAction> {
        self.submitting = false;
        match failure {
            LoginFailure::InvalidCredentials => {
                self.feedback = Some(Feedback::error(INVALID_CREDENTIALS_MSG));
            },
            LoginFailure::Fields(map) => {
                self.field_errors = map;
            },
            LoginFailure::Other => {
                self.feedback = Some(Feedback::error(GENERIC_MSG));
            },
        }
        vec![AppAction::Render]
    }

    /// Advance the redirect countdown. Returns `true` on the tick the
    /// redirect fires; it fires at most once per login.
    pub fn on_tick(&mut self) -> bool {
        match self.redirect_in {
            Some(1) => {
                self.redirect_in = None;
                true
            },
            Some(n) => {
                self.redirect_in = Some(n - 1);
                false
            },
            None => false,
        }
    }

    /// Entered value of a field.
    pub fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    /// Field with input focus.
    pub fn focus(&self) -> LoginField {
        self.focus
    }

    /// Whether a login is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Whether the redirect countdown is running.
    pub fn redirect_pending(&self) -> bool {
        self.redirect_in.is_some()
    }

    /// Current feedback banner.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Validation errors for one field.
    pub fn errors_for(&self, field: LoginField) -> &[String] {
        self.field_errors.get(field.key()).map_or(&[], Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::FeedbackKind;

    fn filled_form() -> LoginForm {
        let mut form = LoginForm::new();
        for c in "driver@example.com".chars() {
            let _ = form.input_char(c);
        }
        let _ = form.toggle_focus();
        for c in "hunter2".chars() {
            let _ = form.input_char(c);
        }
        form
    }

    #[test]
    fn submit_carries_the_entered_credentials() {
        let mut form = filled_form();

        let actions = form.submit();

        assert!(matches!(
            actions.as_slice(),
            [AppAction::SubmitLogin { email, password }, AppAction::Render]
                if email == "driver@example.com" && password == "hunter2"
        ));
        assert!(form.is_submitting());
    }

    #[test]
    fn empty_fields_do_not_submit() {
        let mut form = LoginForm::new();

        let actions = form.submit();

        assert_eq!(actions, vec![AppAction::Render]);
        assert!(!form.is_submitting());
        assert_eq!(form.errors_for(LoginField::Email), [REQUIRED_MSG]);
        assert_eq!(form.errors_for(LoginField::Password), [REQUIRED_MSG]);
    }

    #[test]
    fn second_submit_while_in_flight_is_a_noop() {
        let mut form = filled_form();

        let _ = form.submit();
        let actions = form.submit();

        assert!(actions.is_empty());
    }

    #[test]
    fn success_clears_fields_and_stores_the_token() {
        let mut form = filled_form();
        let _ = form.submit();

        let actions = form.on_login_succeeded(Session::new("tok-xyz"));

        assert!(matches!(
            actions.as_slice(),
            [AppAction::StoreToken { session }, AppAction::Render]
                if session.token() == "tok-xyz"
        ));
        assert_eq!(form.value(LoginField::Email), "");
        assert_eq!(form.value(LoginField::Password), "");
        assert_eq!(form.feedback().map(|f| f.text.as_str()), Some(SUCCESS_MSG));
        assert!(form.redirect_pending());
    }

    #[test]
    fn redirect_fires_once_after_the_full_delay() {
        let mut form = filled_form();
        let _ = form.submit();
        let _ = form.on_login_succeeded(Session::new("tok-xyz"));

        for _ in 0..usize::from(REDIRECT_TICKS) - 1 {
            assert!(!form.on_tick());
        }
        assert!(form.on_tick());
        assert!(!form.on_tick());
        assert!(!form.redirect_pending());
    }

    #[test]
    fn invalid_credentials_get_the_exact_message() {
        let mut form = filled_form();
        let _ = form.submit();

        let _ = form.on_login_failed(LoginFailure::InvalidCredentials);

        let feedback = form.feedback().expect("failure banner");
        assert_eq!(feedback.kind, FeedbackKind::Error);
        assert_eq!(feedback.text, "Invalid email or password. Please try again.");
        // Entered values persist on failure
        assert_eq!(form.value(LoginField::Email), "driver@example.com");
    }

    #[test]
    fn other_failures_get_the_generic_message() {
        let mut form = filled_form();
        let _ = form.submit();

        let _ = form.on_login_failed(LoginFailure::Other);

        assert_eq!(
            form.feedback().map(|f| f.text.as_str()),
            Some("An error occurred. Please try again later.")
        );
    }

    #[test]
    fn server_field_errors_display_per_field() {
        let mut form = filled_form();
        let _ = form.submit();

        let mut map = FieldErrors::new();
        map.insert("email".to_string(), vec!["Enter a valid email address.".to_string()]);
        let _ = form.on_login_failed(LoginFailure::Fields(map));

        assert_eq!(form.errors_for(LoginField::Email), ["Enter a valid email address."]);
        assert!(form.feedback().is_none());
    }
}
