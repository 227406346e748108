//! Terminal-agnostic keyboard input.

/// Keyboard input abstraction.
///
/// Decouples the state machines from terminal libraries (crossterm, termion,
/// etc.) so tests can drive them with plain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    /// Printable character.
    Char(char),
    /// Enter/Return key (submit, or select on the dashboard).
    Enter,
    /// Backspace key (delete the last character of the focused field).
    Backspace,
    /// Tab key (switch screens; toggles focus on the login form).
    Tab,
    /// Escape key (quit).
    Esc,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
}
