/*!
 * Terminal I/O
 * Raw-mode keyboard input and line-oriented drawing
 */

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, text::Line, widgets::Paragraph, Terminal};
use std::io::{self, Stdout};
use std::time::Duration;

use crate::error::RenderError;

/// A key press, reduced to what the dashboard distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Letters are stored lowercase.
    Char(char),
    Space,
    Escape,
    /// Ctrl-C; raw mode turns it into a key instead of a signal.
    Interrupt,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    Pause,
    SortByName,
    SortBySignal,
    None,
}

impl Key {
    pub fn command(self) -> Command {
        match self {
            Key::Char('q') | Key::Escape | Key::Interrupt => Command::Quit,
            Key::Char('p') | Key::Space => Command::Pause,
            Key::Char('n') => Command::SortByName,
            Key::Char('s') => Command::SortBySignal,
            _ => Command::None,
        }
    }

    pub fn is_quit(self) -> bool {
        self.command() == Command::Quit
    }

    /// Short name shown in the footer.
    pub fn label(self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::Space => "Space".to_string(),
            Key::Escape => "Esc".to_string(),
            Key::Interrupt => "Ctrl-C".to_string(),
            Key::Other => "other".to_string(),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Key::Interrupt,
            KeyCode::Char(' ') => Key::Space,
            KeyCode::Char(c) => Key::Char(c.to_ascii_lowercase()),
            KeyCode::Esc => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// The character grid the dashboard draws on.
pub trait Console {
    fn clear(&mut self) -> Result<(), RenderError>;

    /// Replace the visible content with `lines`, top-aligned.
    fn draw(&mut self, lines: &[Line<'_>]) -> Result<(), RenderError>;

    /// Next pending key press, without waiting.
    fn poll_key(&mut self) -> io::Result<Option<Key>>;

    /// Block until a key is pressed.
    fn read_key(&mut self) -> io::Result<Key>;
}

pub struct TerminalConsole {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalConsole {
    /// Enter raw mode and the alternate screen.
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.hide_cursor()?;
        Ok(Self { terminal })
    }

    pub fn restore(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

fn key_press(event: Event) -> Option<Key> {
    match event {
        // Some platforms report releases too
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(Key::from(key)),
        _ => None,
    }
}

impl Console for TerminalConsole {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.terminal.clear()?;
        Ok(())
    }

    fn draw(&mut self, lines: &[Line<'_>]) -> Result<(), RenderError> {
        self.terminal
            .draw(|f| f.render_widget(Paragraph::new(lines.to_vec()), f.area()))?;
        Ok(())
    }

    fn poll_key(&mut self) -> io::Result<Option<Key>> {
        while event::poll(Duration::ZERO)? {
            if let Some(key) = key_press(event::read()?) {
                return Ok(Some(key));
            }
        }
        Ok(None)
    }

    fn read_key(&mut self) -> io::Result<Key> {
        loop {
            if let Some(key) = key_press(event::read()?) {
                return Ok(key);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_key_events() {
        let press = |code| Key::from(KeyEvent::new(code, KeyModifiers::NONE));
        assert_eq!(press(KeyCode::Char('Q')), Key::Char('q'));
        assert_eq!(press(KeyCode::Char(' ')), Key::Space);
        assert_eq!(press(KeyCode::Esc), Key::Escape);
        assert_eq!(press(KeyCode::Enter), Key::Other);
        assert_eq!(
            Key::from(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Key::Interrupt
        );
    }

    #[test]
    fn commands_for_keys() {
        assert_eq!(Key::Char('q').command(), Command::Quit);
        assert_eq!(Key::Escape.command(), Command::Quit);
        assert_eq!(Key::Interrupt.command(), Command::Quit);
        assert_eq!(Key::Space.command(), Command::Pause);
        assert_eq!(Key::Char('p').command(), Command::Pause);
        assert_eq!(Key::Char('n').command(), Command::SortByName);
        assert_eq!(Key::Char('s').command(), Command::SortBySignal);
        assert_eq!(Key::Char('x').command(), Command::None);
        assert_eq!(Key::Other.command(), Command::None);
    }

    #[test]
    fn release_events_are_ignored() {
        let mut release = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        assert_eq!(key_press(Event::Key(release)), None);
        assert_eq!(key_press(Event::FocusGained), None);
    }
}
