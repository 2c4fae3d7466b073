//! Terminal input.
//!
//! A reader thread forwards raw crossterm events into a channel; this module
//! drains it once per frame, turning them into discrete [`InputEvent`]s and a
//! table of held keys.
//!
//! Terminals that report key releases (kitty protocol) keep a key held until
//! its release arrives. Classic terminals only send presses and OS
//! auto-repeat, so there a key counts as held for [`FIRST_PRESS_WINDOW`]
//! after the first press and for [`HOLD_WINDOW`] after each repeat.

use std::collections::HashMap;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use space_shooter::platform::{HeldKeys, InputEvent, InputSource};

/// Covers the gap between OS auto-repeat events (≥ 15 Hz).
pub const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Covers the OS delay before auto-repeat starts.
pub const FIRST_PRESS_WINDOW: Duration = Duration::from_millis(600);

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    /// Each held key → when it stops counting as held, absent a release.
    held: HashMap<KeyCode, Instant>,
    /// Set once the terminal has sent a release; keys then never expire.
    reports_release: bool,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>) -> Self {
        Self {
            rx,
            held: HashMap::new(),
            reports_release: false,
        }
    }

    fn record(&mut self, event: Event, now: Instant, out: &mut Vec<InputEvent>) {
        match event {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => {
                let code = normalise(code);
                match kind {
                    KeyEventKind::Press => {
                        if let Some(e) = discrete(code, modifiers) {
                            out.push(e);
                        }
                        // Classic terminals report auto-repeat as more presses.
                        let window = if self.is_held(code, now) {
                            HOLD_WINDOW
                        } else {
                            FIRST_PRESS_WINDOW
                        };
                        self.held.insert(code, now + window);
                    }
                    KeyEventKind::Repeat => {
                        self.held.insert(code, now + HOLD_WINDOW);
                    }
                    KeyEventKind::Release => {
                        self.reports_release = true;
                        self.held.remove(&code);
                    }
                }
            }
            Event::Mouse(m) if matches!(m.kind, MouseEventKind::Down(_)) => {
                out.push(InputEvent::MouseDown);
            }
            _ => {}
        }
    }

    fn is_held(&self, key: KeyCode, now: Instant) -> bool {
        self.held
            .get(&key)
            .map(|&until| self.reports_release || now <= until)
            .unwrap_or(false)
    }

    fn held_at(&self, now: Instant) -> HeldKeys {
        let any = |keys: &[KeyCode]| keys.iter().any(|&k| self.is_held(k, now));
        HeldKeys {
            left: any(&[KeyCode::Char('a'), KeyCode::Left]),
            right: any(&[KeyCode::Char('d'), KeyCode::Right]),
            up: any(&[KeyCode::Char('w'), KeyCode::Up]),
            down: any(&[KeyCode::Char('s'), KeyCode::Down]),
            fire: any(&[KeyCode::Char(' ')]),
        }
    }
}

/// Fold letter case so Shift or Caps Lock don't change the binding.
fn normalise(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

fn discrete(code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Close),
        KeyCode::Char('q') | KeyCode::Esc => Some(InputEvent::Close),
        KeyCode::Enter => Some(InputEvent::Confirm),
        _ => None,
    }
}

impl InputSource for TerminalInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let now = Instant::now();
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            self.record(event, now, &mut events);
        }
        events
    }

    fn held_keys(&self) -> HeldKeys {
        self.held_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventState, MouseButton, MouseEvent};

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn input() -> (mpsc::Sender<Event>, TerminalInput) {
        let (tx, rx) = mpsc::channel();
        (tx, TerminalInput::new(rx))
    }

    #[test]
    fn first_press_outlasts_the_auto_repeat_delay() {
        let (_tx, mut inp) = input();
        let t0 = Instant::now();
        let mut evs = Vec::new();
        inp.record(key(KeyCode::Char('a'), KeyEventKind::Press), t0, &mut evs);

        assert!(inp.held_at(t0).left);
        assert!(inp.held_at(t0 + Duration::from_millis(500)).left);
        assert!(inp.held_at(t0 + FIRST_PRESS_WINDOW).left);
        assert!(!inp.held_at(t0 + FIRST_PRESS_WINDOW + Duration::from_millis(1)).left);
        assert!(evs.is_empty());
    }

    #[test]
    fn repeats_hold_for_the_short_window() {
        let (_tx, mut inp) = input();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(500);
        let mut evs = Vec::new();
        inp.record(key(KeyCode::Char('d'), KeyEventKind::Press), t0, &mut evs);
        // Auto-repeat arrives as another press while the key is still held.
        inp.record(key(KeyCode::Char('d'), KeyEventKind::Press), t1, &mut evs);

        assert!(inp.held_at(t1 + HOLD_WINDOW).right);
        assert!(!inp.held_at(t1 + HOLD_WINDOW + Duration::from_millis(1)).right);

        inp.record(key(KeyCode::Char('d'), KeyEventKind::Repeat), t1 + HOLD_WINDOW, &mut evs);
        assert!(inp.held_at(t1 + HOLD_WINDOW * 2).right);
        assert!(!inp.held_at(t1 + HOLD_WINDOW * 2 + Duration::from_millis(1)).right);
    }

    #[test]
    fn press_after_expiry_starts_a_new_first_window() {
        let (_tx, mut inp) = input();
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_secs(2);
        let mut evs = Vec::new();
        inp.record(key(KeyCode::Char('w'), KeyEventKind::Press), t0, &mut evs);
        inp.record(key(KeyCode::Char('w'), KeyEventKind::Press), t1, &mut evs);
        assert!(inp.held_at(t1 + FIRST_PRESS_WINDOW).up);
    }

    #[test]
    fn release_capable_terminal_holds_until_release() {
        let (_tx, mut inp) = input();
        let t0 = Instant::now();
        let mut evs = Vec::new();
        inp.record(key(KeyCode::Char(' '), KeyEventKind::Press), t0, &mut evs);
        inp.record(key(KeyCode::Char(' '), KeyEventKind::Release), t0, &mut evs);
        assert!(!inp.held_at(t0).fire);

        inp.record(key(KeyCode::Char(' '), KeyEventKind::Press), t0, &mut evs);
        assert!(inp.held_at(t0 + Duration::from_secs(5)).fire);
    }

    #[test]
    fn uppercase_and_arrows_share_bindings() {
        let (_tx, mut inp) = input();
        let t0 = Instant::now();
        let mut evs = Vec::new();
        inp.record(key(KeyCode::Char('D'), KeyEventKind::Press), t0, &mut evs);
        inp.record(key(KeyCode::Up, KeyEventKind::Press), t0, &mut evs);
        let held = inp.held_at(t0);
        assert!(held.right && held.up);
        assert!(!held.left && !held.down && !held.fire);
    }

    #[test]
    fn quit_keys_and_clicks_become_events() {
        let (tx, mut inp) = input();
        tx.send(key(KeyCode::Char('Q'), KeyEventKind::Press)).unwrap();
        tx.send(key(KeyCode::Enter, KeyEventKind::Press)).unwrap();
        tx.send(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        }))
        .unwrap();
        tx.send(Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)))
            .unwrap();

        assert_eq!(
            inp.poll_events(),
            vec![
                InputEvent::Close,
                InputEvent::Confirm,
                InputEvent::MouseDown,
                InputEvent::Close
            ]
        );
        assert!(inp.poll_events().is_empty());
    }
}
