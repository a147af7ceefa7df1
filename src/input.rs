use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

use crate::entities::GameState;
use crate::sim::TickInput;

/// How long held keys survive without a fresh press on terminals that never
/// report key releases. Longer than the usual OS key-repeat delay.
const AUTO_RELEASE_AFTER: Duration = Duration::from_millis(600);

/// Represents semantic game actions that can be triggered by input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Fire,
    Restart,
    Quit,
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default)]
struct KeyState {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    fire: bool,
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    key_state: KeyState,
    oneshot_actions: Vec<InputAction>,
    /// Whether the terminal sends release events
    reports_release: bool,
    /// Last press or repeat of a held key, for terminals without releases
    last_held_press: Option<Instant>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputManager {
    pub fn new(reports_release: bool) -> Self {
        Self {
            key_state: KeyState::default(),
            oneshot_actions: Vec::new(),
            reports_release,
            last_held_press: None,
        }
    }

    /// Polls for all input events and stores one-shot actions
    /// Should be called once per frame before getting actions
    pub fn poll_events(&mut self, game_state: &GameState) -> color_eyre::Result<()> {
        self.begin_frame();

        // Poll for all available events without blocking
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key_event) = event::read()? {
                self.handle_key_event(key_event, game_state);
            }
        }

        Ok(())
    }

    fn begin_frame(&mut self) {
        self.begin_frame_at(Instant::now());
    }

    /// Clears last frame's one-shots and drops stale held keys
    fn begin_frame_at(&mut self, now: Instant) {
        self.oneshot_actions.clear();

        if !self.reports_release {
            let stale = self
                .last_held_press
                .is_none_or(|pressed| now.duration_since(pressed) > AUTO_RELEASE_AFTER);
            if stale {
                self.key_state = KeyState::default();
                self.last_held_press = None;
            }
        }
    }

    /// Processes a key event and updates key state and one-shot actions
    pub fn handle_key_event(&mut self, key_event: KeyEvent, game_state: &GameState) {
        match key_event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.handle_key_press(key_event, game_state);
            }
            KeyEventKind::Release => {
                self.handle_key_release(key_event.code);
            }
        }
    }

    fn handle_key_press(&mut self, key_event: KeyEvent, game_state: &GameState) {
        // Quit works in any state
        if matches!(
            key_event.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc
        ) || (key_event.code == KeyCode::Char('c')
            && key_event.modifiers.contains(KeyModifiers::CONTROL))
        {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        // Restart is edge-triggered and only meaningful after the run ended
        if matches!(key_event.code, KeyCode::Char('r') | KeyCode::Char('R')) {
            if *game_state == GameState::GameOver && key_event.kind == KeyEventKind::Press {
                self.oneshot_actions.push(InputAction::Restart);
            }
            return;
        }

        let held = match key_event.code {
            // Movement keys - WASD
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = true;
                self.key_state.down = false;
                true
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = true;
                self.key_state.up = false;
                true
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = true;
                self.key_state.right = false;
                true
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = true;
                self.key_state.left = false;
                true
            }
            // Fire key
            KeyCode::Char(' ') => {
                self.key_state.fire = true;
                true
            }
            _ => false,
        };

        if held {
            self.last_held_press = Some(Instant::now());
        }
    }

    fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
                self.key_state.up = false;
            }
            KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
                self.key_state.down = false;
            }
            KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
                self.key_state.left = false;
            }
            KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
                self.key_state.right = false;
            }
            KeyCode::Char(' ') => {
                self.key_state.fire = false;
            }
            _ => {}
        }
    }

    /// Returns all actions for this frame (both continuous and one-shot)
    /// Must be called after poll_events()
    pub fn get_actions(&self, game_state: &GameState) -> Vec<InputAction> {
        let mut actions = Vec::new();

        // Add one-shot actions first
        actions.extend_from_slice(&self.oneshot_actions);

        // Held keys only steer the ship while playing
        if *game_state == GameState::Playing {
            if self.key_state.left {
                actions.push(InputAction::MoveLeft);
            }
            if self.key_state.right {
                actions.push(InputAction::MoveRight);
            }
            if self.key_state.up {
                actions.push(InputAction::MoveUp);
            }
            if self.key_state.down {
                actions.push(InputAction::MoveDown);
            }
            if self.key_state.fire {
                actions.push(InputAction::Fire);
            }
        }

        actions
    }
}

/// Fold a frame's actions into simulation intents
pub fn to_tick_input(actions: &[InputAction]) -> TickInput {
    let mut input = TickInput::default();
    for action in actions {
        match action {
            InputAction::MoveLeft => input.move_x -= 1,
            InputAction::MoveRight => input.move_x += 1,
            InputAction::MoveUp => input.move_y -= 1,
            InputAction::MoveDown => input.move_y += 1,
            InputAction::Fire => input.fire = true,
            InputAction::Restart => input.restart = true,
            InputAction::Quit => {}
        }
    }
    input.move_x = input.move_x.clamp(-1, 1);
    input.move_y = input.move_y.clamp(-1, 1);
    input
}
