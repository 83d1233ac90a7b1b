use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::snake::{Direction, Direction::*, Snake};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ControlSet {
    Wasd,
    Arrows,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Steer(ControlSet, Direction),
    Pause,
    Go,
    Halt,
    Quit,
    Ignored,
}

pub fn key_action(ev: &KeyEvent) -> KeyAction {
    if is_ctrl_c(ev) {
        return KeyAction::Quit;
    }

    match ev.code {
        KeyCode::Char('w') => KeyAction::Steer(ControlSet::Wasd, Up),
        KeyCode::Char('a') => KeyAction::Steer(ControlSet::Wasd, Left),
        KeyCode::Char('s') => KeyAction::Steer(ControlSet::Wasd, Down),
        KeyCode::Char('d') => KeyAction::Steer(ControlSet::Wasd, Right),
        KeyCode::Up => KeyAction::Steer(ControlSet::Arrows, Up),
        KeyCode::Left => KeyAction::Steer(ControlSet::Arrows, Left),
        KeyCode::Down => KeyAction::Steer(ControlSet::Arrows, Down),
        KeyCode::Right => KeyAction::Steer(ControlSet::Arrows, Right),
        KeyCode::Tab | KeyCode::Enter => KeyAction::Pause,
        KeyCode::Char('g') => KeyAction::Go,
        KeyCode::Char('h') => KeyAction::Halt,
        _ => KeyAction::Ignored,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

/// Routes control sets to snakes. With one player both sets drive the same
/// snake; with two, WASD drives the first and the arrows the second.
pub struct InputRouter {
    players: usize,
}

impl InputRouter {
    pub fn new(players: usize) -> Self {
        InputRouter { players }
    }

    pub fn snake_for(&self, set: ControlSet) -> usize {
        match set {
            ControlSet::Wasd => 0,
            ControlSet::Arrows => self.players - 1,
        }
    }

    /// Applies a direction change unless it reverses the heading the snake
    /// had at the start of the tick. Returns whether it was accepted.
    pub fn steer(&self, snakes: &mut [Snake], set: ControlSet, direction: Direction) -> bool {
        let snake = &mut snakes[self.snake_for(set)];
        if snake.previous_direction == Some(direction.opposite()) {
            return false;
        }
        snake.direction = Some(direction);
        true
    }
}
