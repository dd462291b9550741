//! Maps terminal input onto game input.

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use hanoi_core::{Pointer, PointerEvent};

/// Keyboard commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum KeyAction {
    /// Leave the game.
    Quit,
    /// Start over with a fresh board.
    Restart,
    /// Let the solver finish the game.
    Solve,
    /// Stop the solver.
    Stop,
    /// Drop the current drag, or leave when nothing is held.
    Back,
}

/// Translates a key press.
pub fn key_action(key: KeyCode) -> Option<KeyAction> {
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(KeyAction::Quit),
        KeyCode::Esc => Some(KeyAction::Back),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(KeyAction::Restart),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(KeyAction::Solve),
        KeyCode::Char('x') | KeyCode::Char('X') => Some(KeyAction::Stop),
        _ => None,
    }
}

/// Translates a left-button mouse event. Other buttons are ignored.
pub fn pointer_event(mouse: MouseEvent) -> Option<PointerEvent> {
    let at = Pointer::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Press(at)),
        MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => {
            Some(PointerEvent::Move(at))
        }
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Release(at)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind) -> MouseEvent {
        MouseEvent {
            kind,
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_left_button_lifecycle() {
        let at = Pointer::new(4, 7);
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(PointerEvent::Press(at))
        );
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Drag(MouseButton::Left))),
            Some(PointerEvent::Move(at))
        );
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(PointerEvent::Release(at))
        );
    }

    #[test]
    fn test_other_buttons_ignored() {
        assert_eq!(
            pointer_event(mouse(MouseEventKind::Down(MouseButton::Right))),
            None
        );
        assert_eq!(pointer_event(mouse(MouseEventKind::ScrollUp)), None);
    }

    #[test]
    fn test_keys() {
        assert_eq!(key_action(KeyCode::Char('q')), Some(KeyAction::Quit));
        assert_eq!(key_action(KeyCode::Esc), Some(KeyAction::Back));
        assert_eq!(key_action(KeyCode::Char('s')), Some(KeyAction::Solve));
        assert_eq!(key_action(KeyCode::Char('z')), None);
    }
}
