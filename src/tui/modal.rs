// Modal system for TUI overlays
//
// Modals handle their own input and return an action. App holds
// Option<Modal>; the input router applies the returned ModalAction.

use crate::model::Character;
use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    Close,
    /// Copy the shown character as JSON
    Copy,
}

/// Available modal types
#[derive(Debug, Clone)]
pub enum Modal {
    /// Keyboard shortcuts
    Help,
    /// Full record of one character
    Detail(Box<Character>),
}

impl Modal {
    pub fn detail(character: Character) -> Self {
        Modal::Detail(Box::new(character))
    }

    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::Detail(_) => match key {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => ModalAction::Close,
                KeyCode::Char('y') => ModalAction::Copy,
                _ => ModalAction::None,
            },
        }
    }

    pub fn character(&self) -> Option<&Character> {
        match self {
            Modal::Detail(character) => Some(character),
            Modal::Help => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::character;

    #[test]
    fn test_detail_modal_actions() {
        let modal = Modal::detail(character("1", "Rick", "Earth"));
        assert_eq!(modal.handle_input(KeyCode::Char('y')), ModalAction::Copy);
        assert_eq!(modal.handle_input(KeyCode::Esc), ModalAction::Close);
        assert_eq!(modal.handle_input(KeyCode::Char('x')), ModalAction::None);
        assert_eq!(modal.character().map(|c| c.id.as_str()), Some("1"));
    }

    #[test]
    fn test_help_modal_ignores_copy() {
        let modal = Modal::Help;
        assert_eq!(modal.handle_input(KeyCode::Char('y')), ModalAction::None);
        assert_eq!(modal.handle_input(KeyCode::Char('?')), ModalAction::Close);
        assert!(modal.character().is_none());
    }
}
