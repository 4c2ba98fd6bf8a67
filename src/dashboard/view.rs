//! View state toggle
//!
//! The page shows exactly one of two views. Both transitions are
//! unconditional and idempotent.

use serde::{Deserialize, Serialize};

/// Which page is visible
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    #[default]
    Landing,
    Dashboard,
}

impl std::fmt::Display for ViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ViewState::Landing => write!(f, "landing"),
            ViewState::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// Owner of the visible view
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    state: ViewState,
}

impl ViewController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn is_dashboard(&self) -> bool {
        self.state == ViewState::Dashboard
    }

    /// Show the dashboard. Returns whether the view changed.
    pub fn enter_dashboard(&mut self) -> bool {
        self.transition(ViewState::Dashboard)
    }

    /// Show the landing page. Returns whether the view changed.
    pub fn return_to_landing(&mut self) -> bool {
        self.transition(ViewState::Landing)
    }

    fn transition(&mut self, next: ViewState) -> bool {
        if self.state == next {
            return false;
        }
        tracing::debug!(from = %self.state, to = %next, "View changed");
        self.state = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_on_landing() {
        let view = ViewController::new();
        assert_eq!(view.state(), ViewState::Landing);
        assert!(!view.is_dashboard());
    }

    #[test]
    fn test_transitions_are_idempotent() {
        let mut view = ViewController::new();
        assert!(view.enter_dashboard());
        assert!(!view.enter_dashboard());
        assert_eq!(view.state(), ViewState::Dashboard);

        assert!(view.return_to_landing());
        assert!(!view.return_to_landing());
        assert_eq!(view.state(), ViewState::Landing);
    }

    #[test]
    fn test_toggle_sequences_keep_one_view() {
        let sequences: [&[bool]; 4] = [
            &[true, true, false, true],
            &[false, false, true],
            &[true, false, true, false, false],
            &[],
        ];

        for seq in sequences {
            let mut view = ViewController::new();
            for &enter in seq {
                if enter {
                    view.enter_dashboard();
                    assert_eq!(view.state(), ViewState::Dashboard);
                } else {
                    view.return_to_landing();
                    assert_eq!(view.state(), ViewState::Landing);
                }
                assert_ne!(view.is_dashboard(), view.state() == ViewState::Landing);
            }
        }
    }
}
