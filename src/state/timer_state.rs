//! Blinking state tracking

use serde::{Deserialize, Serialize};

/// Whether the reminder timer is currently firing cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlinkingState {
    Running,
    #[default]
    Stopped,
}

impl BlinkingState {
    /// Check if the reminder is running
    pub fn is_running(self) -> bool {
        self == BlinkingState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_stopped() {
        assert_eq!(BlinkingState::default(), BlinkingState::Stopped);
        assert!(!BlinkingState::default().is_running());
        assert_eq!(serde_json::to_string(&BlinkingState::Running).unwrap(), "\"running\"");
    }
}
