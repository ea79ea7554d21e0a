mod game;

use serde::{Deserialize, Serialize};
use strum::Display;

pub use crate::action::game::GameAction;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display, Deserialize, Default)]
pub enum ActionState {
    #[default]
    Start,
    Repeat,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Deserialize)]
pub enum Command {
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    ToggleShowHelp,
    ToggleFullscreen,
    // Page commands
    Game(GameAction),
}

impl Command {
    /// Name shown in the help table.
    pub fn string(&self) -> String {
        match self {
            Command::Game(action) => action.to_string(),
            command => command.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub command: Command,
    pub state: ActionState,
}

macro_rules! act {
    ($command:expr) => {
        $crate::action::Action { command: $command, state: $crate::action::ActionState::default() }
    };
    ($command:expr, $state:expr) => {
        $crate::action::Action { command: $command, state: $state }
    };
}

pub(crate) use act;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_act_defaults_to_start() {
        let action = act!(Command::Quit);
        assert_eq!(action.state, ActionState::Start);
        assert_eq!(act!(Command::Quit, ActionState::End).state, ActionState::End);
    }

    #[test]
    fn test_command_string() {
        assert_eq!(Command::Game(GameAction::Flap).string(), "Flap");
        assert_eq!(Command::ToggleFullscreen.string(), "ToggleFullscreen");
    }

    #[test]
    fn test_command_from_yaml() {
        let command: Command = serde_yaml::from_str("ToggleShowHelp").unwrap();
        assert_eq!(command, Command::ToggleShowHelp);
        let action: GameAction = serde_yaml::from_str("Flap").unwrap();
        assert_eq!(action, GameAction::Flap);
    }
}
