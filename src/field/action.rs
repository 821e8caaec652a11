//! Unit actions and joint actions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{Direction, Side, UnitKey, SIDE_COUNT, UNITS_PER_SIDE};

/// What a single unit does on one turn.
///
/// Serialized as the judge's integer code: `-2` invalid, `-1` stay, `0..=3`
/// move up/right/down/left, `4..=7` fire in the same four directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Action {
    /// Sentinel for "no valid action chosen".
    #[default]
    Invalid,
    /// Do nothing.
    Stay,
    /// Move one cell.
    Move(Direction),
    /// Fire along a direction.
    Fire(Direction),
}

impl Action {
    /// Every structurally meaningful action (everything but [`Action::Invalid`]).
    pub const CHOICES: [Action; 9] = [
        Action::Stay,
        Action::Move(Direction::Up),
        Action::Move(Direction::Right),
        Action::Move(Direction::Down),
        Action::Move(Direction::Left),
        Action::Fire(Direction::Up),
        Action::Fire(Direction::Right),
        Action::Fire(Direction::Down),
        Action::Fire(Direction::Left),
    ];

    /// Judge code for this action.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub const fn code(self) -> i8 {
        match self {
            Action::Invalid => -2,
            Action::Stay => -1,
            Action::Move(dir) => dir as i8,
            Action::Fire(dir) => dir as i8 + 4,
        }
    }

    /// Decode a judge code.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_code(code: i8) -> Option<Self> {
        match code {
            -2 => Some(Action::Invalid),
            -1 => Some(Action::Stay),
            0..=3 => match Direction::from_index(code as u8) {
                Some(dir) => Some(Action::Move(dir)),
                None => None,
            },
            4..=7 => match Direction::from_index(code as u8 - 4) {
                Some(dir) => Some(Action::Fire(dir)),
                None => None,
            },
            _ => None,
        }
    }

    /// Whether this is a move.
    #[must_use]
    pub const fn is_move(self) -> bool {
        matches!(self, Action::Move(_))
    }

    /// Whether this is a fire action.
    #[must_use]
    pub const fn is_fire(self) -> bool {
        matches!(self, Action::Fire(_))
    }

    /// Direction of a move or fire action.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::Move(dir) | Action::Fire(dir) => Some(dir),
            Action::Invalid | Action::Stay => None,
        }
    }

    /// Both actions fire, in exactly opposite directions.
    #[must_use]
    pub fn fires_against(self, other: Action) -> bool {
        match (self, other) {
            (Action::Fire(a), Action::Fire(b)) => a.opposite() == b,
            _ => false,
        }
    }
}

impl TryFrom<i8> for Action {
    type Error = String;

    fn try_from(code: i8) -> Result<Self, Self::Error> {
        Action::from_code(code).ok_or_else(|| format!("unknown action code {code}"))
    }
}

impl From<Action> for i8 {
    fn from(action: Action) -> Self {
        action.code()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Invalid => write!(f, "invalid"),
            Action::Stay => write!(f, "stay"),
            Action::Move(dir) => write!(f, "move {dir:?}"),
            Action::Fire(dir) => write!(f, "fire {dir:?}"),
        }
    }
}

/// One action per unit, for both sides, applied simultaneously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct JointAction {
    /// Actions indexed by side, then unit id.
    actions: [[Action; UNITS_PER_SIDE as usize]; SIDE_COUNT],
}

impl JointAction {
    /// Every unit stays put. Used as the turn-0 history placeholder.
    pub const STAY: JointAction = JointAction {
        actions: [[Action::Stay; UNITS_PER_SIDE as usize]; SIDE_COUNT],
    };

    /// Build from the two sides' action pairs.
    #[must_use]
    pub const fn new(blue: [Action; 2], red: [Action; 2]) -> Self {
        Self {
            actions: [blue, red],
        }
    }

    /// The action assigned to `unit`.
    #[must_use]
    #[inline]
    pub const fn get(&self, unit: UnitKey) -> Action {
        self.actions[unit.side.index()][unit.slot()]
    }

    /// Assign the action of `unit`.
    pub fn set(&mut self, unit: UnitKey, action: Action) {
        self.actions[unit.side.index()][unit.slot()] = action;
    }

    /// The action pair of one side.
    #[must_use]
    pub const fn side(&self, side: Side) -> [Action; 2] {
        self.actions[side.index()]
    }

    /// Replace the action pair of one side.
    pub fn set_side(&mut self, side: Side, actions: [Action; 2]) {
        self.actions[side.index()] = actions;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_cover_judge_range() {
        for code in -2i8..=7 {
            let action = Action::from_code(code).unwrap();
            assert_eq!(action.code(), code);
        }
        assert_eq!(Action::from_code(8), None);
        assert_eq!(Action::from_code(-3), None);
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(Action::Move(Direction::Up).code(), 0);
        assert_eq!(Action::Move(Direction::Left).code(), 3);
        assert_eq!(Action::Fire(Direction::Up).code(), 4);
        assert_eq!(Action::Fire(Direction::Left).code(), 7);
    }

    #[test]
    fn test_fires_against() {
        let right = Action::Fire(Direction::Right);
        let left = Action::Fire(Direction::Left);
        assert!(right.fires_against(left));
        assert!(!right.fires_against(right));
        assert!(!right.fires_against(Action::Move(Direction::Left)));
        assert!(!Action::Stay.fires_against(left));
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&[Action::Stay, Action::Fire(Direction::Down)]).unwrap();
        assert_eq!(json, "[-1,6]");
        let parsed: [Action; 2] = serde_json::from_str("[1,-2]").unwrap();
        assert_eq!(parsed, [Action::Move(Direction::Right), Action::Invalid]);
        assert!(serde_json::from_str::<Action>("9").is_err());
    }

    #[test]
    fn test_joint_action_access() {
        let mut joint = JointAction::STAY;
        let unit = UnitKey::new(Side::Red, 1);
        joint.set(unit, Action::Fire(Direction::Up));
        assert_eq!(joint.get(unit), Action::Fire(Direction::Up));
        assert_eq!(joint.side(Side::Red), [Action::Stay, Action::Fire(Direction::Up)]);
        assert_eq!(joint.side(Side::Blue), [Action::Stay, Action::Stay]);
    }
}
