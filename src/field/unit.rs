//! Sides, units and their fixed starting layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::field::{Coord, FIELD_HEIGHT, FIELD_WIDTH};

/// Number of competing sides.
pub const SIDE_COUNT: usize = 2;

/// Units controlled by each side.
pub const UNITS_PER_SIDE: u8 = 2;

/// Column of both bases.
pub const BASE_X: u8 = FIELD_WIDTH / 2;

/// One of the two competing sides. Serialized as the judge's `0`/`1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Side {
    /// Side 0, base on the top row.
    Blue,
    /// Side 1, base on the bottom row.
    Red,
}

impl Side {
    /// Both sides in index order.
    pub const ALL: [Side; SIDE_COUNT] = [Side::Blue, Side::Red];

    /// Index of this side (0 or 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Blue => Side::Red,
            Side::Red => Side::Blue,
        }
    }

    /// Location of this side's base.
    #[must_use]
    pub const fn base(self) -> Coord {
        match self {
            Side::Blue => Coord::new(BASE_X, 0),
            Side::Red => Coord::new(BASE_X, FIELD_HEIGHT - 1),
        }
    }

    /// Location of the steel cell guarding this side's base.
    #[must_use]
    pub const fn steel(self) -> Coord {
        match self {
            Side::Blue => Coord::new(BASE_X, 1),
            Side::Red => Coord::new(BASE_X, FIELD_HEIGHT - 2),
        }
    }

    /// The side whose base sits at `coord`, if any.
    #[must_use]
    pub fn owning_base_at(coord: Coord) -> Option<Self> {
        Self::ALL.into_iter().find(|side| side.base() == coord)
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Blue),
            1 => Ok(Side::Red),
            other => Err(format!("side must be 0 or 1, got {other}")),
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> Self {
        match side {
            Side::Blue => 0,
            Side::Red => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Blue => write!(f, "blue"),
            Side::Red => write!(f, "red"),
        }
    }
}

/// Identifies a unit by side and per-side id (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitKey {
    /// Owning side.
    pub side: Side,
    /// Id within the side.
    pub id: u8,
}

impl UnitKey {
    /// Create a unit key.
    #[must_use]
    pub const fn new(side: Side, id: u8) -> Self {
        Self { side, id }
    }

    /// Every unit, side by side and id by id.
    #[must_use]
    pub const fn all() -> [UnitKey; 4] {
        [
            UnitKey::new(Side::Blue, 0),
            UnitKey::new(Side::Blue, 1),
            UnitKey::new(Side::Red, 0),
            UnitKey::new(Side::Red, 1),
        ]
    }

    /// The two units of one side.
    #[must_use]
    pub const fn of_side(side: Side) -> [UnitKey; 2] {
        [UnitKey::new(side, 0), UnitKey::new(side, 1)]
    }

    /// Fixed start cell. The two sides mirror each other through the centre.
    #[must_use]
    pub const fn start(self) -> Coord {
        let near = BASE_X - 2;
        let far = BASE_X + 2;
        match (self.side, self.id) {
            (Side::Blue, 0) => Coord::new(near, 0),
            (Side::Blue, _) => Coord::new(far, 0),
            (Side::Red, 0) => Coord::new(far, FIELD_HEIGHT - 1),
            (Side::Red, _) => Coord::new(near, FIELD_HEIGHT - 1),
        }
    }

    /// Index of this unit within its side.
    #[must_use]
    pub const fn slot(self) -> usize {
        self.id as usize
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} unit {}", self.side, self.id)
    }
}

/// Lifecycle state of one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unit {
    /// Current cell, `None` once destroyed.
    position: Option<Coord>,
}

impl Unit {
    /// A live unit at `position`.
    #[must_use]
    pub const fn new(position: Coord) -> Self {
        Self {
            position: Some(position),
        }
    }

    /// Whether the unit is still alive.
    #[must_use]
    pub const fn alive(&self) -> bool {
        self.position.is_some()
    }

    /// Current cell of a live unit.
    #[must_use]
    pub const fn position(&self) -> Option<Coord> {
        self.position
    }

    /// Relocate a live unit, or bring a destroyed one back at `position`.
    pub fn place(&mut self, position: Coord) {
        self.position = Some(position);
    }

    /// Mark the unit destroyed and invalidate its coordinates.
    pub fn destroy(&mut self) {
        self.position = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_roundtrip() {
        for side in Side::ALL {
            assert_eq!(side.opponent().opponent(), side);
            assert_eq!(Side::try_from(u8::from(side)), Ok(side));
        }
        assert!(Side::try_from(2).is_err());
    }

    #[test]
    fn test_bases_and_steel() {
        assert_eq!(Side::Blue.base(), Coord::new(4, 0));
        assert_eq!(Side::Red.base(), Coord::new(4, 8));
        assert_eq!(Side::Blue.steel(), Coord::new(4, 1));
        assert_eq!(Side::Red.steel(), Coord::new(4, 7));
        assert_eq!(Side::owning_base_at(Coord::new(4, 8)), Some(Side::Red));
        assert_eq!(Side::owning_base_at(Coord::new(4, 4)), None);
    }

    #[test]
    fn test_start_cells_mirror() {
        for key in UnitKey::all() {
            let start = key.start();
            let mirrored = UnitKey::new(key.side.opponent(), key.id).start();
            assert_eq!(start.x + mirrored.x, FIELD_WIDTH - 1);
            assert_eq!(start.y + mirrored.y, FIELD_HEIGHT - 1);
        }
    }

    #[test]
    fn test_unit_lifecycle() {
        let mut unit = Unit::new(Coord::new(2, 0));
        assert!(unit.alive());

        unit.destroy();
        assert!(!unit.alive());
        assert_eq!(unit.position(), None);

        unit.place(Coord::new(3, 0));
        assert!(unit.alive());
        assert_eq!(unit.position(), Some(Coord::new(3, 0)));
    }
}
