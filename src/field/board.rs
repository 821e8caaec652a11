//! Board, coordinates and cell contents.

use std::fmt;

use bitflags::bitflags;

use crate::field::{Side, UnitKey, UNITS_PER_SIDE};

/// Board width in cells.
pub const FIELD_WIDTH: u8 = 9;

/// Board height in cells.
pub const FIELD_HEIGHT: u8 = 9;

/// Total number of cells on the board.
pub const CELL_COUNT: usize = FIELD_WIDTH as usize * FIELD_HEIGHT as usize;

/// Number of 27-bit masks that describe the initial brick layout.
pub const BRICK_MASK_COUNT: usize = 3;

/// Rows covered by each brick mask.
const ROWS_PER_MASK: u8 = 3;

/// A coordinate on the board. Origin is the top-left cell, `x` grows to the
/// right and `y` grows downward.
///
/// Ordering is by `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coord {
    /// Column.
    pub x: u8,
    /// Row.
    pub y: u8,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// Check if this coordinate lies on the board.
    #[must_use]
    pub const fn in_bounds(self) -> bool {
        self.x < FIELD_WIDTH && self.y < FIELD_HEIGHT
    }

    /// Row-major index of this coordinate.
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self.y as usize * FIELD_WIDTH as usize + self.x as usize
    }

    /// Inverse of [`Coord::index`].
    #[must_use]
    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_index(index: usize) -> Self {
        Self {
            x: (index % FIELD_WIDTH as usize) as u8,
            y: (index / FIELD_WIDTH as usize) as u8,
        }
    }

    /// The neighbouring cell in `dir`, or `None` if it would leave the board.
    #[must_use]
    #[inline]
    pub fn step(self, dir: Direction) -> Option<Self> {
        self.offset(dir.dx(), dir.dy())
    }

    /// Shift by an arbitrary displacement, staying on the board.
    #[must_use]
    pub fn offset(self, dx: i8, dy: i8) -> Option<Self> {
        let x = i16::from(self.x) + i16::from(dx);
        let y = i16::from(self.y) + i16::from(dy);
        let x = u8::try_from(x).ok()?;
        let y = u8::try_from(y).ok()?;
        let coord = Self::new(x, y);
        coord.in_bounds().then_some(coord)
    }

    /// Iterate over every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELL_COUNT).map(Self::from_index)
    }

    /// Direction from `self` toward `other` when they share a row or column.
    ///
    /// Returns `None` for unaligned or identical coordinates.
    #[must_use]
    pub fn direction_to(self, other: Self) -> Option<Direction> {
        if self == other {
            return None;
        }
        if self.y == other.y {
            return Some(if self.x < other.x {
                Direction::Right
            } else {
                Direction::Left
            });
        }
        if self.x == other.x {
            return Some(if self.y < other.y {
                Direction::Down
            } else {
                Direction::Up
            });
        }
        None
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four axis directions, in the judge's numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Toward row 0.
    Up = 0,
    /// Toward the last column.
    Right = 1,
    /// Toward the last row.
    Down = 2,
    /// Toward column 0.
    Left = 3,
}

impl Direction {
    /// All directions in scan order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Column delta.
    #[must_use]
    pub const fn dx(self) -> i8 {
        match self {
            Direction::Right => 1,
            Direction::Left => -1,
            Direction::Up | Direction::Down => 0,
        }
    }

    /// Row delta.
    #[must_use]
    pub const fn dy(self) -> i8 {
        match self {
            Direction::Down => 1,
            Direction::Up => -1,
            Direction::Left | Direction::Right => 0,
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Look up a direction by its judge index (0..=3).
    #[must_use]
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Direction::Up),
            1 => Some(Direction::Right),
            2 => Some(Direction::Down),
            3 => Some(Direction::Left),
            _ => None,
        }
    }
}

bitflags! {
    /// The set of entities present on one cell.
    ///
    /// At most one terrain flag is ever set. Several unit flags may be set at
    /// once when units stack on the same cell.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CellItems: u8 {
        /// Destructible terrain.
        const BRICK = 1 << 0;
        /// Indestructible terrain.
        const STEEL = 1 << 1;
        /// A base (which side is implied by the coordinate).
        const BASE  = 1 << 2;
        /// Blue unit 0.
        const BLUE0 = 1 << 3;
        /// Blue unit 1.
        const BLUE1 = 1 << 4;
        /// Red unit 0.
        const RED0  = 1 << 5;
        /// Red unit 1.
        const RED1  = 1 << 6;

        /// Every unit flag.
        const UNITS = Self::BLUE0.bits() | Self::BLUE1.bits() | Self::RED0.bits() | Self::RED1.bits();
    }
}

impl CellItems {
    /// Flag for a specific unit.
    #[must_use]
    pub const fn unit(key: UnitKey) -> Self {
        match (key.side, key.id) {
            (Side::Blue, 0) => Self::BLUE0,
            (Side::Blue, _) => Self::BLUE1,
            (Side::Red, 0) => Self::RED0,
            (Side::Red, _) => Self::RED1,
        }
    }

    /// Nothing at all on the cell.
    #[must_use]
    #[inline]
    pub const fn is_vacant(self) -> bool {
        self.is_empty()
    }

    /// Brick present.
    #[must_use]
    #[inline]
    pub const fn has_brick(self) -> bool {
        self.contains(Self::BRICK)
    }

    /// Steel present.
    #[must_use]
    #[inline]
    pub const fn has_steel(self) -> bool {
        self.contains(Self::STEEL)
    }

    /// A base present.
    #[must_use]
    #[inline]
    pub const fn has_base(self) -> bool {
        self.contains(Self::BASE)
    }

    /// Any terrain (brick or steel) present.
    #[must_use]
    pub const fn has_terrain(self) -> bool {
        self.intersects(Self::BRICK.union(Self::STEEL))
    }

    /// Number of units on the cell.
    #[must_use]
    pub const fn unit_count(self) -> u32 {
        self.intersection(Self::UNITS).bits().count_ones()
    }

    /// More than one unit stacked on the cell.
    #[must_use]
    pub const fn has_stacked_units(self) -> bool {
        self.unit_count() > 1
    }

    /// The units present on the cell, in tag order.
    pub fn units(self) -> impl Iterator<Item = UnitKey> {
        UnitKey::all().into_iter().filter(move |&key| self.contains(Self::unit(key)))
    }

    /// The entity tags present on the cell, in tag order.
    pub fn entities(self) -> impl Iterator<Item = Entity> {
        [Entity::Brick, Entity::Steel, Entity::Base]
            .into_iter()
            .chain(UnitKey::all().into_iter().map(Entity::Unit))
            .filter(move |entity| self.contains(entity.flag()))
    }
}

/// A single entity tag.
///
/// Variant order matches tag order, which fixes the order in which
/// simultaneous destructions are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Entity {
    /// Destructible terrain.
    Brick,
    /// Indestructible terrain.
    Steel,
    /// A base.
    Base,
    /// A unit.
    Unit(UnitKey),
}

impl Entity {
    /// The cell flag for this entity.
    #[must_use]
    pub const fn flag(self) -> CellItems {
        match self {
            Entity::Brick => CellItems::BRICK,
            Entity::Steel => CellItems::STEEL,
            Entity::Base => CellItems::BASE,
            Entity::Unit(key) => CellItems::unit(key),
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Brick => write!(f, "brick"),
            Entity::Steel => write!(f, "steel"),
            Entity::Base => write!(f, "base"),
            Entity::Unit(key) => write!(f, "{key}"),
        }
    }
}

/// The 9x9 grid of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    /// Cells stored in row-major order.
    cells: [CellItems; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// A board with nothing on it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [CellItems::empty(); CELL_COUNT],
        }
    }

    /// Build the starting board from the judge's brick masks.
    ///
    /// Mask `i` covers rows `3i..3i + 3`; bit `(y - 3i) * 9 + x` marks a brick at
    /// `(x, y)`. Units, bases and the steel cells in front of each base are
    /// placed afterwards and replace any brick underneath.
    #[must_use]
    pub fn from_brick_masks(masks: [u32; BRICK_MASK_COUNT]) -> Self {
        let mut board = Self::empty();

        for (i, mask) in (0u8..).zip(masks) {
            let mut bit = 1u32;
            for y in i * ROWS_PER_MASK..(i + 1) * ROWS_PER_MASK {
                for x in 0..FIELD_WIDTH {
                    if mask & bit != 0 {
                        board.set(Coord::new(x, y), CellItems::BRICK);
                    }
                    bit <<= 1;
                }
            }
        }

        for side in Side::ALL {
            for id in 0..UNITS_PER_SIDE {
                let key = UnitKey::new(side, id);
                board.set(key.start(), CellItems::unit(key));
            }
            board.set(side.base(), CellItems::BASE);
            board.set(side.steel(), CellItems::STEEL);
        }

        board
    }

    /// Encode the brick cells of this board as judge masks.
    #[must_use]
    pub fn brick_masks(&self) -> [u32; BRICK_MASK_COUNT] {
        let mut masks = [0u32; BRICK_MASK_COUNT];
        for coord in Coord::all() {
            if self.get(coord).has_brick() {
                let band = coord.y / ROWS_PER_MASK;
                let bit = u32::from(coord.y % ROWS_PER_MASK) * u32::from(FIELD_WIDTH)
                    + u32::from(coord.x);
                masks[usize::from(band)] |= 1 << bit;
            }
        }
        masks
    }

    /// Contents of a cell. Out-of-bounds coordinates read as vacant.
    #[must_use]
    #[inline]
    pub fn get(&self, coord: Coord) -> CellItems {
        if coord.in_bounds() {
            self.cells[coord.index()]
        } else {
            CellItems::empty()
        }
    }

    /// Replace the contents of a cell.
    ///
    /// Returns `false` if the coordinate is out of bounds.
    pub fn set(&mut self, coord: Coord, items: CellItems) -> bool {
        if coord.in_bounds() {
            self.cells[coord.index()] = items;
            true
        } else {
            false
        }
    }

    /// Add entities to a cell.
    pub fn insert(&mut self, coord: Coord, items: CellItems) {
        if coord.in_bounds() {
            self.cells[coord.index()].insert(items);
        }
    }

    /// Remove entities from a cell.
    pub fn remove(&mut self, coord: Coord, items: CellItems) {
        if coord.in_bounds() {
            self.cells[coord.index()].remove(items);
        }
    }

    /// Check that a coordinate is on the board and holds nothing.
    #[must_use]
    pub fn is_vacant(&self, coord: Coord) -> bool {
        coord.in_bounds() && self.get(coord).is_vacant()
    }

    /// Iterate over all coordinates and their contents.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, CellItems)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(idx, &items)| (Coord::from_index(idx), items))
    }

    /// Count brick cells on row `y` strictly between columns `a` and `b`.
    #[must_use]
    pub fn bricks_between_on_row(&self, y: u8, a: u8, b: u8) -> u32 {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        let mut count = 0;
        for x in lo.saturating_add(1)..hi {
            if self.get(Coord::new(x, y)).has_brick() {
                count += 1;
            }
        }
        count
    }
}
