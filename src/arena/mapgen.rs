//! Deterministic brick layouts for self-play.

// RNG output is reduced with intentional casts
#![allow(clippy::cast_possible_truncation)]

use crate::field::{Board, CellItems, Coord, Side, UnitKey, BRICK_MASK_COUNT, CELL_COUNT};

/// Deterministic PRNG using xorshift64.
#[derive(Debug, Clone, Copy)]
pub struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate random u32 in [0, max).
    pub fn next_u32(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % u64::from(max)) as u32
    }

    /// True with probability `percent` / 100.
    pub fn chance(&mut self, percent: u8) -> bool {
        self.next_u32(100) < u32::from(percent)
    }
}

/// Cells that must never start as brick: bases, their steel and start cells.
fn is_reserved(coord: Coord) -> bool {
    Side::ALL
        .iter()
        .any(|side| side.base() == coord || side.steel() == coord)
        || UnitKey::all().iter().any(|unit| unit.start() == coord)
}

/// The cell mirrored through the centre of the board.
const fn mirror(coord: Coord) -> Coord {
    Coord::from_index(CELL_COUNT - 1 - coord.index())
}

/// Generate point-symmetric brick masks.
///
/// Each cell of the top half (and the centre) becomes brick with probability
/// `density` percent, and its mirror image always matches, so neither side
/// starts with a terrain advantage.
#[must_use]
pub fn generate_layout(seed: u64, density: u8) -> [u32; BRICK_MASK_COUNT] {
    let mut rng = Rng::new(seed);
    let mut board = Board::empty();

    for coord in Coord::all() {
        let twin = mirror(coord);
        if twin.index() < coord.index() || is_reserved(coord) {
            continue;
        }
        if rng.chance(density) {
            board.set(coord, CellItems::BRICK);
            board.set(twin, CellItems::BRICK);
        }
    }

    board.brick_masks()
}
