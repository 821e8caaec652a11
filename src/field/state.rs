//! Field state: validation, simultaneous resolution, rollback and outcome.

use tracing::trace;

use crate::error::FieldError;
use crate::field::fire::resolve_fire;
use crate::field::{
    Action, Board, CellItems, Coord, Direction, Disappearance, DisappearanceLog, Entity,
    JointAction, Side, Unit, UnitKey, BRICK_MASK_COUNT, SIDE_COUNT, UNITS_PER_SIDE,
};

/// Last turn that can be played. Reaching turn `MAX_TURN + 1` is a draw.
pub const MAX_TURN: u32 = 100;

/// Result of evaluating a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Play continues.
    NotFinished,
    /// Both sides failed, or the turn limit passed with neither failing.
    Draw,
    /// Exactly one side failed; the other wins.
    Win(Side),
}

impl Outcome {
    /// Whether the game is over.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Outcome::NotFinished)
    }
}

/// Complete, reversible state of one game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    /// Cell contents.
    board: Board,
    /// Units indexed by side, then id.
    units: [[Unit; UNITS_PER_SIDE as usize]; SIDE_COUNT],
    /// Whether each side's base still stands.
    bases_alive: [bool; SIDE_COUNT],
    /// Turn about to be played, starting at 1.
    turn: u32,
    /// `history[t]` is the joint action applied on turn `t`; entry 0 is a placeholder.
    history: Vec<JointAction>,
    /// Everything that left the board, grouped by turn.
    log: DisappearanceLog,
}

impl FieldState {
    /// Start a game from the judge's brick masks.
    #[must_use]
    pub fn new(bricks: [u32; BRICK_MASK_COUNT]) -> Self {
        Self::from_board(Board::from_brick_masks(bricks))
    }

    /// Start a game from an arbitrary board at turn 1.
    ///
    /// A unit is alive if its flag appears on the board (the first such cell in
    /// row-major order is its position). A base is alive if the base flag sits
    /// on that side's base cell.
    #[must_use]
    pub fn from_board(board: Board) -> Self {
        let mut units = [[Unit::new(Coord::new(0, 0)); UNITS_PER_SIDE as usize]; SIDE_COUNT];
        for key in UnitKey::all() {
            let flag = CellItems::unit(key);
            let unit = &mut units[key.side.index()][key.slot()];
            match board.iter().find(|(_, items)| items.contains(flag)) {
                Some((coord, _)) => unit.place(coord),
                None => unit.destroy(),
            }
        }
        let bases_alive = Side::ALL.map(|side| board.get(side.base()).has_base());

        Self {
            board,
            units,
            bases_alive,
            turn: 1,
            history: vec![JointAction::STAY],
            log: DisappearanceLog::new(),
        }
    }

    /// Cell contents.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Lifecycle state of one unit.
    #[must_use]
    pub const fn unit(&self, key: UnitKey) -> &Unit {
        &self.units[key.side.index()][key.slot()]
    }

    /// Current cell of a live unit.
    #[must_use]
    pub const fn position(&self, key: UnitKey) -> Option<Coord> {
        self.unit(key).position()
    }

    /// Whether a side's base still stands.
    #[must_use]
    pub const fn base_alive(&self, side: Side) -> bool {
        self.bases_alive[side.index()]
    }

    /// Turn about to be played.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Joint actions applied so far, indexed by turn (entry 0 is all-stay).
    #[must_use]
    pub fn history(&self) -> &[JointAction] {
        &self.history
    }

    /// The disappearance log.
    #[must_use]
    pub const fn log(&self) -> &DisappearanceLog {
        &self.log
    }

    /// What `unit` did on the previous turn (`Stay` before the first turn).
    #[must_use]
    pub fn previous_action(&self, unit: UnitKey) -> Action {
        self.history
            .last()
            .map_or(Action::Stay, |joint| joint.get(unit))
    }

    /// Whether `unit` is allowed to fire this turn.
    #[must_use]
    pub fn can_fire(&self, unit: UnitKey) -> bool {
        self.unit(unit).alive() && !self.previous_action(unit).is_fire()
    }

    /// Check a single unit's action against the rules.
    ///
    /// Depends only on the board, the unit's position and its action on the
    /// previous turn. Liveness is not checked here; [`FieldState::validate`]
    /// skips dead units.
    #[must_use]
    pub fn is_valid_action(&self, unit: UnitKey, action: Action) -> bool {
        match action {
            Action::Invalid => false,
            Action::Stay => true,
            Action::Fire(_) => !self.previous_action(unit).is_fire(),
            Action::Move(dir) => self
                .position(unit)
                .and_then(|from| from.step(dir))
                .is_some_and(|to| self.board.is_vacant(to)),
        }
    }

    /// Check every live unit's action.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidAction`] for the first live unit whose
    /// action is rejected.
    pub fn validate(&self, joint: &JointAction) -> Result<(), FieldError> {
        for unit in UnitKey::all() {
            if !self.unit(unit).alive() {
                continue;
            }
            let action = joint.get(unit);
            if !self.is_valid_action(unit, action) {
                return Err(FieldError::InvalidAction { unit, action });
            }
        }
        Ok(())
    }

    /// Play one turn with every unit acting simultaneously.
    ///
    /// Moves resolve first against pre-turn positions, then every shot is
    /// traced from the moved positions, then all hits are destroyed in
    /// coordinate order.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::InvalidAction`] and leaves the state untouched if
    /// any live unit's action is invalid.
    pub fn apply(&mut self, joint: &JointAction) -> Result<(), FieldError> {
        self.validate(joint)?;

        let turn = self.turn;
        self.log.begin_turn();
        self.history.push(*joint);

        for unit in UnitKey::all() {
            let Action::Move(dir) = joint.get(unit) else {
                continue;
            };
            self.move_unit(unit, dir, turn);
        }

        let shooters: Vec<(UnitKey, Coord, Direction)> = UnitKey::all()
            .into_iter()
            .filter_map(|unit| {
                let Action::Fire(dir) = joint.get(unit) else {
                    return None;
                };
                self.position(unit).map(|from| (unit, from, dir))
            })
            .collect();

        for hit in resolve_fire(&self.board, &shooters, joint) {
            self.destroy(hit.coord, hit.entity, turn);
        }

        self.turn += 1;
        Ok(())
    }

    /// Undo the most recently applied turn exactly.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::AtFirstTurn`] if nothing has been applied.
    pub fn revert(&mut self) -> Result<(), FieldError> {
        if self.turn <= 1 || self.log.turns() == 0 {
            return Err(FieldError::AtFirstTurn);
        }

        self.turn -= 1;
        self.history.pop();

        for entry in self.log.pop_turn() {
            self.restore(entry);
        }
        trace!(turn = self.turn, "reverted");
        Ok(())
    }

    /// Evaluate the position without changing it.
    #[must_use]
    pub fn outcome(&self) -> Outcome {
        let failed = Side::ALL.map(|side| self.side_failed(side));
        match failed {
            [true, true] => Outcome::Draw,
            [true, false] => Outcome::Win(Side::Red),
            [false, true] => Outcome::Win(Side::Blue),
            [false, false] if self.turn > MAX_TURN => Outcome::Draw,
            [false, false] => Outcome::NotFinished,
        }
    }

    /// A side fails once its base is gone or both its units are dead.
    #[must_use]
    pub fn side_failed(&self, side: Side) -> bool {
        !self.base_alive(side)
            || UnitKey::of_side(side)
                .iter()
                .all(|&unit| !self.unit(unit).alive())
    }

    fn move_unit(&mut self, unit: UnitKey, dir: Direction, turn: u32) {
        let Some(from) = self.position(unit) else {
            return;
        };
        let Some(to) = from.step(dir) else {
            return;
        };
        let flag = CellItems::unit(unit);

        self.log.record(Disappearance {
            coord: from,
            entity: Entity::Unit(unit),
            turn,
        });
        self.board.remove(from, flag);
        self.board.insert(to, flag);
        self.units[unit.side.index()][unit.slot()].place(to);
        trace!(turn, %unit, %from, %to, "moved");
    }

    fn destroy(&mut self, coord: Coord, entity: Entity, turn: u32) {
        match entity {
            Entity::Steel => return,
            Entity::Brick => {}
            Entity::Base => {
                if let Some(side) = Side::owning_base_at(coord) {
                    self.bases_alive[side.index()] = false;
                }
            }
            Entity::Unit(unit) => self.units[unit.side.index()][unit.slot()].destroy(),
        }

        self.board.remove(coord, entity.flag());
        self.log.record(Disappearance {
            coord,
            entity,
            turn,
        });
        trace!(turn, %coord, %entity, "destroyed");
    }

    fn restore(&mut self, entry: Disappearance) {
        let Disappearance { coord, entity, .. } = entry;
        match entity {
            Entity::Unit(unit) => {
                if let Some(current) = self.position(unit) {
                    self.board.remove(current, entity.flag());
                }
                self.units[unit.side.index()][unit.slot()].place(coord);
            }
            Entity::Base => {
                if let Some(side) = Side::owning_base_at(coord) {
                    self.bases_alive[side.index()] = true;
                }
            }
            Entity::Brick | Entity::Steel => {}
        }
        self.board.insert(coord, entity.flag());
    }
}
