//! Turn-processing loop at the judge boundary.
//!
//! The agent owns the only [`FieldState`] of a bot process. It is fed either a
//! full [`History`] (restart mode) or one bare request per turn (keep-running
//! mode) and ends up in the same state either way.

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::decision::decide;
use crate::error::ProtocolError;
use crate::field::{assert_invariants, Action, FieldState, JointAction, Side, UnitKey};
use crate::protocol::{Input, Request, Response, KEEP_RUNNING_MARKER};

/// A game in progress from our side's point of view.
#[derive(Debug, Clone)]
struct Game {
    state: FieldState,
    side: Side,
}

/// Bot state carried across requests.
#[derive(Debug, Clone, Default)]
pub struct Agent {
    game: Option<Game>,
    /// Our actions for the turn the opponent has not answered yet.
    pending: Option<[Action; 2]>,
    data: Option<String>,
    global_data: Option<String>,
}

impl Agent {
    /// An agent that has not seen a setup request yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field state, once set up.
    #[must_use]
    pub fn state(&self) -> Option<&FieldState> {
        self.game.as_ref().map(|game| &game.state)
    }

    /// Side we play, once set up.
    #[must_use]
    pub fn side(&self) -> Option<Side> {
        self.game.as_ref().map(|game| game.side)
    }

    /// Feed one judge message.
    ///
    /// # Errors
    ///
    /// Fails if the setup is missing or repeated, or if a turn of the history
    /// is rejected by the field engine.
    pub fn ingest(&mut self, input: Input) -> Result<(), ProtocolError> {
        match input {
            Input::History(history) => {
                let count = history.requests.len();
                for (i, request) in history.requests.into_iter().enumerate() {
                    self.handle_request(request)?;
                    if i + 1 < count {
                        if let Some(&own) = history.responses.get(i) {
                            self.pending = Some(own);
                        }
                    }
                }
                self.data = history.data;
                self.global_data = history.globaldata;
                Ok(())
            }
            Input::Single(request) => self.handle_request(request),
        }
    }

    /// Process one request: a setup, or the opponent's half of a turn.
    ///
    /// # Errors
    ///
    /// See [`Agent::ingest`].
    pub fn handle_request(&mut self, request: Request) -> Result<(), ProtocolError> {
        match request {
            Request::Setup { field, my_side } => {
                if self.game.is_some() {
                    return Err(ProtocolError::DuplicateSetup);
                }
                debug!(side = %my_side, ?field, "setup");
                self.game = Some(Game {
                    state: FieldState::new(field),
                    side: my_side,
                });
                self.pending = None;
                Ok(())
            }
            Request::Actions(theirs) => {
                let game = self.game.as_mut().ok_or(ProtocolError::MissingSetup)?;
                let ours = self.pending.take().unwrap_or([Action::Stay; 2]);

                let mut joint = JointAction::STAY;
                joint.set_side(game.side, ours);
                joint.set_side(game.side.opponent(), theirs);

                let turn = game.state.turn();
                game.state
                    .apply(&joint)
                    .map_err(|source| ProtocolError::Rejected { turn, source })?;
                assert_invariants(&game.state);
                Ok(())
            }
        }
    }

    /// Decide this turn's actions and remember them for the next request.
    ///
    /// Any action the field engine would reject is replaced by `Stay`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::MissingSetup`] before the first setup.
    pub fn respond(&mut self) -> Result<Response, ProtocolError> {
        let game = self.game.as_ref().ok_or(ProtocolError::MissingSetup)?;
        let mut actions = decide(&game.state, game.side);

        for (unit, action) in UnitKey::of_side(game.side).into_iter().zip(actions.iter_mut()) {
            if !game.state.unit(unit).alive() {
                *action = Action::Stay;
            } else if !game.state.is_valid_action(unit, *action) {
                warn!(%unit, %action, turn = game.state.turn(), "rejected own action, staying");
                *action = Action::Stay;
            }
        }

        self.pending = Some(actions);
        Ok(Response {
            response: actions,
            debug: None,
            data: self.data.clone(),
            global_data: self.global_data.clone(),
        })
    }

    /// Serve the judge over a reader/writer pair.
    ///
    /// Each JSON value read is ingested and answered with one response line.
    /// With `keep_running` the marker line follows every response and the loop
    /// waits for the next value; otherwise it stops after the first answer.
    /// Returns the number of responses written.
    ///
    /// # Errors
    ///
    /// Any protocol, JSON or I/O failure ends the loop.
    pub fn serve<R: BufRead, W: Write>(
        &mut self,
        reader: R,
        mut writer: W,
        keep_running: bool,
    ) -> Result<usize, ProtocolError> {
        let mut answered = 0;
        for input in serde_json::Deserializer::from_reader(reader).into_iter::<Input>() {
            self.ingest(input?)?;
            let response = self.respond()?;
            serde_json::to_writer(&mut writer, &response)?;
            writeln!(writer)?;
            answered += 1;

            if !keep_running {
                break;
            }
            writeln!(writer, "{KEEP_RUNNING_MARKER}")?;
            writer.flush()?;
        }
        writer.flush()?;

        if answered == 0 {
            return Err(ProtocolError::NoRequest);
        }
        Ok(answered)
    }
}
