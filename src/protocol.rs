//! Message shapes exchanged with the hosting judge.
//!
//! All messages are JSON. The first request carries the brick layout and our
//! side; every later request carries the opponent's two actions for the turn
//! just played. A restarted bot receives the whole exchange so far wrapped
//! in a [`History`], while a bot that asked to keep running receives bare
//! requests one at a time.

use serde::{Deserialize, Serialize};

use crate::field::{Action, Side, BRICK_MASK_COUNT};

/// Printed after a response to ask the judge to keep the process alive.
pub const KEEP_RUNNING_MARKER: &str = ">>>BOTZONE_REQUEST_KEEP_RUNNING<<<";

/// One request from the judge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Request {
    /// Initial brick layout and the side we play.
    Setup {
        /// Three 27-bit brick masks, one per band of three rows.
        field: [u32; BRICK_MASK_COUNT],
        /// Our side.
        #[serde(rename = "mySide")]
        my_side: Side,
    },
    /// The opponent's actions for the turn just played, by unit id.
    Actions([Action; 2]),
}

/// Full exchange replayed to a restarted bot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    /// Every request so far, oldest first.
    pub requests: Vec<Request>,
    /// Our earlier responses; `responses[i]` answered `requests[i]`.
    #[serde(default)]
    pub responses: Vec<[Action; 2]>,
    /// Opaque per-game data we stored last turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Opaque data we stored across games.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub globaldata: Option<String>,
}

/// Anything the judge may send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Input {
    /// Restart mode: the whole exchange.
    History(History),
    /// Keep-running mode: only the newest request.
    Single(Request),
}

/// Our answer for one turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// One action per controlled unit, by unit id.
    pub response: [Action; 2],
    /// Free-form text shown in the judge's debug view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<String>,
    /// Opaque per-game data handed back next turn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Opaque data handed back in later games.
    #[serde(
        rename = "globalData",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub global_data: Option<String>,
}

impl Response {
    /// A response carrying only actions.
    #[must_use]
    pub const fn new(actions: [Action; 2]) -> Self {
        Self {
            response: actions,
            debug: None,
            data: None,
            global_data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Direction;

    #[test]
    fn test_parse_setup() {
        let input: Input = serde_json::from_str(r#"{"field":[1,2,3],"mySide":1}"#).unwrap();
        assert_eq!(
            input,
            Input::Single(Request::Setup {
                field: [1, 2, 3],
                my_side: Side::Red,
            })
        );
    }

    #[test]
    fn test_parse_actions() {
        let input: Input = serde_json::from_str("[-1, 5]").unwrap();
        assert_eq!(
            input,
            Input::Single(Request::Actions([Action::Stay, Action::Fire(Direction::Right)]))
        );
    }

    #[test]
    fn test_parse_history() {
        let text = r#"{
            "requests": [{"field":[0,0,0],"mySide":0}, [0, -1]],
            "responses": [[2, 2]],
            "data": "",
            "globaldata": "g"
        }"#;
        let Input::History(history) = serde_json::from_str(text).unwrap() else {
            panic!("expected history");
        };
        assert_eq!(history.requests.len(), 2);
        assert_eq!(
            history.responses,
            vec![[Action::Move(Direction::Down), Action::Move(Direction::Down)]]
        );
        assert_eq!(history.data.as_deref(), Some(""));
        assert_eq!(history.globaldata.as_deref(), Some("g"));
    }

    #[test]
    fn test_rejects_unknown_side() {
        assert!(serde_json::from_str::<Input>(r#"{"field":[0,0,0],"mySide":2}"#).is_err());
    }

    #[test]
    fn test_response_omits_empty_payloads() {
        let json = serde_json::to_string(&Response::new([Action::Stay, Action::Move(Direction::Up)])).unwrap();
        assert_eq!(json, r#"{"response":[-1,0]}"#);

        let mut response = Response::new([Action::Stay; 2]);
        response.global_data = Some("x".to_owned());
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"response":[-1,-1],"globalData":"x"}"#);
    }
}
