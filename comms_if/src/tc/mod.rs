//! # Telecommand module
//!
//! Telecommands are the requests the operator-input layer sends to the robot. The robot never
//! interprets raw controller input itself: buttons arrive here as already-mapped press/release
//! events, which the robot turns into triggers.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to the robot by the operator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum Tc {
    /// Put the robot into safe mode, stopping all mechanisms.
    MakeSafe,

    /// Leave safe mode.
    MakeUnsafe,

    /// A button on one of the controllers has changed state.
    Button {
        button: ButtonId,
        pressed: bool
    },

    /// The match clock has started, with the given number of seconds in the
    /// match.
    MatchStart {
        length_s: f64
    },
}

/// Identifiers of the bound controller buttons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ButtonId {
    DriverY,
    DriverA,
    OperatorA,
    OperatorB,
    OperatorX,
    OperatorY,
    OperatorLeftTrigger,
    OperatorRightTrigger,
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {

    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }

    /// Serialise the TC into a JSON packet
    pub fn to_json(&self) -> Result<String, TcParseError> {
        serde_json::to_string(self).map_err(TcParseError::InvalidJson)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tcs() {
        assert_eq!(Tc::from_json("\"MakeSafe\"").unwrap(), Tc::MakeSafe);
        assert_eq!(
            Tc::from_json(r#"{"Button": {"button": "OperatorX", "pressed": true}}"#).unwrap(),
            Tc::Button { button: ButtonId::OperatorX, pressed: true }
        );
        assert_eq!(
            Tc::from_json(r#"{"MatchStart": {"length_s": 150.0}}"#).unwrap(),
            Tc::MatchStart { length_s: 150.0 }
        );
        assert!(Tc::from_json(r#"{"Button": {"button": "Turbo"}}"#).is_err());
    }

    #[test]
    fn test_json_matches_script_format() {
        let tc = Tc::Button { button: ButtonId::DriverA, pressed: false };
        assert_eq!(
            tc.to_json().unwrap(),
            r#"{"Button":{"button":"DriverA","pressed":false}}"#
        );
    }
}
