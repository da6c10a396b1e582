//! Rendering options.

use crate::builder::{BuildError, ChartOptionsBuilder};
use crate::core::Status;
use std::fmt;
use std::str::FromStr;

/// Layout direction of the flowchart and of every nested container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    TopToBottom,
    TopDown,
    BottomToTop,
    LeftToRight,
    RightToLeft,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopToBottom => "TB",
            Self::TopDown => "TD",
            Self::BottomToTop => "BT",
            Self::LeftToRight => "LR",
            Self::RightToLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" => Ok(Self::TopToBottom),
            "TD" => Ok(Self::TopDown),
            "BT" => Ok(Self::BottomToTop),
            "LR" => Ok(Self::LeftToRight),
            "RL" => Ok(Self::RightToLeft),
            _ => Err(BuildError::UnknownDirection(s.to_string())),
        }
    }
}

/// Fill colour per status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fills {
    pub success: String,
    pub fail: String,
    pub never_run: String,
    pub indeterminate: String,
}

impl Fills {
    pub fn for_status(&self, status: Status) -> &str {
        match status {
            Status::Success => &self.success,
            Status::Fail => &self.fail,
            Status::NeverRun => &self.never_run,
            Status::Indeterminate => &self.indeterminate,
        }
    }

    pub(crate) fn set(&mut self, status: Status, color: String) {
        match status {
            Status::Success => self.success = color,
            Status::Fail => self.fail = color,
            Status::NeverRun => self.never_run = color,
            Status::Indeterminate => self.indeterminate = color,
        }
    }
}

impl Default for Fills {
    fn default() -> Self {
        Self {
            success: "lightgreen".to_string(),
            fail: "lightcoral".to_string(),
            never_run: "gainsboro".to_string(),
            indeterminate: "grey".to_string(),
        }
    }
}

/// Options controlling the generated flowchart text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChartOptions {
    pub direction: Direction,
    pub fills: Fills,
    /// Emit a `click` callback per node so the renderer can look states up
    /// in the compilation's registry
    pub tooltips: bool,
}

impl ChartOptions {
    pub fn builder() -> ChartOptionsBuilder {
        ChartOptionsBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fills_match_statuses() {
        let fills = Fills::default();
        assert_eq!(fills.for_status(Status::Success), "lightgreen");
        assert_eq!(fills.for_status(Status::Fail), "lightcoral");
        assert_eq!(fills.for_status(Status::NeverRun), "gainsboro");
        assert_eq!(fills.for_status(Status::Indeterminate), "grey");
    }

    #[test]
    fn direction_parses_case_insensitively() {
        assert_eq!("lr".parse::<Direction>().unwrap(), Direction::LeftToRight);
        assert_eq!("TB".parse::<Direction>().unwrap(), Direction::TopToBottom);
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(BuildError::UnknownDirection("sideways".to_string()))
        );
    }

    #[test]
    fn default_options() {
        let options = ChartOptions::default();
        assert_eq!(options.direction.to_string(), "TB");
        assert!(!options.tooltips);
    }
}
