//! Builder for chart options.

use crate::builder::error::BuildError;
use crate::core::Status;
use crate::diagram::{ChartOptions, Direction, Fills};

/// Builder for [`ChartOptions`] with a fluent API.
///
/// # Example
///
/// ```rust
/// use stepchart::builder::ChartOptionsBuilder;
/// use stepchart::core::Status;
/// use stepchart::diagram::Direction;
///
/// let options = ChartOptionsBuilder::new()
///     .direction(Direction::LeftToRight)
///     .fill(Status::Success, "#9f9")
///     .tooltips(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(options.fills.for_status(Status::Success), "#9f9");
/// ```
#[derive(Clone, Debug, Default)]
pub struct ChartOptionsBuilder {
    direction: Direction,
    fills: Fills,
    tooltips: bool,
}

impl ChartOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout direction.
    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Override the fill colour used for states with `status`.
    pub fn fill(mut self, status: Status, color: impl Into<String>) -> Self {
        self.fills.set(status, color.into());
        self
    }

    /// Emit click callbacks for every node.
    pub fn tooltips(mut self, enabled: bool) -> Self {
        self.tooltips = enabled;
        self
    }

    /// Build the options.
    /// Returns an error if a fill would not survive inside a style directive.
    pub fn build(self) -> Result<ChartOptions, BuildError> {
        for status in [
            Status::Success,
            Status::Fail,
            Status::NeverRun,
            Status::Indeterminate,
        ] {
            let color = self.fills.for_status(status);
            if !is_style_value(color) {
                return Err(BuildError::InvalidFill {
                    status,
                    color: color.to_string(),
                });
            }
        }

        Ok(ChartOptions {
            direction: self.direction,
            fills: self.fills,
            tooltips: self.tooltips,
        })
    }
}

fn is_style_value(value: &str) -> bool {
    !value.is_empty()
        && !value
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, ',' | ';' | ':'))
}
