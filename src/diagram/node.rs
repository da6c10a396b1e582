//! Flowchart text fragments.

use crate::core::{Category, State};

/// Opening and closing bracket of a node shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub open: &'static str,
    pub close: &'static str,
}

impl Shape {
    pub const RECTANGLE: Shape = Shape::new("[", "]");
    pub const RHOMBUS: Shape = Shape::new("{", "}");
    pub const STADIUM: Shape = Shape::new("([", "])");
    pub const CIRCLE: Shape = Shape::new("((", "))");
    pub const DOUBLE_CIRCLE: Shape = Shape::new("(((", ")))");
    pub const HEXAGON: Shape = Shape::new("{{", "}}");

    const fn new(open: &'static str, close: &'static str) -> Self {
        Self { open, close }
    }

    /// The shape a state is drawn with.
    pub fn of(state: &State) -> Shape {
        match state.category() {
            Category::Choice => Self::RHOMBUS,
            Category::Pass => Self::STADIUM,
            Category::Succeed => Self::CIRCLE,
            Category::Fail => Self::DOUBLE_CIRCLE,
            Category::Wait => Self::HEXAGON,
            Category::Task | Category::Parallel | Category::Map => Self::RECTANGLE,
        }
    }
}

/// Quoted node label. Double quotes inside the name become entity codes.
pub fn label(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "#quot;"))
}

/// `id<open>"name"<close>`
pub fn declaration(id: &str, name: &str, shape: Shape) -> String {
    format!("{id}{}{}{}\n", shape.open, label(name), shape.close)
}

pub fn edge(from: &str, to: &str) -> String {
    format!("{from} --> {to}\n")
}

pub fn fill(id: &str, color: &str) -> String {
    format!("style {id} fill:{color}\n")
}

pub fn click(id: &str, name: &str) -> String {
    format!("click {id} callback {}\n", label(name))
}
