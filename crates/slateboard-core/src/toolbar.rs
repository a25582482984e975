//! Active tool and color selection.

use crate::element::InkColor;
use crate::tools::ToolKind;
use serde::{Deserialize, Serialize};

/// Current toolbar selection.
///
/// Read at the start of every gesture; changing it never touches elements
/// that already exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toolbar {
    tool: ToolKind,
    color: InkColor,
}

impl Toolbar {
    pub fn new(tool: ToolKind, color: InkColor) -> Self {
        Self { tool, color }
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn color(&self) -> InkColor {
        self.color
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: InkColor) {
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_pen_and_black() {
        let toolbar = Toolbar::default();
        assert_eq!(toolbar.tool(), ToolKind::Pen);
        assert_eq!(toolbar.color(), InkColor::BLACK);
    }

    #[test]
    fn test_tool_selection() {
        let mut toolbar = Toolbar::default();
        toolbar.set_tool(ToolKind::Circle);
        toolbar.set_color(InkColor::RED);
        assert_eq!(toolbar, Toolbar::new(ToolKind::Circle, InkColor::RED));
    }
}
