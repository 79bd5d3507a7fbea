use crate::parser::ast::NodeType;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub number: Color,
    pub operator: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub selection_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    operator: Color::Rgb(148, 226, 213),       // Cyan for operators
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for status bar
    selection_bg: Color::Rgb(69, 71, 90),      // Selected tree row
};

/// Colour for a node's `nodeType`, one per variant.
pub fn node_color(node_type: NodeType) -> Color {
    match node_type {
        NodeType::Function => Color::Rgb(255, 140, 0),
        NodeType::Application => Color::Rgb(153, 50, 204),
        NodeType::Let => Color::Rgb(60, 179, 113),
        NodeType::BinaryOp => Color::Rgb(70, 130, 180),
        NodeType::If => Color::Rgb(220, 20, 60),
        NodeType::Variable => Color::Rgb(30, 144, 255),
        NodeType::Number => Color::Rgb(255, 215, 0),
    }
}
