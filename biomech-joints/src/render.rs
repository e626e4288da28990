//! Render properties and the drawing interface used by joints.
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineStyle {
    Line,
    Cylinder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderProps {
    pub visible: bool,
    /// RGB color with components in $[0, 1]$.
    pub line_color: [f32; 3],
    pub line_style: LineStyle,
    pub line_width: u32,
    pub line_radius: f64,
}

impl Default for RenderProps {
    fn default() -> Self {
        Self {
            visible: true,
            line_color: [1.0, 1.0, 1.0],
            line_style: LineStyle::Line,
            line_width: 1,
            line_radius: 1.0,
        }
    }
}

impl RenderProps {
    /// Blue cylinders, used to draw joint axes.
    pub fn axis_lines() -> Self {
        Self {
            line_color: [0.0, 0.0, 1.0],
            line_style: LineStyle::Cylinder,
            ..Self::default()
        }
    }
}

/// Receives primitives from components that draw themselves.
pub trait Renderer {
    /// Draws a line segment between two points in world coordinates.
    fn draw_line(&mut self, props: &RenderProps, p0: [f32; 3], p1: [f32; 3], capped: bool, selected: bool);
}
