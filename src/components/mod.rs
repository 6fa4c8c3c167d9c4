//! UI components.

pub mod flow_canvas;
