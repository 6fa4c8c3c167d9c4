//! Topic diagram with click-to-focus zoom.
//!
//! Renders a small node/edge diagram on an HTML canvas with:
//! - Focus buttons that center and zoom the view onto one node
//! - A zoom slider and zoom controls bound to the live viewport zoom
//! - Node content that only shows above a zoom threshold
//! - Pan, wheel zoom, a minimap and drag-to-connect between handles
//!
//! # Example
//!
//! ```ignore
//! use topic_flow::components::flow_canvas::{FlowCanvas, FlowData};
//! use topic_flow::topics::builtin_topics;
//!
//! let data: FlowData = builtin_topics();
//!
//! view! { <FlowCanvas data=data.into() fullscreen=true /> }
//! ```

mod component;
mod error;
mod focus;
mod minimap;
mod render;
pub mod scale;
mod state;
pub mod theme;
mod types;
mod viewport;

pub use component::FlowCanvas;
pub use error::FlowError;
pub use focus::{FocusController, ViewportCommand};
pub use theme::Theme;
pub use types::{FlowData, FlowEdge, FlowNode, FocusConfig, Position, ZoomRange};
