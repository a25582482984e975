//! Slateboard Core Library
//!
//! Platform-agnostic data structures and interaction logic for the
//! Slateboard whiteboard: elements, the scene, tool policy and the pointer
//! gesture state machine.

pub mod board;
pub mod element;
pub mod input;
pub mod interaction;
pub mod scene;
pub mod toolbar;
pub mod tools;

pub use board::{Change, DEFAULT_SURFACE_SIZE, Whiteboard};
pub use element::{ColorParseError, DragBox, DrawingElement, ElementId, ElementKind, InkColor, Stroke};
pub use input::{BoardEvent, PointerEvent};
pub use interaction::{Gesture, InteractionState};
pub use scene::Scene;
pub use toolbar::Toolbar;
pub use tools::ToolKind;
