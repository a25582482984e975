//! The whiteboard surface: scene, toolbar and gesture state.

use crate::element::{DrawingElement, InkColor};
use crate::input::{BoardEvent, PointerEvent};
use crate::interaction::InteractionState;
use crate::scene::Scene;
use crate::toolbar::Toolbar;
use crate::tools::ToolKind;
use kurbo::{Point, Size};

/// Surface size used until the host reports one.
pub const DEFAULT_SURFACE_SIZE: Size = Size::new(800.0, 600.0);

/// What an event changed, so the host knows whether to re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    /// Nothing visible changed.
    None,
    /// The scene was mutated (element added or extended).
    Scene,
    /// Only the surface dimensions changed.
    Surface,
    /// The host should run the export action.
    SaveRequested,
}

impl Change {
    /// Whether the rendered surface is out of date.
    pub fn needs_render(self) -> bool {
        matches!(self, Change::Scene | Change::Surface)
    }
}

/// A whiteboard exclusively owning its scene.
#[derive(Debug, Clone)]
pub struct Whiteboard {
    scene: Scene,
    toolbar: Toolbar,
    interaction: InteractionState,
    surface_size: Size,
}

impl Default for Whiteboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Whiteboard {
    /// Create a new whiteboard with an empty scene.
    pub fn new() -> Self {
        Self::with_surface_size(DEFAULT_SURFACE_SIZE)
    }

    pub fn with_surface_size(size: Size) -> Self {
        Self {
            scene: Scene::new(),
            toolbar: Toolbar::default(),
            interaction: InteractionState::Idle,
            surface_size: clamp_size(size),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    pub fn surface_size(&self) -> Size {
        self.surface_size
    }

    /// Check if a gesture is active.
    pub fn is_drawing(&self) -> bool {
        self.interaction.is_drawing()
    }

    /// The element the active gesture is extending, if any.
    pub fn in_progress(&self) -> Option<&DrawingElement> {
        self.interaction
            .gesture()
            .and_then(|g| self.scene.get(g.index))
    }

    /// Set the current tool. Only affects gestures started afterwards.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.toolbar.set_tool(tool);
    }

    /// Set the current color. Only affects gestures started afterwards.
    pub fn set_color(&mut self, color: InkColor) {
        self.toolbar.set_color(color);
    }

    pub fn pointer_down(&mut self, position: Point) -> Change {
        self.interaction
            .pointer_down(&mut self.scene, &self.toolbar, position);
        Change::Scene
    }

    pub fn pointer_move(&mut self, position: Point) -> Change {
        if self.interaction.pointer_move(&mut self.scene, position) {
            Change::Scene
        } else {
            Change::None
        }
    }

    pub fn pointer_up(&mut self) -> Change {
        if let Some(gesture) = self.interaction.commit() {
            if self.scene.get(gesture.index).is_some_and(DrawingElement::is_degenerate) {
                log::debug!("element {} committed without extent", gesture.id);
            }
        }
        Change::None
    }

    /// Leaving the surface ends the gesture exactly like a pointer-up.
    pub fn pointer_leave(&mut self) -> Change {
        self.pointer_up()
    }

    /// Update the surface's logical dimensions. Never touches the scene.
    pub fn resize(&mut self, width: f64, height: f64) -> Change {
        let size = clamp_size(Size::new(width, height));
        if size == self.surface_size {
            return Change::None;
        }
        log::debug!("surface resized to {}x{}", size.width, size.height);
        self.surface_size = size;
        Change::Surface
    }

    /// Dispatch a host event.
    pub fn handle(&mut self, event: BoardEvent) -> Change {
        match event {
            BoardEvent::Pointer(PointerEvent::Down { position }) => self.pointer_down(position),
            BoardEvent::Pointer(PointerEvent::Move { position }) => self.pointer_move(position),
            BoardEvent::Pointer(PointerEvent::Up) => self.pointer_up(),
            BoardEvent::Pointer(PointerEvent::Leave) => self.pointer_leave(),
            BoardEvent::Resize { width, height } => self.resize(width, height),
            BoardEvent::SelectTool(tool) => {
                self.set_tool(tool);
                Change::None
            }
            BoardEvent::SelectColor(color) => {
                self.set_color(color);
                Change::None
            }
            BoardEvent::Save => Change::SaveRequested,
        }
    }
}

/// Negative or non-finite dimensions collapse to zero.
fn clamp_size(size: Size) -> Size {
    let clamp = |v: f64| if v.is_finite() { v.max(0.0) } else { 0.0 };
    Size::new(clamp(size.width), clamp(size.height))
}
