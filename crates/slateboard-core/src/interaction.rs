//! Pointer gesture lifecycle: `Idle` → `Drawing` → `Idle`.

use crate::element::ElementId;
use crate::scene::Scene;
use crate::toolbar::Toolbar;
use crate::tools;
use kurbo::Point;

/// Handle to the element a gesture is extending.
///
/// Set on pointer-down, dropped on commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gesture {
    /// Position of the in-progress element in the scene.
    pub index: usize,
    /// ID of the in-progress element.
    pub id: ElementId,
}

/// State of the pointer interaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InteractionState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A gesture is extending an element.
    Drawing(Gesture),
}

impl InteractionState {
    /// Check if a gesture is active.
    pub fn is_drawing(&self) -> bool {
        matches!(self, InteractionState::Drawing(_))
    }

    pub fn gesture(&self) -> Option<Gesture> {
        match self {
            InteractionState::Drawing(g) => Some(*g),
            InteractionState::Idle => None,
        }
    }

    /// Begin a gesture: start a new element at `at` using the toolbar's
    /// current tool and color.
    ///
    /// A gesture that is still active is committed first so two gestures
    /// never share one element.
    pub fn pointer_down(&mut self, scene: &mut Scene, toolbar: &Toolbar, at: Point) -> Gesture {
        if let Some(previous) = self.commit() {
            log::debug!("pointer-down while drawing; committed {}", previous.id);
        }

        let element = tools::begin(toolbar.tool(), toolbar.color(), at);
        let id = element.id();
        let index = scene.push(element);
        let gesture = Gesture { index, id };

        log::debug!(
            "gesture started: {} {} at ({}, {})",
            toolbar.tool().name(),
            id,
            at.x,
            at.y
        );
        *self = InteractionState::Drawing(gesture);
        gesture
    }

    /// Extend the in-progress element. Returns `false` (no-op) when idle.
    pub fn pointer_move(&mut self, scene: &mut Scene, point: Point) -> bool {
        let InteractionState::Drawing(gesture) = *self else {
            return false;
        };

        match scene.get_mut(gesture.index) {
            Some(element) if element.id() == gesture.id => {
                tools::extend(element.kind_mut(), point);
                true
            }
            _ => {
                // The handle no longer matches the scene; drop the gesture
                // rather than mutate an unrelated element.
                log::warn!("gesture handle {} is stale; returning to idle", gesture.id);
                *self = InteractionState::Idle;
                false
            }
        }
    }

    /// Commit the in-progress element and return to `Idle`.
    ///
    /// Returns the committed gesture, or `None` when already idle.
    pub fn commit(&mut self) -> Option<Gesture> {
        match std::mem::take(self) {
            InteractionState::Drawing(gesture) => {
                log::debug!("gesture committed: {}", gesture.id);
                Some(gesture)
            }
            InteractionState::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementKind, InkColor};
    use crate::tools::ToolKind;

    #[test]
    fn test_down_enters_drawing() {
        let mut state = InteractionState::default();
        let mut scene = Scene::new();
        let toolbar = Toolbar::default();

        assert!(!state.is_drawing());
        let gesture = state.pointer_down(&mut scene, &toolbar, Point::new(1.0, 2.0));
        assert!(state.is_drawing());
        assert_eq!(gesture.index, 0);
        assert_eq!(scene.len(), 1);
        assert_eq!(scene.get(0).unwrap().id(), gesture.id);
    }

    #[test]
    fn test_move_without_down_is_noop() {
        let mut state = InteractionState::default();
        let mut scene = Scene::new();
        assert!(!state.pointer_move(&mut scene, Point::new(5.0, 5.0)));
        assert!(scene.is_empty());
        assert_eq!(state, InteractionState::Idle);
    }

    #[test]
    fn test_commit_when_idle_is_noop() {
        let mut state = InteractionState::default();
        assert!(state.commit().is_none());
    }

    #[test]
    fn test_moves_after_commit_do_not_mutate() {
        let mut state = InteractionState::default();
        let mut scene = Scene::new();
        let toolbar = Toolbar::default();

        state.pointer_down(&mut scene, &toolbar, Point::new(0.0, 0.0));
        state.pointer_move(&mut scene, Point::new(5.0, 5.0));
        state.commit();
        let frozen = scene.clone();

        assert!(!state.pointer_move(&mut scene, Point::new(9.0, 9.0)));
        assert_eq!(scene, frozen);
    }

    #[test]
    fn test_reentrant_down_commits_previous() {
        let mut state = InteractionState::default();
        let mut scene = Scene::new();
        let mut toolbar = Toolbar::default();

        let first = state.pointer_down(&mut scene, &toolbar, Point::new(0.0, 0.0));
        state.pointer_move(&mut scene, Point::new(3.0, 4.0));
        let before = scene.get(first.index).cloned().unwrap();

        toolbar.set_tool(ToolKind::Rectangle);
        let second = state.pointer_down(&mut scene, &toolbar, Point::new(10.0, 10.0));
        state.pointer_move(&mut scene, Point::new(20.0, 20.0));

        assert_ne!(first.id, second.id);
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.get(first.index).unwrap(), &before);
        assert!(matches!(
            scene.get(second.index).unwrap().kind(),
            ElementKind::Rectangle(_)
        ));
        assert_eq!(state.gesture(), Some(second));
    }

    #[test]
    fn test_toolbar_read_only_at_gesture_start() {
        let mut state = InteractionState::default();
        let mut scene = Scene::new();
        let mut toolbar = Toolbar::new(ToolKind::Pen, InkColor::RED);

        state.pointer_down(&mut scene, &toolbar, Point::new(0.0, 0.0));
        toolbar.set_tool(ToolKind::Circle);
        toolbar.set_color(InkColor::BLACK);
        state.pointer_move(&mut scene, Point::new(1.0, 1.0));

        let el = scene.get(0).unwrap();
        assert_eq!(el.tool(), ToolKind::Pen);
        assert_eq!(el.color(), InkColor::RED);
        assert_eq!(el.kind().as_stroke().unwrap().len(), 2);
    }
}
