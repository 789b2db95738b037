//! Widget behaviors and capability traits.
//!
//! A [`Behavior`] is the optional per-widget object that reacts to input,
//! lifecycle and resize hooks and paints on top of the widget's background.
//! Extra capabilities are separate traits composed by delegation:
//!
//! - [`Grabbable`]: mouse-down grabs the pointer, mouse-up releases it
//! - [`Themable`]: reacts to [`WidgetTree::set_theme`]
//! - [`HitTestable`]: refines which local points count as "inside"
//!
//! While a hook runs the behavior is taken out of its node, so hooks get
//! the whole tree mutably and are never re-entered for the same widget.

use super::node::WidgetNode;
use super::tree::{WidgetId, WidgetTree};
use crate::config::ColorTheme;
use crate::geometry::{Point, Size};
use crate::input::{KeyEvent, MouseButton, MouseEvent, MouseEventType};
use crate::render::CanvasView;

pub trait Behavior: 'static {
    /// Return true if the key was handled; unhandled keys bubble up.
    fn on_key(&mut self, _tree: &mut WidgetTree, _id: WidgetId, _event: &KeyEvent) -> bool {
        false
    }

    /// Return true if the mouse event was handled.
    fn on_mouse(&mut self, _tree: &mut WidgetTree, _id: WidgetId, _event: &MouseEvent) -> bool {
        false
    }

    fn on_paste(&mut self, _tree: &mut WidgetTree, _id: WidgetId, _text: &str) -> bool {
        false
    }

    /// Called after the widget's resolved size changed.
    fn on_size(&mut self, _tree: &mut WidgetTree, _id: WidgetId) {}

    fn on_add(&mut self, _tree: &mut WidgetTree, _id: WidgetId) {}

    fn on_remove(&mut self, _tree: &mut WidgetTree, _id: WidgetId) {}

    /// Draw over the widget's background. `view` is in widget-local
    /// coordinates and clipped to the visible region.
    fn paint(&self, _node: &WidgetNode, _view: &mut CanvasView<'_>) {}

    fn as_themable(&mut self) -> Option<&mut dyn Themable> {
        None
    }

    fn hit_test(&self) -> Option<&dyn HitTestable> {
        None
    }
}

/// Responds to theme changes.
pub trait Themable {
    fn update_theme(&mut self, tree: &mut WidgetTree, id: WidgetId, theme: &ColorTheme);
}

/// Local containment test, applied after the bounding-box check.
pub trait HitTestable {
    fn contains_local(&self, local: Point, size: Size) -> bool;
}

/// Bookkeeping for [`Grabbable`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabState {
    pub is_grabbable: bool,
    /// Pull the widget to the front of its siblings when grabbed.
    pub ptf_on_grab: bool,
    pub mouse_button: MouseButton,
    is_grabbed: bool,
    last_mouse_pos: Point,
    mouse_dy: i32,
    mouse_dx: i32,
}

impl Default for GrabState {
    fn default() -> Self {
        Self {
            is_grabbable: true,
            ptf_on_grab: false,
            mouse_button: MouseButton::Left,
            is_grabbed: false,
            last_mouse_pos: Point::ORIGIN,
            mouse_dy: 0,
            mouse_dx: 0,
        }
    }
}

impl GrabState {
    pub fn pull_to_front(mut self, ptf_on_grab: bool) -> Self {
        self.ptf_on_grab = ptf_on_grab;
        self
    }

    pub fn button(mut self, button: MouseButton) -> Self {
        self.mouse_button = button;
        self
    }

    pub fn is_grabbed(&self) -> bool {
        self.is_grabbed
    }

    pub fn last_mouse_pos(&self) -> Point {
        self.last_mouse_pos
    }

    /// Vertical movement since the previous grabbed mouse event.
    pub fn mouse_dy(&self) -> i32 {
        self.mouse_dy
    }

    /// Horizontal movement since the previous grabbed mouse event.
    pub fn mouse_dx(&self) -> i32 {
        self.mouse_dx
    }

    fn track(&mut self, pos: Point) {
        self.mouse_dy = pos.y - self.last_mouse_pos.y;
        self.mouse_dx = pos.x - self.last_mouse_pos.x;
        self.last_mouse_pos = pos;
    }
}

/// Drag support. Forward `on_mouse` to [`Grabbable::grab_on_mouse`].
pub trait Grabbable {
    fn grab_state(&self) -> &GrabState;

    fn grab_state_mut(&mut self) -> &mut GrabState;

    /// Grab the pointer for `id`.
    fn grab(&mut self, tree: &mut WidgetTree, id: WidgetId, event: &MouseEvent) {
        let state = self.grab_state_mut();
        state.is_grabbed = true;
        state.last_mouse_pos = event.pos;
        state.mouse_dy = 0;
        state.mouse_dx = 0;
        let ptf = state.ptf_on_grab;
        tree.grab_pointer(id);
        if ptf {
            tree.pull_to_front(id);
        }
    }

    fn ungrab(&mut self, tree: &mut WidgetTree, id: WidgetId, _event: &MouseEvent) {
        self.grab_state_mut().is_grabbed = false;
        tree.release_pointer(id);
    }

    /// Called for every mouse event while grabbed, except the releasing one.
    fn grab_update(&mut self, _tree: &mut WidgetTree, _id: WidgetId, _event: &MouseEvent) {}

    /// Mouse-down inside the widget with the grab button grabs; mouse-up
    /// releases; everything in between goes to `grab_update`.
    fn grab_on_mouse(&mut self, tree: &mut WidgetTree, id: WidgetId, event: &MouseEvent) -> bool {
        if !self.grab_state().is_grabbable {
            return false;
        }
        if self.grab_state().is_grabbed && tree.grabbed() != Some(id) {
            // Grab was released from outside (widget removed, grab stolen).
            self.grab_state_mut().is_grabbed = false;
        }

        if self.grab_state().is_grabbed {
            if event.event_type == MouseEventType::MouseUp {
                self.ungrab(tree, id, event);
            } else {
                self.grab_state_mut().track(event.pos);
                self.grab_update(tree, id, event);
            }
            return true;
        }

        if event.event_type == MouseEventType::MouseDown
            && event.button == self.grab_state().mouse_button
            && tree.collides_point(id, event.pos)
        {
            self.grab(tree, id, event);
            return true;
        }
        false
    }
}
