//! Event dispatch.
//!
//! Keys and pastes go to the focused widget (the root when nothing has
//! focus). Mouse events go to the pointer grabber if there is one, else to
//! the deepest enabled widget under the pointer. Either way the event then
//! bubbles to ancestors until a behavior reports it handled.
//!
//! A widget under a disabled ancestor never sees an event. Keys and pastes
//! aimed at such a widget start from the nearest ancestor that can take
//! them; a grab held by one is released and the event is hit tested.

use tracing::{debug, trace};

use super::behavior::Behavior;
use super::tree::{WidgetId, WidgetTree};
use crate::geometry::{Point, Rect};
use crate::input::{Event, KeyEvent, MouseEvent};

impl WidgetTree {
    /// Route `event`; returns true if some widget handled it.
    pub fn dispatch(&mut self, event: &Event) -> bool {
        match event {
            Event::Key(key) => self.dispatch_key(key),
            Event::Mouse(mouse) => self.dispatch_mouse(mouse),
            Event::Paste(text) => self.dispatch_paste(text),
        }
    }

    pub fn dispatch_key(&mut self, event: &KeyEvent) -> bool {
        match self.focus_target() {
            Some(target) => self.bubble(target, |behavior, tree, id| behavior.on_key(tree, id, event)),
            None => false,
        }
    }

    pub fn dispatch_paste(&mut self, text: &str) -> bool {
        match self.focus_target() {
            Some(target) => self.bubble(target, |behavior, tree, id| behavior.on_paste(tree, id, text)),
            None => false,
        }
    }

    pub fn dispatch_mouse(&mut self, event: &MouseEvent) -> bool {
        if let Some(grabber) = self.grabbed() {
            if self.is_effectively_enabled(grabber) {
                trace!(?grabber, "mouse event to grabber");
                return self
                    .with_behavior(grabber, |behavior, tree| behavior.on_mouse(tree, grabber, event))
                    .unwrap_or(false);
            }
            debug!(?grabber, "grabber disabled, releasing pointer");
            self.release_pointer(grabber);
        }
        match self.hit_test(event.pos) {
            Some(target) => self.bubble(target, |behavior, tree, id| behavior.on_mouse(tree, id, event)),
            None => false,
        }
    }

    /// Focused widget (or the root), moved up past any disabled ancestor.
    /// None when the root itself is disabled.
    fn focus_target(&self) -> Option<WidgetId> {
        let mut current = Some(self.focused().unwrap_or(self.root()));
        while let Some(id) = current {
            if self.is_effectively_enabled(id) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    /// Deepest enabled widget containing the absolute `point`, searching
    /// children in reverse paint order (topmost first).
    pub fn hit_test(&self, point: Point) -> Option<WidgetId> {
        self.deepest_at(self.root(), Point::ORIGIN, point)
    }

    fn deepest_at(&self, id: WidgetId, parent_pos: Point, point: Point) -> Option<WidgetId> {
        let node = self.get(id)?;
        if !node.is_enabled() {
            return None;
        }
        let pos = parent_pos + node.pos();
        if !Rect::from_pos_size(pos, node.size()).contains(point) {
            return None;
        }
        if let Some(hit) = node.behavior.as_ref().and_then(|behavior| behavior.hit_test()) {
            if !hit.contains_local(point - pos, node.size()) {
                return None;
            }
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| self.deepest_at(child, pos, point))
            .or(Some(id))
    }

    fn bubble(
        &mut self,
        target: WidgetId,
        mut offer: impl FnMut(&mut (dyn Behavior + 'static), &mut WidgetTree, WidgetId) -> bool,
    ) -> bool {
        let mut current = Some(target);
        while let Some(id) = current {
            let enabled = self.get(id).is_some_and(|node| node.is_enabled());
            if enabled
                && self
                    .with_behavior(id, |behavior, tree| offer(behavior, tree, id))
                    .unwrap_or(false)
            {
                trace!(?id, "event handled");
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::geometry::{Point, Size};
    use crate::input::{Event, Key, KeyEvent, MouseButton, MouseEvent, MouseEventType};
    use crate::widget::{
        Behavior, GrabState, Grabbable, HitTestable, WidgetConfig, WidgetId, WidgetTree,
    };
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    struct Listener {
        name: &'static str,
        handles: bool,
        log: Log,
    }

    impl Behavior for Listener {
        fn on_key(&mut self, _tree: &mut WidgetTree, _id: WidgetId, _event: &KeyEvent) -> bool {
            self.log.borrow_mut().push(self.name);
            self.handles
        }

        fn on_mouse(&mut self, _tree: &mut WidgetTree, _id: WidgetId, _event: &MouseEvent) -> bool {
            self.log.borrow_mut().push(self.name);
            self.handles
        }

        fn on_paste(&mut self, _tree: &mut WidgetTree, _id: WidgetId, _text: &str) -> bool {
            self.log.borrow_mut().push(self.name);
            self.handles
        }
    }

    fn listener(name: &'static str, handles: bool, log: &Log) -> Listener {
        Listener {
            name,
            handles,
            log: Rc::clone(log),
        }
    }

    fn mouse(y: i32, x: i32, event_type: MouseEventType) -> MouseEvent {
        MouseEvent::new(Point::new(y, x), MouseButton::Left, event_type)
    }

    /// root (24x80) > panel (10x20 at 2,2) > button (3x6 at 1,1)
    fn nested(log: &Log, panel_handles: bool) -> (WidgetTree, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        tree.set_behavior(root, listener("root", false, log)).unwrap();
        let panel = tree.create(
            WidgetConfig::new()
                .size(Size::new(10, 20))
                .pos(Point::new(2, 2))
                .behavior(listener("panel", panel_handles, log)),
        );
        let button = tree.create(
            WidgetConfig::new()
                .size(Size::new(3, 6))
                .pos(Point::new(1, 1))
                .behavior(listener("button", false, log)),
        );
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, button).unwrap();
        (tree, panel, button)
    }

    #[test]
    fn test_mouse_bubbles_from_deepest_widget() {
        let log = Log::default();
        let (mut tree, _, _) = nested(&log, false);
        let handled = tree.dispatch(&Event::Mouse(mouse(4, 4, MouseEventType::MouseDown)));
        assert!(!handled);
        assert_eq!(*log.borrow(), vec!["button", "panel", "root"]);
    }

    #[test]
    fn test_point_outside_grandchild_targets_child() {
        let log = Log::default();
        let (mut tree, _, _) = nested(&log, true);
        let handled = tree.dispatch(&Event::Mouse(mouse(10, 15, MouseEventType::MouseDown)));
        assert!(handled);
        assert_eq!(*log.borrow(), vec!["panel"]);
    }

    #[test]
    fn test_topmost_sibling_wins() {
        let log = Log::default();
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let back = tree.create(WidgetConfig::new().size(Size::new(5, 5)).behavior(listener("back", true, &log)));
        let front = tree.create(WidgetConfig::new().size(Size::new(5, 5)).behavior(listener("front", true, &log)));
        tree.add_child(root, back).unwrap();
        tree.add_child(root, front).unwrap();
        assert_eq!(tree.hit_test(Point::new(2, 2)), Some(front));

        tree.pull_to_front(back);
        assert_eq!(tree.hit_test(Point::new(2, 2)), Some(back));
    }

    #[test]
    fn test_disabled_subtree_is_skipped() {
        let log = Log::default();
        let (mut tree, panel, _) = nested(&log, true);
        tree.set_enabled(panel, false).unwrap();
        assert_eq!(tree.hit_test(Point::new(4, 4)), Some(tree.root()));
        tree.dispatch(&Event::Mouse(mouse(4, 4, MouseEventType::MouseDown)));
        assert_eq!(*log.borrow(), vec!["root"]);
    }

    #[test]
    fn test_invisible_widgets_still_receive_events() {
        let log = Log::default();
        let (mut tree, panel, button) = nested(&log, true);
        tree.set_visible(panel, false).unwrap();
        assert_eq!(tree.hit_test(Point::new(4, 4)), Some(button));
    }

    #[test]
    fn test_keys_go_to_focus_then_bubble() {
        let log = Log::default();
        let (mut tree, _, button) = nested(&log, true);
        let key = Event::Key(KeyEvent::plain(Key::Enter));

        assert!(!tree.dispatch(&key));
        assert_eq!(*log.borrow(), vec!["root"]);

        log.borrow_mut().clear();
        tree.focus(button).unwrap();
        assert!(tree.dispatch(&key));
        assert_eq!(*log.borrow(), vec!["button", "panel"]);

        log.borrow_mut().clear();
        assert!(tree.dispatch(&Event::Paste("text".into())));
        assert_eq!(*log.borrow(), vec!["button", "panel"]);
    }

    #[test]
    fn test_focus_inside_disabled_subtree() {
        let log = Log::default();
        let (mut tree, panel, button) = nested(&log, true);
        tree.focus(button).unwrap();
        tree.set_enabled(panel, false).unwrap();
        assert!(!tree.is_effectively_enabled(button));

        assert!(!tree.dispatch(&Event::Key(KeyEvent::plain(Key::Enter))));
        assert!(!tree.dispatch(&Event::Paste("text".into())));
        assert_eq!(*log.borrow(), vec!["root", "root"]);

        log.borrow_mut().clear();
        tree.set_enabled(panel, true).unwrap();
        assert!(tree.dispatch(&Event::Key(KeyEvent::plain(Key::Enter))));
        assert_eq!(*log.borrow(), vec!["button", "panel"]);
    }

    #[test]
    fn test_disabled_root_drops_keys() {
        let log = Log::default();
        let (mut tree, _, button) = nested(&log, true);
        tree.focus(button).unwrap();
        let root = tree.root();
        tree.set_enabled(root, false).unwrap();
        assert!(!tree.dispatch(&Event::Key(KeyEvent::plain(Key::Enter))));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_focus_inside_invisible_subtree_still_receives_keys() {
        let log = Log::default();
        let (mut tree, panel, button) = nested(&log, true);
        tree.focus(button).unwrap();
        tree.set_visible(panel, false).unwrap();
        assert!(tree.dispatch(&Event::Key(KeyEvent::plain(Key::Enter))));
        assert_eq!(*log.borrow(), vec!["button", "panel"]);
    }

    struct Circle;

    impl HitTestable for Circle {
        fn contains_local(&self, local: Point, size: Size) -> bool {
            let center = size.center();
            let (dy, dx) = (local.y - center.y, local.x - center.x);
            dy * dy + dx * dx <= 1
        }
    }

    impl Behavior for Circle {
        fn hit_test(&self) -> Option<&dyn HitTestable> {
            Some(self)
        }
    }

    #[test]
    fn test_hit_test_refinement() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let dot = tree.create(WidgetConfig::new().size(Size::new(3, 3)).behavior(Circle));
        tree.add_child(root, dot).unwrap();
        assert_eq!(tree.hit_test(Point::new(1, 1)), Some(dot));
        assert_eq!(tree.hit_test(Point::new(0, 0)), Some(root));
    }

    #[derive(Default)]
    struct Draggable {
        grab: GrabState,
        moved: Rc<RefCell<Vec<(i32, i32)>>>,
    }

    impl Grabbable for Draggable {
        fn grab_state(&self) -> &GrabState {
            &self.grab
        }

        fn grab_state_mut(&mut self) -> &mut GrabState {
            &mut self.grab
        }

        fn grab_update(&mut self, tree: &mut WidgetTree, id: WidgetId, _event: &MouseEvent) {
            let delta = (self.grab.mouse_dy(), self.grab.mouse_dx());
            self.moved.borrow_mut().push(delta);
            let pos = tree.get(id).unwrap().literal_pos();
            tree.set_pos(id, Point::new(pos.y + delta.0, pos.x + delta.1)).unwrap();
        }
    }

    impl Behavior for Draggable {
        fn on_mouse(&mut self, tree: &mut WidgetTree, id: WidgetId, event: &MouseEvent) -> bool {
            self.grab_on_mouse(tree, id, event)
        }
    }

    #[test]
    fn test_grab_receives_every_mouse_event() {
        let moved = Rc::new(RefCell::new(Vec::new()));
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let other = tree.create(WidgetConfig::new().size(Size::new(5, 5)).pos(Point::new(10, 10)));
        let handle = tree.create(WidgetConfig::new().size(Size::new(2, 4)).behavior(Draggable {
            grab: GrabState::default().pull_to_front(true),
            moved: Rc::clone(&moved),
        }));
        tree.add_child(root, handle).unwrap();
        tree.add_child(root, other).unwrap();

        assert!(tree.dispatch_mouse(&mouse(1, 1, MouseEventType::MouseDown)));
        assert_eq!(tree.grabbed(), Some(handle));
        assert_eq!(tree.children(root), &[other, handle]);

        // Far outside the handle, still delivered to it.
        assert!(tree.dispatch_mouse(&mouse(11, 11, MouseEventType::MouseMove)));
        assert_eq!(*moved.borrow(), vec![(10, 10)]);
        assert_eq!(tree.absolute_pos(handle), Some(Point::new(10, 10)));

        assert!(tree.dispatch_mouse(&mouse(12, 11, MouseEventType::MouseUp)));
        assert_eq!(tree.grabbed(), None);
        assert_eq!(tree.hit_test(Point::new(14, 14)), Some(other));
    }

    #[test]
    fn test_grab_released_when_ancestor_disabled() {
        let moved = Rc::new(RefCell::new(Vec::new()));
        let log = Log::default();
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        tree.set_behavior(root, listener("root", false, &log)).unwrap();
        let panel = tree.create(WidgetConfig::new().size(Size::new(10, 20)));
        let handle = tree.create(WidgetConfig::new().size(Size::new(2, 4)).behavior(Draggable {
            grab: GrabState::default(),
            moved: Rc::clone(&moved),
        }));
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, handle).unwrap();

        assert!(tree.dispatch_mouse(&mouse(0, 0, MouseEventType::MouseDown)));
        assert_eq!(tree.grabbed(), Some(handle));

        tree.set_enabled(panel, false).unwrap();
        assert!(!tree.dispatch_mouse(&mouse(3, 3, MouseEventType::MouseMove)));
        assert_eq!(tree.grabbed(), None);
        assert!(moved.borrow().is_empty());
        assert_eq!(*log.borrow(), vec!["root"]);

        // Re-enabled, a stale grab flag does not swallow the next click.
        tree.set_enabled(panel, true).unwrap();
        assert!(tree.dispatch_mouse(&mouse(0, 0, MouseEventType::MouseDown)));
        assert_eq!(tree.grabbed(), Some(handle));
        assert!(moved.borrow().is_empty());
    }

    #[test]
    fn test_grab_released_when_widget_removed() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let handle = tree.create(WidgetConfig::new().size(Size::new(2, 4)).behavior(Draggable::default()));
        tree.add_child(root, handle).unwrap();
        tree.dispatch_mouse(&mouse(0, 0, MouseEventType::MouseDown));
        assert_eq!(tree.grabbed(), Some(handle));
        tree.remove_child(root, handle).unwrap();
        assert_eq!(tree.grabbed(), None);
    }
}
