//! Widget arena.
//!
//! Every widget lives in a [`SlotMap`] owned by [`WidgetTree`] and is
//! addressed by a stable [`WidgetId`]. Parents hold their children's ids in
//! paint order; children hold their parent's id. Ids of destroyed widgets
//! are never reused, so a stale id simply stops resolving.

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use super::behavior::Behavior;
use super::graphic::Graphic;
use super::node::{WidgetConfig, WidgetKind, WidgetNode};
use super::observer::{ObserverRegistry, Property, SubscriptionHandle};
use super::tween::Tween;
use crate::colors::ColorPair;
use crate::config::ColorTheme;
use crate::error::{Error, Result};
use crate::geometry::{Anchor, Point, PosHint, Rect, Size, SizeHint};

new_key_type! {
    /// Stable handle to a widget in a [`WidgetTree`].
    pub struct WidgetId;
}

pub struct WidgetTree {
    pub(crate) nodes: SlotMap<WidgetId, WidgetNode>,
    root: WidgetId,
    focus: Option<WidgetId>,
    grab: Option<WidgetId>,
    observers: ObserverRegistry,
    theme: ColorTheme,
    pub(crate) tweens: Vec<Tween>,
}

impl WidgetTree {
    /// A tree whose opaque root has the given size.
    pub fn new(size: Size) -> Self {
        Self::with_root(WidgetConfig::new().size(size))
    }

    pub fn with_root(config: WidgetConfig) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(WidgetNode::from_config(config));
        Self {
            nodes,
            root,
            focus: None,
            grab: None,
            observers: ObserverRegistry::default(),
            theme: ColorTheme::default(),
            tweens: Vec::new(),
        }
    }

    pub fn root(&self) -> WidgetId {
        self.root
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of widgets, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.get(id)
    }

    fn node(&self, id: WidgetId) -> Result<&WidgetNode> {
        self.nodes.get(id).ok_or(Error::WidgetNotFound(id))
    }

    fn node_mut(&mut self, id: WidgetId) -> Result<&mut WidgetNode> {
        self.nodes.get_mut(id).ok_or(Error::WidgetNotFound(id))
    }

    /// Create a detached widget.
    pub fn create(&mut self, config: WidgetConfig) -> WidgetId {
        let id = self.nodes.insert(WidgetNode::from_config(config));
        debug!(?id, "widget created");
        id
    }

    /// Append `child` to `parent`'s children (painted last, on top).
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        self.node(parent)?;
        if self.node(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        if child == self.root || self.is_descendant_of(parent, child) {
            return Err(Error::CycleDetected { parent, child });
        }

        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        debug!(?parent, ?child, "widget added");

        self.update_geometry(child);
        let subtree = self.walk(child);
        let theme = self.theme.clone();
        for &id in &subtree {
            self.apply_theme(id, &theme);
        }
        for id in subtree {
            self.with_behavior(id, |behavior, tree| behavior.on_add(tree, id));
        }
        Ok(())
    }

    /// Detach `child` from `parent`. The child and its subtree stay in the
    /// arena and may be added again.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> Result<()> {
        if child == self.root {
            return Err(Error::RootRemoval);
        }
        self.node(parent)?;
        if self.node(child)?.parent != Some(parent) {
            return Err(Error::NotAChild { parent, child });
        }

        let subtree = self.walk(child);
        for &id in &subtree {
            self.with_behavior(id, |behavior, tree| behavior.on_remove(tree, id));
        }
        let mut cancelled = 0;
        for &id in &subtree {
            cancelled += self.observers.cancel_owned_by(id);
        }
        self.release_within(&subtree);

        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&id| id != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            if node.parent == Some(parent) {
                node.parent = None;
            }
        }
        debug!(?parent, ?child, cancelled, "widget removed");

        self.update_geometry(child);
        Ok(())
    }

    /// Move `child` under `new_parent`, detaching it first if needed.
    pub fn reparent(&mut self, child: WidgetId, new_parent: WidgetId) -> Result<()> {
        self.node(new_parent)?;
        let old_parent = self.node(child)?.parent;
        if child == self.root {
            return Err(Error::RootRemoval);
        }
        if self.is_descendant_of(new_parent, child) {
            return Err(Error::CycleDetected {
                parent: new_parent,
                child,
            });
        }
        if let Some(old_parent) = old_parent {
            self.remove_child(old_parent, child)?;
        }
        self.add_child(new_parent, child)
    }

    /// Destroy every child of `id`, leaving `id` itself in place.
    pub fn prolicide(&mut self, id: WidgetId) -> Result<()> {
        for child in self.node(id)?.children.clone() {
            self.destroy(child)?;
        }
        Ok(())
    }

    /// Remove `id` and its whole subtree from the arena.
    pub fn destroy(&mut self, id: WidgetId) -> Result<()> {
        if id == self.root {
            return Err(Error::RootRemoval);
        }
        if let Some(parent) = self.node(id)?.parent {
            self.remove_child(parent, id)?;
        }
        let subtree = self.walk(id);
        self.release_within(&subtree);
        for &dead in &subtree {
            self.nodes.remove(dead);
            self.observers.drop_target(dead);
            self.observers.cancel_owned_by(dead);
        }
        debug!(?id, count = subtree.len(), "subtree destroyed");
        Ok(())
    }

    fn release_within(&mut self, subtree: &[WidgetId]) {
        if self.focus.is_some_and(|id| subtree.contains(&id)) {
            self.focus = None;
        }
        if self.grab.is_some_and(|id| subtree.contains(&id)) {
            self.grab = None;
        }
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children in paint order; empty for unknown ids.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        match self.nodes.get(id) {
            Some(node) => &node.children,
            None => &[],
        }
    }

    /// True if `id` is `ancestor` or lies below it.
    pub fn is_descendant_of(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            if cur == ancestor {
                return true;
            }
            current = self.parent(cur);
        }
        false
    }

    /// True if `id` and all of its ancestors are enabled.
    pub fn is_effectively_enabled(&self, id: WidgetId) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.nodes.get(cur) {
                Some(node) if node.is_enabled => current = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// True if `id` is connected to the root.
    pub fn is_attached(&self, id: WidgetId) -> bool {
        self.is_descendant_of(id, self.root)
    }

    /// `id` and its descendants, pre-order (parents before children,
    /// children in paint order).
    pub fn walk(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.get(cur) {
                out.push(cur);
                stack.extend(node.children.iter().rev());
            }
        }
        out
    }

    /// Move `id` to the end of its parent's children so it paints on top.
    pub fn pull_to_front(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|&child| child != id);
            node.children.push(id);
        }
    }

    // Geometry

    pub fn set_size(&mut self, id: WidgetId, size: Size) -> Result<()> {
        self.node_mut(id)?.size = size;
        self.update_geometry(id);
        Ok(())
    }

    pub fn set_pos(&mut self, id: WidgetId, pos: Point) -> Result<()> {
        self.node_mut(id)?.pos = pos;
        self.update_geometry(id);
        Ok(())
    }

    /// Update any of the hints; `None` leaves that hint unchanged.
    pub fn set_hints(
        &mut self,
        id: WidgetId,
        size_hint: Option<SizeHint>,
        pos_hint: Option<PosHint>,
        anchor: Option<Anchor>,
    ) -> Result<()> {
        let node = self.node_mut(id)?;
        if let Some(hint) = size_hint {
            node.size_hint = hint;
        }
        if let Some(hint) = pos_hint {
            node.pos_hint = hint;
        }
        if let Some(anchor) = anchor {
            node.anchor = anchor;
        }
        self.update_geometry(id);
        Ok(())
    }

    /// Drop both hints; geometry reverts to the literal size and position.
    pub fn clear_hints(&mut self, id: WidgetId) -> Result<()> {
        self.set_hints(id, Some(SizeHint::default()), Some(PosHint::default()), None)
    }

    /// Resolved position relative to the canvas origin.
    pub fn absolute_pos(&self, id: WidgetId) -> Option<Point> {
        let mut node = self.nodes.get(id)?;
        let mut pos = node.resolved_pos;
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent)?;
            pos = pos + node.resolved_pos;
        }
        Some(pos)
    }

    /// Absolute bounding box.
    pub fn rect(&self, id: WidgetId) -> Option<Rect> {
        let size = self.nodes.get(id)?.resolved_size;
        Some(Rect::from_pos_size(self.absolute_pos(id)?, size))
    }

    /// Convert an absolute point into `id`'s local coordinates.
    pub fn to_local(&self, id: WidgetId, point: Point) -> Option<Point> {
        Some(point - self.absolute_pos(id)?)
    }

    /// True if the absolute `point` is inside `id` and inside every
    /// ancestor (the part of the widget that can actually be seen).
    pub fn collides_point(&self, id: WidgetId, point: Point) -> bool {
        let mut current = Some(id);
        while let Some(cur) = current {
            match self.rect(cur) {
                Some(rect) if rect.contains(point) => {}
                _ => return false,
            }
            current = self.parent(cur);
        }
        true
    }

    /// True if the absolute bounding boxes of `a` and `b` overlap.
    pub fn collides_widget(&self, a: WidgetId, b: WidgetId) -> bool {
        match (self.rect(a), self.rect(b)) {
            (Some(a), Some(b)) => a.intersects(&b),
            _ => false,
        }
    }

    // Appearance

    pub fn set_visible(&mut self, id: WidgetId, visible: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.is_visible != visible {
            node.is_visible = visible;
            self.notify(id, Property::Visible);
        }
        Ok(())
    }

    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.is_enabled != enabled {
            node.is_enabled = enabled;
            self.notify(id, Property::Enabled);
        }
        Ok(())
    }

    pub fn set_transparent(&mut self, id: WidgetId, transparent: bool) -> Result<()> {
        let node = self.node_mut(id)?;
        if node.is_transparent != transparent {
            node.is_transparent = transparent;
            self.notify(id, Property::Transparent);
        }
        Ok(())
    }

    pub fn set_background(&mut self, id: WidgetId, ch: char, color_pair: ColorPair) -> Result<()> {
        let node = self.node_mut(id)?;
        node.background_char = ch;
        node.background_color_pair = color_pair;
        self.notify(id, Property::Background);
        Ok(())
    }

    pub fn set_behavior(&mut self, id: WidgetId, behavior: impl Behavior) -> Result<()> {
        self.node_mut(id)?.behavior = Some(Box::new(behavior));
        Ok(())
    }

    /// Graphic state of a graphic widget.
    pub fn graphic_mut(&mut self, id: WidgetId) -> Option<&mut Graphic> {
        match &mut self.nodes.get_mut(id)?.kind {
            WidgetKind::Graphic(graphic) => Some(graphic),
            WidgetKind::Plain => None,
        }
    }

    /// Set a graphic widget's alpha, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, id: WidgetId, alpha: f64) -> Result<()> {
        self.node(id)?;
        if let Some(graphic) = self.graphic_mut(id) {
            graphic.set_alpha(alpha);
            self.notify(id, Property::Alpha);
        }
        Ok(())
    }

    // Focus and pointer grab

    pub fn focus(&mut self, id: WidgetId) -> Result<()> {
        self.node(id)?;
        self.focus = Some(id);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.focus = None;
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focus.filter(|&id| self.contains(id))
    }

    /// Route every mouse event to `id` until released.
    pub fn grab_pointer(&mut self, id: WidgetId) {
        if self.contains(id) {
            self.grab = Some(id);
        }
    }

    /// Release the pointer grab if `id` holds it.
    pub fn release_pointer(&mut self, id: WidgetId) {
        if self.grab == Some(id) {
            self.grab = None;
        }
    }

    pub fn grabbed(&self) -> Option<WidgetId> {
        self.grab.filter(|&id| self.contains(id))
    }

    // Theme

    pub fn theme(&self) -> &ColorTheme {
        &self.theme
    }

    /// Store `theme` and push it to every themable behavior in the tree.
    pub fn set_theme(&mut self, theme: ColorTheme) {
        debug!(theme = %theme.name, "theme changed");
        self.theme = theme.clone();
        for id in self.walk(self.root) {
            self.apply_theme(id, &theme);
        }
    }

    fn apply_theme(&mut self, id: WidgetId, theme: &ColorTheme) {
        self.with_behavior(id, |behavior, tree| {
            if let Some(themable) = behavior.as_themable() {
                themable.update_theme(tree, id, theme);
            }
        });
    }

    // Change notification

    /// Run `callback` whenever `property` of `target` changes. The
    /// subscription is cancelled when `owner` is removed from the tree.
    pub fn on_change<F>(
        &mut self,
        target: WidgetId,
        property: Property,
        owner: WidgetId,
        callback: F,
    ) -> Result<SubscriptionHandle>
    where
        F: FnMut(&mut WidgetTree, WidgetId) + 'static,
    {
        self.node(target)?;
        self.node(owner)?;
        Ok(self
            .observers
            .subscribe(target, property, owner, Box::new(callback)))
    }

    /// Returns false if the handle was already cancelled.
    pub fn cancel(&mut self, handle: SubscriptionHandle) -> bool {
        self.observers.cancel(handle)
    }

    /// Run the callbacks registered for `(target, property)`.
    ///
    /// A callback is skipped while it is already running, so a callback
    /// that changes the property it observes does not recurse.
    pub fn notify(&mut self, target: WidgetId, property: Property) {
        for handle in self.observers.handles(target, property) {
            if let Some(mut callback) = self.observers.take_callback(handle) {
                callback(self, target);
                self.observers.restore_callback(handle, callback);
            }
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.observers.len()
    }

    /// Run `f` with `id`'s behavior moved out of the node.
    pub(crate) fn with_behavior<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut (dyn Behavior + 'static), &mut WidgetTree) -> R,
    ) -> Option<R> {
        let mut behavior = self.nodes.get_mut(id)?.behavior.take()?;
        let result = f(behavior.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(id) {
            if node.behavior.is_none() {
                node.behavior = Some(behavior);
            }
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::behavior::Themable;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Behavior for Recorder {
        fn on_add(&mut self, _tree: &mut WidgetTree, _id: WidgetId) {
            self.log.borrow_mut().push(format!("add {}", self.name));
        }

        fn on_remove(&mut self, _tree: &mut WidgetTree, _id: WidgetId) {
            self.log.borrow_mut().push(format!("remove {}", self.name));
        }

        fn as_themable(&mut self) -> Option<&mut dyn Themable> {
            Some(self)
        }
    }

    impl Themable for Recorder {
        fn update_theme(&mut self, _tree: &mut WidgetTree, _id: WidgetId, theme: &ColorTheme) {
            self.log.borrow_mut().push(format!("theme {} {}", self.name, theme.name));
        }
    }

    fn recorder(name: &'static str, log: &Log) -> WidgetConfig {
        WidgetConfig::new().behavior(Recorder {
            name,
            log: Rc::clone(log),
        })
    }

    #[test]
    fn test_add_and_remove_child() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let child = tree.create(WidgetConfig::new());
        tree.add_child(root, child).unwrap();
        assert_eq!(tree.children(root), &[child]);
        assert_eq!(tree.parent(child), Some(root));
        assert!(tree.is_attached(child));

        tree.remove_child(root, child).unwrap();
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.parent(child), None);
        assert!(tree.contains(child));
    }

    #[test]
    fn test_add_child_errors() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let a = tree.create(WidgetConfig::new());
        let b = tree.create(WidgetConfig::new());
        tree.add_child(root, a).unwrap();
        tree.add_child(a, b).unwrap();

        assert!(matches!(tree.add_child(root, a), Err(Error::AlreadyAttached(id)) if id == a));
        tree.remove_child(root, a).unwrap();
        assert!(matches!(tree.add_child(b, a), Err(Error::CycleDetected { .. })));
        assert!(matches!(tree.add_child(a, root), Err(Error::CycleDetected { .. })));
        assert!(matches!(tree.remove_child(root, b), Err(Error::NotAChild { .. })));
        assert!(matches!(tree.remove_child(a, root), Err(Error::RootRemoval)));
        assert!(matches!(tree.destroy(root), Err(Error::RootRemoval)));
    }

    #[test]
    fn test_reparent() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let a = tree.create(WidgetConfig::new());
        let b = tree.create(WidgetConfig::new());
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.reparent(b, a).unwrap();
        assert_eq!(tree.children(root), &[a]);
        assert_eq!(tree.children(a), &[b]);
        assert!(matches!(tree.reparent(a, b), Err(Error::CycleDetected { .. })));
    }

    #[test]
    fn test_destroy_removes_subtree() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let a = tree.create(WidgetConfig::new());
        let b = tree.create(WidgetConfig::new());
        tree.add_child(root, a).unwrap();
        tree.add_child(a, b).unwrap();
        tree.focus(b).unwrap();
        tree.on_change(root, Property::Size, b, |_, _| {}).unwrap();
        tree.on_change(b, Property::Size, root, |_, _| {}).unwrap();

        tree.destroy(a).unwrap();
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert_eq!(tree.focused(), None);
        assert_eq!(tree.subscription_count(), 0);
        assert!(matches!(tree.set_size(b, Size::new(1, 1)), Err(Error::WidgetNotFound(_))));
    }

    #[test]
    fn test_lifecycle_hooks_run_over_subtree() {
        let log = Log::default();
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let panel = tree.create(recorder("panel", &log));
        let button = tree.create(recorder("button", &log));
        tree.add_child(panel, button).unwrap();
        log.borrow_mut().clear();

        tree.add_child(root, panel).unwrap();
        tree.remove_child(root, panel).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                "theme panel default",
                "theme button default",
                "add panel",
                "add button",
                "remove panel",
                "remove button",
            ]
        );
    }

    #[test]
    fn test_set_theme_reaches_themables() {
        let log = Log::default();
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let a = tree.create(recorder("a", &log));
        tree.add_child(root, a).unwrap();
        log.borrow_mut().clear();

        tree.set_theme(ColorTheme::by_name("nord"));
        assert_eq!(*log.borrow(), vec!["theme a nord"]);
        assert_eq!(tree.theme().name, "nord");
    }

    #[test]
    fn test_observers_run_in_order_and_cancel() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let first = Rc::clone(&seen);
        let second = Rc::clone(&seen);
        let h1 = tree
            .on_change(root, Property::Custom("value"), root, move |_, _| first.borrow_mut().push(1))
            .unwrap();
        tree.on_change(root, Property::Custom("value"), root, move |_, _| second.borrow_mut().push(2))
            .unwrap();

        tree.notify(root, Property::Custom("value"));
        assert_eq!(*seen.borrow(), vec![1, 2]);

        assert!(tree.cancel(h1));
        assert!(!tree.cancel(h1));
        tree.notify(root, Property::Custom("value"));
        assert_eq!(*seen.borrow(), vec![1, 2, 2]);
    }

    #[test]
    fn test_owner_removal_cancels_subscriptions() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let indicator = tree.create(WidgetConfig::new());
        tree.add_child(root, indicator).unwrap();
        let hits = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&hits);
        tree.on_change(root, Property::Size, indicator, move |_, _| *counter.borrow_mut() += 1)
            .unwrap();

        tree.set_size(root, Size::new(30, 100)).unwrap();
        assert_eq!(*hits.borrow(), 1);

        tree.remove_child(root, indicator).unwrap();
        tree.set_size(root, Size::new(10, 10)).unwrap();
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(tree.subscription_count(), 0);
    }

    #[test]
    fn test_callback_does_not_recurse() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let calls = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&calls);
        tree.on_change(root, Property::Visible, root, move |tree, id| {
            *counter.borrow_mut() += 1;
            tree.notify(id, Property::Visible);
        })
        .unwrap();
        tree.set_visible(root, false).unwrap();
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn test_coordinates() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let panel = tree.create(WidgetConfig::new().size(Size::new(10, 20)).pos(Point::new(2, 3)));
        let label = tree.create(WidgetConfig::new().size(Size::new(1, 5)).pos(Point::new(1, 18)));
        tree.add_child(root, panel).unwrap();
        tree.add_child(panel, label).unwrap();

        assert_eq!(tree.absolute_pos(label), Some(Point::new(3, 21)));
        assert_eq!(tree.to_local(label, Point::new(3, 22)), Some(Point::new(0, 1)));
        assert!(tree.collides_point(label, Point::new(3, 22)));
        // Inside the label's box but clipped by the panel.
        assert!(!tree.collides_point(label, Point::new(3, 24)));
    }

    #[test]
    fn test_pull_to_front() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let a = tree.create(WidgetConfig::new());
        let b = tree.create(WidgetConfig::new());
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();
        tree.pull_to_front(a);
        assert_eq!(tree.children(root), &[b, a]);
    }

    #[test]
    fn test_prolicide_destroys_children_only() {
        let log = Log::default();
        let mut tree = WidgetTree::new(Size::new(10, 10));
        let root = tree.root();
        let parent = tree.create(recorder("parent", &log));
        let a = tree.create(recorder("a", &log));
        let b = tree.create(recorder("b", &log));
        let grandchild = tree.create(recorder("grandchild", &log));
        tree.add_child(root, parent).unwrap();
        tree.add_child(parent, a).unwrap();
        tree.add_child(parent, b).unwrap();
        tree.add_child(a, grandchild).unwrap();

        tree.prolicide(parent).unwrap();
        assert!(tree.children(parent).is_empty());
        assert!(tree.contains(parent));
        assert!(!tree.contains(a));
        assert!(!tree.contains(b));
        assert!(!tree.contains(grandchild));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_collides_widget() {
        let mut tree = WidgetTree::new(Size::new(20, 20));
        let root = tree.root();
        let a = tree.create(WidgetConfig::new().size(Size::new(4, 4)));
        let b = tree.create(WidgetConfig::new().size(Size::new(4, 4)).pos(Point::new(3, 3)));
        let c = tree.create(WidgetConfig::new().size(Size::new(4, 4)).pos(Point::new(4, 0)));
        for id in [a, b, c] {
            tree.add_child(root, id).unwrap();
        }
        assert!(tree.collides_widget(a, b));
        assert!(tree.collides_widget(b, a));
        assert!(!tree.collides_widget(a, c));
        assert!(tree.collides_widget(b, c));
    }

    #[test]
    fn test_walk_is_preorder() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let a = tree.create(WidgetConfig::new());
        let a1 = tree.create(WidgetConfig::new());
        let b = tree.create(WidgetConfig::new());
        tree.add_child(root, a).unwrap();
        tree.add_child(a, a1).unwrap();
        tree.add_child(root, b).unwrap();
        assert_eq!(tree.walk(root), vec![root, a, a1, b]);
    }
}
