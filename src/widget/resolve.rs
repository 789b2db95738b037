//! Hint resolution.
//!
//! Resolution is parent-driven: a widget reads its parent's resolved size,
//! never the other way round. When a widget's resolved size changes it
//! refits its texture, tells its behavior, notifies `Size` observers and
//! then asks each child to resolve itself against the new size.

use tracing::trace;

use super::node::WidgetKind;
use super::observer::Property;
use super::tree::{WidgetId, WidgetTree};

impl WidgetTree {
    /// Re-run hint resolution for `id` and cascade size changes downward.
    pub fn update_geometry(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let parent_size = node
            .parent
            .and_then(|parent| self.nodes.get(parent))
            .map(|parent| parent.resolved_size);
        let (size, pos) = match parent_size {
            Some(parent) => {
                let size = node.size_hint.resolve(node.size, parent);
                let pos = node.pos_hint.resolve(node.anchor, node.pos, size, parent);
                (size, pos)
            }
            None => (node.size, node.pos),
        };

        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        let size_changed = node.resolved_size != size;
        let pos_changed = node.resolved_pos != pos;
        node.resolved_size = size;
        node.resolved_pos = pos;
        if !size_changed && !pos_changed {
            return;
        }
        trace!(?id, ?size, ?pos, "geometry resolved");

        if size_changed {
            if let WidgetKind::Graphic(graphic) = &mut node.kind {
                graphic.fit(size);
            }
            self.with_behavior(id, |behavior, tree| behavior.on_size(tree, id));
            self.notify(id, Property::Size);
            for child in self.children(id).to_vec() {
                self.update_geometry(child);
            }
        }
        if pos_changed {
            self.notify(id, Property::Pos);
        }
    }
}
