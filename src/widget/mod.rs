//! Widget tree.
//!
//! - **tree**: the `WidgetTree` arena, structural edits, focus, grab, theme
//! - **node**: `WidgetNode` records and the `WidgetConfig` builder
//! - **resolve**: parent-driven size/position hint resolution
//! - **observer**: per-(widget, property) change subscriptions
//! - **graphic**: RGBA textures and resampling for graphic widgets
//! - **behavior**: the `Behavior` hook trait and capability traits
//! - **dispatch**: hit testing and event routing with bubbling
//! - **tween**: eased property animation driven by the frame clock

pub mod behavior;
pub mod dispatch;
pub mod graphic;
pub mod node;
pub mod observer;
pub mod resolve;
pub mod tree;
pub mod tween;

pub use behavior::{Behavior, GrabState, Grabbable, HitTestable, Themable};
pub use graphic::{Graphic, Interpolation, Texture};
pub use node::{WidgetConfig, WidgetKind, WidgetNode};
pub use observer::{Property, SubscriptionHandle};
pub use tree::{WidgetId, WidgetTree};
pub use tween::{Easing, TweenTarget};
