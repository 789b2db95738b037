//! Property tweens.
//!
//! A tween moves a widget's position, size, alpha or background colors
//! from their values at the time the tween is started to a target, shaped
//! by an [`Easing`] curve. Tweens advance in
//! [`WidgetTree::advance_tweens`], which the scheduler calls once per
//! frame. The clock of a tween starts on the first advance after it is
//! created, and the last step always lands exactly on the target.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use super::graphic::Graphic;
use super::tree::{WidgetId, WidgetTree};
use crate::colors::{ColorPair, Lerp};
use crate::error::{ConfigurationError, Error, Result};
use crate::geometry::{Point, Size};

/// Shape of a tween over its normalized duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Easing {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InSine,
    OutSine,
    InOutSine,
    InExp,
    OutExp,
    InOutExp,
    InCirc,
    OutCirc,
    InOutCirc,
    InElastic,
    OutElastic,
    InOutElastic,
    InBack,
    OutBack,
    InOutBack,
    InBounce,
    OutBounce,
    InOutBounce,
}

impl Easing {
    pub const ALL: [Easing; 31] = [
        Easing::Linear,
        Easing::InQuad,
        Easing::OutQuad,
        Easing::InOutQuad,
        Easing::InCubic,
        Easing::OutCubic,
        Easing::InOutCubic,
        Easing::InQuart,
        Easing::OutQuart,
        Easing::InOutQuart,
        Easing::InQuint,
        Easing::OutQuint,
        Easing::InOutQuint,
        Easing::InSine,
        Easing::OutSine,
        Easing::InOutSine,
        Easing::InExp,
        Easing::OutExp,
        Easing::InOutExp,
        Easing::InCirc,
        Easing::OutCirc,
        Easing::InOutCirc,
        Easing::InElastic,
        Easing::OutElastic,
        Easing::InOutElastic,
        Easing::InBack,
        Easing::OutBack,
        Easing::InOutBack,
        Easing::InBounce,
        Easing::OutBounce,
        Easing::InOutBounce,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::InQuad => "in_quad",
            Easing::OutQuad => "out_quad",
            Easing::InOutQuad => "in_out_quad",
            Easing::InCubic => "in_cubic",
            Easing::OutCubic => "out_cubic",
            Easing::InOutCubic => "in_out_cubic",
            Easing::InQuart => "in_quart",
            Easing::OutQuart => "out_quart",
            Easing::InOutQuart => "in_out_quart",
            Easing::InQuint => "in_quint",
            Easing::OutQuint => "out_quint",
            Easing::InOutQuint => "in_out_quint",
            Easing::InSine => "in_sine",
            Easing::OutSine => "out_sine",
            Easing::InOutSine => "in_out_sine",
            Easing::InExp => "in_exp",
            Easing::OutExp => "out_exp",
            Easing::InOutExp => "in_out_exp",
            Easing::InCirc => "in_circ",
            Easing::OutCirc => "out_circ",
            Easing::InOutCirc => "in_out_circ",
            Easing::InElastic => "in_elastic",
            Easing::OutElastic => "out_elastic",
            Easing::InOutElastic => "in_out_elastic",
            Easing::InBack => "in_back",
            Easing::OutBack => "out_back",
            Easing::InOutBack => "in_out_back",
            Easing::InBounce => "in_bounce",
            Easing::OutBounce => "out_bounce",
            Easing::InOutBounce => "in_out_bounce",
        }
    }

    /// Map progress `t` to an eased proportion. `t` is clamped to `[0, 1]`
    /// and the curve is pinned to 0 and 1 at the ends; elastic and back
    /// curves overshoot in between.
    pub fn ease(self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::Linear => t,
            Easing::InQuad => t.powi(2),
            Easing::OutQuad => out_pow(t, 2),
            Easing::InOutQuad => in_out_pow(t, 2),
            Easing::InCubic => t.powi(3),
            Easing::OutCubic => out_pow(t, 3),
            Easing::InOutCubic => in_out_pow(t, 3),
            Easing::InQuart => t.powi(4),
            Easing::OutQuart => out_pow(t, 4),
            Easing::InOutQuart => in_out_pow(t, 4),
            Easing::InQuint => t.powi(5),
            Easing::OutQuint => out_pow(t, 5),
            Easing::InOutQuint => in_out_pow(t, 5),
            Easing::InSine => 1.0 - (t * PI / 2.0).cos(),
            Easing::OutSine => (t * PI / 2.0).sin(),
            Easing::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            Easing::InExp => 2f64.powf(10.0 * t - 10.0),
            Easing::OutExp => 1.0 - 2f64.powf(-10.0 * t),
            Easing::InOutExp => {
                if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Easing::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            Easing::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Easing::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Easing::InElastic => {
                let c4 = 2.0 * PI / 3.0;
                -(2f64.powf(10.0 * t - 10.0)) * ((10.0 * t - 10.75) * c4).sin()
            }
            Easing::OutElastic => {
                let c4 = 2.0 * PI / 3.0;
                2f64.powf(-10.0 * t) * ((10.0 * t - 0.75) * c4).sin() + 1.0
            }
            Easing::InOutElastic => {
                let c5 = 2.0 * PI / 4.5;
                let s = ((20.0 * t - 11.125) * c5).sin();
                if t < 0.5 {
                    -(2f64.powf(20.0 * t - 10.0) * s) / 2.0
                } else {
                    2f64.powf(-20.0 * t + 10.0) * s / 2.0 + 1.0
                }
            }
            Easing::InBack => BACK_C3 * t.powi(3) - BACK_C1 * t.powi(2),
            Easing::OutBack => 1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2),
            Easing::InOutBack => {
                let c2 = BACK_C1 * 1.525;
                if t < 0.5 {
                    (2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (2.0 * t - 2.0) + c2) + 2.0) / 2.0
                }
            }
            Easing::InBounce => 1.0 - out_bounce(1.0 - t),
            Easing::OutBounce => out_bounce(t),
            Easing::InOutBounce => {
                if t < 0.5 {
                    (1.0 - out_bounce(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + out_bounce(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

fn out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

fn in_out_pow(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn out_bounce(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;
    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Easing {
    type Err = ConfigurationError;

    fn from_str(token: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = token.trim().to_ascii_lowercase();
        Easing::ALL
            .iter()
            .copied()
            .find(|easing| easing.as_str() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownEasing(token.to_string()))
    }
}

/// End values for a tween. Properties left as `None` are not animated.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TweenTarget {
    pub pos: Option<Point>,
    pub size: Option<Size>,
    /// Ignored for plain widgets.
    pub alpha: Option<f64>,
    pub background: Option<ColorPair>,
}

impl TweenTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pos(mut self, pos: Point) -> Self {
        self.pos = Some(pos);
        self
    }

    pub fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn background(mut self, background: ColorPair) -> Self {
        self.background = Some(background);
        self
    }
}

pub(crate) struct Tween {
    id: WidgetId,
    from: TweenTarget,
    to: TweenTarget,
    duration: Duration,
    easing: Easing,
    started: Option<Instant>,
}

impl Tween {
    fn progress(&mut self, now: Instant) -> f64 {
        let started = *self.started.get_or_insert(now);
        if self.duration.is_zero() {
            return 1.0;
        }
        now.saturating_duration_since(started).as_secs_f64() / self.duration.as_secs_f64()
    }

    fn apply(&self, tree: &mut WidgetTree, p: f64) -> Result<()> {
        let id = self.id;
        if let (Some(a), Some(b)) = (self.from.pos, self.to.pos) {
            tree.set_pos(id, Point::new(lerp_i32(a.y, b.y, p), lerp_i32(a.x, b.x, p)))?;
        }
        if let (Some(a), Some(b)) = (self.from.size, self.to.size) {
            let size = Size::new(lerp_u16(a.height, b.height, p), lerp_u16(a.width, b.width, p));
            tree.set_size(id, size)?;
        }
        if let (Some(a), Some(b)) = (self.from.alpha, self.to.alpha) {
            let alpha = if p >= 1.0 { b } else { a + (b - a) * p };
            tree.set_alpha(id, alpha)?;
        }
        if let (Some(a), Some(b)) = (self.from.background, self.to.background) {
            let ch = tree.get(id).ok_or(Error::WidgetNotFound(id))?.background_char();
            tree.set_background(id, ch, a.lerp(b, p))?;
        }
        Ok(())
    }
}

fn lerp_i32(a: i32, b: i32, p: f64) -> i32 {
    let value = f64::from(a) + (f64::from(b) - f64::from(a)) * p;
    value.round().clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
}

fn lerp_u16(a: u16, b: u16, p: f64) -> u16 {
    let value = f64::from(a) + (f64::from(b) - f64::from(a)) * p;
    value.round().clamp(0.0, f64::from(u16::MAX)) as u16
}

impl WidgetTree {
    /// Animate `id` towards `target` over `duration`. Replaces any tween
    /// already running on `id`.
    pub fn tween(&mut self, id: WidgetId, target: TweenTarget, duration: Duration, easing: Easing) -> Result<()> {
        let node = self.get(id).ok_or(Error::WidgetNotFound(id))?;
        let from = TweenTarget {
            pos: target.pos.map(|_| node.literal_pos()),
            size: target.size.map(|_| node.literal_size()),
            alpha: target.alpha.and(node.graphic().map(Graphic::alpha)),
            background: target.background.map(|_| node.background_color_pair()),
        };
        let replaced = self.cancel_tweens(id);
        debug!(?id, %easing, ?duration, replaced, "tween started");
        self.tweens.push(Tween {
            id,
            from,
            to: target,
            duration,
            easing,
            started: None,
        });
        Ok(())
    }

    /// Stop every tween on `id` where it stands. Returns how many were
    /// stopped.
    pub fn cancel_tweens(&mut self, id: WidgetId) -> usize {
        let before = self.tweens.len();
        self.tweens.retain(|tween| tween.id != id);
        before - self.tweens.len()
    }

    pub fn is_tweening(&self, id: WidgetId) -> bool {
        self.tweens.iter().any(|tween| tween.id == id)
    }

    /// Step every tween to `now`. Returns true if any widget changed.
    ///
    /// Tweens of destroyed widgets are dropped. A tween started from a
    /// change callback during the step replaces the one that triggered it.
    pub fn advance_tweens(&mut self, now: Instant) -> bool {
        if self.tweens.is_empty() {
            return false;
        }
        let mut running = Vec::new();
        let mut changed = false;
        for mut tween in std::mem::take(&mut self.tweens) {
            if !self.contains(tween.id) {
                continue;
            }
            let t = tween.progress(now);
            changed = true;
            if tween.apply(self, tween.easing.ease(t)).is_err() {
                continue;
            }
            if t < 1.0 {
                running.push(tween);
            } else {
                trace!(id = ?tween.id, "tween finished");
            }
        }
        let fresh = std::mem::take(&mut self.tweens);
        running.retain(|tween| !fresh.iter().any(|new| new.id == tween.id));
        running.extend(fresh);
        self.tweens = running;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{AColor, Color, BLACK, WHITE};
    use crate::widget::{Property, WidgetConfig};
    use std::cell::RefCell;
    use std::rc::Rc;

    const SECOND: Duration = Duration::from_secs(1);

    fn tree_with_child() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let child = tree.create(WidgetConfig::new().size(Size::new(2, 4)));
        tree.add_child(root, child).unwrap();
        (tree, child)
    }

    fn pos(tree: &WidgetTree, id: WidgetId) -> Point {
        tree.get(id).unwrap().literal_pos()
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in Easing::ALL {
            assert_eq!(easing.ease(0.0), 0.0, "{easing}");
            assert_eq!(easing.ease(1.0), 1.0, "{easing}");
            assert_eq!(easing.ease(-3.0), 0.0, "{easing}");
            assert_eq!(easing.ease(7.0), 1.0, "{easing}");
        }
    }

    #[test]
    fn test_easing_midpoints() {
        assert_eq!(Easing::Linear.ease(0.5), 0.5);
        assert_eq!(Easing::InQuad.ease(0.5), 0.25);
        assert_eq!(Easing::OutQuad.ease(0.5), 0.75);
        assert_eq!(Easing::InOutCubic.ease(0.5), 0.5);
        assert!((Easing::InOutSine.ease(0.5) - 0.5).abs() < 1e-12);
        assert!(Easing::OutBack.ease(0.7) > 1.0);
        assert!(Easing::InBack.ease(0.2) < 0.0);
        assert!((Easing::OutBounce.ease(1.0 / 2.75) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_easing_names() {
        assert_eq!("out_bounce".parse::<Easing>().unwrap(), Easing::OutBounce);
        assert_eq!(" IN_OUT_EXP ".parse::<Easing>().unwrap(), Easing::InOutExp);
        assert!(matches!(
            "wobble".parse::<Easing>(),
            Err(ConfigurationError::UnknownEasing(_))
        ));
        for easing in Easing::ALL {
            assert_eq!(easing.to_string().parse::<Easing>().unwrap(), easing);
        }
    }

    #[test]
    fn test_tween_position_is_eased_and_exact_at_end() {
        let (mut tree, child) = tree_with_child();
        tree.tween(child, TweenTarget::new().pos(Point::new(0, 100)), SECOND, Easing::InQuad)
            .unwrap();
        let start = Instant::now();

        assert!(tree.advance_tweens(start));
        assert_eq!(pos(&tree, child), Point::new(0, 0));

        tree.advance_tweens(start + SECOND / 2);
        assert_eq!(pos(&tree, child), Point::new(0, 25));
        assert!(tree.is_tweening(child));

        tree.advance_tweens(start + SECOND * 2);
        assert_eq!(pos(&tree, child), Point::new(0, 100));
        assert!(!tree.is_tweening(child));
        assert!(!tree.advance_tweens(start + SECOND * 3));
    }

    #[test]
    fn test_tween_size_alpha_and_background() {
        let mut tree = WidgetTree::new(Size::new(24, 80));
        let root = tree.root();
        let graphic = tree.create(WidgetConfig::graphic(AColor::new(0, 0, 0, 255)).size(Size::new(2, 2)));
        tree.add_child(root, graphic).unwrap();
        tree.set_alpha(graphic, 0.0).unwrap();
        tree.set_background(graphic, '#', ColorPair::new(BLACK, BLACK)).unwrap();

        let target = TweenTarget::new()
            .size(Size::new(10, 20))
            .alpha(1.0)
            .background(ColorPair::new(WHITE, WHITE));
        tree.tween(graphic, target, SECOND, Easing::Linear).unwrap();
        let start = Instant::now();
        tree.advance_tweens(start);
        tree.advance_tweens(start + SECOND / 2);

        let node = tree.get(graphic).unwrap();
        assert_eq!(node.literal_size(), Size::new(6, 11));
        assert_eq!(node.graphic().unwrap().alpha(), 0.5);
        assert_eq!(node.background_char(), '#');
        assert_eq!(node.background_color_pair().fg, Color::new(128, 128, 128));

        tree.advance_tweens(start + SECOND);
        let node = tree.get(graphic).unwrap();
        assert_eq!(node.literal_size(), Size::new(10, 20));
        assert_eq!(node.graphic().unwrap().alpha(), 1.0);
        assert_eq!(node.background_color_pair(), ColorPair::new(WHITE, WHITE));
    }

    #[test]
    fn test_overshoot_never_goes_below_zero_size() {
        let (mut tree, child) = tree_with_child();
        tree.tween(child, TweenTarget::new().size(Size::new(0, 0)), SECOND, Easing::OutBack)
            .unwrap();
        let start = Instant::now();
        tree.advance_tweens(start);
        tree.advance_tweens(start + SECOND * 7 / 10);
        assert_eq!(tree.get(child).unwrap().literal_size(), Size::new(0, 0));
    }

    #[test]
    fn test_new_tween_replaces_running_one() {
        let (mut tree, child) = tree_with_child();
        let start = Instant::now();
        tree.tween(child, TweenTarget::new().pos(Point::new(0, 40)), SECOND, Easing::Linear)
            .unwrap();
        tree.advance_tweens(start);
        tree.advance_tweens(start + SECOND / 2);
        assert_eq!(pos(&tree, child), Point::new(0, 20));

        tree.tween(child, TweenTarget::new().pos(Point::new(10, 20)), SECOND, Easing::Linear)
            .unwrap();
        let restart = start + SECOND;
        tree.advance_tweens(restart);
        assert_eq!(pos(&tree, child), Point::new(0, 20));
        tree.advance_tweens(restart + SECOND / 2);
        assert_eq!(pos(&tree, child), Point::new(5, 20));
        tree.advance_tweens(restart + SECOND);
        assert_eq!(pos(&tree, child), Point::new(10, 20));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let (mut tree, child) = tree_with_child();
        tree.tween(child, TweenTarget::new().pos(Point::new(3, 3)), Duration::ZERO, Easing::OutElastic)
            .unwrap();
        assert!(tree.advance_tweens(Instant::now()));
        assert_eq!(pos(&tree, child), Point::new(3, 3));
        assert!(!tree.is_tweening(child));
    }

    #[test]
    fn test_cancel_and_destroy_stop_tweens() {
        let (mut tree, child) = tree_with_child();
        tree.tween(child, TweenTarget::new().pos(Point::new(9, 9)), SECOND, Easing::Linear)
            .unwrap();
        assert_eq!(tree.cancel_tweens(child), 1);
        assert!(!tree.advance_tweens(Instant::now()));
        assert_eq!(pos(&tree, child), Point::ORIGIN);

        tree.tween(child, TweenTarget::new().pos(Point::new(9, 9)), SECOND, Easing::Linear)
            .unwrap();
        tree.destroy(child).unwrap();
        assert!(!tree.advance_tweens(Instant::now()));
        assert!(!tree.is_tweening(child));
    }

    #[test]
    fn test_tween_notifies_observers() {
        let (mut tree, child) = tree_with_child();
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        tree.on_change(child, Property::Pos, child, move |_, _| *counter.borrow_mut() += 1)
            .unwrap();
        tree.tween(child, TweenTarget::new().pos(Point::new(0, 10)), SECOND, Easing::Linear)
            .unwrap();
        let start = Instant::now();
        tree.advance_tweens(start);
        tree.advance_tweens(start + SECOND);
        assert_eq!(*seen.borrow(), 1);
    }
}
