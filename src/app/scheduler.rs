//! Cooperative scheduler.
//!
//! Two tasks share one thread and talk only through the [`EventQueue`]:
//!
//! ```text
//! input task   → wait for bytes, decode, push events, expire escape prefixes
//!     ↓ EventQueue
//! render task  → on each frame tick: dispatch queued events, step tweens,
//!                recompose, present
//! ```
//!
//! The only blocking point is [`InputSource::wait`], which is given the time
//! left until the next deadline (frame tick or escape timeout).

use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use super::queue::EventQueue;
use crate::config::Config;
use crate::error::Result;
use crate::geometry::Size;
use crate::input::{Decoder, Event};
use crate::render::{Canvas, Compositor, TerminalWriter};
use crate::widget::WidgetTree;

/// Something delivered across the input boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Bytes(Vec<u8>),
    Resize(Size),
    /// The source is exhausted; the scheduler stops.
    Closed,
}

pub trait InputSource {
    /// Wait at most `timeout` for the next input. `None` means the wait
    /// timed out.
    fn wait(&mut self, timeout: Duration) -> Option<Input>;
}

impl InputSource for Receiver<Input> {
    fn wait(&mut self, timeout: Duration) -> Option<Input> {
        match self.recv_timeout(timeout) {
            Ok(input) => Some(input),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Input::Closed),
        }
    }
}

/// Scripted input, handy for tests and replays. Empty means closed.
impl InputSource for VecDeque<Input> {
    fn wait(&mut self, _timeout: Duration) -> Option<Input> {
        Some(self.pop_front().unwrap_or(Input::Closed))
    }
}

/// Where finished frames go.
pub trait Surface {
    fn present(&mut self, canvas: &Canvas) -> io::Result<()>;
}

impl<W: Write> Surface for TerminalWriter<W> {
    fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
        self.draw(canvas).map(|_| ())
    }
}

/// Returned by the handler for events no widget consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Scheduler {
    tree: WidgetTree,
    decoder: Decoder,
    queue: EventQueue,
    compositor: Compositor,
    escape_timeout: Duration,
    frame_interval: Duration,
    /// When the decoder last started holding an incomplete prefix.
    pending_since: Option<Instant>,
    dirty: bool,
    running: bool,
}

impl Scheduler {
    pub fn new(tree: WidgetTree, config: &Config) -> Self {
        let viewport = tree.get(tree.root()).map(|root| root.size()).unwrap_or_default();
        Self {
            tree,
            decoder: Decoder::new(),
            queue: EventQueue::new(config.input.queue_capacity),
            compositor: Compositor::new(viewport),
            escape_timeout: config.input.escape_timeout(),
            frame_interval: config.render.frame_interval(),
            pending_since: None,
            dirty: true,
            running: true,
        }
    }

    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.dirty = true;
        &mut self.tree
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Recompose on the next frame tick even if nothing was dispatched.
    pub fn request_redraw(&mut self) {
        self.dirty = true;
    }

    // Input task

    /// Decode a chunk of bytes into the queue.
    pub fn feed(&mut self, bytes: &[u8], now: Instant) {
        trace!(len = bytes.len(), "input bytes");
        let events = self.decoder.feed_bytes(bytes);
        self.enqueue(events);
        // The wait restarts with every chunk that leaves a prefix pending.
        self.pending_since = self.decoder.has_pending().then_some(now);
    }

    /// Expire a pending escape prefix once it has waited long enough.
    /// Returns true if the timeout fired.
    pub fn poll_timeout(&mut self, now: Instant) -> bool {
        match self.pending_since {
            Some(since) if now.duration_since(since) >= self.escape_timeout => {
                self.pending_since = None;
                let events = self.decoder.force_timeout();
                debug!(count = events.len(), "escape timeout");
                self.enqueue(events);
                true
            }
            _ => false,
        }
    }

    pub fn resize(&mut self, size: Size) -> Result<()> {
        debug!(?size, "viewport resized");
        let root = self.tree.root();
        self.tree.set_size(root, size)?;
        self.dirty = true;
        Ok(())
    }

    fn enqueue(&mut self, events: Vec<Event>) {
        for event in events {
            self.queue.push(event);
        }
    }

    // Render task

    /// Dispatch everything queued. Events no widget handled go to
    /// `unhandled`; a [`Flow::Quit`] stops the scheduler.
    pub fn dispatch_pending<F>(&mut self, unhandled: &mut F) -> Flow
    where
        F: FnMut(&mut WidgetTree, &Event) -> Flow,
    {
        while let Some(event) = self.queue.pop() {
            self.dirty = true;
            if self.tree.dispatch(&event) {
                continue;
            }
            if unhandled(&mut self.tree, &event) == Flow::Quit {
                info!("quit requested");
                self.running = false;
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Step running tweens to `now`; marks the frame dirty if any moved.
    pub fn animate(&mut self, now: Instant) -> bool {
        let changed = self.tree.advance_tweens(now);
        self.dirty |= changed;
        changed
    }

    /// Recompose the tree and present it if anything changed.
    pub fn render<S: Surface>(&mut self, surface: &mut S) -> io::Result<bool> {
        if !self.dirty {
            return Ok(false);
        }
        let viewport = self
            .tree
            .get(self.tree.root())
            .map(|root| root.size())
            .unwrap_or_default();
        let canvas = self.compositor.render(&self.tree, viewport);
        surface.present(canvas)?;
        self.dirty = false;
        Ok(true)
    }

    /// Time until the earliest deadline: the next frame or the escape timeout.
    fn next_wait(&self, now: Instant, next_frame: Instant) -> Duration {
        let mut deadline = next_frame;
        if let Some(since) = self.pending_since {
            deadline = deadline.min(since + self.escape_timeout);
        }
        deadline.saturating_duration_since(now)
    }

    /// Run both tasks until the source closes or `unhandled` asks to quit.
    pub fn run<I, S, F>(&mut self, source: &mut I, surface: &mut S, mut unhandled: F) -> Result<()>
    where
        I: InputSource,
        S: Surface,
        F: FnMut(&mut WidgetTree, &Event) -> Flow,
    {
        info!(
            escape_timeout = ?self.escape_timeout,
            frame_interval = ?self.frame_interval,
            "scheduler started"
        );
        self.render(surface)?;
        let mut next_frame = Instant::now() + self.frame_interval;

        while self.running {
            let wait = self.next_wait(Instant::now(), next_frame);
            match source.wait(wait) {
                Some(Input::Bytes(bytes)) => self.feed(&bytes, Instant::now()),
                Some(Input::Resize(size)) => self.resize(size)?,
                Some(Input::Closed) => {
                    info!("input closed");
                    self.running = false;
                }
                None => {}
            }
            self.poll_timeout(Instant::now());

            let now = Instant::now();
            if now >= next_frame || !self.running {
                if self.dispatch_pending(&mut unhandled) == Flow::Quit {
                    break;
                }
                self.animate(now);
                self.render(surface)?;
                next_frame = now + self.frame_interval;
            }
        }
        info!(dropped = self.queue.dropped(), "scheduler stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::input::{Key, KeyEvent};
    use crate::widget::{Behavior, Easing, TweenTarget, WidgetConfig, WidgetId};
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recorder(Rc<RefCell<Vec<KeyEvent>>>);

    impl Behavior for Recorder {
        fn on_key(&mut self, _tree: &mut WidgetTree, _id: WidgetId, event: &KeyEvent) -> bool {
            self.0.borrow_mut().push(*event);
            event.key != Key::Char('q')
        }
    }

    #[derive(Default)]
    struct Frames(Vec<Canvas>);

    impl Surface for Frames {
        fn present(&mut self, canvas: &Canvas) -> io::Result<()> {
            self.0.push(canvas.clone());
            Ok(())
        }
    }

    fn scheduler(config: &Config) -> (Scheduler, Rc<RefCell<Vec<KeyEvent>>>) {
        let keys = Rc::new(RefCell::new(Vec::new()));
        let tree = WidgetTree::with_root(
            WidgetConfig::new()
                .size(Size::new(2, 4))
                .behavior(Recorder(Rc::clone(&keys))),
        );
        (Scheduler::new(tree, config), keys)
    }

    fn ignore(_tree: &mut WidgetTree, _event: &Event) -> Flow {
        Flow::Continue
    }

    #[test]
    fn test_decoded_events_reach_the_tree() {
        let (mut scheduler, keys) = scheduler(&Config::default());
        scheduler.feed(b"ab", Instant::now());
        assert_eq!(scheduler.queue().len(), 2);
        assert_eq!(scheduler.dispatch_pending(&mut ignore), Flow::Continue);
        assert_eq!(*keys.borrow(), vec![KeyEvent::char('a'), KeyEvent::char('b')]);
        assert!(scheduler.queue().is_empty());
    }

    #[test]
    fn test_lone_escape_waits_for_timeout() {
        let (mut scheduler, _) = scheduler(&Config::default());
        let start = Instant::now();
        scheduler.feed(b"\x1b", start);
        assert!(scheduler.queue().is_empty());
        assert!(!scheduler.poll_timeout(start + Duration::from_millis(10)));
        assert!(scheduler.poll_timeout(start + Duration::from_millis(50)));
        assert_eq!(scheduler.queue().len(), 1);
        assert!(!scheduler.poll_timeout(start + Duration::from_millis(100)));
    }

    #[test]
    fn test_sequence_completed_before_timeout() {
        let (mut scheduler, keys) = scheduler(&Config::default());
        let start = Instant::now();
        scheduler.feed(b"\x1b[", start);
        scheduler.feed(b"A", start + Duration::from_millis(5));
        assert!(!scheduler.poll_timeout(start + Duration::from_millis(200)));
        scheduler.dispatch_pending(&mut ignore);
        assert_eq!(*keys.borrow(), vec![KeyEvent::plain(Key::Up)]);
    }

    #[test]
    fn test_full_queue_drops_events() {
        let mut config = Config::default();
        config.input.queue_capacity = 2;
        let (mut scheduler, _) = scheduler(&config);
        scheduler.feed(b"abc", Instant::now());
        assert_eq!(scheduler.queue().len(), 2);
        assert_eq!(scheduler.queue().dropped(), 1);
    }

    #[test]
    fn test_unhandled_event_can_quit() {
        let (mut scheduler, keys) = scheduler(&Config::default());
        scheduler.feed(b"xq\x03", Instant::now());
        let mut seen = Vec::new();
        let flow = scheduler.dispatch_pending(&mut |_tree: &mut WidgetTree, event: &Event| {
            seen.push(event.clone());
            Flow::Quit
        });
        assert_eq!(flow, Flow::Quit);
        assert!(!scheduler.is_running());
        assert_eq!(seen, vec![Event::Key(KeyEvent::char('q'))]);
        assert_eq!(keys.borrow().len(), 2);
        // Ctrl+C is still queued.
        assert_eq!(scheduler.queue().len(), 1);
    }

    #[test]
    fn test_render_only_when_dirty() {
        let (mut scheduler, _) = scheduler(&Config::default());
        let mut frames = Frames::default();
        assert!(scheduler.render(&mut frames).unwrap());
        assert!(!scheduler.render(&mut frames).unwrap());
        scheduler.request_redraw();
        assert!(scheduler.render(&mut frames).unwrap());
        assert_eq!(frames.0.len(), 2);
        assert_eq!(frames.0[0].size(), Size::new(2, 4));
    }

    #[test]
    fn test_tweens_advance_on_animate() {
        let (mut scheduler, _) = scheduler(&Config::default());
        let mut frames = Frames::default();
        scheduler.render(&mut frames).unwrap();

        let root = scheduler.tree().root();
        let child = scheduler.tree_mut().create(WidgetConfig::new().size(Size::new(1, 1)));
        scheduler.tree_mut().add_child(root, child).unwrap();
        scheduler
            .tree_mut()
            .tween(child, TweenTarget::new().pos(Point::new(1, 3)), Duration::from_secs(1), Easing::Linear)
            .unwrap();
        scheduler.render(&mut frames).unwrap();
        assert!(!scheduler.render(&mut frames).unwrap());

        let start = Instant::now();
        assert!(scheduler.animate(start));
        assert!(scheduler.render(&mut frames).unwrap());
        assert!(scheduler.animate(start + Duration::from_secs(1)));
        assert_eq!(scheduler.tree().absolute_pos(child), Some(Point::new(1, 3)));
        assert!(!scheduler.animate(start + Duration::from_secs(2)));
    }

    #[test]
    fn test_run_until_input_closes() {
        let mut config = Config::default();
        config.render.fps = 1000;
        let (mut scheduler, keys) = scheduler(&config);
        let mut source: VecDeque<Input> = VecDeque::from(vec![
            Input::Bytes(b"a".to_vec()),
            Input::Resize(Size::new(3, 5)),
            Input::Bytes(b"b".to_vec()),
        ]);
        let mut frames = Frames::default();
        scheduler.run(&mut source, &mut frames, ignore).unwrap();

        assert!(!scheduler.is_running());
        assert_eq!(*keys.borrow(), vec![KeyEvent::char('a'), KeyEvent::char('b')]);
        assert_eq!(frames.0.last().map(Canvas::size), Some(Size::new(3, 5)));
    }

    #[test]
    fn test_run_stops_on_quit() {
        let (mut scheduler, _) = scheduler(&Config::default());
        let mut source: VecDeque<Input> = VecDeque::from(vec![
            Input::Bytes(b"q".to_vec()),
            Input::Bytes(b"never".to_vec()),
        ]);
        let mut frames = Frames::default();
        scheduler
            .run(&mut source, &mut frames, |_tree, event| match event {
                Event::Key(key) if key.key == Key::Char('q') => Flow::Quit,
                _ => Flow::Continue,
            })
            .unwrap();
        assert!(!scheduler.is_running());
    }
}
