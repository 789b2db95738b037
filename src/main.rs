//! tessera-demo - a small interactive tour of the toolkit.
//!
//! Builds a themed panel with a title bar, a draggable translucent gradient
//! and a centered label, then runs the scheduler until `q` or Ctrl+C.
//!
//! # Usage
//!
//! ```text
//! tessera-demo [--theme <name>]
//! ```

use std::env;
use std::io::{self, ErrorKind, Read};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use unicode_width::UnicodeWidthStr;

use tessera::colors::{rainbow_gradient, AColor, ColorPair, DEFAULT_COLOR_PAIR};
use tessera::render::terminal_size;
use tessera::widget::{GrabState, Grabbable, Themable};
use tessera::{
    Anchor, Behavior, CanvasView, ColorTheme, Config, Event, Flow, Input, Key, Mods,
    MouseEvent, Point, PosHint, Scheduler, Size, SizeHint, TerminalWriter, WidgetConfig,
    WidgetId, WidgetNode, WidgetTree,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command line options
#[derive(Debug, Default)]
struct Args {
    theme: Option<String>,
}

fn print_help() {
    eprintln!("tessera-demo {} - terminal widget toolkit demo", VERSION);
    eprintln!();
    eprintln!("Usage: tessera-demo [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --theme <NAME>        Color theme ({})", ColorTheme::list().join(", "));
    eprintln!("  -v, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  drag                  Move the gradient with the left mouse button");
    eprintln!("  q, Ctrl+C             Quit");
    eprintln!();
    eprintln!("Configuration: ~/.tessera/config.toml");
}

fn print_version() {
    eprintln!("tessera-demo {}", VERSION);
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().collect();
    let mut parsed = Args::default();
    let mut i = 1;

    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-v" | "--version" => {
                print_version();
                std::process::exit(0);
            }
            "--theme" => {
                i += 1;
                let name = args.get(i).ok_or("Missing theme argument")?;
                parsed.theme = Some(name.clone());
            }
            arg => return Err(format!("Unknown argument: {}", arg)),
        }
        i += 1;
    }
    Ok(parsed)
}

/// Log to `~/.tessera/tessera.log`; `RUST_LOG` overrides the configured level.
fn init_logging(config: &Config) {
    let Some(log_path) = Config::log_path() else {
        return;
    };
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = std::fs::OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

/// Background fill that follows the theme.
struct Panel;

impl Behavior for Panel {
    fn as_themable(&mut self) -> Option<&mut dyn Themable> {
        Some(self)
    }
}

impl Themable for Panel {
    fn update_theme(&mut self, tree: &mut WidgetTree, id: WidgetId, theme: &ColorTheme) {
        let _ = tree.set_background(id, ' ', theme.primary);
    }
}

/// One line of text in a theme role.
struct Label {
    text: String,
    colors: ColorPair,
    role: fn(&ColorTheme) -> ColorPair,
}

impl Label {
    fn new(text: &str, role: fn(&ColorTheme) -> ColorPair) -> Self {
        Self {
            text: text.to_string(),
            colors: DEFAULT_COLOR_PAIR,
            role,
        }
    }
}

impl Behavior for Label {
    fn paint(&self, _node: &WidgetNode, view: &mut CanvasView<'_>) {
        view.put_str(Point::ORIGIN, &self.text, Some(self.colors));
    }

    fn as_themable(&mut self) -> Option<&mut dyn Themable> {
        Some(self)
    }
}

impl Themable for Label {
    fn update_theme(&mut self, tree: &mut WidgetTree, id: WidgetId, theme: &ColorTheme) {
        self.colors = (self.role)(theme);
        let _ = tree.set_background(id, ' ', self.colors);
    }
}

/// Drags its widget around with the mouse.
#[derive(Default)]
struct DragHandle {
    grab: GrabState,
}

impl Grabbable for DragHandle {
    fn grab_state(&self) -> &GrabState {
        &self.grab
    }

    fn grab_state_mut(&mut self) -> &mut GrabState {
        &mut self.grab
    }

    fn grab_update(&mut self, tree: &mut WidgetTree, id: WidgetId, _event: &MouseEvent) {
        let Some(pos) = tree.get(id).map(WidgetNode::literal_pos) else {
            return;
        };
        let delta = Point::new(self.grab.mouse_dy(), self.grab.mouse_dx());
        let _ = tree.set_pos(id, pos + delta);
    }
}

impl Behavior for DragHandle {
    fn on_mouse(&mut self, tree: &mut WidgetTree, id: WidgetId, event: &MouseEvent) -> bool {
        self.grab_on_mouse(tree, id, event)
    }
}

fn build_demo(size: Size, theme: ColorTheme) -> tessera::Result<WidgetTree> {
    let mut tree = WidgetTree::new(size);
    tree.set_theme(theme);
    let root = tree.root();

    let panel = tree.create(
        WidgetConfig::new()
            .size_hint(SizeHint::full())
            .behavior(Panel),
    );
    tree.add_child(root, panel)?;

    let title = tree.create(
        WidgetConfig::new()
            .size(Size::new(1, 1))
            .size_hint(SizeHint::new(None, Some(1.0))?)
            .behavior(Label::new(" tessera demo: drag the gradient, q to quit", |t| t.titlebar)),
    );
    tree.add_child(panel, title)?;

    let text = "half-block graphics over themed widgets";
    let label = tree.create(
        WidgetConfig::new()
            .size(Size::new(1, text.width() as u16))
            .pos_hint(PosHint::center())
            .anchor(Anchor::Center)
            .behavior(Label::new(text, |t| t.text)),
    );
    tree.add_child(panel, label)?;

    let gradient = tree.create(
        WidgetConfig::graphic(AColor::new(0, 0, 0, 0))
            .size(Size::new(8, 32))
            .pos(Point::new(3, 4))
            .behavior(DragHandle {
                grab: GrabState::default().pull_to_front(true),
            }),
    );
    tree.add_child(panel, gradient)?;
    tree.set_alpha(gradient, 0.75)?;
    if let Some(graphic) = tree.graphic_mut(gradient) {
        let texture = graphic.texture_mut();
        let colors = rainbow_gradient(texture.cols());
        for row in 0..texture.rows() {
            for (col, color) in colors.iter().enumerate() {
                // Fade in from the top.
                let alpha = (255 * (row + 1) / texture.rows()) as u8;
                texture.set(row, col, color.with_alpha(alpha));
            }
        }
    }
    Ok(tree)
}

fn handle_unhandled(_tree: &mut WidgetTree, event: &Event) -> Flow {
    match event {
        Event::Key(key) if key.key == Key::Char('q') && key.mods.is_empty() => Flow::Quit,
        Event::Key(key) if key.key == Key::Char('c') && key.mods == Mods::CTRL => Flow::Quit,
        _ => Flow::Continue,
    }
}

/// Forward raw stdin bytes across the input boundary.
fn spawn_stdin_reader(tx: Sender<Input>) {
    thread::spawn(move || {
        let mut stdin = io::stdin().lock();
        let mut buf = [0u8; 1024];
        loop {
            match stdin.read(&mut buf) {
                Ok(0) => {
                    let _ = tx.send(Input::Closed);
                    break;
                }
                Ok(n) => {
                    if tx.send(Input::Bytes(buf[..n].to_vec())).is_err() {
                        break;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    error!("stdin read failed: {}", e);
                    let _ = tx.send(Input::Closed);
                    break;
                }
            }
        }
    });
}

/// Poll the terminal size and report changes.
fn spawn_resize_watcher(tx: Sender<Input>, mut size: Size) {
    thread::spawn(move || loop {
        thread::sleep(Duration::from_millis(200));
        match terminal_size() {
            Ok(current) if current != size => {
                size = current;
                if tx.send(Input::Resize(size)).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("terminal size query failed: {}", e);
                break;
            }
        }
    });
}

fn run(config: &Config, theme: ColorTheme) -> anyhow::Result<()> {
    let size = terminal_size().context("failed to query terminal size")?;
    let tree = build_demo(size, theme)?;
    let mut scheduler = Scheduler::new(tree, config);

    let (tx, mut rx) = mpsc::channel();
    spawn_stdin_reader(tx.clone());
    spawn_resize_watcher(tx, size);

    let mut writer = TerminalWriter::stdout();
    writer.init().context("failed to initialize terminal")?;
    let result = scheduler.run(&mut rx, &mut writer, handle_unhandled);
    writer.cleanup()?;
    result?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("Use --help for usage information");
            std::process::exit(1);
        }
    };

    let (config, load_error) = match Config::try_load() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    init_logging(&config);
    info!("tessera-demo {} starting", VERSION);
    if let Some(e) = load_error {
        warn!("falling back to default config: {}", e);
    }

    let theme = match &args.theme {
        Some(name) => ColorTheme::by_name(name),
        None => config.color_theme(),
    };
    info!(theme = %theme.name, "using theme");

    let result = run(&config, theme);
    if let Err(e) = &result {
        error!("demo failed: {:#}", e);
    }
    result
}
