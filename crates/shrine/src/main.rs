mod cli_args;
mod hero;
mod logging;
mod ticker;

use std::io::stdout;

use clap::Parser as _;
use color_eyre::eyre::{Result, WrapErr as _};
use crossterm::{
    event::{
        DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
        KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use rand::rngs::ThreadRng;
use ratatui::{DefaultTerminal, Frame};
use shrine_config::Config;
use shrine_core::{CellMetrics, Viewport};
use shrine_snow::{SnowRaster, SnowfallState};

use crate::cli_args::CliArgs;
use crate::hero::{Backdrop, HeroText};
use crate::ticker::{FrameTicker, TerminalInput, TickerEvent};

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let config = load_config(&args)?;
    let is_logging = logging::setup(&config.log).wrap_err("Couldn't set up logging")?;
    let log_path = config.log.path.clone();

    let terminal = ratatui::init();
    let result = execute!(stdout(), EnableMouseCapture, EnableFocusChange)
        .wrap_err("Couldn't enable mouse reporting")
        .and_then(|()| App::new(config).run(terminal));
    let released = execute!(stdout(), DisableMouseCapture, DisableFocusChange);
    ratatui::restore();
    tracing::info!("Shrine is exiting");

    if let Err(error) = &result {
        tracing::error!("{error:?}");
    }
    if is_logging {
        println!("Logs saved to {}", log_path.display());
    }
    result?;
    released.wrap_err("Couldn't disable mouse reporting")
}

fn load_config(args: &CliArgs) -> Result<Config> {
    let mut config = Config::load(args.config.as_deref()).wrap_err("Couldn't load config")?;
    args.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    /// Target frames per second.
    frame_rate: u32,
    /// Pixel size of a terminal cell.
    metrics: CellMetrics,
    /// The animation.
    snow: SnowfallState,
    /// Drawing surface for the animation, sized to the terminal.
    raster: SnowRaster,
    /// Randomness for flake sizes and positions.
    rng: ThreadRng,
}

impl App {
    /// Construct a new instance of [`App`].
    ///
    /// The drawing surface starts empty and is sized on the first frame.
    pub fn new(config: Config) -> Self {
        let metrics = config.display.cell_metrics();
        let mut rng = rand::thread_rng();
        Self {
            running: false,
            frame_rate: config.display.frame_rate,
            metrics,
            snow: SnowfallState::new(Viewport::default(), config.snow, &config.pointer, &mut rng),
            raster: SnowRaster::new(0, 0, metrics),
            rng,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut ticker = FrameTicker::start(TerminalInput, self.frame_rate);
        tracing::info!(frame_rate = self.frame_rate, "Snowfall started");

        self.running = true;
        while self.running {
            match ticker.next_event() {
                Some(TickerEvent::Frame) => {
                    terminal.draw(|frame| self.render(frame))?;
                    ticker.frame_done();
                }
                Some(TickerEvent::Input(event)) => self.on_event(event),
                Some(TickerEvent::Failed(error)) => {
                    return Err(error).wrap_err("Couldn't read terminal input");
                }
                None => break,
            }
        }

        ticker.stop();
        Ok(())
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if area.width != self.raster.columns() || area.height != self.raster.rows() {
            self.on_resize(area.width, area.height);
        }

        frame.render_widget(Backdrop, area);
        self.snow.frame(&mut self.raster, &mut self.rng);
        frame.render_widget(&self.raster, area);
        frame.render_widget(HeroText, area);
    }

    /// Handles a single terminal event.
    fn on_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
            Event::Mouse(mouse) => self.on_mouse_event(mouse),
            Event::Resize(columns, rows) => self.on_resize(columns, rows),
            Event::FocusLost => {
                tracing::debug!("Pointer left");
                self.snow.pointer_left();
            }
            _ => {}
        }
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            _ => {}
        }
    }

    /// Track the pointer. Positions are the centre of the reported cell.
    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_) => {
                let position = self.metrics.cell_center(mouse.column, mouse.row);
                tracing::trace!(x = position.x, y = position.y, "Pointer moved");
                self.snow.pointer_moved(position);
            }
            _ => {}
        }
    }

    /// Resize the drawing surface and the animation bounds.
    fn on_resize(&mut self, columns: u16, rows: u16) {
        self.raster.resize(columns, rows);
        self.snow.resize(Viewport::from_cells(columns, rows, self.metrics));
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
