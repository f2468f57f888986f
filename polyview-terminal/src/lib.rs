/// Terminal front-end for the polyhedron viewer
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use polyview_core::{Axis, Polyhedron, Rgb, Style, Surface, Viewer, ViewerConfig};
use std::io::{self, stdout, Write};
use tracing::debug;

pub mod renderer;

pub use renderer::CellCanvas;

/// Settings scaled for terminal cells, which are far coarser than screen pixels
pub fn terminal_config() -> ViewerConfig {
    let defaults = ViewerConfig::default();
    ViewerConfig {
        style: Style {
            background: Rgb::new(0x10, 0x10, 0x10),
            outline_width: 0.0,
            marker_radius: 0.75,
            ..Style::default()
        },
        // About ten screen pixels per cell column
        sensitivity: defaults.sensitivity * 10.0,
        ..defaults
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    viewer: Viewer,
    canvas: CellCanvas,
    running: bool,
}

impl TerminalApp {
    pub fn new(mesh: Polyhedron) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        Ok(Self::with_size(mesh, columns, rows, terminal_config()))
    }

    pub fn with_size(mesh: Polyhedron, columns: u16, rows: u16, config: ViewerConfig) -> Self {
        let canvas = CellCanvas::new(columns, rows);
        let (width, height) = canvas.size();
        Self {
            viewer: Viewer::new(mesh, width, height, config),
            canvas,
            running: true,
        }
    }

    pub fn viewer(&self) -> &Viewer {
        &self.viewer
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        self.render()?;
        while self.running {
            // Blocks until the next event; every event is handled to completion
            if self.handle_event(event::read()?) {
                self.render()?;
            }
        }
        Ok(())
    }

    /// Apply one terminal event. Returns `true` when the frame must be redrawn.
    pub fn handle_event(&mut self, event: Event) -> bool {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(columns, rows) => {
                self.canvas.resize(columns, rows);
                let (width, height) = self.canvas.size();
                self.viewer.resize(width, height);
                true
            }
            _ => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        let step = self.viewer.config().key_step;
        let (axis, angle) = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.running = false;
                return false;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
                return false;
            }
            KeyCode::Char('w') | KeyCode::Up => (Axis::X, step),
            KeyCode::Char('s') | KeyCode::Down => (Axis::X, -step),
            KeyCode::Char('a') | KeyCode::Left => (Axis::Y, -step),
            KeyCode::Char('d') | KeyCode::Right => (Axis::Y, step),
            KeyCode::Char('e') => (Axis::Z, step),
            KeyCode::Char('r') => (Axis::Z, -step),
            _ => return false,
        };
        self.viewer.rotate(axis, angle);
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> bool {
        // Each cell row holds two canvas pixels
        let x = f64::from(mouse.column);
        let y = f64::from(mouse.row) * 2.0;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.viewer.on_pointer_down(x, y);
                false
            }
            MouseEventKind::Drag(MouseButton::Left) => self.viewer.on_pointer_move(x, y).is_some(),
            MouseEventKind::Up(MouseButton::Left) => {
                self.viewer.on_pointer_up();
                false
            }
            _ => false,
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.viewer
            .paint(&mut self.canvas)
            .unwrap_or_else(|never| match never {});

        // Output to terminal
        let mut stdout = stdout();
        self.canvas.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "polyview | {} faces | Drag=Rotate WASD/Arrows=Rotate E/R=Roll Q=Quit",
                self.viewer.mesh().face_count()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        debug!("frame drawn");
        Ok(())
    }
}
