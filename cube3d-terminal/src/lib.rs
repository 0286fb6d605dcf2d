/// Terminal front-end: key bindings, event loop and status line
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use cube3d_core::{Action, Framebuffer, RotationReadout, Scene};
use log::{debug, info};
use nalgebra::Point3;
use std::io::{self, stdout, Write};

pub mod renderer;

pub use renderer::BlockRenderer;

/// Controls shown next to the coordinates
const HELP: &str = "arrows/WASD move, f/b depth, x/y/z rotate (shift reverses), +/- scale, r reset, q quit";

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Apply(Action),
    Quit,
}

/// Map a key to its command, if it has one
pub fn input_for_key(code: KeyCode) -> Option<Input> {
    let action = match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Input::Quit),
        KeyCode::Up | KeyCode::Char('w') => Action::MoveUp,
        KeyCode::Down | KeyCode::Char('s') => Action::MoveDown,
        KeyCode::Left | KeyCode::Char('a') => Action::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') => Action::MoveRight,
        KeyCode::PageUp | KeyCode::Char('f') => Action::MoveForward,
        KeyCode::PageDown | KeyCode::Char('b') => Action::MoveBackward,
        KeyCode::Char('x') => Action::RotatePlusX,
        KeyCode::Char('X') => Action::RotateMinusX,
        KeyCode::Char('y') => Action::RotatePlusY,
        KeyCode::Char('Y') => Action::RotateMinusY,
        KeyCode::Char('z') => Action::RotatePlusZ,
        KeyCode::Char('Z') => Action::RotateMinusZ,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::ScaleUp,
        KeyCode::Char('-') | KeyCode::Char('_') => Action::ScaleDown,
        KeyCode::Char('r') => Action::Reset,
        _ => return None,
    };
    Some(Input::Apply(action))
}

/// Text readout of the solid's position and the accumulated rotation
pub fn status_line(position: Point3<f32>, rotation: RotationReadout) -> String {
    format!(
        "X = {:.6}, Y = {:.6}, Z = {:.6} | rotation {:.1} {:.1} {:.1} | {}",
        position.x, position.y, position.z, rotation.x, rotation.y, rotation.z, HELP
    )
}

/// Main application struct for the terminal viewer
pub struct TerminalApp {
    scene: Scene,
    framebuffer: Framebuffer,
    renderer: BlockRenderer,
    columns: u16,
    running: bool,
    dirty: bool,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (columns, rows) = terminal::size()?;
        info!("Terminal size {columns}x{rows}");

        let camera = scene.camera();
        let framebuffer = Framebuffer::new(camera.width as usize, camera.height as usize);

        Ok(Self {
            scene,
            framebuffer,
            // Last row holds the status line
            renderer: BlockRenderer::new(columns as usize, rows.saturating_sub(1) as usize),
            columns,
            running: true,
            dirty: true,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        while self.running {
            // Nothing animates, so only redraw after something changed
            if self.dirty {
                self.render()?;
                self.dirty = false;
            }

            match event::read()? {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press | KeyEventKind::Repeat,
                    ..
                }) => self.handle_key(code),
                Event::Resize(columns, rows) => {
                    debug!("Resized to {columns}x{rows}");
                    self.columns = columns;
                    self.renderer
                        .resize(columns as usize, rows.saturating_sub(1) as usize);
                    self.dirty = true;
                }
                _ => {}
            }
        }

        Ok(())
    }

    fn handle_key(&mut self, code: KeyCode) {
        match input_for_key(code) {
            Some(Input::Quit) => self.running = false,
            Some(Input::Apply(action)) => {
                self.scene.apply(action.command());
                self.dirty = true;
            }
            None => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.scene.render(&mut self.framebuffer);

        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;
        self.renderer.draw(&self.framebuffer, &mut stdout)?;

        let status: String = status_line(self.scene.position(), self.scene.rotation())
            .chars()
            .take(self.columns as usize)
            .collect();
        queue!(
            stdout,
            cursor::MoveTo(0, self.renderer.rows() as u16),
            SetForegroundColor(Color::Yellow),
            Print(status),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(input_for_key(KeyCode::Esc), Some(Input::Quit));
        assert_eq!(input_for_key(KeyCode::Char('q')), Some(Input::Quit));
        assert_eq!(input_for_key(KeyCode::Up), Some(Input::Apply(Action::MoveUp)));
        assert_eq!(input_for_key(KeyCode::Char('b')), Some(Input::Apply(Action::MoveBackward)));
        assert_eq!(input_for_key(KeyCode::Char('x')), Some(Input::Apply(Action::RotatePlusX)));
        assert_eq!(input_for_key(KeyCode::Char('Z')), Some(Input::Apply(Action::RotateMinusZ)));
        assert_eq!(input_for_key(KeyCode::Char('+')), Some(Input::Apply(Action::ScaleUp)));
        assert_eq!(input_for_key(KeyCode::Char('r')), Some(Input::Apply(Action::Reset)));
        assert_eq!(input_for_key(KeyCode::Char('k')), None);
        assert_eq!(input_for_key(KeyCode::Tab), None);
    }

    #[test]
    fn test_status_line() {
        let status = status_line(Point3::new(-1.0, -1.1, -1.0), RotationReadout::new(0.2, 0.0, -0.1));
        assert!(status.starts_with("X = -1.000000, Y = -1.100000, Z = -1.000000 | rotation 0.2 0.0 -0.1"));
        assert!(status.ends_with(HELP));
    }
}
