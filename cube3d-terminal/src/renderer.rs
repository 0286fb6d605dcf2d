/// Half-block presenter: shows a framebuffer on terminal cells
use crossterm::{
    cursor,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use cube3d_core::Framebuffer;
use std::io::Write;

/// Upper half block: foreground paints the top sample, background the bottom
const HALF_BLOCK: char = '\u{2580}';

/// Samples a framebuffer onto a grid of terminal cells.
///
/// Every cell shows two vertically stacked samples, which keeps samples
/// roughly square on common terminal fonts. The image is scaled uniformly and
/// centered; cells outside it keep the terminal's default colors.
pub struct BlockRenderer {
    columns: usize,
    rows: usize,
}

impl BlockRenderer {
    pub fn new(columns: usize, rows: usize) -> Self {
        Self { columns, rows }
    }

    pub fn resize(&mut self, columns: usize, rows: usize) {
        self.columns = columns;
        self.rows = rows;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn pixels_per_sample(&self, framebuffer: &Framebuffer) -> f32 {
        let horizontal = framebuffer.width() as f32 / self.columns.max(1) as f32;
        let vertical = framebuffer.height() as f32 / (2 * self.rows).max(1) as f32;
        horizontal.max(vertical)
    }

    /// The framebuffer color under a sample, or `None` in the letterbox
    pub fn sample(
        &self,
        framebuffer: &Framebuffer,
        column: usize,
        sample_row: usize,
    ) -> Option<cube3d_core::Color> {
        let scale = self.pixels_per_sample(framebuffer);
        let margin_x = (self.columns as f32 * scale - framebuffer.width() as f32) / 2.0;
        let margin_y = ((2 * self.rows) as f32 * scale - framebuffer.height() as f32) / 2.0;

        let x = ((column as f32 + 0.5) * scale - margin_x).floor() as i32;
        let y = ((sample_row as f32 + 0.5) * scale - margin_y).floor() as i32;
        framebuffer.pixel(x, y)
    }

    pub fn draw<W: Write>(&self, framebuffer: &Framebuffer, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.rows {
            writer.queue(cursor::MoveTo(0, row as u16))?;

            // Only emit color changes
            let mut current: Option<(Color, Color)> = None;
            for column in 0..self.columns {
                let top = terminal_color(self.sample(framebuffer, column, 2 * row));
                let bottom = terminal_color(self.sample(framebuffer, column, 2 * row + 1));

                if current != Some((top, bottom)) {
                    writer.queue(SetForegroundColor(top))?;
                    writer.queue(SetBackgroundColor(bottom))?;
                    current = Some((top, bottom));
                }
                writer.queue(Print(HALF_BLOCK))?;
            }
            writer.queue(ResetColor)?;
        }
        Ok(())
    }
}

pub fn terminal_color(color: Option<cube3d_core::Color>) -> Color {
    match color {
        Some(color) => Color::Rgb {
            r: color.r,
            g: color.g,
            b: color.b,
        },
        None => Color::Reset,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cube3d_core::Scene;

    fn rendered_scene() -> Framebuffer {
        let mut framebuffer = Framebuffer::new(800, 600);
        Scene::default().render(&mut framebuffer);
        framebuffer
    }

    #[test]
    fn test_sample_exact_fit() {
        let framebuffer = rendered_scene();
        let renderer = BlockRenderer::new(80, 30);

        // 10 pixels per sample: cell (40, 15) top sample lands on (405, 305)
        assert_eq!(renderer.sample(&framebuffer, 40, 30), Some(cube3d_core::Color::RED));
        assert_eq!(renderer.sample(&framebuffer, 0, 0), Some(cube3d_core::Color::WHITE));
        assert_eq!(renderer.sample(&framebuffer, 79, 59), Some(cube3d_core::Color::WHITE));
    }

    #[test]
    fn test_sample_letterbox() {
        let framebuffer = rendered_scene();
        // Wide terminal: height limits the scale and the sides stay empty
        let renderer = BlockRenderer::new(200, 30);

        assert_eq!(renderer.sample(&framebuffer, 0, 30), None);
        assert_eq!(renderer.sample(&framebuffer, 199, 30), None);
        assert_eq!(renderer.sample(&framebuffer, 100, 30), Some(cube3d_core::Color::RED));
    }

    #[test]
    fn test_terminal_color() {
        assert_eq!(
            terminal_color(Some(cube3d_core::Color::CYAN)),
            Color::Rgb { r: 0, g: 255, b: 255 }
        );
        assert_eq!(terminal_color(None), Color::Reset);
    }

    #[test]
    fn test_draw_fills_every_cell() {
        let framebuffer = rendered_scene();
        let renderer = BlockRenderer::new(16, 6);

        let mut output = Vec::new();
        renderer.draw(&framebuffer, &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.matches(HALF_BLOCK).count(), 16 * 6);
    }
}
