/// Terminal display sink: two pixels per character cell
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use micro3d_core::{Color, DisplaySink, FrameBuffer};
use std::io::{self, Write};

/// Upper half block: foreground paints the top pixel, background the bottom one
const HALF_BLOCK: char = '\u{2580}';

/// Presents frame buffers as 24-bit colored half blocks.
///
/// A frame of `width` x `height` pixels occupies `width` columns and
/// `height / 2` rows, starting at `top_row` so a status line can sit above it.
pub struct TerminalSink<W: Write> {
    out: W,
    width: usize,
    height: usize,
    top_row: u16,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W, width: usize, height: usize, top_row: u16) -> Self {
        Self {
            out,
            width,
            height,
            top_row,
        }
    }

    /// Pixel dimensions that fit a terminal of `cols` x `rows` cells below `top_row`.
    pub fn pixels_for(cols: u16, rows: u16, top_row: u16) -> (usize, usize) {
        let rows = rows.saturating_sub(top_row) as usize;
        (cols as usize, rows * 2)
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        let width = self.width.min(frame.width());
        let height = self.height.min(frame.height());
        let mut last: Option<(Color, Color)> = None;

        for row in 0..height.div_ceil(2) {
            self.out
                .queue(cursor::MoveTo(0, self.top_row.saturating_add(row as u16)))?;
            for x in 0..width {
                let top = frame.get(x, row * 2).unwrap_or_default();
                let bottom = frame.get(x, row * 2 + 1).unwrap_or_default();

                // only emit color changes
                if last != Some((top, bottom)) {
                    self.out.queue(SetForegroundColor(term_color(top)))?;
                    self.out.queue(SetBackgroundColor(term_color(bottom)))?;
                    last = Some((top, bottom));
                }
                self.out.queue(Print(HALF_BLOCK))?;
            }
        }
        self.out.queue(ResetColor)?;
        self.out.flush()
    }
}

impl<W: Write> DisplaySink for TerminalSink<W> {
    type Error = io::Error;

    fn present(&mut self, frame: &FrameBuffer) -> io::Result<()> {
        if frame.width() != self.width || frame.height() != self.height {
            log::debug!(
                "presenting {}x{} frame on {}x{} sink",
                frame.width(),
                frame.height(),
                self.width,
                self.height
            );
        }
        self.draw(frame)
    }

    fn resize(&mut self, width: usize, height: usize) -> io::Result<()> {
        log::debug!("terminal sink resized to {}x{} pixels", width, height);
        self.width = width;
        self.height = height;
        Ok(())
    }
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(frame: &FrameBuffer) -> String {
        let mut sink = TerminalSink::new(Vec::new(), frame.width(), frame.height(), 0);
        sink.present(frame).unwrap();
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pixels_for_terminal_size() {
        assert_eq!(TerminalSink::<Vec<u8>>::pixels_for(80, 24, 1), (80, 46));
        assert_eq!(TerminalSink::<Vec<u8>>::pixels_for(10, 0, 1), (10, 0));
    }

    #[test]
    fn two_pixel_rows_per_cell() {
        let mut frame = FrameBuffer::new(3, 4);
        frame.clear(Color::BLACK);
        let out = render(&frame);
        assert_eq!(out.matches(HALF_BLOCK).count(), 6);
    }

    #[test]
    fn odd_height_keeps_last_row() {
        let frame = FrameBuffer::new(2, 3);
        let out = render(&frame);
        assert_eq!(out.matches(HALF_BLOCK).count(), 4);
    }

    #[test]
    fn top_and_bottom_pixels_become_fg_and_bg() {
        let mut frame = FrameBuffer::new(1, 2);
        {
            let mut device = frame.device();
            device.pixel(0, 0, Color::rgb(255, 0, 0));
            device.pixel(0, 1, Color::rgb(0, 0, 255));
        }
        let out = render(&frame);
        assert!(out.contains("38;2;255;0;0"));
        assert!(out.contains("48;2;0;0;255"));
    }

    #[test]
    fn unchanged_colors_are_not_repeated() {
        let mut frame = FrameBuffer::new(8, 2);
        frame.clear(Color::LIGHT_GREY);
        let out = render(&frame);
        assert_eq!(out.matches("38;2;240;240;240").count(), 1);
    }

    #[test]
    fn resize_changes_presented_area() {
        let mut sink = TerminalSink::new(Vec::new(), 4, 4, 0);
        sink.resize(2, 2).unwrap();
        assert_eq!(sink.size(), (2, 2));

        let frame = FrameBuffer::new(4, 4);
        sink.present(&frame).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out.matches(HALF_BLOCK).count(), 2);
    }
}
