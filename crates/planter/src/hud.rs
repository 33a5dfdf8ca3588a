//! Status line overlay.

use crate::toggle::ToggleController;

/// Distance from the top of the viewport to the status line, in GUI pixels.
pub const STATUS_TOP_OFFSET: i32 = 5;

/// Something that can draw short strings in GUI-pixel coordinates.
pub trait DisplaySink {
    /// Scaled viewport width.
    fn viewport_width(&self) -> i32;
    /// Rendered width of `text`.
    fn text_width(&self, text: &str) -> i32;
    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, color: u32, shadow: bool);
}

/// Draw the toggle status centred at the top of the viewport while it is visible.
///
/// Returns whether anything was drawn.
pub fn render_status<D: DisplaySink + ?Sized>(toggle: &ToggleController, sink: &mut D) -> bool {
    if !toggle.should_show_status() {
        return false;
    }
    let line = toggle.status_line();
    let x = sink.viewport_width() / 2 - sink.text_width(line.text) / 2;
    sink.draw_text(line.text, x, STATUS_TOP_OFFSET, line.color, true);
    true
}
