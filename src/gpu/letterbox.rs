/// Maps a fixed-size logical canvas onto a window of any size.
///
/// The canvas is scaled uniformly to the largest size that fits, centred, with
/// bars filling the leftover space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    canvas_width: f32,
    canvas_height: f32,
    window_width: f32,
    window_height: f32,
}

impl Letterbox {
    pub fn new(canvas_width: f32, canvas_height: f32, window_width: f32, window_height: f32) -> Self {
        let scale = (window_width / canvas_width)
            .min(window_height / canvas_height)
            .max(f32::MIN_POSITIVE);
        Self {
            offset_x: (window_width - canvas_width * scale) / 2.0,
            offset_y: (window_height - canvas_height * scale) / 2.0,
            scale,
            canvas_width,
            canvas_height,
            window_width,
            window_height,
        }
    }

    /// Window pixel position to canvas coordinates. Points on the bars map
    /// outside the canvas.
    pub fn to_canvas(&self, x: f32, y: f32) -> (f32, f32) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }

    pub fn to_window(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }

    /// Viewport rectangle (x, y, width, height) in window pixels, clamped to
    /// the window
    pub fn viewport(&self) -> [f32; 4] {
        let x = self.offset_x.max(0.0);
        let y = self.offset_y.max(0.0);
        [
            x,
            y,
            (self.canvas_width * self.scale).min(self.window_width - x),
            (self.canvas_height * self.scale).min(self.window_height - y),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_sizes_match() {
        let lb = Letterbox::new(800.0, 800.0, 800.0, 800.0);
        assert_eq!(lb.scale, 1.0);
        assert_eq!(lb.to_canvas(123.0, 456.0), (123.0, 456.0));
        assert_eq!(lb.viewport(), [0.0, 0.0, 800.0, 800.0]);
    }

    #[test]
    fn test_wide_window_gets_side_bars() {
        let lb = Letterbox::new(800.0, 800.0, 1600.0, 1000.0);
        assert_eq!(lb.scale, 1.25);
        assert_eq!(lb.offset_x, 300.0);
        assert_eq!(lb.offset_y, 0.0);
        assert_eq!(lb.to_canvas(300.0, 0.0), (0.0, 0.0));
        assert_eq!(lb.to_canvas(1300.0, 1000.0), (800.0, 800.0));
        // Left bar lies outside the canvas
        assert!(lb.to_canvas(100.0, 500.0).0 < 0.0);
    }

    #[test]
    fn test_tall_window_gets_top_bars() {
        let lb = Letterbox::new(800.0, 800.0, 400.0, 600.0);
        assert_eq!(lb.scale, 0.5);
        assert_eq!(lb.offset_y, 100.0);
        assert_eq!(lb.viewport(), [0.0, 100.0, 400.0, 400.0]);
    }

    #[test]
    fn test_round_trip() {
        let lb = Letterbox::new(800.0, 600.0, 1280.0, 720.0);
        let (wx, wy) = lb.to_window(412.0, 97.0);
        let (cx, cy) = lb.to_canvas(wx, wy);
        assert!((cx - 412.0).abs() < 1e-3);
        assert!((cy - 97.0).abs() < 1e-3);
    }

    #[test]
    fn test_minimized_window_does_not_divide_by_zero() {
        let lb = Letterbox::new(800.0, 800.0, 0.0, 0.0);
        let (x, y) = lb.to_canvas(0.0, 0.0);
        assert!(x.is_finite() && y.is_finite());
    }
}
