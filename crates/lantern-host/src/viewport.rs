/// Drawable size handed to the engine.
///
/// `width`/`height` are logical pixels; the engine multiplies by
/// `device_pixel_ratio` to get the physical framebuffer size. Recomputed from
/// the host surface for every resize/expose and never cached across calls.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64,
}

impl ViewportSize {
    #[inline]
    pub const fn new(width: f64, height: f64, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }

    /// Builds a viewport from a physical pixel size and a scale factor.
    pub fn from_physical(width: u32, height: u32, device_pixel_ratio: f64) -> Self {
        let ratio = if device_pixel_ratio > 0.0 && device_pixel_ratio.is_finite() {
            device_pixel_ratio
        } else {
            1.0
        };
        Self::new(width as f64 / ratio, height as f64 / ratio, ratio)
    }

    /// Physical pixel size, rounded to whole pixels.
    pub fn physical(self) -> (u32, u32) {
        let w = (self.width * self.device_pixel_ratio).round().max(0.0);
        let h = (self.height * self.device_pixel_ratio).round().max(0.0);
        (w as u32, h as u32)
    }

    /// False for zero-sized or non-finite viewports; nothing is drawn onto those.
    #[inline]
    pub fn is_drawable(self) -> bool {
        self.width > 0.0
            && self.height > 0.0
            && self.device_pixel_ratio > 0.0
            && self.width.is_finite()
            && self.height.is_finite()
    }
}
