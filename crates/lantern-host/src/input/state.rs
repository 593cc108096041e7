/// Press/drag state for the primary pointer button.
///
/// `last_x`/`last_y` are only meaningful while `pressed && initialized`.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct PointerState {
    pub pressed: bool,

    /// A baseline sample has been recorded since the last press.
    pub initialized: bool,

    pub last_x: f64,
    pub last_y: f64,
}

impl PointerState {
    pub fn press(&mut self) {
        self.pressed = true;
        self.initialized = false;
    }

    pub fn release(&mut self) {
        self.pressed = false;
        self.initialized = false;
    }

    /// Records a new sample and returns the motion since the previous one.
    ///
    /// Returns `None` when not pressed, or for the first sample after a press
    /// (which only establishes the baseline).
    pub fn advance(&mut self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !self.pressed {
            return None;
        }

        let delta = self
            .initialized
            .then(|| (self.last_x - x, self.last_y - y));

        self.last_x = x;
        self.last_y = y;
        self.initialized = true;

        delta
    }
}
