pub const ZOOM_MIN: f32 = 0.5;
pub const ZOOM_MAX: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.2;
pub const ZOOM_DEFAULT: f32 = 1.0;

/// Display scale factor. Saturates at both bounds instead of erroring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomState {
    factor: f32,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            factor: ZOOM_DEFAULT,
        }
    }
}

impl ZoomState {
    pub fn factor(&self) -> f32 {
        self.factor
    }

    /// Whole-number percentage for status display.
    pub fn percent(&self) -> u32 {
        (self.factor * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) {
        self.factor = settle(self.factor + ZOOM_STEP).min(ZOOM_MAX);
    }

    pub fn zoom_out(&mut self) {
        self.factor = settle(self.factor - ZOOM_STEP).max(ZOOM_MIN);
    }

    pub fn reset(&mut self) {
        self.factor = ZOOM_DEFAULT;
    }
}

// Repeated 0.2 steps drift in f32; snap to the step grid so 1.0 -> 1.2 -> 1.0
// lands on exactly 1.0 again.
fn settle(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn steps_by_a_fifth() {
        let mut zoom = ZoomState::default();
        zoom.zoom_in();
        assert_relative_eq!(zoom.factor(), 1.2);
        zoom.zoom_out();
        zoom.zoom_out();
        assert_relative_eq!(zoom.factor(), 0.8);
        assert_eq!(zoom.percent(), 80);
    }

    #[test]
    fn saturates_at_bounds() {
        let mut zoom = ZoomState::default();
        for _ in 0..50 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.factor(), ZOOM_MAX);

        for _ in 0..50 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.factor(), ZOOM_MIN);

        zoom.reset();
        assert_eq!(zoom.factor(), 1.0);
    }

    proptest! {
        #[test]
        fn any_sequence_stays_in_range(actions in proptest::collection::vec(0u8..3, 0..200)) {
            let mut zoom = ZoomState::default();
            for action in actions {
                match action {
                    0 => zoom.zoom_in(),
                    1 => zoom.zoom_out(),
                    _ => zoom.reset(),
                }
                prop_assert!((ZOOM_MIN..=ZOOM_MAX).contains(&zoom.factor()));
            }
            zoom.reset();
            prop_assert_eq!(zoom.factor(), 1.0);
        }
    }
}
