//! Brightness/contrast remapping applied to raw slice intensities before
//! display.

pub const WINDOW_MIN_PERCENT: f32 = 50.0;
pub const WINDOW_MAX_PERCENT: f32 = 150.0;
pub const WINDOW_DEFAULT_PERCENT: f32 = 100.0;

const DISPLAY_MAX: f32 = 255.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowingConfig {
    brightness: f32,
    contrast: f32,
}

impl Default for WindowingConfig {
    fn default() -> Self {
        Self {
            brightness: WINDOW_DEFAULT_PERCENT,
            contrast: WINDOW_DEFAULT_PERCENT,
        }
    }
}

impl WindowingConfig {
    pub fn new(brightness: f32, contrast: f32) -> Self {
        Self {
            brightness: clamp_percent(brightness),
            contrast: clamp_percent(contrast),
        }
    }

    pub fn brightness(&self) -> f32 {
        self.brightness
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn set_brightness(&mut self, value: f32) {
        self.brightness = clamp_percent(value);
    }

    pub fn set_contrast(&mut self, value: f32) {
        self.contrast = clamp_percent(value);
    }

    pub fn is_identity(&self) -> bool {
        self.brightness == WINDOW_DEFAULT_PERCENT && self.contrast == WINDOW_DEFAULT_PERCENT
    }

    /// Maps a raw 8-bit intensity through this window.
    pub fn apply(&self, raw: u8) -> u8 {
        display_intensity(raw as f32, self.brightness, self.contrast).round() as u8
    }

    /// Precomputed lookup table for windowing whole buffers.
    pub fn lookup_table(&self) -> [u8; 256] {
        let mut table = [0u8; 256];
        for (raw, slot) in table.iter_mut().enumerate() {
            *slot = self.apply(raw as u8);
        }
        table
    }
}

/// `raw * brightness% * contrast%`, clamped to the displayable range.
pub fn display_intensity(raw: f32, brightness: f32, contrast: f32) -> f32 {
    (raw * (brightness / 100.0) * (contrast / 100.0)).clamp(0.0, DISPLAY_MAX)
}

fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        return WINDOW_DEFAULT_PERCENT;
    }
    value.clamp(WINDOW_MIN_PERCENT, WINDOW_MAX_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn defaults_are_identity() {
        let window = WindowingConfig::default();
        assert!(window.is_identity());
        for raw in [0u8, 1, 40, 127, 128, 200, 255] {
            assert_eq!(window.apply(raw), raw);
        }
    }

    #[test]
    fn setters_clamp_to_percent_range() {
        let mut window = WindowingConfig::default();
        window.set_brightness(400.0);
        window.set_contrast(-20.0);
        assert_eq!(window.brightness(), WINDOW_MAX_PERCENT);
        assert_eq!(window.contrast(), WINDOW_MIN_PERCENT);

        window.set_brightness(f32::NAN);
        assert_eq!(window.brightness(), WINDOW_DEFAULT_PERCENT);
    }

    #[test]
    fn output_saturates_at_display_range() {
        assert_relative_eq!(display_intensity(200.0, 150.0, 150.0), 255.0);
        assert_relative_eq!(display_intensity(100.0, 150.0, 100.0), 150.0);
        assert_relative_eq!(display_intensity(100.0, 50.0, 50.0), 25.0);
    }

    #[test]
    fn lookup_table_matches_apply() {
        let window = WindowingConfig::new(120.0, 80.0);
        let table = window.lookup_table();
        assert_eq!(table[0], 0);
        assert_eq!(table[100], window.apply(100));
        assert_eq!(table[255], window.apply(255));
    }

    proptest! {
        #[test]
        fn identity_holds_for_any_intensity(raw in 0.0f32..=255.0) {
            prop_assert_eq!(display_intensity(raw, 100.0, 100.0), raw);
        }

        #[test]
        fn stored_percentages_stay_in_range(b in -1000.0f32..1000.0, c in -1000.0f32..1000.0) {
            let window = WindowingConfig::new(b, c);
            prop_assert!((WINDOW_MIN_PERCENT..=WINDOW_MAX_PERCENT).contains(&window.brightness()));
            prop_assert!((WINDOW_MIN_PERCENT..=WINDOW_MAX_PERCENT).contains(&window.contrast()));
        }
    }
}
