use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::FluxVariant;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues, starting
/// at `hue_offset` degrees.
pub fn generate_palette(n: usize, hue_offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (hue_offset + (i as f32 / n as f32) * 360.0) % 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

/// Marker colour of a flux channel. Stable across runs so the same channel
/// always looks the same.
pub fn variant_color(variant: FluxVariant) -> Color32 {
    let palette = generate_palette(FluxVariant::ALL.len(), 210.0);
    FluxVariant::ALL
        .iter()
        .position(|v| *v == variant)
        .and_then(|i| palette.get(i).copied())
        .unwrap_or(Color32::LIGHT_BLUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0, 0.0).is_empty());
        assert_eq!(generate_palette(5, 90.0).len(), 5);
    }

    #[test]
    fn channels_get_distinct_colours() {
        let raw = variant_color(FluxVariant::Raw);
        let corr = variant_color(FluxVariant::Corrected);
        let pca = variant_color(FluxVariant::Pca);
        assert_ne!(raw, corr);
        assert_ne!(corr, pca);
        assert_ne!(raw, pca);
        assert_eq!(corr, variant_color(FluxVariant::Corrected));
    }
}
