use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Chart color scheme
// ---------------------------------------------------------------------------

/// Primary series color (cornflower blue).
pub const PRIMARY: Color32 = Color32::from_rgb(100, 149, 237);
/// Accent series color (tomato).
pub const ACCENT: Color32 = Color32::from_rgb(255, 99, 71);
/// Third series color (dark slate gray).
pub const TERTIARY: Color32 = Color32::from_rgb(47, 79, 79);
/// Muted color for background/reference series.
pub const MUTED: Color32 = Color32::from_rgb(130, 130, 130);

/// Fixed palette for small series counts, in legend order.
const SCHEME: [Color32; 5] = [
    PRIMARY,
    ACCENT,
    Color32::from_rgb(40, 80, 200),
    Color32::from_rgb(200, 40, 40),
    TERTIARY,
];

/// Colors for `n` chart series: the fixed scheme while it lasts, then
/// evenly spaced hues for anything larger.
pub fn series_colors(n: usize) -> Vec<Color32> {
    if n <= SCHEME.len() {
        return SCHEME[..n].to_vec();
    }
    generate_palette(n)
}

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_counts_use_the_fixed_scheme() {
        let colors = series_colors(2);
        assert_eq!(colors, vec![PRIMARY, ACCENT]);
    }

    #[test]
    fn large_counts_are_distinct() {
        let colors = series_colors(10);
        assert_eq!(colors.len(), 10);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
