//! Dominant-color extraction: classify every non-background pixel against
//! the palette and return the color covering the largest area.

use crate::palette::{Palette, Rgb};
use crate::result::{MatizError, MatizResult};
use image::RgbImage;

/// Configuration for dominant-color extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractorConfig {
    /// Background color to skip (not counted toward any palette entry)
    pub background: Rgb,
    /// Fallback color name returned when an image has no non-background
    /// pixels; `None` makes that case an `EmptyImage` error
    pub fallback: Option<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            fallback: None,
        }
    }
}

impl ExtractorConfig {
    /// Set the background color
    #[must_use]
    pub const fn with_background(mut self, background: Rgb) -> Self {
        self.background = background;
        self
    }

    /// Set the fallback color name for all-background images
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }
}

/// Per-image pixel counts, one slot per palette entry
///
/// Slots preserve palette declaration order so the maximum is found
/// deterministically. A color the image never uses simply stays at zero.
#[derive(Debug, Clone)]
pub struct ColorAreaTally {
    names: Vec<String>,
    counts: Vec<u64>,
}

impl ColorAreaTally {
    fn for_palette(palette: &Palette) -> Self {
        Self {
            names: palette.iter().map(|(name, _)| name.to_string()).collect(),
            counts: vec![0; palette.len()],
        }
    }

    fn record(&mut self, index: usize) {
        self.counts[index] += 1;
    }

    /// Pixel count attributed to `name` (zero for unknown names)
    #[must_use]
    pub fn count(&self, name: &str) -> u64 {
        self.names
            .iter()
            .position(|existing| existing == name)
            .map_or(0, |index| self.counts[index])
    }

    /// Total number of classified (non-background) pixels
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether no pixel was classified
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&count| count == 0)
    }

    /// The color with the maximum count, ties broken to the first palette
    /// entry reaching that maximum; `None` when the tally is empty
    #[must_use]
    pub fn dominant(&self) -> Option<&str> {
        let mut best: Option<(usize, u64)> = None;
        for (index, &count) in self.counts.iter().enumerate() {
            if count == 0 {
                continue;
            }
            // Strict > keeps the earliest entry on equal counts
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((index, count));
            }
        }
        best.map(|(index, _)| self.names[index].as_str())
    }
}

/// Computes the area-dominant palette color of rendered benchmark images
#[derive(Debug, Clone, Default)]
pub struct DominantColorExtractor {
    config: ExtractorConfig,
}

impl DominantColorExtractor {
    /// Create an extractor with the given configuration
    #[must_use]
    pub const fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Count, per palette color, the pixels nearest to it
    ///
    /// Every pixel not equal to the configured background is assigned to the
    /// palette entry with the minimum squared RGB distance.
    ///
    /// # Errors
    ///
    /// Returns `MatizError::Configuration` if the image is not square.
    pub fn tally(&self, image: &RgbImage, palette: &Palette) -> MatizResult<ColorAreaTally> {
        let (width, height) = image.dimensions();
        if width != height {
            return Err(MatizError::configuration(format!(
                "benchmark images must be square, got {width}x{height}"
            )));
        }

        let mut tally = ColorAreaTally::for_palette(palette);
        for y in 0..height {
            for x in 0..width {
                let pixel = Rgb::from(*image.get_pixel(x, y));
                if pixel == self.config.background {
                    continue;
                }
                tally.record(palette.nearest(pixel));
            }
        }
        Ok(tally)
    }

    /// Compute the image's dominant color name
    ///
    /// # Errors
    ///
    /// Returns `MatizError::Configuration` for a non-square image, and
    /// `MatizError::EmptyImage` when every pixel is background and no
    /// fallback is configured.
    pub fn dominant_color(&self, image: &RgbImage, palette: &Palette) -> MatizResult<String> {
        let tally = self.tally(image, palette)?;
        match tally.dominant() {
            Some(name) => Ok(name.to_string()),
            None => self.config.fallback.clone().ok_or_else(|| {
                MatizError::empty_image(
                    "image has no non-background pixels and no fallback color is configured",
                )
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn blank(size: u32) -> RgbImage {
        RgbImage::from_pixel(size, size, Rgb::WHITE.into())
    }

    fn fill_rect(image: &mut RgbImage, x0: u32, y0: u32, w: u32, h: u32, color: Rgb) {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                image.put_pixel(x, y, color.into());
            }
        }
    }

    #[test]
    fn test_larger_area_wins() {
        // 100x100 red square and 10x10 blue square on white: red wins on
        // area regardless of shape count.
        let palette = Palette::benchmark();
        let mut image = blank(200);
        fill_rect(&mut image, 0, 0, 100, 100, Rgb::new(255, 0, 0));
        fill_rect(&mut image, 150, 150, 10, 10, Rgb::new(0, 0, 255));

        let extractor = DominantColorExtractor::default();
        assert_eq!(
            extractor.dominant_color(&image, &palette).unwrap(),
            "red"
        );

        let tally = extractor.tally(&image, &palette).unwrap();
        assert_eq!(tally.count("red"), 100 * 100);
        assert_eq!(tally.count("blue"), 10 * 10);
        assert_eq!(tally.total(), 100 * 100 + 10 * 10);
    }

    #[test]
    fn test_tie_breaks_to_first_palette_entry() {
        // Equal areas of blue and green: blue precedes green in the
        // benchmark palette, so blue wins.
        let palette = Palette::benchmark();
        let mut image = blank(100);
        fill_rect(&mut image, 0, 0, 20, 20, Rgb::new(0, 0, 255));
        fill_rect(&mut image, 50, 50, 20, 20, Rgb::new(0, 255, 0));

        let extractor = DominantColorExtractor::default();
        assert_eq!(
            extractor.dominant_color(&image, &palette).unwrap(),
            "blue"
        );
    }

    #[test]
    fn test_off_palette_pixels_classify_to_nearest() {
        let palette = Palette::benchmark();
        let mut image = blank(50);
        // Dark red region, not an exact palette value
        fill_rect(&mut image, 0, 0, 10, 10, Rgb::new(200, 20, 20));

        let extractor = DominantColorExtractor::default();
        assert_eq!(extractor.dominant_color(&image, &palette).unwrap(), "red");
    }

    #[test]
    fn test_background_pixels_are_skipped() {
        let palette = Palette::benchmark();
        let image = blank(64);
        let extractor = DominantColorExtractor::default();
        let tally = extractor.tally(&image, &palette).unwrap();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
        assert_eq!(tally.dominant(), None);
    }

    #[test]
    fn test_empty_image_without_fallback_errors() {
        let palette = Palette::benchmark();
        let image = blank(64);
        let extractor = DominantColorExtractor::default();
        let result = extractor.dominant_color(&image, &palette);
        assert!(matches!(result, Err(MatizError::EmptyImage { .. })));
    }

    #[test]
    fn test_empty_image_with_fallback() {
        let palette = Palette::benchmark();
        let image = blank(64);
        let extractor =
            DominantColorExtractor::new(ExtractorConfig::default().with_fallback("green"));
        assert_eq!(
            extractor.dominant_color(&image, &palette).unwrap(),
            "green"
        );
    }

    #[test]
    fn test_non_square_image_is_rejected() {
        let palette = Palette::benchmark();
        let image = RgbImage::from_pixel(64, 32, Rgb::WHITE.into());
        let extractor = DominantColorExtractor::default();
        let result = extractor.tally(&image, &palette);
        assert!(matches!(result, Err(MatizError::Configuration { .. })));
    }

    #[test]
    fn test_custom_background() {
        // Black background: white regions now count, black is skipped.
        let palette = Palette::benchmark();
        let mut image = RgbImage::from_pixel(40, 40, image::Rgb([0, 0, 0]));
        fill_rect(&mut image, 0, 0, 8, 8, Rgb::WHITE);

        let extractor = DominantColorExtractor::new(
            ExtractorConfig::default().with_background(Rgb::new(0, 0, 0)),
        );
        assert_eq!(
            extractor.dominant_color(&image, &palette).unwrap(),
            "white"
        );
    }

    #[test]
    fn test_config_builders() {
        let config = ExtractorConfig::default()
            .with_background(Rgb::new(1, 2, 3))
            .with_fallback("red");
        assert_eq!(config.background, Rgb::new(1, 2, 3));
        assert_eq!(config.fallback.as_deref(), Some("red"));
    }

    #[test]
    fn test_tally_count_unknown_name_is_zero() {
        let palette = Palette::benchmark();
        let image = blank(16);
        let extractor = DominantColorExtractor::default();
        let tally = extractor.tally(&image, &palette).unwrap();
        assert_eq!(tally.count("cyan"), 0);
    }
}
