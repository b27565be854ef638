//! Dataset synthesis: render images of colored geometric regions on a white
//! background and record each image's dominant color as ground truth.
//!
//! Generation is deterministic: the same seed reproduces a dataset
//! bit-for-bit, so benchmark datasets can be regenerated instead of stored.

use crate::extractor::{DominantColorExtractor, ExtractorConfig};
use crate::palette::{Palette, Rgb};
use crate::result::{MatizError, MatizResult};
use crate::scorer::GroundTruthSet;
use image::RgbImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File name of the ground-truth mapping written next to the dataset
pub const GROUND_TRUTH_FILE: &str = "ground_truth_colors.json";

/// File name of the ground-truth copy placed inside the input directory for
/// agents that read it directly
pub const TARGETS_FILE: &str = "targets.json";

/// Simple xorshift64 PRNG for deterministic dataset generation
#[derive(Debug, Clone)]
struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const fn new(seed: u64) -> Self {
        // Ensure non-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    const fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform value in `[min, max)`; returns `min` when the range is empty
    const fn next_range(&mut self, min: u64, max: u64) -> u64 {
        if min >= max {
            return min;
        }
        min + (self.next() % (max - min))
    }
}

/// Configuration for dataset generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of images to generate
    pub num_images: u32,
    /// Image side length in pixels (images are square)
    pub image_size: u32,
    /// Minimum number of distinct region colors per image
    pub min_regions: usize,
    /// Maximum number of distinct region colors per image
    pub max_regions: usize,
    /// RNG seed; a seed reproduces the dataset exactly
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            num_images: 15,
            image_size: 512,
            min_regions: 3,
            max_regions: 8,
            seed: 0,
        }
    }
}

impl GeneratorConfig {
    /// Set the number of images
    #[must_use]
    pub const fn with_num_images(mut self, num_images: u32) -> Self {
        self.num_images = num_images;
        self
    }

    /// Set the image side length
    #[must_use]
    pub const fn with_image_size(mut self, image_size: u32) -> Self {
        self.image_size = image_size;
        self
    }

    /// Set the region-count range
    #[must_use]
    pub const fn with_region_range(mut self, min: usize, max: usize) -> Self {
        self.min_regions = min;
        self.max_regions = max;
        self
    }

    /// Set the RNG seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    fn validate(&self) -> MatizResult<()> {
        if self.num_images == 0 {
            return Err(MatizError::configuration("num_images must be at least 1"));
        }
        if self.image_size == 0 {
            return Err(MatizError::configuration("image_size must be at least 1"));
        }
        if self.min_regions == 0 {
            return Err(MatizError::configuration("min_regions must be at least 1"));
        }
        if self.min_regions > self.max_regions {
            return Err(MatizError::configuration(format!(
                "min_regions ({}) exceeds max_regions ({})",
                self.min_regions, self.max_regions
            )));
        }
        Ok(())
    }
}

/// Paths and ground truth of a generated dataset
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    /// Computed filename -> dominant color mapping
    pub ground_truth: GroundTruthSet,
    /// Directory holding the rendered images and `targets.json`
    pub input_dir: PathBuf,
    /// Path of the written ground-truth file
    pub ground_truth_path: PathBuf,
}

/// Renders benchmark datasets and computes their ground truth
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
    palette: Palette,
    background: Rgb,
}

impl DatasetGenerator {
    /// Create a generator over the benchmark palette
    #[must_use]
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config,
            palette: Palette::benchmark(),
            background: Rgb::WHITE,
        }
    }

    /// Use an alternate palette
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generate the dataset under `out_dir`
    ///
    /// Writes `input/image_<i>.png` (1-based), the ground-truth file next to
    /// the input directory, and a `targets.json` copy inside it.
    ///
    /// # Errors
    ///
    /// `Configuration` for an invalid config, `ImageEncoding` when a PNG
    /// cannot be written, `Io`/`Json` for filesystem failures.
    pub fn generate(&self, out_dir: &Path) -> MatizResult<GeneratedDataset> {
        self.generate_with(out_dir, |_, _| {})
    }

    /// Generate the dataset, invoking `on_image(filename, color)` after each
    /// image is written
    ///
    /// # Errors
    ///
    /// Same as [`Self::generate`].
    pub fn generate_with(
        &self,
        out_dir: &Path,
        mut on_image: impl FnMut(&str, &str),
    ) -> MatizResult<GeneratedDataset> {
        self.config.validate()?;
        let non_background = self
            .palette
            .iter()
            .filter(|&(_, color)| color != self.background)
            .count();
        if non_background < 2 {
            return Err(MatizError::configuration(
                "palette needs at least 2 non-background colors to draw regions",
            ));
        }

        let input_dir = out_dir.join("input");
        std::fs::create_dir_all(&input_dir)?;

        let mut rng = Xorshift64::new(self.config.seed);
        let mut ground_truth = GroundTruthSet::new();

        info!(
            images = self.config.num_images,
            size = self.config.image_size,
            seed = self.config.seed,
            "generating dataset"
        );

        for i in 1..=self.config.num_images {
            let (image, selected) = self.render_image(&mut rng);

            // Original behavior: an image whose regions were all painted
            // over still gets labeled with its first selected color.
            let extractor = DominantColorExtractor::new(
                ExtractorConfig::default()
                    .with_background(self.background)
                    .with_fallback(selected[0].clone()),
            );
            let color = extractor.dominant_color(&image, &self.palette)?;

            let filename = format!("image_{i}.png");
            let path = input_dir.join(&filename);
            image
                .save(&path)
                .map_err(|e| MatizError::ImageEncoding {
                    message: format!("failed to write {}: {e}", path.display()),
                })?;

            debug!(%filename, %color, regions = selected.len(), "image rendered");
            on_image(&filename, &color);
            ground_truth.insert(filename, &color);
        }

        let ground_truth_path = out_dir.join(GROUND_TRUTH_FILE);
        ground_truth.save(&ground_truth_path)?;
        ground_truth.save(input_dir.join(TARGETS_FILE))?;

        Ok(GeneratedDataset {
            ground_truth,
            input_dir,
            ground_truth_path,
        })
    }

    /// Render one image and return it with the selected region colors,
    /// dominant first
    fn render_image(&self, rng: &mut Xorshift64) -> (RgbImage, Vec<String>) {
        let size = self.config.image_size;
        let mut image = RgbImage::from_pixel(size, size, self.background.into());

        let selected = self.select_colors(rng);
        for (j, name) in selected.iter().enumerate() {
            // get() cannot miss: names were drawn from this palette
            let Some(color) = self.palette.get(name) else {
                continue;
            };
            // The first color is made dominant by drawing more shapes
            let num_shapes = if j == 0 {
                rng.next_range(3, 7)
            } else {
                rng.next_range(1, 4)
            };
            for _ in 0..num_shapes {
                self.draw_random_shape(&mut image, rng, color);
            }
        }

        (image, selected)
    }

    /// Pick 2..=max_regions distinct non-background palette colors
    fn select_colors(&self, rng: &mut Xorshift64) -> Vec<String> {
        let mut candidates: Vec<String> = self
            .palette
            .iter()
            .filter(|&(_, color)| color != self.background)
            .map(|(name, _)| name.to_string())
            .collect();

        let requested = rng.next_range(
            self.config.min_regions as u64,
            self.config.max_regions as u64 + 1,
        ) as usize;
        let count = requested.clamp(2, candidates.len());

        // Partial Fisher-Yates: shuffle only the prefix we take
        for j in 0..count {
            let k = j + rng.next_range(0, (candidates.len() - j) as u64) as usize;
            candidates.swap(j, k);
        }
        candidates.truncate(count);
        candidates
    }

    /// Draw one randomly placed square, circle, or triangle
    fn draw_random_shape(&self, image: &mut RgbImage, rng: &mut Xorshift64, color: Rgb) {
        let size = self.config.image_size;
        let max_side = (size / 3).clamp(1, 120);
        let min_side = 30.min(max_side);
        let side = rng.next_range(u64::from(min_side), u64::from(max_side) + 1) as u32;
        let x = rng.next_range(0, u64::from(size - side) + 1) as u32;
        let y = rng.next_range(0, u64::from(size - side) + 1) as u32;

        match rng.next_range(0, 3) {
            0 => draw_square(image, x, y, side, color),
            1 => draw_circle(image, x, y, side, color),
            _ => draw_triangle(image, x, y, side, color),
        }
    }
}

/// Fill the axis-aligned square with corner (x, y)
fn draw_square(image: &mut RgbImage, x: u32, y: u32, side: u32, color: Rgb) {
    for py in y..y + side {
        for px in x..x + side {
            image.put_pixel(px, py, color.into());
        }
    }
}

/// Fill the circle inscribed in the square with corner (x, y)
fn draw_circle(image: &mut RgbImage, x: u32, y: u32, side: u32, color: Rgb) {
    let radius = i64::from(side) / 2;
    let cx = i64::from(x) + radius;
    let cy = i64::from(y) + radius;
    for py in y..y + side {
        for px in x..x + side {
            let dx = i64::from(px) - cx;
            let dy = i64::from(py) - cy;
            if dx * dx + dy * dy <= radius * radius {
                image.put_pixel(px, py, color.into());
            }
        }
    }
}

/// Fill the triangle with apex (x + side/2, y) and base corners
/// (x, y + side), (x + side, y + side)
fn draw_triangle(image: &mut RgbImage, x: u32, y: u32, side: u32, color: Rgb) {
    let ax = i64::from(x) + i64::from(side) / 2;
    let ay = i64::from(y);
    let bx = i64::from(x);
    let by = i64::from(y) + i64::from(side);
    let cx = i64::from(x) + i64::from(side);
    let cy = by;

    let edge = |x0: i64, y0: i64, x1: i64, y1: i64, px: i64, py: i64| {
        (x1 - x0) * (py - y0) - (y1 - y0) * (px - x0)
    };

    for py in y..y + side {
        for px in x..x + side {
            let (fx, fy) = (i64::from(px), i64::from(py));
            let w0 = edge(ax, ay, bx, by, fx, fy);
            let w1 = edge(bx, by, cx, cy, fx, fy);
            let w2 = edge(cx, cy, ax, ay, fx, fy);
            // Inside when all edge functions agree in sign (vertices wound
            // one way; zero means on an edge)
            if (w0 >= 0 && w1 >= 0 && w2 >= 0) || (w0 <= 0 && w1 <= 0 && w2 <= 0) {
                image.put_pixel(px, py, color.into());
            }
        }
    }
}
