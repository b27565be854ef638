//! Dataset generation handler

use crate::commands::GenerateArgs;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::ProgressReporter;
use matiz::{DatasetGenerator, GeneratorConfig};

/// Generate a benchmark dataset and print its ground truth
pub fn execute_generate(config: &CliConfig, args: &GenerateArgs) -> CliResult<()> {
    let generator_config = GeneratorConfig::default()
        .with_num_images(args.images)
        .with_image_size(args.size)
        .with_region_range(args.min_regions, args.max_regions)
        .with_seed(args.seed);
    let generator = DatasetGenerator::new(generator_config);

    let mut reporter = ProgressReporter::new(
        config.color.should_color(),
        config.verbosity.is_quiet(),
    );
    reporter.start_progress(u64::from(args.images), "rendering images");

    let dataset = generator
        .generate_with(&args.out, |_, _| reporter.increment(1))
        .map_err(|e| CliError::generation(e.to_string()))?;
    reporter.finish();

    if !config.verbosity.is_quiet() {
        println!(
            "Generated {} images with dominant colors:",
            dataset.ground_truth.len()
        );
        for (filename, color) in dataset.ground_truth.iter() {
            println!("  {filename}: {color}");
        }
        println!();
        println!("Images: {}", dataset.input_dir.display());
        println!("Ground truth: {}", dataset.ground_truth_path.display());
    }

    Ok(())
}
