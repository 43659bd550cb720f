use std::path::PathBuf;
use std::process;

use clap::Parser;

use logo_inpaint::{
    inpaint, load_image, load_mask, save_image, write_debug_composite, InpaintAlgorithm,
    InpaintOptions, DEFAULT_RADIUS,
};

#[derive(Parser)]
#[command(
    name = "logo-inpaint",
    about = "Remove a marked region (logo, text) from a photo via inpainting",
    version,
    after_help = "The mask must match the image dimensions. White (255) marks pixels to\n\
                  synthesize; black (0) marks pixels to preserve unchanged."
)]
struct Cli {
    /// Input image file
    image: PathBuf,

    /// Mask file (white = remove, black = keep)
    mask: PathBuf,

    /// Output file (format chosen by extension)
    output: PathBuf,

    /// Neighborhood radius around each masked pixel
    #[arg(short, long, default_value_t = DEFAULT_RADIUS)]
    radius: u32,

    /// Inpainting algorithm variant
    #[arg(short, long, value_enum, default_value_t = InpaintAlgorithm::Telea)]
    algorithm: InpaintAlgorithm,

    /// Write a before/after composite PNG into this directory
    #[arg(long, value_name = "DIR")]
    debug_dir: Option<PathBuf>,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.radius == 0 {
        eprintln!("Error: Radius must be at least 1");
        process::exit(1);
    }

    let options = InpaintOptions {
        radius: cli.radius,
        algorithm: cli.algorithm,
    };

    let img = match load_image(&cli.image) {
        Ok(img) => img,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let mask = match load_mask(&cli.mask) {
        Ok(mask) => mask,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let result = match inpaint(&img, &mask, &options) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = save_image(&result, &cli.output) {
        eprintln!("Error: Failed to save {}: {e}", cli.output.display());
        process::exit(1);
    }

    if let Some(debug_dir) = &cli.debug_dir {
        match write_debug_composite(&img, &result, debug_dir) {
            Ok(path) => {
                if !cli.quiet {
                    eprintln!("[DEBUG] Composite written to {}", path.display());
                }
            }
            Err(e) => {
                eprintln!("Warning: Failed to write debug composite: {e}");
            }
        }
    }

    if !cli.quiet {
        eprintln!("[OK] Saved to {}", cli.output.display());
    }
}
