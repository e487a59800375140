// Stage-by-stage diagnostic for the binarization pipeline
use bitonal::tools::{binary_stats, grayscale_stats, load_luma, save_matrix};
use bitonal::{Binarizer, HistogramBinarizer, LuminanceSource};
use std::time::Instant;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: binarize_image <image> [output.png]");
        return;
    }
    let input = &args[1];
    let output = args.get(2);

    let source = match load_luma(input) {
        Ok(source) => source,
        Err(e) => {
            println!("Failed to open image: {}", e);
            return;
        }
    };
    let (width, height) = (source.width(), source.height());
    println!("Step 1: Image loaded - {}x{} pixels", width, height);

    let stats = grayscale_stats(source.as_slice());
    println!(
        "Step 2: Luminance - min={} max={} avg={}",
        stats.min, stats.max, stats.avg
    );

    let mut binarizer = HistogramBinarizer::new(source);

    let start = Instant::now();
    let matrix = match binarizer.black_matrix() {
        Ok(matrix) => matrix,
        Err(e) => {
            println!("Binarization failed: {}", e);
            return;
        }
    };
    let serial_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let parallel = match binarizer.black_matrix_parallel() {
        Ok(matrix) => matrix,
        Err(e) => {
            println!("Parallel binarization failed: {}", e);
            return;
        }
    };
    let parallel_ms = start.elapsed().as_secs_f64() * 1000.0;

    println!(
        "Step 3: Binarized - serial {:.2}ms, parallel {:.2}ms",
        serial_ms, parallel_ms
    );
    if matrix.as_bytes() != parallel.as_bytes() {
        println!("  WARNING: serial and parallel outputs differ");
    }

    let stats = binary_stats(&matrix);
    println!(
        "  - {} of {} pixels black ({:.1}%)",
        stats.black_pixels,
        stats.total_pixels,
        stats.black_ratio * 100.0
    );

    // Row path on the middle scanline as a spot check
    if height > 0 {
        match binarizer.black_row(height / 2, None) {
            Ok(row) => {
                let black = (0..width).filter(|&x| row.get(x)).count();
                println!(
                    "Step 4: Middle row ({}) - {} of {} columns black",
                    height / 2,
                    black,
                    width
                );
            }
            Err(e) => {
                println!("Step 4: Middle row ({}) - {}", height / 2, e);
            }
        }
    }

    if let Some(output) = output {
        match save_matrix(&matrix, output) {
            Ok(()) => println!("Step 5: Saved binary image to {}", output),
            Err(e) => println!("Failed to save {}: {}", output, e),
        }
    }
}
