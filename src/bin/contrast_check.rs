// Per-row black point survey, for judging whether a frame is scannable
use bitonal::LuminanceSource;
use bitonal::binarizer::histogram::{estimate_black_point, histogram};
use bitonal::tools::load_luma;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("Usage: contrast_check <image>");
        return;
    }

    let source = match load_luma(&args[1]) {
        Ok(source) => source,
        Err(e) => {
            println!("Failed to open image: {}", e);
            return;
        }
    };
    let (width, height) = (source.width(), source.height());
    println!("Image: {}x{} pixels", width, height);

    let sample_step = (height / 16).max(1);
    let mut buf = Vec::new();
    let mut ok_rows = 0usize;
    let mut failed_rows = 0usize;
    let mut min_point = u8::MAX;
    let mut max_point = u8::MIN;
    let mut point_sum = 0u64;

    for y in 0..height {
        let row = source.row(y, &mut buf);
        match estimate_black_point(&histogram(row)) {
            Ok(point) => {
                ok_rows += 1;
                min_point = min_point.min(point);
                max_point = max_point.max(point);
                point_sum += point as u64;
                if y % sample_step == 0 {
                    println!("  row {:4}: black point {}", y, point);
                }
            }
            Err(_) => {
                failed_rows += 1;
                if y % sample_step == 0 {
                    println!("  row {:4}: low contrast", y);
                }
            }
        }
    }

    println!();
    println!("{} of {} rows have a usable black point", ok_rows, height);
    if ok_rows > 0 {
        println!(
            "Black point range: {} - {} (avg {})",
            min_point,
            max_point,
            point_sum / ok_rows as u64
        );
    }
    if failed_rows > 0 {
        println!("{} rows rejected for low contrast", failed_rows);
    }
}
