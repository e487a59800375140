use super::adaptive::{adaptive_binarize, adaptive_binarize_parallel};
use super::histogram::{LUMINANCE_BUCKETS, estimate_black_point, histogram, histogram_into};
use super::*;
use crate::models::BitRow;
use crate::source::{InvertedSource, Luma8Source};

fn binarizer_for(data: Vec<u8>, width: usize, height: usize) -> HistogramBinarizer<Luma8Source> {
    HistogramBinarizer::new(Luma8Source::new(data, width, height))
}

#[test]
fn test_histogram_buckets() {
    let buckets = histogram(&[0, 7, 8, 100, 255, 255]);
    assert_eq!(buckets[0], 2); // 0 and 7 share the lowest bucket
    assert_eq!(buckets[1], 1); // 8
    assert_eq!(buckets[100 >> 3], 1);
    assert_eq!(buckets[31], 2); // both 255s
    assert_eq!(buckets.iter().sum::<u32>(), 6);
}

#[test]
fn test_histogram_into_zeroes_first() {
    let mut buckets = [7u32; LUMINANCE_BUCKETS];
    histogram_into(&[16], &mut buckets);
    assert_eq!(buckets[2], 1);
    assert_eq!(buckets.iter().sum::<u32>(), 1);
}

#[test]
fn test_black_point_bimodal() {
    // Dark mass in bucket 2, light mass in bucket 27, one straggler at 20.
    // The best valley lands in bucket 19, so the threshold is 19 << 3.
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    buckets[2] = 4;
    buckets[20] = 1;
    buckets[27] = 11;
    assert_eq!(estimate_black_point(&buckets), Ok(152));
}

#[test]
fn test_black_point_equal_peaks() {
    // Two equal peaks; the threshold lands strictly between their
    // luminance ranges (bucket 3 tops out at 31, bucket 29 starts at 232).
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    buckets[3] = 50;
    buckets[29] = 50;
    let point = estimate_black_point(&buckets).unwrap();
    assert_eq!(point, 160);
    assert!(point > 31);
    assert!(point < 232);
}

#[test]
fn test_black_point_prefers_distant_second_peak() {
    // Bucket 5 is taller than bucket 28, but distance squared lets the far
    // peak win the second slot.
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    buckets[4] = 100;
    buckets[5] = 60;
    buckets[28] = 20;
    let point = estimate_black_point(&buckets).unwrap();
    assert!(point > 5 << 3);
}

#[test]
fn test_black_point_low_contrast() {
    // All mass in a dark bucket: the unset second peak stays at bucket 0,
    // leaving no usable gap after the swap.
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    buckets[1] = 400;
    assert_eq!(estimate_black_point(&buckets), Err(BinarizeError::LowContrast));

    // Two populations 2 buckets apart: still too close
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    buckets[10] = 50;
    buckets[12] = 40;
    assert_eq!(estimate_black_point(&buckets), Err(BinarizeError::LowContrast));

    // 3 buckets apart clears the bar
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    buckets[10] = 50;
    buckets[13] = 40;
    assert!(estimate_black_point(&buckets).is_ok());
}

#[test]
fn test_black_point_flat_bright_still_resolves() {
    // A single population away from the dark end does not fail: bucket 0
    // acts as the implicit second peak after the swap, and the gap check
    // passes. The valley then lands between 0 and the population.
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    buckets[16] = 400;
    assert_eq!(estimate_black_point(&buckets), Ok(88));
}

#[test]
fn test_black_point_empty_histogram() {
    let buckets = [0u32; LUMINANCE_BUCKETS];
    assert_eq!(estimate_black_point(&buckets), Err(BinarizeError::LowContrast));
}

#[test]
fn test_black_row_bimodal() {
    // 220s and 20s with one dip at 160. Histogram matches
    // test_black_point_bimodal, so the threshold is 152.
    let data = vec![
        220, 220, 220, 220, 20, 20, 20, 20, 220, 220, 160, 220, 220, 220, 220, 220,
    ];
    assert_eq!(estimate_black_point(&histogram(&data)), Ok(152));

    let mut binarizer = binarizer_for(data, 16, 1);
    let row = binarizer.black_row(0, None).unwrap();
    assert_eq!(row.size(), 16);

    // The dark band is black; the dip at x=10 sharpens to (4*160 - 440)/2
    // = 100, below the threshold, so it goes black too even though its raw
    // value 160 does not.
    let expected_black = [4, 5, 6, 7, 10];
    for x in 0..16 {
        assert_eq!(row.get(x), expected_black.contains(&x), "column {x}");
    }
}

#[test]
fn test_black_row_edge_columns_stay_white() {
    // Dark at both ends, light in the middle. Columns 0 and width-1 are
    // never visited by the sharpened pass and stay white.
    let data = vec![20, 20, 20, 220, 220, 220, 220, 20, 20, 20];
    let mut binarizer = binarizer_for(data, 10, 1);
    let row = binarizer.black_row(0, None).unwrap();
    assert!(!row.get(0));
    assert!(row.get(1));
    assert!(row.get(2));
    assert!(!row.get(5));
    assert!(row.get(8));
    assert!(!row.get(9));
}

#[test]
fn test_black_row_narrow() {
    // Below width 3 the raw values are compared directly.
    let mut binarizer = binarizer_for(vec![20, 220], 2, 1);
    let row = binarizer.black_row(0, None).unwrap();
    assert!(row.get(0));
    assert!(!row.get(1));

    // A single light sample pairs with the implicit dark bucket 0 and
    // still yields a threshold.
    let mut binarizer = binarizer_for(vec![220], 1, 1);
    let row = binarizer.black_row(0, None).unwrap();
    assert!(!row.get(0));

    // A single dark sample occupies bucket 0 itself; no separation.
    let mut binarizer = binarizer_for(vec![5], 1, 1);
    assert_eq!(
        binarizer.black_row(0, None),
        Err(BinarizeError::LowContrast)
    );
}

#[test]
fn test_black_row_flat_dark_fails() {
    let mut binarizer = binarizer_for(vec![0; 32], 32, 1);
    assert_eq!(
        binarizer.black_row(0, None),
        Err(BinarizeError::LowContrast)
    );

    // Bucket 2 is the last one close enough to the implicit dark peak.
    let mut binarizer = binarizer_for(vec![20; 32], 32, 1);
    assert_eq!(
        binarizer.black_row(0, None),
        Err(BinarizeError::LowContrast)
    );
}

#[test]
fn test_black_row_flat_bright_is_all_white() {
    // A flat bright row resolves a threshold below the population (see
    // test_black_point_flat_bright_still_resolves) and classifies white
    // everywhere.
    let mut binarizer = binarizer_for(vec![220; 16], 16, 1);
    let row = binarizer.black_row(0, None).unwrap();
    for x in 0..16 {
        assert!(!row.get(x));
    }
}

#[test]
fn test_black_row_reuses_row() {
    let data = vec![
        220, 220, 220, 220, 20, 20, 20, 20, 220, 220, 160, 220, 220, 220, 220, 220,
    ];
    let mut binarizer = binarizer_for(data, 16, 1);

    // An oversized row is cleared and refilled in place, keeping its size.
    let mut stale = BitRow::new(20);
    for x in 0..20 {
        stale.set(x, true);
    }
    let row = binarizer.black_row(0, Some(stale)).unwrap();
    assert_eq!(row.size(), 20);
    assert!(row.get(4));
    assert!(!row.get(0));
    assert!(!row.get(19)); // stale bit past the width is gone

    // An undersized row is replaced by a fresh allocation.
    let row = binarizer.black_row(0, Some(BitRow::new(4))).unwrap();
    assert_eq!(row.size(), 16);
    assert!(row.get(4));
}

#[test]
fn test_black_row_multiple_rows() {
    // Rows binarize independently; scratch reuse must not leak the failed
    // first row into the second.
    let mut data = vec![20u8; 16];
    data.extend_from_slice(&[
        220, 220, 220, 220, 20, 20, 20, 20, 220, 220, 220, 220, 220, 220, 220, 220,
    ]);
    let mut binarizer = binarizer_for(data, 16, 2);

    assert_eq!(
        binarizer.black_row(0, None),
        Err(BinarizeError::LowContrast)
    );
    let row = binarizer.black_row(1, None).unwrap();
    assert!(row.get(5));
    assert!(!row.get(12));
}

#[test]
fn test_inverted_row() {
    // Light bands on a dark row invert into the usual dark-on-light case.
    let data = vec![
        35, 35, 35, 35, 235, 235, 235, 235, 35, 35, 35, 35, 35, 35, 35, 35,
    ];
    let source = InvertedSource::new(Luma8Source::new(data, 16, 1));
    let mut binarizer = HistogramBinarizer::new(source);
    let row = binarizer.black_row(0, None).unwrap();
    assert!(row.get(5));
    assert!(row.get(6));
    assert!(!row.get(2));
    assert!(!row.get(12));
}

#[test]
fn test_black_matrix_uniform_is_white() {
    // The matrix path never raises LowContrast; a flat image is all white
    // because no pixel is strictly below its own neighborhood mean.
    let binarizer = binarizer_for(vec![128; 40 * 30], 40, 30);
    let matrix = binarizer.black_matrix().unwrap();
    for y in 0..30 {
        for x in 0..40 {
            assert!(!matrix.get(x, y));
        }
    }
}

#[test]
fn test_black_matrix_dark_square() {
    // 7x7 dark square on a light background: exactly the square goes
    // black. Every square pixel sees a mixed window mean well above 20;
    // every background pixel sees a mean its own 220 never undercuts.
    let (width, height) = (64, 64);
    let mut gray = vec![220u8; width * height];
    for y in 30..=36 {
        for x in 30..=36 {
            gray[y * width + x] = 20;
        }
    }

    let binarizer = binarizer_for(gray, width, height);
    let matrix = binarizer.black_matrix().unwrap();

    let mut black = 0;
    for y in 0..height {
        for x in 0..width {
            if matrix.get(x, y) {
                black += 1;
                assert!((30..=36).contains(&x) && (30..=36).contains(&y));
            }
        }
    }
    assert_eq!(black, 49);
}

#[test]
fn test_black_matrix_tracks_gradient() {
    // A dark square stays recoverable when the background brightness
    // varies across the image; a single global threshold could not keep
    // both halves clean.
    let (width, height) = (80, 40);
    let mut gray = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            gray[y * width + x] = (120 + x) as u8; // 120..=199 left to right
        }
    }
    for y in 15..=21 {
        for x in 60..=66 {
            gray[y * width + x] = 40;
        }
    }

    let binarizer = binarizer_for(gray, width, height);
    let matrix = binarizer.black_matrix().unwrap();
    for y in 15..=21 {
        for x in 60..=66 {
            assert!(matrix.get(x, y), "square pixel ({x}, {y})");
        }
    }
    // Background with a fully in-bounds window stays white.
    assert!(!matrix.get(10, 10));
    assert!(!matrix.get(70, 35));
}

#[test]
fn test_black_matrix_vertical_split() {
    // Sharp dark/light split at column 32. Uniform interiors match their
    // own mean and stay white; the black response is the dark strip whose
    // windows reach across the boundary, here columns 24..=31.
    let (width, height) = (64, 32);
    let mut gray = Vec::with_capacity(width * height);
    for _y in 0..height {
        for x in 0..width {
            gray.push(if x < 32 { 40u8 } else { 220u8 });
        }
    }

    let binarizer = binarizer_for(gray, width, height);
    let matrix = binarizer.black_matrix().unwrap();
    for y in 0..height {
        for x in 0..width {
            assert_eq!(
                matrix.get(x, y),
                (24..=31).contains(&x),
                "pixel ({x}, {y})"
            );
        }
    }
}

#[test]
fn test_black_matrix_tiny_images_are_white() {
    // Pixels in tiny images see either no in-bounds sample or a uniform
    // mean equal to their own value; both classify white even when dark.
    for (w, h) in [(1, 1), (2, 2), (2, 1)] {
        let binarizer = binarizer_for(vec![5; w * h], w, h);
        let matrix = binarizer.black_matrix().unwrap();
        for y in 0..h {
            for x in 0..w {
                assert!(!matrix.get(x, y));
            }
        }
    }
}

#[test]
fn test_black_matrix_empty() {
    let binarizer = binarizer_for(Vec::new(), 0, 0);
    let matrix = binarizer.black_matrix().unwrap();
    assert_eq!(matrix.width(), 0);
    assert_eq!(matrix.height(), 0);
    assert!(binarizer.black_matrix_parallel().unwrap().as_bytes().is_empty());
}

fn pattern_gray(width: usize, height: usize) -> Vec<u8> {
    let mut gray = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            gray.push(((x * 31 + y * 17) % 251) as u8);
        }
    }
    gray
}

#[test]
fn test_parallel_matches_serial() {
    let (width, height) = (65, 48); // width deliberately not byte-aligned
    let gray = pattern_gray(width, height);
    let serial = adaptive_binarize(&gray, width, height, 10, 0);
    let parallel = adaptive_binarize_parallel(&gray, width, height, 10, 0);
    assert_eq!(serial.as_bytes(), parallel.as_bytes());

    let binarizer = binarizer_for(gray, width, height);
    assert_eq!(
        binarizer.black_matrix().unwrap().as_bytes(),
        binarizer.black_matrix_parallel().unwrap().as_bytes()
    );
}

#[test]
fn test_binarize_is_deterministic() {
    let (width, height) = (33, 21);
    let gray = pattern_gray(width, height);
    let first = adaptive_binarize(&gray, width, height, 10, 0);
    let second = adaptive_binarize(&gray, width, height, 10, 0);
    assert_eq!(first.as_bytes(), second.as_bytes());
}

#[test]
fn test_bias_pushes_toward_white() {
    let (width, height) = (32, 32);
    let gray = pattern_gray(width, height);

    let neutral = adaptive_binarize(&gray, width, height, 10, 0);
    let biased = adaptive_binarize(&gray, width, height, 10, 40);

    let count = |m: &crate::models::BitMatrix| {
        let mut n = 0;
        for y in 0..height {
            for x in 0..width {
                if m.get(x, y) {
                    n += 1;
                }
            }
        }
        n
    };
    assert!(count(&biased) < count(&neutral));
}

#[test]
fn test_for_source_keeps_configuration() {
    let binarizer = HistogramBinarizer::with_window(
        Luma8Source::new(vec![0; 4], 2, 2),
        5,
        12,
    );
    let rebound = binarizer.for_source(Luma8Source::new(vec![0; 9], 3, 3));
    assert_eq!(rebound.window_radius(), 5);
    assert_eq!(rebound.bias(), 12);
    assert_eq!(rebound.width(), 3);
    assert_eq!(rebound.height(), 3);
}

#[test]
fn test_error_display() {
    let message = BinarizeError::LowContrast.to_string();
    assert!(message.contains("contrast"));
}
