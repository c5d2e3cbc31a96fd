//! Integration test: run a synthetic segmented-grain PGM through the full
//! analysis and check the per-file statistics.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use grainscan_analysis::{AnalysisConfig, analyze};

/// Encode a grayscale image as a binary-format PGM buffer, matching the
/// `_seg_bin.pgm` inputs the batch driver consumes.
fn encode_pgm(img: &image::GrayImage) -> Vec<u8> {
    use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};

    let mut buf = Vec::new();
    let encoder =
        PnmEncoder::new(&mut buf).with_subtype(PnmSubtype::Graymap(SampleEncoding::Binary));
    image::ImageEncoder::write_image(
        encoder,
        img.as_raw(),
        img.width(),
        img.height(),
        image::ExtendedColorType::L8,
    )
    .unwrap();
    buf
}

/// Paint a filled rectangle of foreground pixels.
fn paint_rect(img: &mut image::GrayImage, x0: u32, y0: u32, w: u32, h: u32) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, image::Luma([255]));
        }
    }
}

#[test]
fn synthetic_grains_end_to_end() {
    // Three interior "grains" of different sizes plus one clipped blob
    // on the top border.
    let mut img = image::GrayImage::new(48, 48);
    paint_rect(&mut img, 4, 4, 6, 4); // 24 cells
    paint_rect(&mut img, 20, 8, 8, 6); // 48 cells
    paint_rect(&mut img, 10, 30, 10, 8); // 80 cells
    paint_rect(&mut img, 40, 0, 4, 3); // touches the border, dropped

    let pgm = encode_pgm(&img);
    let report = analyze(&pgm, &AnalysisConfig::default()).expect("analysis should succeed");

    assert_eq!(report.initial_components, 4);
    assert_eq!(report.border_components, 1);
    assert_eq!(report.shapes.len(), 3, "skipped: {:?}", report.skipped);
    assert!(report.skipped.is_empty());

    // Every measured shape carries a closed chain code.
    for shape in &report.shapes {
        assert_eq!(
            shape.polygon.vertices().last(),
            Some(&shape.chain.start()),
            "closed chain for component {} must replay back to its start",
            shape.label,
        );
        assert!(shape.record.area_by_polygon > 0.0);
        assert!(shape.record.perimeter_by_polygon > 0.0);
        // The polygon area threads through boundary-cell centers, so it
        // is always below the cell-count (tiling) area.
        assert!(shape.record.area_by_polygon < shape.record.area_by_cell_count);
    }

    let stats = report.statistics();
    assert_eq!(stats.cell_count_area.count, 3);
    let expected_mean = (24.0 + 48.0 + 80.0) / 3.0;
    assert!((stats.cell_count_area.mean - expected_mean).abs() < 1e-9);
    assert!((stats.cell_count_area.min - 24.0).abs() < 1e-9);
    assert!((stats.cell_count_area.max - 80.0).abs() < 1e-9);
    assert!((stats.cell_count_area.median - 48.0).abs() < 1e-9);
    assert!(stats.cell_count_area.stddev > 0.0);
}

#[test]
fn threshold_controls_foreground_membership() {
    // Faint blob at value 100: foreground at the default threshold,
    // background once the threshold climbs past it.
    let mut img = image::GrayImage::new(16, 16);
    for y in 5..9 {
        for x in 5..9 {
            img.put_pixel(x, y, image::Luma([100]));
        }
    }
    let pgm = encode_pgm(&img);

    let low = analyze(&pgm, &AnalysisConfig::default()).unwrap();
    assert_eq!(low.initial_components, 1);

    let config = AnalysisConfig {
        foreground_threshold: 128,
        ..AnalysisConfig::default()
    };
    let high = analyze(&pgm, &config).unwrap();
    assert_eq!(high.initial_components, 0);
}
