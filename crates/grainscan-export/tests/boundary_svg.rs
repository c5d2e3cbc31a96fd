//! Integration test: analyze a synthetic segmented image and export the
//! boundary polygons to SVG and the chain codes to chain text.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use grainscan_analysis::{AnalysisConfig, analyze};
use grainscan_export::{SvgMetadata, parse_chain_text, to_chain_text, to_svg};

/// Encode a grayscale image as an in-memory PNG.
fn encode_png(img: &image::GrayImage) -> Vec<u8> {
    let mut buf = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut buf);
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

#[test]
fn analysis_to_svg_and_chain_text() {
    let img = image::GrayImage::from_fn(32, 32, |x, y| {
        if (6..14).contains(&x) && (8..14).contains(&y) {
            image::Luma([255])
        } else {
            image::Luma([0])
        }
    });

    let report = analyze(&encode_png(&img), &AnalysisConfig::default())
        .expect("analysis should succeed");
    assert_eq!(report.shapes.len(), 1, "skipped: {:?}", report.skipped);

    // SVG export of the boundary polygons.
    let polygons: Vec<_> = report.shapes.iter().map(|s| s.polygon.clone()).collect();
    let metadata = SvgMetadata {
        title: Some("synthetic_seg_bin"),
        description: Some("threshold=1"),
    };
    let svg = to_svg(&polygons, report.dimensions, &metadata);
    assert!(svg.contains("<svg"));
    assert!(svg.contains("<path"));
    assert!(svg.contains("<title>synthetic_seg_bin</title>"));
    assert!(svg.contains(r#"viewBox="0 0 32 32""#));

    // Chain text round trip: what we write, a consumer can re-ingest,
    // and the replayed polygon is identical.
    let chains: Vec<_> = report.shapes.iter().map(|s| s.chain.clone()).collect();
    let text = to_chain_text(&chains);
    let parsed = parse_chain_text(&text).unwrap();
    assert_eq!(parsed, chains);
    assert_eq!(parsed[0].replay(), report.shapes[0].polygon);
}
