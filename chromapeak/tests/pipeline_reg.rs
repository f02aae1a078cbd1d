//! End-to-end extraction regression test
//!
//! Runs the full pipeline on synthetic images, on a PNG file written to
//! the regression output directory and with options loaded from YAML.

use chromapeak::color::{Oklch, oklch_to_rgb8, rgb_to_oklch};
use chromapeak::io::DecodedImage;
use chromapeak::{
    PipelineOptions, circular_distance, extract_colors, extract_colors_from_path,
    extract_colors_from_rgba, load_options,
};
use chromapeak_test::{
    RegParams, oklch_block_image, transparent_image, uniform_image, write_regout,
};

fn encode_png(img: &DecodedImage) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, img.width, img.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&img.data).unwrap();
        writer.finish().unwrap();
    }
    out
}

fn palette() -> Vec<Oklch> {
    vec![
        Oklch::new(0.62, 0.12, 30.0),
        Oklch::new(0.75, 0.10, 110.0),
        Oklch::new(0.55, 0.09, 190.0),
        Oklch::new(0.50, 0.12, 280.0),
    ]
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");
    let opts = PipelineOptions::default();

    // --- Four well separated hues give four colors ---
    let colors = palette();
    let img = oklch_block_image(16, 16, &colors);
    let out = extract_colors(&img.as_buffer().unwrap(), &opts).unwrap();
    rp.compare_values(4.0, out.colors.len() as f64, 0.0);
    for target in &colors {
        let (r, g, b) = oklch_to_rgb8(*target);
        let q = rgb_to_oklch(r, g, b);
        let hit = out
            .colors
            .iter()
            .find(|c| circular_distance(c.hue, q.h) < 1.0);
        rp.check(hit.is_some(), "every palette hue is extracted");
        if let Some(c) = hit {
            rp.compare_values(q.c, c.chroma, 0.002);
            rp.compare_values(q.l, c.lightness, 0.002);
        }
    }
    let ranked = out.colors.windows(2).all(|w| w[0].weight >= w[1].weight);
    rp.check(ranked, "colors ranked by weight");
    rp.check(out.peaks.len() >= out.colors.len(), "one peak per color at least");

    // --- Weighting by area: a dominant hue ranks first ---
    let mut weighted = vec![colors[0]; 3];
    weighted.push(colors[3]);
    let img = oklch_block_image(16, 16, &weighted);
    let out = extract_colors(&img.as_buffer().unwrap(), &opts).unwrap();
    rp.compare_values(2.0, out.colors.len() as f64, 0.0);
    rp.compare_values(0.0, circular_distance(out.colors[0].hue, colors[0].h), 3.0);

    // --- max_colors caps the output ---
    let mut capped = opts.clone();
    capped.resolve.max_colors = 2;
    let img = oklch_block_image(16, 16, &colors);
    let out = extract_colors(&img.as_buffer().unwrap(), &capped).unwrap();
    rp.compare_values(2.0, out.colors.len() as f64, 0.0);

    // --- Degenerate inputs produce empty results ---
    let gray = uniform_image(20, 20, [128, 128, 128, 255]);
    let out = extract_colors(&gray.as_buffer().unwrap(), &opts).unwrap();
    rp.check(out.colors.is_empty(), "gray image has no colors");
    rp.compare_values(0.0, out.histogram.total(), 0.0);
    let clear = transparent_image(20, 20);
    let out = extract_colors(&clear.as_buffer().unwrap(), &opts).unwrap();
    rp.check(out.histogram.is_empty(), "transparent image has no samples");
    rp.check(out.colors.is_empty(), "transparent image has no colors");
    rp.check(
        extract_colors_from_rgba(&clear.data[1..], 20, 20, &opts).is_err(),
        "short buffer rejected",
    );

    // --- From a PNG on disk, downsampled ---
    let img = oklch_block_image(64, 40, &colors);
    let path = write_regout("pipeline.01.png", &encode_png(&img)).unwrap();
    let full = extract_colors(&img.as_buffer().unwrap(), &opts).unwrap();
    let from_disk = extract_colors_from_path(&path, None, &opts).unwrap();
    rp.compare_values(full.colors.len() as f64, from_disk.colors.len() as f64, 0.0);
    for (a, b) in full.colors.iter().zip(&from_disk.colors) {
        rp.compare_strings(a.description.as_bytes(), b.description.as_bytes());
    }
    let small = extract_colors_from_path(&path, Some(64), &opts).unwrap();
    rp.compare_values(4.0, small.colors.len() as f64, 0.0);

    // --- Options from YAML ---
    let yaml = "resolve:\n  mode: peak\n  maxColors: 3\n  minDistance: 10.0\nsigma: 1.0\n";
    let yaml_path = write_regout("pipeline.02.yaml", yaml.as_bytes()).unwrap();
    let loaded = load_options(&yaml_path).unwrap();
    rp.compare_values(1.0, loaded.sigma, 0.0);
    rp.compare_values(3.0, loaded.resolve.max_colors as f64, 0.0);
    rp.compare_values(
        opts.peaks.min_height_ratio,
        loaded.peaks.min_height_ratio,
        0.0,
    );
    let out = extract_colors(&img.as_buffer().unwrap(), &loaded).unwrap();
    rp.compare_values(3.0, out.colors.len() as f64, 0.0);
    for c in &out.colors {
        rp.compare_values(c.peak.index as f64, c.hue, 0.0);
    }

    assert!(rp.cleanup());
}
