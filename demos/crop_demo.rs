//! Crop Demo
//!
//! Crops an input image into an avatar, a banner and a border-trimmed copy.
//!
//! Run with: cargo run --example crop_demo -- photo.jpg

use crop_core::{
    crop, crop_by_margins, crop_to_center_square, load, save, Anchor, CropDirective,
    EncodeOptions, RasterFormat,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args()
        .nth(1)
        .ok_or("usage: crop_demo <image>")?;

    // Create output directory
    std::fs::create_dir_all("output")?;

    let source = load(&input)?;
    println!("Loaded {input}: {}x{}", source.width(), source.height());

    // Avatar: largest centered square
    let avatar = crop_to_center_square(&source);
    save(avatar, "output/avatar.jpg", &EncodeOptions::jpeg(90))?;
    println!("Generated: output/avatar.jpg");

    // Banner: full width, 1/3 of the height, anchored to the top
    let banner = CropDirective::SizeWithAnchor {
        width: i32::MAX,
        height: source.height() as i32 / 3,
        anchor: Anchor::TopLeft,
    };
    let options = EncodeOptions::new().with_format(RasterFormat::Png);
    save(crop(&source, &banner), "output/banner.png", &options)?;
    println!("Generated: output/banner.png");

    // Border removal: trim 5% of each edge
    let margin_x = source.width() as i32 / 20;
    let margin_y = source.height() as i32 / 20;
    let trimmed = crop_by_margins(&source, margin_y, margin_x, margin_y, margin_x);
    save(trimmed, "output/trimmed.png", &options)?;
    println!("Generated: output/trimmed.png");

    Ok(())
}
