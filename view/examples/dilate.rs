//! Dilate the luminance of a PNG image with a sliding maximum.
//!
//! Usage: `cargo run --example dilate -- [input.png] [radius]`. Without an input a test pattern
//! is filtered instead. The result is written next to the workspace root.
use image_view::{
    render, ArrayAccess, ArrayImage, ConvertAccess, Domain, FilterOptions, GrayLuminance, Radius,
    Rgb8,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let input = args.next();
    let radius = args.next().map(|r| r.parse()).transpose()?.unwrap_or(3);

    let rgb = match input {
        Some(path) => image::open(path)?.to_rgb8(),
        None => image::RgbImage::from_fn(257, 257, |x, y| {
            // Sparse bright dots on a dark background, dilation grows them into disks.
            let on = x % 32 == 16 && y % 32 == 16;
            let level = if on { 255 } else { ((x ^ y) % 16) as u8 };
            image::Rgb([level, level / 2, level])
        }),
    };

    let (width, height) = rgb.dimensions();
    let domain = Domain::with_shape(&[i64::from(width), i64::from(height)])?;
    let pixels = rgb.pixels().map(|p| Rgb8::from(p.0)).collect();
    let image = ArrayImage::from_vec(domain.clone(), pixels)?;

    let options = FilterOptions {
        radius: Radius::Scalar(radius),
        ..FilterOptions::default()
    };

    // Filter the luminance as it is computed, without storing a gray image first.
    let gray = ConvertAccess::new(ArrayAccess::new(&image), GrayLuminance::default());
    let filter = options.sliding_max_gray(gray, &domain)?;
    let dilated = render(filter, &domain)?;

    let output = image::GrayImage::from_raw(width, height, dilated.into_vec())
        .ok_or("buffer does not match the image dimensions")?;
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../dilated.png");
    output.save(path)?;

    Ok(())
}
