use anyhow::anyhow;
use resvg::{tiny_skia, usvg};

const METERS_PER_INCH: f64 = 0.0254;

/// Rasterize an SVG document into a `width` x `height` pixel image, scaling its user units by `scale`.
pub fn rasterize_svg(
    svg: &str,
    width: u32,
    height: u32,
    scale: f32,
) -> anyhow::Result<tiny_skia::Pixmap> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    log::debug!("Loaded {} font faces", options.fontdb.len());
    let tree = usvg::Tree::from_str(svg, &options)?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| anyhow!("Cannot create a {}x{} pixel image", width, height))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

/// Encode the image as an 8-bit RGBA PNG that declares the given resolution.
pub fn encode_png(pixmap: &tiny_skia::Pixmap, dpi: f64) -> anyhow::Result<Vec<u8>> {
    let mut image_data = Vec::with_capacity(pixmap.data().len());
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        image_data.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let pixels_per_meter = (dpi / METERS_PER_INCH).round() as u32;
    let mut png_bytes = Vec::new();
    let mut encoder = png::Encoder::new(&mut png_bytes, pixmap.width(), pixmap.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_pixel_dims(Some(png::PixelDimensions {
        xppu: pixels_per_meter,
        yppu: pixels_per_meter,
        unit: png::Unit::Meter,
    }));
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&image_data)?;
    writer.finish()?;
    Ok(png_bytes)
}
