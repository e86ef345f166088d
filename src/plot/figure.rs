use crate::geofile::layer::GeoLayer;

use super::{
    axes::Axes,
    raster::{encode_png, rasterize_svg},
    svg::{Style, SvgDocument, TextAnchor},
};

pub const POINTS_PER_INCH: f64 = 72.0;

/// Subplot box as fractions of the figure, measured from the bottom left.
const SUBPLOT_LEFT: f64 = 0.125;
const SUBPLOT_RIGHT: f64 = 0.9;
const SUBPLOT_BOTTOM: f64 = 0.11;
const SUBPLOT_TOP: f64 = 0.88;

const TITLE_FONT_SIZE: f64 = 12.0;
const TITLE_PAD: f64 = 6.0;
const LABEL_FONT_SIZE: f64 = 10.0;
const LABEL_PAD: f64 = 4.0;
const TICK_FONT_SIZE: f64 = 10.0;
const TICK_LENGTH: f64 = 3.5;
const TICK_PAD: f64 = 3.5;
/// Approximate glyph metrics relative to the font size.
const ASCENT: f64 = 0.76;
const DESCENT: f64 = 0.24;
const CHAR_WIDTH: f64 = 0.6;

const POLYGON_STYLE: Style = Style {
    fill: Some("white"),
    stroke: "black",
    stroke_width: 1.0,
};
const LINE_STYLE: Style = Style {
    fill: None,
    stroke: "black",
    stroke_width: 1.5,
};
const MARKER_STYLE: Style = Style {
    fill: Some("white"),
    stroke: "black",
    stroke_width: 1.0,
};
const MARKER_RADIUS: f64 = 3.0;
const FRAME_STYLE: Style = Style {
    fill: None,
    stroke: "black",
    stroke_width: 0.8,
};
const TICK_STYLE: Style = FRAME_STYLE;

/// A figure with a single set of axes, rendered to a raster image.
#[derive(Debug, Clone)]
pub struct Figure {
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: f64,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

/// Geometry parts grouped by how they are drawn, in figure coordinates.
#[derive(Default)]
struct Shapes {
    polygons: Vec<Vec<Vec<geo::Coord>>>,
    lines: Vec<Vec<geo::Coord>>,
    points: Vec<geo::Coord>,
}

impl Shapes {
    fn add_geometry(&mut self, geometry: &geo::Geometry, axes: &Axes) {
        match geometry {
            geo::Geometry::Point(point) => self.points.push(axes.to_figure(point.0)),
            geo::Geometry::MultiPoint(multi_point) => self
                .points
                .extend(multi_point.iter().map(|point| axes.to_figure(point.0))),
            geo::Geometry::Line(line) => self
                .lines
                .push(vec![axes.to_figure(line.start), axes.to_figure(line.end)]),
            geo::Geometry::LineString(line_string) => {
                self.lines.push(to_figure_coords(line_string, axes))
            }
            geo::Geometry::MultiLineString(multi_line_string) => self.lines.extend(
                multi_line_string
                    .iter()
                    .map(|line_string| to_figure_coords(line_string, axes)),
            ),
            geo::Geometry::Polygon(polygon) => self.add_polygon(polygon, axes),
            geo::Geometry::MultiPolygon(multi_polygon) => {
                for polygon in multi_polygon {
                    self.add_polygon(polygon, axes);
                }
            }
            geo::Geometry::Rect(rect) => self.add_polygon(&rect.to_polygon(), axes),
            geo::Geometry::Triangle(triangle) => self.add_polygon(&triangle.to_polygon(), axes),
            geo::Geometry::GeometryCollection(collection) => {
                for geometry in collection {
                    self.add_geometry(geometry, axes);
                }
            }
        }
    }

    fn add_polygon(&mut self, polygon: &geo::Polygon, axes: &Axes) {
        let rings = std::iter::once(polygon.exterior())
            .chain(polygon.interiors().iter())
            .map(|ring| to_figure_coords(ring, axes))
            .collect();
        self.polygons.push(rings);
    }
}

fn to_figure_coords(line_string: &geo::LineString, axes: &Axes) -> Vec<geo::Coord> {
    line_string
        .coords()
        .map(|coord| axes.to_figure(*coord))
        .collect()
}

fn text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * CHAR_WIDTH * font_size
}

impl Figure {
    pub fn new(width_inches: f64, height_inches: f64, dpi: f64) -> Self {
        Self {
            width_inches,
            height_inches,
            dpi,
            title: String::new(),
            x_label: String::new(),
            y_label: String::new(),
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_labels(mut self, x_label: &str, y_label: &str) -> Self {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
        self
    }

    /// Figure size in points.
    pub fn size_points(&self) -> (f64, f64) {
        (
            self.width_inches * POINTS_PER_INCH,
            self.height_inches * POINTS_PER_INCH,
        )
    }

    /// Size of the rendered image in pixels.
    pub fn size_pixels(&self) -> (u32, u32) {
        (
            (self.width_inches * self.dpi).round() as u32,
            (self.height_inches * self.dpi).round() as u32,
        )
    }

    /// Box in figure points, origin top left, that the axes are fitted into.
    pub fn subplot_box(&self) -> geo::Rect {
        let (width, height) = self.size_points();
        geo::Rect::new(
            geo::Coord {
                x: SUBPLOT_LEFT * width,
                y: (1.0 - SUBPLOT_TOP) * height,
            },
            geo::Coord {
                x: SUBPLOT_RIGHT * width,
                y: (1.0 - SUBPLOT_BOTTOM) * height,
            },
        )
    }

    /// Render the layer into an SVG document measured in points.
    pub fn render_svg(&self, layer: &GeoLayer) -> String {
        let (width, height) = self.size_points();
        let axes = Axes::fit(layer, self.subplot_box());
        let mut svg = SvgDocument::new(width, height);

        let mut shapes = Shapes::default();
        for geometry in &layer.geometries {
            shapes.add_geometry(geometry, &axes);
        }
        svg.begin_clip_group("axes", &axes.frame);
        for rings in &shapes.polygons {
            svg.polygon(rings, &POLYGON_STYLE);
        }
        for line in &shapes.lines {
            svg.polyline(line, &LINE_STYLE);
        }
        for point in &shapes.points {
            svg.circle(*point, MARKER_RADIUS, &MARKER_STYLE);
        }
        svg.end_group();
        svg.rect(&axes.frame, &FRAME_STYLE);

        let frame_min = axes.frame.min();
        let frame_max = axes.frame.max();

        for tick in axes.x_ticks(TICK_FONT_SIZE * 3.0) {
            svg.line(
                geo::Coord { x: tick.position, y: frame_max.y },
                geo::Coord { x: tick.position, y: frame_max.y + TICK_LENGTH },
                &TICK_STYLE,
            );
            svg.text(
                &tick.label,
                geo::Coord {
                    x: tick.position,
                    y: frame_max.y + TICK_LENGTH + TICK_PAD + ASCENT * TICK_FONT_SIZE,
                },
                TICK_FONT_SIZE,
                TextAnchor::Middle,
                0.0,
            );
        }

        let mut widest_y_tick_label: f64 = 0.0;
        for tick in axes.y_ticks(TICK_FONT_SIZE * 2.0) {
            svg.line(
                geo::Coord { x: frame_min.x - TICK_LENGTH, y: tick.position },
                geo::Coord { x: frame_min.x, y: tick.position },
                &TICK_STYLE,
            );
            svg.text(
                &tick.label,
                geo::Coord {
                    x: frame_min.x - TICK_LENGTH - TICK_PAD,
                    y: tick.position + (ASCENT - DESCENT) / 2.0 * TICK_FONT_SIZE,
                },
                TICK_FONT_SIZE,
                TextAnchor::End,
                0.0,
            );
            widest_y_tick_label = widest_y_tick_label.max(text_width(&tick.label, TICK_FONT_SIZE));
        }

        let center = axes.frame.center();
        if !self.x_label.is_empty() {
            let tick_labels_bottom =
                frame_max.y + TICK_LENGTH + TICK_PAD + (ASCENT + DESCENT) * TICK_FONT_SIZE;
            svg.text(
                &self.x_label,
                geo::Coord {
                    x: center.x,
                    y: tick_labels_bottom + LABEL_PAD + ASCENT * LABEL_FONT_SIZE,
                },
                LABEL_FONT_SIZE,
                TextAnchor::Middle,
                0.0,
            );
        }
        if !self.y_label.is_empty() {
            let tick_labels_left = frame_min.x - TICK_LENGTH - TICK_PAD - widest_y_tick_label;
            svg.text(
                &self.y_label,
                geo::Coord {
                    x: tick_labels_left - LABEL_PAD - DESCENT * LABEL_FONT_SIZE,
                    y: center.y,
                },
                LABEL_FONT_SIZE,
                TextAnchor::Middle,
                90.0,
            );
        }
        if !self.title.is_empty() {
            svg.text(
                &self.title,
                geo::Coord {
                    x: center.x,
                    y: frame_min.y - TITLE_PAD - DESCENT * TITLE_FONT_SIZE,
                },
                TITLE_FONT_SIZE,
                TextAnchor::Middle,
                0.0,
            );
        }

        svg.finish()
    }

    /// Render the layer into PNG file contents.
    pub fn render_png(&self, layer: &GeoLayer) -> anyhow::Result<Vec<u8>> {
        let svg = self.render_svg(layer);
        let (width, height) = self.size_pixels();
        log::debug!("Rasterizing {}x{} pixel figure", width, height);
        let pixmap = rasterize_svg(&svg, width, height, (self.dpi / POINTS_PER_INCH) as f32)?;
        encode_png(&pixmap, self.dpi)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    use crate::geofile::layer::GeoLayer;

    use super::Figure;

    fn layer_with_hole() -> GeoLayer {
        let polygon = geo::Polygon::new(
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)].into(),
            vec![vec![(4.0, 4.0), (6.0, 4.0), (6.0, 6.0), (4.0, 4.0)].into()],
        );
        GeoLayer::new(
            vec![
                geo::Geometry::Polygon(polygon),
                geo::Geometry::LineString(vec![(0.0, 0.0), (10.0, 10.0)].into()),
                geo::Geometry::Point(geo::Point::new(5.0, 5.0)),
            ],
            false,
        )
    }

    #[rstest]
    fn test_sizes() {
        let figure = Figure::new(10.0, 10.0, 300.0);
        assert_eq!((720.0, 720.0), figure.size_points());
        assert_eq!((3000, 3000), figure.size_pixels());
        let subplot_box = figure.subplot_box();
        assert_abs_diff_eq!(90.0, subplot_box.min().x, epsilon = 1e-9);
        assert_abs_diff_eq!(648.0, subplot_box.max().x, epsilon = 1e-9);
        assert_abs_diff_eq!(86.4, subplot_box.min().y, epsilon = 1e-9);
        assert_abs_diff_eq!(640.8, subplot_box.max().y, epsilon = 1e-9);
    }

    #[rstest]
    fn test_render_svg_draws_shapes_and_text() {
        let figure = Figure::new(10.0, 10.0, 300.0)
            .with_title(r#"A map for "rings.geojson""#)
            .with_labels("Longitude", "Latitude");
        let svg = figure.render_svg(&layer_with_hole());

        assert!(svg.starts_with("<svg"));
        assert_eq!(1, svg.matches("fill-rule=\"evenodd\"").count());
        assert_eq!(1, svg.matches("<circle").count());
        assert!(svg.contains(">Longitude</text>"));
        assert!(svg.contains(">Latitude</text>"));
        assert!(svg.contains("rings.geojson"));
        // Polygons are drawn before lines, lines before points.
        let polygon_idx = svg.find("evenodd").unwrap();
        let line_idx = svg.find("nonzero").unwrap();
        let point_idx = svg.find("<circle").unwrap();
        assert!(polygon_idx < line_idx && line_idx < point_idx);
    }

    #[rstest]
    fn test_render_svg_without_text() {
        let svg = Figure::new(2.0, 2.0, 100.0).render_svg(&GeoLayer::default());
        // Only tick labels remain.
        assert!(!svg.contains("Longitude"));
        assert!(svg.contains("<rect"));
    }

    #[rstest]
    fn test_render_png_has_figure_size() {
        let figure = Figure::new(2.0, 1.5, 100.0).with_title("small");
        let png_bytes = figure.render_png(&layer_with_hole()).unwrap();

        let decoder = png::Decoder::new(png_bytes.as_slice());
        let mut reader = decoder.read_info().unwrap();
        assert_eq!((200, 150), (reader.info().width, reader.info().height));
        let mut buffer = vec![0; reader.output_buffer_size()];
        let frame_info = reader.next_frame(&mut buffer).unwrap();
        let pixels = &buffer[..frame_info.buffer_size()];
        // Top left corner is background.
        assert_eq!(&[255, 255, 255, 255], &pixels[..4]);
        // Some pixels are drawn in black.
        assert!(pixels
            .chunks(4)
            .any(|pixel| pixel[0] < 64 && pixel[1] < 64 && pixel[2] < 64));
    }
}
