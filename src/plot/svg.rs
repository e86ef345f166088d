//! Minimal SVG document writer for figures. All lengths are in points.

const FONT_FAMILY: &str = "DejaVu Sans, Bitstream Vera Sans, Arial, Helvetica, sans-serif";

/// Fill and stroke of a shape.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub fill: Option<&'static str>,
    pub stroke: &'static str,
    pub stroke_width: f64,
}

#[derive(Debug, Clone, Copy)]
pub enum TextAnchor {
    Middle,
    End,
}

impl TextAnchor {
    fn name(&self) -> &'static str {
        match self {
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

pub struct SvgDocument {
    contents: String,
}

impl SvgDocument {
    /// Start a document of the given size with a white background.
    pub fn new(width: f64, height: f64) -> Self {
        let mut contents = format!(
            r##"<svg width="{w}" height="{h}" viewBox="0 0 {w} {h}" xmlns="http://www.w3.org/2000/svg">"##,
            w = width,
            h = height
        );
        contents.push_str(&format!(
            r##"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"##,
            width, height
        ));
        Self { contents }
    }

    /// Open a group whose contents are clipped to `rect`. Close it with `end_group`.
    pub fn begin_clip_group(&mut self, id: &str, rect: &geo::Rect) {
        self.contents.push_str(&format!(
            r##"<clipPath id="{}"><rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}"/></clipPath>"##,
            id,
            rect.min().x,
            rect.min().y,
            rect.width(),
            rect.height()
        ));
        self.contents
            .push_str(&format!(r##"<g clip-path="url(#{})">"##, id));
    }

    pub fn end_group(&mut self) {
        self.contents.push_str("</g>");
    }

    /// Add a polygon given as rings of figure coordinates. Inner rings cut holes.
    pub fn polygon(&mut self, rings: &[Vec<geo::Coord>], style: &Style) {
        let mut path_data = String::new();
        for ring in rings.iter().filter(|ring| !ring.is_empty()) {
            append_path_data(&mut path_data, ring);
            path_data.push('Z');
        }
        if path_data.is_empty() {
            return;
        }
        self.path(&path_data, "evenodd", style);
    }

    /// Add an open polyline of figure coordinates.
    pub fn polyline(&mut self, coords: &[geo::Coord], style: &Style) {
        if coords.len() < 2 {
            return;
        }
        let mut path_data = String::new();
        append_path_data(&mut path_data, coords);
        self.path(&path_data, "nonzero", style);
    }

    fn path(&mut self, path_data: &str, fill_rule: &str, style: &Style) {
        self.contents.push_str(&format!(
            r##"<path d="{}" fill="{}" fill-rule="{}" {} stroke-linejoin="round" stroke-linecap="round"/>"##,
            path_data,
            style.fill.unwrap_or("none"),
            fill_rule,
            stroke_attributes(style)
        ));
    }

    pub fn circle(&mut self, center: geo::Coord, radius: f64, style: &Style) {
        self.contents.push_str(&format!(
            r##"<circle cx="{:.3}" cy="{:.3}" r="{:.3}" fill="{}" {}/>"##,
            center.x,
            center.y,
            radius,
            style.fill.unwrap_or("none"),
            stroke_attributes(style)
        ));
    }

    pub fn line(&mut self, from: geo::Coord, to: geo::Coord, style: &Style) {
        self.contents.push_str(&format!(
            r##"<line x1="{:.3}" y1="{:.3}" x2="{:.3}" y2="{:.3}" {}/>"##,
            from.x,
            from.y,
            to.x,
            to.y,
            stroke_attributes(style)
        ));
    }

    pub fn rect(&mut self, rect: &geo::Rect, style: &Style) {
        self.contents.push_str(&format!(
            r##"<rect x="{:.3}" y="{:.3}" width="{:.3}" height="{:.3}" fill="{}" {} stroke-linejoin="miter"/>"##,
            rect.min().x,
            rect.min().y,
            rect.width(),
            rect.height(),
            style.fill.unwrap_or("none"),
            stroke_attributes(style)
        ));
    }

    /// Add a line of text whose baseline starts at `position`, rotated counterclockwise by `rotation` degrees.
    pub fn text(
        &mut self,
        text: &str,
        position: geo::Coord,
        font_size: f64,
        anchor: TextAnchor,
        rotation: f64,
    ) {
        let transform = if 0.0 == rotation {
            String::new()
        } else {
            format!(
                r##" transform="rotate({:.3} {:.3} {:.3})""##,
                -rotation, position.x, position.y
            )
        };
        self.contents.push_str(&format!(
            r##"<text x="{:.3}" y="{:.3}" font-family="{}" font-size="{}" text-anchor="{}" fill="black" xml:space="preserve"{}>{}</text>"##,
            position.x,
            position.y,
            FONT_FAMILY,
            font_size,
            anchor.name(),
            transform,
            htmlescape::encode_minimal(text)
        ));
    }

    pub fn finish(mut self) -> String {
        self.contents.push_str("</svg>");
        self.contents
    }
}

fn stroke_attributes(style: &Style) -> String {
    format!(
        r##"stroke="{}" stroke-width="{}""##,
        style.stroke, style.stroke_width
    )
}

fn append_path_data(path_data: &mut String, coords: &[geo::Coord]) {
    for (idx, coord) in coords.iter().enumerate() {
        path_data.push_str(&format!(
            "{}{:.3} {:.3}",
            if 0 == idx { "M" } else { "L" },
            coord.x,
            coord.y
        ));
    }
}
