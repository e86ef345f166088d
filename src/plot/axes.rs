use crate::geofile::layer::GeoLayer;

use super::ticks::{bins_for_axis_length, decimals_for_step, format_tick, nice_ticks};

/// Fraction of the data span added as padding on each side of the data limits.
const DATA_MARGIN: f64 = 0.05;
/// Relative widening of an axis whose data has no extent, e.g. a single point.
const SINGULAR_EXPANSION: f64 = 0.05;

/// View interval of one axis in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limits {
    pub min: f64,
    pub max: f64,
}

impl Limits {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Limits that fit data from `min` to `max` with margins. Zero-width data is widened first.
    pub fn fit_data(min: f64, max: f64) -> Self {
        let (min, max) = if max - min <= f64::EPSILON * min.abs().max(max.abs()) {
            if 0.0 == min {
                (-SINGULAR_EXPANSION, SINGULAR_EXPANSION)
            } else {
                (
                    min - SINGULAR_EXPANSION * min.abs(),
                    max + SINGULAR_EXPANSION * max.abs(),
                )
            }
        } else {
            (min, max)
        };
        let margin = (max - min) * DATA_MARGIN;
        Self::new(min - margin, max + margin)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

/// A tick on an axis: its position in figure points along that axis and its label.
#[derive(Debug, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// Axes of a figure: data limits, the aspect ratio of data units, and the box the data is drawn into.
///
/// Figure coordinates are points with the origin at the top left of the figure, y pointing down.
#[derive(Debug)]
pub struct Axes {
    pub x_limits: Limits,
    pub y_limits: Limits,
    /// Display length of one y data unit relative to one x data unit.
    pub aspect: f64,
    /// Box in figure points the axes occupy.
    pub frame: geo::Rect,
}

impl Axes {
    /// Lay out axes for the layer inside `subplot_box`.
    ///
    /// The frame shrinks inside `subplot_box` so that the data keeps its aspect ratio, and is centered.
    pub fn fit(layer: &GeoLayer, subplot_box: geo::Rect) -> Self {
        let (x_limits, y_limits, aspect) = match layer.bounding_rect() {
            Some(bounds) => (
                Limits::fit_data(bounds.min().x, bounds.max().x),
                Limits::fit_data(bounds.min().y, bounds.max().y),
                if layer.is_geographic {
                    geographic_aspect((bounds.min().y + bounds.max().y) / 2.0)
                } else {
                    1.0
                },
            ),
            None => (Limits::default(), Limits::default(), 1.0),
        };
        let box_ratio = aspect * y_limits.span() / x_limits.span();
        let (width, height) = if box_ratio > subplot_box.height() / subplot_box.width() {
            (subplot_box.height() / box_ratio, subplot_box.height())
        } else {
            (subplot_box.width(), subplot_box.width() * box_ratio)
        };
        let center = subplot_box.center();
        let frame = geo::Rect::new(
            geo::Coord {
                x: center.x - width / 2.0,
                y: center.y - height / 2.0,
            },
            geo::Coord {
                x: center.x + width / 2.0,
                y: center.y + height / 2.0,
            },
        );

        let axes = Self {
            x_limits,
            y_limits,
            aspect,
            frame,
        };
        log::debug!(
            "Axes limits x {:?}, y {:?}, aspect {}",
            axes.x_limits,
            axes.y_limits,
            axes.aspect
        );
        axes
    }

    /// Convert a data coordinate into figure points.
    pub fn to_figure(&self, coord: geo::Coord) -> geo::Coord {
        geo::Coord {
            x: self.frame.min().x
                + (coord.x - self.x_limits.min) / self.x_limits.span() * self.frame.width(),
            y: self.frame.max().y
                - (coord.y - self.y_limits.min) / self.y_limits.span() * self.frame.height(),
        }
    }

    /// Ticks along the bottom edge, `space_per_label` being the room one tick label needs.
    pub fn x_ticks(&self, space_per_label: f64) -> Vec<Tick> {
        let bins = bins_for_axis_length(self.frame.width(), space_per_label);
        let ticks = nice_ticks(self.x_limits.min, self.x_limits.max, bins);
        let decimals = decimals_for_step(ticks.step);
        log::debug!("x ticks {:?}", ticks.values);
        ticks
            .values
            .iter()
            .map(|value| Tick {
                position: self.to_figure(geo::Coord { x: *value, y: self.y_limits.min }).x,
                label: format_tick(*value, decimals),
            })
            .collect()
    }

    /// Ticks along the left edge, `space_per_label` being the room one tick label needs.
    pub fn y_ticks(&self, space_per_label: f64) -> Vec<Tick> {
        let bins = bins_for_axis_length(self.frame.height(), space_per_label);
        let ticks = nice_ticks(self.y_limits.min, self.y_limits.max, bins);
        let decimals = decimals_for_step(ticks.step);
        log::debug!("y ticks {:?}", ticks.values);
        ticks
            .values
            .iter()
            .map(|value| Tick {
                position: self.to_figure(geo::Coord { x: self.x_limits.min, y: *value }).y,
                label: format_tick(*value, decimals),
            })
            .collect()
    }
}

/// Aspect ratio that makes longitude/latitude degrees look right around the latitude `mid_lat`.
fn geographic_aspect(mid_lat: f64) -> f64 {
    let cos_lat = mid_lat.to_radians().cos();
    if mid_lat.abs() < 90.0 && cos_lat > 0.0 {
        1.0 / cos_lat
    } else {
        1.0
    }
}
