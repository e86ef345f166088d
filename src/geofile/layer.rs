use geo::BoundingRect;

/// Geometries read from a geofile, ready to be plotted.
#[derive(Debug, Default)]
pub struct GeoLayer {
    pub geometries: Vec<geo::Geometry>,
    /// Whether coordinates are longitude/latitude degrees, as opposed to a projected CRS.
    pub is_geographic: bool,
}

impl GeoLayer {
    pub fn new(geometries: Vec<geo::Geometry>, is_geographic: bool) -> Self {
        Self {
            geometries,
            is_geographic,
        }
    }

    /// Bounding rectangle over all geometries, or None if the layer holds no coordinates.
    pub fn bounding_rect(&self) -> Option<geo::Rect> {
        self.geometries
            .iter()
            .filter_map(|geometry| geometry.bounding_rect())
            .reduce(|acc, rect| {
                geo::Rect::new(
                    geo::Coord {
                        x: acc.min().x.min(rect.min().x),
                        y: acc.min().y.min(rect.min().y),
                    },
                    geo::Coord {
                        x: acc.max().x.max(rect.max().x),
                        y: acc.max().y.max(rect.max().y),
                    },
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::GeoLayer;

    #[rstest]
    fn test_bounding_rect_spans_all_geometries() {
        let layer = GeoLayer::new(
            vec![
                geo::Geometry::Point(geo::Point::new(10.0, -5.0)),
                geo::Geometry::LineString(vec![(-3.0, 1.0), (4.0, 20.0)].into()),
            ],
            true,
        );
        let rect = layer.bounding_rect().unwrap();
        assert_eq!(geo::Coord { x: -3.0, y: -5.0 }, rect.min());
        assert_eq!(geo::Coord { x: 10.0, y: 20.0 }, rect.max());
    }

    #[rstest]
    fn test_bounding_rect_of_empty_layer() {
        let layer = GeoLayer::new(
            vec![geo::Geometry::GeometryCollection(geo::GeometryCollection(
                vec![],
            ))],
            true,
        );
        assert!(layer.bounding_rect().is_none());
        assert!(GeoLayer::default().bounding_rect().is_none());
    }
}
