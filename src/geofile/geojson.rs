use anyhow::Context;
use std::{fs, path::Path};

use super::layer::GeoLayer;

/// Read all geometries of a GeoJSON file.
///
/// The file may hold a bare geometry, a single feature or a feature collection. Features without a
/// geometry are skipped. GeoJSON coordinates are WGS84 longitude/latitude, so the returned layer is
/// always geographic.
pub fn read_geometries_from_geojson(filepath: &Path) -> anyhow::Result<GeoLayer> {
    let geojson_contents = fs::read_to_string(filepath)
        .with_context(|| format!("Could not read GeoJSON file {:?}", filepath))?;
    let geojson: geojson::GeoJson = geojson_contents
        .parse()
        .with_context(|| format!("Could not parse GeoJSON file {:?}", filepath))?;
    let geometries = geometries_from_geojson(geojson)?;
    Ok(GeoLayer::new(geometries, true))
}

fn geometries_from_geojson(geojson: geojson::GeoJson) -> anyhow::Result<Vec<geo::Geometry>> {
    let geojson_geometries = match geojson {
        geojson::GeoJson::Geometry(geometry) => vec![geometry],
        geojson::GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        geojson::GeoJson::FeatureCollection(feature_collection) => {
            let num_features = feature_collection.features.len();
            let geometries: Vec<geojson::Geometry> = feature_collection
                .features
                .into_iter()
                .filter_map(|feature| feature.geometry)
                .collect();
            if geometries.len() != num_features {
                log::warn!(
                    "Out of {} features read, only {} had a geometry.",
                    num_features,
                    geometries.len()
                )
            }
            geometries
        }
    };
    geojson_geometries
        .into_iter()
        .map(|geometry| geo::Geometry::try_from(geometry).map_err(anyhow::Error::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use testdir::testdir;

    use super::read_geometries_from_geojson;

    const FEATURE_COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"name": "square"},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                }
            },
            {
                "type": "Feature",
                "properties": {"name": "road"},
                "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [2.0, 3.0]]}
            },
            {
                "type": "Feature",
                "properties": {"name": "nowhere"},
                "geometry": null
            }
        ]
    }"#;

    #[rstest]
    fn test_read_feature_collection_skips_null_geometries() {
        let geojson_filepath = testdir!().join("input.geojson");
        fs::write(&geojson_filepath, FEATURE_COLLECTION).unwrap();

        let layer = read_geometries_from_geojson(&geojson_filepath).unwrap();
        assert!(layer.is_geographic);
        assert_eq!(2, layer.geometries.len());
        assert!(matches!(layer.geometries[0], geo::Geometry::Polygon(_)));
        let expected_line: geo::LineString = vec![(0.0, 0.0), (2.0, 3.0)].into();
        assert_eq!(geo::Geometry::LineString(expected_line), layer.geometries[1]);
    }

    #[rstest]
    #[case(r#"{"type": "Point", "coordinates": [13.4, 52.5]}"#, 1)]
    #[case(
        r#"{"type": "Feature", "properties": {}, "geometry": {"type": "MultiPoint", "coordinates": [[1.0, 2.0], [3.0, 4.0]]}}"#,
        1
    )]
    #[case(r#"{"type": "Feature", "properties": {}, "geometry": null}"#, 0)]
    #[case(r#"{"type": "FeatureCollection", "features": []}"#, 0)]
    fn test_read_geojson_root_objects(#[case] contents: &str, #[case] expected_count: usize) {
        let geojson_filepath = testdir!().join("input.geojson");
        fs::write(&geojson_filepath, contents).unwrap();

        let layer = read_geometries_from_geojson(&geojson_filepath).unwrap();
        assert_eq!(expected_count, layer.geometries.len());
    }

    #[rstest]
    fn test_read_missing_file_fails() {
        let geojson_filepath = testdir!().join("does_not_exist.geojson");
        assert!(read_geometries_from_geojson(&geojson_filepath).is_err());
    }

    #[rstest]
    #[case("this is not json")]
    #[case(r#"{"type": "Banana"}"#)]
    fn test_read_malformed_file_fails(#[case] contents: &str) {
        let geojson_filepath = testdir!().join("malformed.geojson");
        fs::write(&geojson_filepath, contents).unwrap();
        assert!(read_geometries_from_geojson(&geojson_filepath).is_err());
    }
}
