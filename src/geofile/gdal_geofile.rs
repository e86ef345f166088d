use anyhow::anyhow;
use gdal::vector::LayerAccess;
use std::path::Path;

use super::layer::GeoLayer;

/// Read the geometries of all layers of any vector file GDAL can open.
///
/// The result is geographic if the first layer's spatial reference is geographic, or if the file
/// does not declare one.
pub fn read_geometries_from_geofile(filepath: &Path) -> anyhow::Result<GeoLayer> {
    gdal::DriverManager::register_all();
    let mut open_options = gdal::DatasetOptions::default();
    open_options.open_flags = gdal::GdalOpenFlags::GDAL_OF_VECTOR;
    let dataset = gdal::Dataset::open_ex(filepath, open_options)?;

    let layer_count = dataset.layer_count();
    if 0 == layer_count {
        return Err(anyhow!("Found no layers in {:?}", filepath));
    }

    let mut geometries = Vec::new();
    let mut is_geographic = true;
    for layer_idx in 0..layer_count {
        let mut layer = dataset.layer(layer_idx)?;
        if 0 == layer_idx {
            is_geographic = layer
                .spatial_ref()
                .map_or(true, |spatial_ref| spatial_ref.is_geographic());
        }
        let num_features = layer.feature_count();
        let num_geometries_before = geometries.len();
        for gdal_feature in layer.features() {
            if let Some(geometry) = gdal_feature.geometry() {
                geometries.push(geometry.to_geo()?);
            }
        }
        let num_read = geometries.len() - num_geometries_before;
        if num_read as u64 != num_features {
            log::warn!(
                "Out of {} features in layer {}, only {} had a geometry.",
                num_features,
                layer.name(),
                num_read
            )
        }
    }
    Ok(GeoLayer::new(geometries, is_geographic))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use testdir::testdir;

    use super::read_geometries_from_geofile;

    #[rstest]
    fn test_read_geojson_through_gdal() {
        let geofile_filepath = testdir!().join("input.geojson");
        fs::write(
            &geofile_filepath,
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [80.0, 45.0]}}
            ]}"#,
        )
        .unwrap();

        let layer = read_geometries_from_geofile(&geofile_filepath).unwrap();
        assert!(layer.is_geographic);
        assert_eq!(
            vec![geo::Geometry::Point(geo::Point::new(80.0, 45.0))],
            layer.geometries
        );
    }
}
