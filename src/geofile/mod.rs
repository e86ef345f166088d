#[cfg(feature = "gdal")]
pub mod gdal_geofile;
pub mod geojson;
pub mod layer;

use std::path::Path;

use self::layer::GeoLayer;

/// Whether a file is read with the GeoJSON reader rather than GDAL.
#[cfg_attr(not(feature = "gdal"), allow(dead_code))]
fn is_geojson_filepath(filepath: &Path) -> bool {
    match filepath.extension().and_then(|extension| extension.to_str()) {
        Some(extension) => {
            extension.eq_ignore_ascii_case("geojson") || extension.eq_ignore_ascii_case("json")
        }
        None => false,
    }
}

/// Load all geometries of a vector geofile.
///
/// GeoJSON files are read natively. Other formats require the `gdal` feature; without it every
/// file is read as GeoJSON.
pub fn load_geometries(filepath: &Path) -> anyhow::Result<GeoLayer> {
    log::info!("Reading geometries from {:?}", filepath);
    let layer = read_geometries(filepath)?;
    log::info!("Read {} geometries", layer.geometries.len());
    Ok(layer)
}

#[cfg(feature = "gdal")]
fn read_geometries(filepath: &Path) -> anyhow::Result<GeoLayer> {
    if is_geojson_filepath(filepath) {
        self::geojson::read_geometries_from_geojson(filepath)
    } else {
        gdal_geofile::read_geometries_from_geofile(filepath)
    }
}

#[cfg(not(feature = "gdal"))]
fn read_geometries(filepath: &Path) -> anyhow::Result<GeoLayer> {
    self::geojson::read_geometries_from_geojson(filepath)
}
