pub mod axes;
pub mod figure;
mod raster;
mod svg;
pub mod ticks;
