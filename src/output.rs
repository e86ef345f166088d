use anyhow::{anyhow, Context};
use std::{
    fs,
    path::{Path, PathBuf},
};

const OUTPUT_SUFFIX: &str = "_map.png";

/// Path of the image rendered for `input_filepath`: `<output_dir>/<input file name>_map.png`.
pub fn derive_output_path(input_filepath: &str, output_dir: &str) -> anyhow::Result<PathBuf> {
    let basename = Path::new(input_filepath)
        .file_name()
        .ok_or_else(|| anyhow!("Input path {:?} has no file name", input_filepath))?;
    let mut output_filename = basename.to_os_string();
    output_filename.push(OUTPUT_SUFFIX);
    Ok(Path::new(output_dir).join(output_filename))
}

/// Write `contents` to `output_filepath`, replacing any existing file.
pub fn write_output_file(output_filepath: &Path, contents: &[u8]) -> anyhow::Result<()> {
    log::info!(
        "Writing {} bytes to {:?}",
        contents.len(),
        output_filepath
    );
    fs::write(output_filepath, contents)
        .with_context(|| format!("Could not write {:?}", output_filepath))
}
