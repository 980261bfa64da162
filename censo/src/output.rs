use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use errors::*;

/// Removes any previous output at `path` and creates it again, empty.
pub fn prepare_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        info!("Removing previous output directory {}", path.display());
        fs::remove_dir_all(path)
            .chain_err(|| format!("Failed to remove output directory {}", path.display()))?;
    }
    fs::create_dir_all(path)
        .chain_err(|| format!("Failed to create output directory {}", path.display()))?;
    Ok(())
}

/// Writes one file per partition into `dir`, named after the partition number, with one row per
/// line. Returns the paths written.
pub fn write_partitions<R: Display>(dir: &Path, output: &BTreeMap<u64, Vec<R>>) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (partition, rows) in output {
        let file_path = dir.join(partition.to_string());
        let file = File::create(&file_path)
            .chain_err(|| format!("Failed to create output file {}", file_path.display()))?;

        let mut writer = BufWriter::new(file);
        for row in rows {
            writeln!(writer, "{}", row)
                .chain_err(|| format!("Failed to write output file {}", file_path.display()))?;
        }
        writer
            .flush()
            .chain_err(|| format!("Failed to write output file {}", file_path.display()))?;

        debug!("Wrote {} rows to {}", rows.len(), file_path.display());
        written.push(file_path);
    }
    Ok(written)
}
