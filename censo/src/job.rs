use std::fs;
use std::path::Path;
use std::sync::Arc;

use cerberus::{output_count, split_input, HashPartitioner, LocalJob, MapInputKV};

use config::JobConfig;
use errors::*;
use join::JoinReducer;
use mapper::CensusMapper;
use output::{prepare_output_dir, write_partitions};
use population::PopulationIndex;

fn read_units(path: &Path, unit_lines: usize) -> Result<Vec<MapInputKV>> {
    let contents = fs::read_to_string(path)
        .chain_err(|| format!("Failed to read input {}", path.display()))?;
    let units = split_input(&path.to_string_lossy(), &contents, unit_lines);
    debug!("Split {} into {} map units", path.display(), units.len());
    Ok(units)
}

/// Runs the whole job on this machine and returns the number of rows written.
///
/// The population table is loaded before anything else so that a missing table stops the run
/// before the output directory is touched.
pub fn run_local(config: &JobConfig) -> Result<usize> {
    let population = PopulationIndex::load(&config.join.population_path)?;
    let reducer = JoinReducer::new(Arc::new(population), config.join.min_shops);

    let mut units = read_units(&config.shop_registry_path(), config.unit_lines)?;
    units.extend(read_units(&config.street_directory_path(), config.unit_lines)?);

    let job = LocalJob::new(
        CensusMapper::default(),
        Arc::new(reducer),
        HashPartitioner::new(config.partitions),
        config.workers,
    );
    info!(
        "Running job {} over {} (minimum shops {})",
        job.job_id(),
        config.input_dir.display(),
        config.join.min_shops
    );
    let output = job.run(units).chain_err(|| "Error running census job.")?;

    prepare_output_dir(&config.output_dir)?;
    write_partitions(&config.output_dir, &output)?;

    let rows = output_count(&output);
    info!("Wrote {} rows to {}", rows, config.output_dir.display());
    Ok(rows)
}
