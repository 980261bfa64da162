use std::path::PathBuf;

use clap::ArgMatches;

use errors::*;
use mapper::{SHOP_REGISTRY_FILE, STREET_DIRECTORY_FILE};

pub const DEFAULT_POPULATION_FILE: &str = "censoPoblacion.csv";

fn required_value<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .value_of(name)
        .ok_or_else(|| ErrorKind::MissingParameter(name.to_owned()).into())
}

fn positive_value(matches: &ArgMatches, name: &str) -> Result<u64> {
    required_value(matches, name)?;
    let value = value_t!(matches, name, u64)?;
    if value == 0 {
        bail!("'{}' must be greater than zero", name);
    }
    Ok(value)
}

/// Number of reduce partitions map output is spread over.
pub fn partitions_from_matches(matches: &ArgMatches) -> Result<u64> {
    positive_value(matches, "partitions")
}

/// Settings of the join: the shop threshold and where the population table lives.
#[derive(Clone, Debug, PartialEq)]
pub struct JoinConfig {
    pub min_shops: i64,
    pub population_path: PathBuf,
}

impl JoinConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        required_value(matches, "min_shops")?;
        let min_shops = value_t!(matches, "min_shops", i64)?;
        let population_path = PathBuf::from(required_value(matches, "population")?);

        Ok(JoinConfig {
            min_shops,
            population_path,
        })
    }
}

/// Settings of a complete local run.
#[derive(Clone, Debug, PartialEq)]
pub struct JobConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub join: JoinConfig,
    pub partitions: u64,
    pub workers: usize,
    pub unit_lines: usize,
}

impl JobConfig {
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Ok(JobConfig {
            input_dir: PathBuf::from(required_value(matches, "input")?),
            output_dir: PathBuf::from(required_value(matches, "output")?),
            join: JoinConfig::from_matches(matches)?,
            partitions: partitions_from_matches(matches)?,
            workers: positive_value(matches, "workers")? as usize,
            unit_lines: positive_value(matches, "unit_lines")? as usize,
        })
    }

    pub fn shop_registry_path(&self) -> PathBuf {
        self.input_dir.join(SHOP_REGISTRY_FILE)
    }

    pub fn street_directory_path(&self) -> PathBuf {
        self.input_dir.join(STREET_DIRECTORY_FILE)
    }
}
