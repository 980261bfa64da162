extern crate cerberus;
extern crate censo;
extern crate clap;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;

use std::sync::Arc;

use cerberus::HashPartitioner;
use censo::errors::*;
use censo::{config, job, parser};
use censo::{CensusMapper, JobConfig, JoinConfig, JoinReducer, PopulationIndex, StreetValue};

// Payload subcommands talk JSON over stdout and are judged by their stderr, so they only log
// warnings unless RUST_LOG says otherwise.
const PAYLOAD_LOG_CONFIG: &str = "warn";
const LOCAL_RUN_LOG_CONFIG: &str = "info";

fn main() {
    let matches = parser::parse_command_line();

    let log_config = match matches.subcommand_name() {
        Some("run") => LOCAL_RUN_LOG_CONFIG,
        _ => PAYLOAD_LOG_CONFIG,
    };
    if let Err(ref err) = cerberus::init_logger(log_config) {
        eprintln!("{}", err);
        ::std::process::exit(1);
    }

    if let Err(ref err) = run(&matches) {
        cerberus::output_error(err);
        ::std::process::exit(1);
    }
}

fn run(matches: &clap::ArgMatches) -> Result<()> {
    match matches.subcommand() {
        ("map", Some(sub)) => {
            let partitioner = HashPartitioner::new(config::partitions_from_matches(sub)?);
            cerberus::run_map(&CensusMapper::default(), &partitioner)?;
        }
        ("reduce", Some(sub)) => {
            let config = JoinConfig::from_matches(sub)?;
            let population = PopulationIndex::load(&config.population_path)?;
            let reducer = JoinReducer::new(Arc::new(population), config.min_shops);
            cerberus::run_reduce::<String, StreetValue, _>(&reducer)?;
        }
        ("sanity-check", _) => cerberus::run_sanity_check(),
        ("run", Some(sub)) => {
            let config = JobConfig::from_matches(sub)?;
            let rows = job::run_local(&config)?;
            info!("Census job finished with {} streets reported", rows);
        }
        _ => bail!("unknown command\n{}", matches.usage()),
    }
    Ok(())
}
