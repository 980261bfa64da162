use cerberus;
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use config::DEFAULT_POPULATION_FILE;

fn min_shops_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("min_shops")
        .long("min-shops")
        .short("n")
        .help("Only streets with more shops than this are reported")
        .takes_value(true)
        .allow_hyphen_values(true)
        .env("CENSO_MIN_SHOPS")
        .required(true)
}

fn population_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("population")
        .long("population")
        .short("p")
        .help("Population table mapping street codes to inhabitants")
        .takes_value(true)
        .env("CENSO_POPULATION")
        .default_value(DEFAULT_POPULATION_FILE)
}

fn partitions_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("partitions")
        .long("partitions")
        .help("Number of reduce partitions, one output file each")
        .takes_value(true)
        .env("CENSO_PARTITIONS")
        .default_value("1")
}

pub fn build_app<'a, 'b>() -> App<'a, 'b> {
    cerberus::payload_app("censo")
        .author("Cerberus Authors <cerberus@cpssd.net>")
        .about("Inhabitants per shop for every street of a census")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(cerberus::map_subcommand().arg(partitions_arg()))
        .subcommand(
            cerberus::reduce_subcommand()
                .arg(min_shops_arg())
                .arg(population_arg()),
        )
        .subcommand(cerberus::sanity_check_subcommand())
        .subcommand(
            SubCommand::with_name("run")
                .about("Run the whole job on this machine")
                .arg(
                    Arg::with_name("input")
                        .long("input")
                        .short("i")
                        .help("Directory holding censoComercios.csv and censoCallejero.csv")
                        .takes_value(true)
                        .required(true),
                )
                .arg(
                    Arg::with_name("output")
                        .long("output")
                        .short("o")
                        .help("Output directory, replaced if it already exists")
                        .takes_value(true)
                        .required(true),
                )
                .arg(min_shops_arg())
                .arg(population_arg())
                .arg(partitions_arg())
                .arg(
                    Arg::with_name("workers")
                        .long("workers")
                        .short("w")
                        .help("Threads used for map and reduce tasks")
                        .takes_value(true)
                        .env("CENSO_WORKERS")
                        .default_value("4"),
                )
                .arg(
                    Arg::with_name("unit_lines")
                        .long("unit-lines")
                        .help("Input lines handed to each map task")
                        .takes_value(true)
                        .env("CENSO_UNIT_LINES")
                        .default_value("10000"),
                ),
        )
}

pub fn parse_command_line<'a>() -> ArgMatches<'a> {
    build_app().get_matches()
}
