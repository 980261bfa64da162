//! A MapReduce job relating the inhabitants of every street to the shops open on it.
//!
//! Shops are counted per street inside each map unit, street names are resolved to street codes
//! through the street directory, and the reducer joins both against the population table to
//! compute how many inhabitants there are per shop.

#![recursion_limit = "1024"]

extern crate cerberus;
#[macro_use]
extern crate clap;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;

pub mod errors {
    error_chain! {
        links {
            Cerberus(::cerberus::Error, ::cerberus::ErrorKind);
        }

        foreign_links {
            Clap(::clap::Error);
            Io(::std::io::Error);
        }

        errors {
            MalformedRow(source: String, line: String, expected: usize) {
                description("malformed input row")
                display("malformed {} row, expected at least {} fields: '{}'", source, expected, line)
            }
            MissingPopulationFile(path: String) {
                description("population file could not be read")
                display("population file '{}' could not be read", path)
            }
            InvalidInhabitants(street: String, value: String) {
                description("inhabitant count is not a number")
                display("inhabitant count '{}' for street '{}' is not a number", value, street)
            }
            UnknownInput(key: String) {
                description("input does not belong to any known dataset")
                display("input '{}' does not belong to any known dataset", key)
            }
            MissingParameter(name: String) {
                description("required parameter missing")
                display("required parameter '{}' was not provided", name)
            }
        }
    }
}

pub mod config;
pub mod job;
pub mod join;
pub mod mapper;
pub mod output;
pub mod parser;
pub mod population;
pub mod records;
pub mod shops;
pub mod streets;
pub mod value;

pub use config::{JobConfig, JoinConfig};
pub use join::{JoinReducer, JoinedRow};
pub use mapper::{CensusMapper, InputSource};
pub use population::PopulationIndex;
pub use shops::ShopCountMapper;
pub use streets::StreetCodeMapper;
pub use value::StreetValue;
