#![recursion_limit = "1024"]

extern crate chrono;
extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate error_chain;
extern crate futures;
extern crate futures_cpupool;
#[macro_use]
extern crate log;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate uuid;

pub mod errors {
    error_chain! {
        foreign_links {
            Io(::std::io::Error);
            Json(::serde_json::Error);
        }
    }
}

pub mod emitter;
pub mod intermediate;
pub mod io;
pub mod local;
pub mod logging;
pub mod mapper;
pub mod partition;
pub mod reducer;
pub mod runner;
pub mod serialise;
pub mod shuffle;

pub use errors::*;
pub use emitter::{EmitFinal, EmitIntermediate, FinalVecEmitter, IntermediateVecEmitter};
pub use intermediate::IntermediateInputKV;
pub use local::{output_count, split_input, LocalJob};
pub use logging::{init_logger, output_error};
pub use mapper::{Map, MapInputKV};
pub use partition::{HashPartitioner, Partition, PartitionInputKV};
pub use reducer::Reduce;
pub use runner::{map_subcommand, payload_app, reduce_subcommand, run_map, run_reduce,
                 run_sanity_check, sanity_check_subcommand};

const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");
