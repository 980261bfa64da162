use std::path::Path;

use cerberus::{EmitIntermediate, Map, MapInputKV, Result, ResultExt};

use errors;
use shops::ShopCountMapper;
use streets::StreetCodeMapper;
use value::StreetValue;

pub const SHOP_REGISTRY_FILE: &str = "censoComercios.csv";
pub const STREET_DIRECTORY_FILE: &str = "censoCallejero.csv";

const SHOP_REGISTRY_PREFIX: &str = "censoComercios";
const STREET_DIRECTORY_PREFIX: &str = "censoCallejero";

/// The dataset a map input was cut from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputSource {
    ShopRegistry,
    StreetDirectory,
}

impl InputSource {
    /// Identifies the dataset from the file name in an input key such as
    /// `/data/in/censoComercios.csv`.
    pub fn from_input_key(key: &str) -> errors::Result<Self> {
        let file_name = Path::new(key)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("");

        if file_name.starts_with(SHOP_REGISTRY_PREFIX) {
            Ok(InputSource::ShopRegistry)
        } else if file_name.starts_with(STREET_DIRECTORY_PREFIX) {
            Ok(InputSource::StreetDirectory)
        } else {
            Err(errors::ErrorKind::UnknownInput(key.to_owned()).into())
        }
    }
}

/// Sends each processing unit to the mapper of the dataset it belongs to, so that shops and
/// street codes share a single keyed stream.
pub struct CensusMapper {
    shops: ShopCountMapper,
    streets: StreetCodeMapper,
}

impl Default for CensusMapper {
    fn default() -> Self {
        CensusMapper {
            shops: ShopCountMapper,
            streets: StreetCodeMapper,
        }
    }
}

impl Map for CensusMapper {
    type Key = String;
    type Value = StreetValue;

    fn map<E>(&self, input: MapInputKV, emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        let source = InputSource::from_input_key(&input.key)
            .chain_err(|| "Error routing map input.")?;
        match source {
            InputSource::ShopRegistry => self.shops.map(input, emitter),
            InputSource::StreetDirectory => self.streets.map(input, emitter),
        }
    }
}
