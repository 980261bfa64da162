use serde::Serialize;
use serde::de::DeserializeOwned;

use emitter::EmitIntermediate;
use errors::*;

/// The `MapInputKV` is a struct for passing input data to a `Map`.
///
/// One `MapInputKV` is one processing unit: `key` names the input it was cut from (usually a
/// file path) and `value` holds the raw text of the unit.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct MapInputKV {
    pub key: String,
    pub value: String,
}

impl MapInputKV {
    pub fn new<K: Into<String>, V: Into<String>>(key: K, value: V) -> Self {
        MapInputKV {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The `Map` trait defines a function for performing a map operation.
///
/// The output types are decided by the implementation of this trait. State kept while mapping
/// must live inside a single call: every call handles one independent processing unit.
///
/// # Arguments
///
/// * `input` - A `MapInputKV` containing the input data for the map operation.
/// * `emitter` - A struct implementing the `EmitIntermediate` trait, provided by the map runner.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the map operation are sent out through
/// the `emitter`.
pub trait Map {
    type Key: Serialize + DeserializeOwned;
    type Value: Serialize + DeserializeOwned;
    fn map<E>(&self, input: MapInputKV, emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>;
}
