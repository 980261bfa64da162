use serde::Serialize;
use serde::de::DeserializeOwned;

use emitter::EmitFinal;
use errors::*;
use intermediate::IntermediateInputKV;

/// The `Reduce` trait defines a function for performing a reduce operation.
///
/// The output types are decided by the implementation of this trait.
///
/// # Arguments
///
/// * `input` - A `IntermediateInputKV` containing every value grouped under one key.
/// * `emitter` - A struct implementing the `EmitFinal` trait, provided by the reduce runner.
///
/// # Outputs
///
/// An empty result used for returning an error. Outputs of the reduce operation are sent out
/// through the `emitter`.
pub trait Reduce<K, V>
where
    K: Serialize + DeserializeOwned,
    V: Serialize + DeserializeOwned,
{
    type Output: Serialize + DeserializeOwned;
    fn reduce<E>(&self, input: IntermediateInputKV<K, V>, emitter: E) -> Result<()>
    where
        E: EmitFinal<Self::Output>;
}
