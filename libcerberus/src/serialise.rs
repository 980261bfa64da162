use std::collections::BTreeMap;

use serde::Serialize;

use emitter::EmitFinal;
use errors::*;

/// `IntermediateOutputPair` is a struct representing an intermediate key-value pair as outputted
/// from a map operation.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct IntermediateOutputPair<K, V> {
    pub key: K,
    pub value: V,
}

/// `IntermediateOutputObject` is a struct comprising a collection of `IntermediateOutputPair`s
/// bucketed by partition, representing the entire output of a map operation, ready to be
/// serialised to JSON.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct IntermediateOutputObject<K, V> {
    pub partitions: BTreeMap<u64, Vec<IntermediateOutputPair<K, V>>>,
}

impl<K, V> Default for IntermediateOutputObject<K, V> {
    fn default() -> Self {
        IntermediateOutputObject {
            partitions: BTreeMap::new(),
        }
    }
}

impl<K, V> IntermediateOutputObject<K, V> {
    pub fn push(&mut self, partition: u64, key: K, value: V) {
        self.partitions
            .entry(partition)
            .or_insert_with(Vec::new)
            .push(IntermediateOutputPair { key, value });
    }
}

/// `FinalOutputObject` is a struct comprising a collection of serialisable values representing
/// the output of a reduce operation for one key.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct FinalOutputObject<V> {
    pub values: Vec<V>,
}

impl<V> Default for FinalOutputObject<V> {
    fn default() -> Self {
        FinalOutputObject { values: Vec::new() }
    }
}

/// A struct implementing `EmitFinal` which emits to a `FinalOutputObject`.
pub struct FinalOutputObjectEmitter<'a, V: Serialize + 'a> {
    sink: &'a mut FinalOutputObject<V>,
}

impl<'a, V: Serialize> FinalOutputObjectEmitter<'a, V> {
    pub fn new(sink: &'a mut FinalOutputObject<V>) -> Self {
        FinalOutputObjectEmitter { sink }
    }
}

impl<'a, V: Serialize> EmitFinal<V> for FinalOutputObjectEmitter<'a, V> {
    fn emit(&mut self, value: V) -> Result<()> {
        self.sink.values.push(value);
        Ok(())
    }
}
