/// The `IntermediateInputKV` is a struct for passing grouped input data to a `Reduce`.
///
/// `IntermediateInputKV` is a thin wrapper around a `(Key, Vec<Value>)`, holding every value the
/// grouping stage collected for one key. It can be constructed normally or using
/// `IntermediateInputKV::new()`.
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct IntermediateInputKV<K, V> {
    pub key: K,
    pub values: Vec<V>,
}

impl<K, V> IntermediateInputKV<K, V> {
    pub fn new(key: K, values: Vec<V>) -> Self {
        IntermediateInputKV { key, values }
    }
}
