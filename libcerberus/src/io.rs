use std::io::{Read, Write};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json;

use errors::*;
use intermediate::IntermediateInputKV;
use mapper::MapInputKV;
use serialise::{FinalOutputObject, IntermediateOutputObject};

fn read_source<R: Read>(source: &mut R) -> Result<String> {
    let mut input_string = String::new();
    let bytes_read = source
        .read_to_string(&mut input_string)
        .chain_err(|| "Error reading from source.")?;
    if bytes_read == 0 {
        warn!("bytes_read is 0");
    }
    Ok(input_string)
}

/// `read_map_input` reads a string from a source and returns a `MapInputKV`.
///
/// It attempts to parse the string from the input source as JSON and returns an `errors::Error` if
/// the attempt fails.
pub fn read_map_input<R: Read>(source: &mut R) -> Result<MapInputKV> {
    let input_string = read_source(source)?;
    let result = serde_json::from_str(input_string.as_str())
        .chain_err(|| "Error parsing input JSON to MapInputKV.")?;
    Ok(result)
}

/// `read_reduce_input` reads a string from a source and returns the batch of grouped keys the
/// reducer must process.
///
/// The batch is a JSON array of `{"key": .., "values": [..]}` objects.
pub fn read_reduce_input<R, K, V>(source: &mut R) -> Result<Vec<IntermediateInputKV<K, V>>>
where
    R: Read,
    K: DeserializeOwned,
    V: DeserializeOwned,
{
    let input_string = read_source(source)?;
    let result = serde_json::from_str(input_string.as_str())
        .chain_err(|| "Error parsing input JSON to IntermediateInputKV batch.")?;
    Ok(result)
}

/// `write_map_output` attempts to serialise an `IntermediateOutputObject` to a given sink.
pub fn write_map_output<W, K, V>(sink: &mut W, output: &IntermediateOutputObject<K, V>) -> Result<()>
where
    W: Write,
    K: Serialize,
    V: Serialize,
{
    serde_json::to_writer(sink, output).chain_err(|| "Error writing map output to sink.")?;
    Ok(())
}

/// `write_reduce_output` attempts to serialise the per-key reduce outputs to a given sink.
pub fn write_reduce_output<W, V>(sink: &mut W, output: &[FinalOutputObject<V>]) -> Result<()>
where
    W: Write,
    V: Serialize,
{
    serde_json::to_writer(sink, output).chain_err(|| "Error writing reduce output to sink.")?;
    Ok(())
}
