use std::io::{stdin, stdout, Read, Write};

use clap::{App, SubCommand};

use emitter::IntermediateVecEmitter;
use errors::*;
use io::*;
use mapper::Map;
use partition::{Partition, PartitionInputKV};
use reducer::Reduce;
use serialise::{FinalOutputObject, FinalOutputObjectEmitter, IntermediateOutputObject};
use super::VERSION;

/// `payload_app` builds the `clap` application shared by every payload binary.
///
/// Payloads add their own arguments and subcommands on top of it, normally the ones returned by
/// `map_subcommand`, `reduce_subcommand` and `sanity_check_subcommand`.
pub fn payload_app<'a, 'b>(name: &str) -> App<'a, 'b> {
    App::new(name).version(VERSION.unwrap_or("unknown"))
}

pub fn map_subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("map").about("Map one processing unit read as JSON from stdin")
}

pub fn reduce_subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("reduce").about("Reduce a batch of grouped keys read as JSON from stdin")
}

pub fn sanity_check_subcommand<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("sanity-check").about("Check that the payload can be executed")
}

/// `run_map` reads a `MapInputKV` from stdin, maps it and writes the partitioned output to stdout.
pub fn run_map<M, P>(mapper: &M, partitioner: &P) -> Result<()>
where
    M: Map,
    P: Partition<M::Key, M::Value>,
{
    run_map_with(&mut stdin(), &mut stdout(), mapper, partitioner)
}

pub fn run_map_with<S, W, M, P>(source: &mut S, sink: &mut W, mapper: &M, partitioner: &P) -> Result<()>
where
    S: Read,
    W: Write,
    M: Map,
    P: Partition<M::Key, M::Value>,
{
    let input_kv = read_map_input(source).chain_err(|| "Error getting input to map.")?;

    let mut pairs_vec: Vec<(M::Key, M::Value)> = Vec::new();
    mapper
        .map(input_kv, IntermediateVecEmitter::new(&mut pairs_vec))
        .chain_err(|| "Error running map operation.")?;

    let mut output_object = IntermediateOutputObject::<M::Key, M::Value>::default();
    for (key, value) in pairs_vec {
        let partition = partitioner
            .partition(PartitionInputKV::new(&key, &value))
            .chain_err(|| "Error partitioning map output.")?;
        output_object.push(partition, key, value);
    }

    write_map_output(sink, &output_object).chain_err(|| "Error writing map output to stdout.")?;
    sink.flush().chain_err(|| "Error flushing map output.")?;
    Ok(())
}

/// `run_reduce` reads a batch of grouped keys from stdin, reduces each of them in order and writes
/// one output object per key to stdout.
pub fn run_reduce<K, V, R>(reducer: &R) -> Result<()>
where
    K: ::serde::Serialize + ::serde::de::DeserializeOwned,
    V: ::serde::Serialize + ::serde::de::DeserializeOwned,
    R: Reduce<K, V>,
{
    run_reduce_with(&mut stdin(), &mut stdout(), reducer)
}

pub fn run_reduce_with<S, W, K, V, R>(source: &mut S, sink: &mut W, reducer: &R) -> Result<()>
where
    S: Read,
    W: Write,
    K: ::serde::Serialize + ::serde::de::DeserializeOwned,
    V: ::serde::Serialize + ::serde::de::DeserializeOwned,
    R: Reduce<K, V>,
{
    let input_kvs = read_reduce_input::<S, K, V>(source)
        .chain_err(|| "Error getting input to reduce.")?;

    let mut output_objects = Vec::with_capacity(input_kvs.len());
    for input_kv in input_kvs {
        let mut output_object = FinalOutputObject::<R::Output>::default();
        reducer
            .reduce(input_kv, FinalOutputObjectEmitter::new(&mut output_object))
            .chain_err(|| "Error running reduce operation.")?;
        output_objects.push(output_object);
    }

    write_reduce_output(sink, &output_objects)
        .chain_err(|| "Error writing reduce output to stdout.")?;
    sink.flush().chain_err(|| "Error flushing reduce output.")?;
    Ok(())
}

pub fn run_sanity_check() {
    println!("sanity located");
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use emitter::{EmitFinal, EmitIntermediate};
    use intermediate::IntermediateInputKV;
    use mapper::MapInputKV;
    use partition::HashPartitioner;

    struct TestMapper;
    impl Map for TestMapper {
        type Key = String;
        type Value = String;
        fn map<E>(&self, input: MapInputKV, mut emitter: E) -> Result<()>
        where
            E: EmitIntermediate<Self::Key, Self::Value>,
        {
            for word in input.value.split_whitespace() {
                emitter.emit(word.to_owned(), "test".to_owned())?;
            }
            Ok(())
        }
    }

    struct TestReducer;
    impl Reduce<String, String> for TestReducer {
        type Output = String;
        fn reduce<E>(&self, input: IntermediateInputKV<String, String>, mut emitter: E) -> Result<()>
        where
            E: EmitFinal<Self::Output>,
        {
            if input.values.is_empty() {
                return Ok(());
            }
            emitter.emit(input.values.iter().fold(
                String::new(),
                |acc, x| acc + x,
            ))?;
            Ok(())
        }
    }

    #[test]
    fn run_map_single_partition() {
        let mut source = Cursor::new(r#"{"key":"foo","value":"bar zar"}"#);
        let mut sink: Vec<u8> = Vec::new();

        run_map_with(&mut source, &mut sink, &TestMapper, &HashPartitioner::new(1)).unwrap();

        assert_eq!(
            r#"{"partitions":{"0":[{"key":"bar","value":"test"},{"key":"zar","value":"test"}]}}"#,
            String::from_utf8(sink).unwrap()
        );
    }

    #[test]
    fn run_map_invalid_input() {
        let mut source = Cursor::new("foo");
        let mut sink: Vec<u8> = Vec::new();

        let result = run_map_with(&mut source, &mut sink, &TestMapper, &HashPartitioner::new(1));

        assert!(result.is_err());
        assert!(sink.is_empty());
    }

    #[test]
    fn run_reduce_valid_input() {
        let mut source = Cursor::new(r#"[{"key":"foo","values":["bar","baz"]},{"key":"x","values":[]}]"#);
        let mut sink: Vec<u8> = Vec::new();

        run_reduce_with::<_, _, String, String, _>(&mut source, &mut sink, &TestReducer).unwrap();

        assert_eq!(
            r#"[{"values":["barbaz"]},{"values":[]}]"#,
            String::from_utf8(sink).unwrap()
        );
    }

    #[test]
    fn run_reduce_invalid_input() {
        let mut source = Cursor::new("foo");
        let mut sink: Vec<u8> = Vec::new();

        assert!(run_reduce_with::<_, _, String, String, _>(&mut source, &mut sink, &TestReducer).is_err());
    }
}
