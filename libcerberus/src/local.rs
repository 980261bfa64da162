use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::prelude::*;
use futures::Future;
use futures::future;
use futures_cpupool::CpuPool;
use uuid::Uuid;

use emitter::{FinalVecEmitter, IntermediateVecEmitter};
use errors::*;
use mapper::{Map, MapInputKV};
use partition::Partition;
use reducer::Reduce;
use shuffle::{group_by_partition, into_reduce_inputs, PartitionGroups};

/// Cuts the text of one input into processing units of at most `lines_per_unit` lines.
///
/// Each unit is keyed by the name of the input so that mappers can tell their sources apart.
/// Empty input produces no units.
pub fn split_input(key: &str, contents: &str, lines_per_unit: usize) -> Vec<MapInputKV> {
    let lines_per_unit = lines_per_unit.max(1);
    let mut units = Vec::new();
    let mut current = String::new();
    let mut line_count = 0;

    for line in contents.lines() {
        current.push_str(line);
        current.push('\n');
        line_count += 1;

        if line_count == lines_per_unit {
            units.push(MapInputKV::new(key, current));
            current = String::new();
            line_count = 0;
        }
    }
    if line_count > 0 {
        units.push(MapInputKV::new(key, current));
    }

    units
}

/// `LocalJob` runs a whole MapReduce on one machine.
///
/// It stands in for the cluster: map units run in parallel on a `CpuPool`, their output is
/// grouped per partition and key, and every partition is then reduced on the same pool. The
/// reducer is shared between partitions through an `Arc`, so any state it holds (a side table,
/// for instance) is built once and only ever read.
pub struct LocalJob<M, R, P> {
    job_id: Uuid,
    mapper: Arc<M>,
    reducer: Arc<R>,
    partitioner: P,
    cpu_pool: CpuPool,
}

impl<M, R, P> LocalJob<M, R, P>
where
    M: Map + Send + Sync + 'static,
    M::Key: Ord + Send + 'static,
    M::Value: Send + 'static,
    R: Reduce<M::Key, M::Value> + Send + Sync + 'static,
    R::Output: Send + 'static,
    P: Partition<M::Key, M::Value>,
{
    pub fn new(mapper: M, reducer: Arc<R>, partitioner: P, workers: usize) -> Self {
        LocalJob {
            job_id: Uuid::new_v4(),
            mapper: Arc::new(mapper),
            reducer,
            partitioner,
            cpu_pool: CpuPool::new(workers.max(1)),
        }
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    /// Runs the map, shuffle and reduce phases over the given processing units.
    ///
    /// Returns the reduce output of every non-empty partition. The first error from any unit or
    /// partition aborts the job.
    pub fn run(&self, units: Vec<MapInputKV>) -> Result<BTreeMap<u64, Vec<R::Output>>> {
        let start_time = Utc::now();
        info!("Starting local job {} with {} map units", self.job_id, units.len());

        let map_outputs = self.run_map_phase(units)
            .chain_err(|| "Error running map phase.")?;

        let partitions = group_by_partition(map_outputs, &self.partitioner)
            .chain_err(|| "Error grouping map output.")?;
        debug!("Map output grouped into {} partitions", partitions.len());

        let output = self.run_reduce_phase(partitions)
            .chain_err(|| "Error running reduce phase.")?;

        info!(
            "Local job {} completed in {} ms",
            self.job_id,
            (Utc::now() - start_time).num_milliseconds()
        );
        Ok(output)
    }

    fn run_map_phase(&self, units: Vec<MapInputKV>) -> Result<Vec<Vec<(M::Key, M::Value)>>> {
        let map_futures: Vec<_> = units
            .into_iter()
            .map(|unit| {
                let mapper = Arc::clone(&self.mapper);
                self.cpu_pool.spawn_fn(move || -> Result<Vec<(M::Key, M::Value)>> {
                    let unit_key = unit.key.clone();
                    let mut pairs = Vec::new();
                    mapper
                        .map(unit, IntermediateVecEmitter::new(&mut pairs))
                        .chain_err(|| format!("Error mapping unit of {}", unit_key))?;
                    Ok(pairs)
                })
            })
            .collect();

        // join_all keeps submission order, so the grouped values follow input order.
        let map_outputs = future::join_all(map_futures).wait()?;
        debug!(
            "Map phase emitted {} pairs",
            map_outputs.iter().map(|pairs| pairs.len()).sum::<usize>()
        );
        Ok(map_outputs)
    }

    fn run_reduce_phase(
        &self,
        partitions: BTreeMap<u64, PartitionGroups<M::Key, M::Value>>,
    ) -> Result<BTreeMap<u64, Vec<R::Output>>> {
        let reduce_futures: Vec<_> = partitions
            .into_iter()
            .map(|(partition, groups)| {
                let reducer = Arc::clone(&self.reducer);
                self.cpu_pool.spawn_fn(move || -> Result<(u64, Vec<R::Output>)> {
                    let mut outputs = Vec::new();
                    for input in into_reduce_inputs(groups) {
                        reducer
                            .reduce(input, FinalVecEmitter::new(&mut outputs))
                            .chain_err(|| format!("Error reducing partition {}", partition))?;
                    }
                    Ok((partition, outputs))
                })
            })
            .collect();

        let reduced = future::join_all(reduce_futures).wait()?;
        Ok(reduced.into_iter().collect())
    }
}

/// Counts the output rows of a job across all of its partitions.
pub fn output_count<O>(output: &BTreeMap<u64, Vec<O>>) -> usize {
    output.values().map(|rows| rows.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use emitter::{EmitFinal, EmitIntermediate};
    use intermediate::IntermediateInputKV;
    use partition::HashPartitioner;

    struct WordCountMapper;
    impl Map for WordCountMapper {
        type Key = String;
        type Value = u64;
        fn map<E>(&self, input: MapInputKV, mut emitter: E) -> Result<()>
        where
            E: EmitIntermediate<Self::Key, Self::Value>,
        {
            for token in input.value.split_whitespace() {
                if token == "panic" {
                    return Err("bad token".into());
                }
                emitter.emit(token.to_owned(), 1)?;
            }
            Ok(())
        }
    }

    struct WordCountReducer;
    impl Reduce<String, u64> for WordCountReducer {
        type Output = String;
        fn reduce<E>(&self, input: IntermediateInputKV<String, u64>, mut emitter: E) -> Result<()>
        where
            E: EmitFinal<Self::Output>,
        {
            let total: u64 = input.values.iter().sum();
            emitter.emit(format!("{} {}", input.key, total))
        }
    }

    #[test]
    fn split_input_by_line_count() {
        let units = split_input("shops.csv", "a\nb\nc\n", 2);

        assert_eq!(2, units.len());
        assert_eq!("a\nb\n", units[0].value);
        assert_eq!("c\n", units[1].value);
        assert_eq!("shops.csv", units[1].key);
    }

    #[test]
    fn split_empty_input() {
        assert!(split_input("shops.csv", "", 10).is_empty());
    }

    #[test]
    fn local_job_counts_across_units() {
        let units = split_input("words", "foo bar\nfoo\nbar foo\n", 1);
        let job = LocalJob::new(
            WordCountMapper,
            Arc::new(WordCountReducer),
            HashPartitioner::new(3),
            4,
        );

        let output = job.run(units).unwrap();
        let mut rows: Vec<String> = output.into_iter().flat_map(|(_, rows)| rows).collect();
        rows.sort();

        assert_eq!(vec!["bar 2".to_owned(), "foo 3".to_owned()], rows);
    }

    #[test]
    fn local_job_output_count() {
        let units = split_input("words", "a b c", 10);
        let job = LocalJob::new(
            WordCountMapper,
            Arc::new(WordCountReducer),
            HashPartitioner::new(2),
            2,
        );

        let output = job.run(units).unwrap();

        assert_eq!(3, output_count(&output));
    }

    #[test]
    fn local_job_fails_on_map_error() {
        let units = split_input("words", "foo\npanic\n", 1);
        let job = LocalJob::new(
            WordCountMapper,
            Arc::new(WordCountReducer),
            HashPartitioner::new(1),
            2,
        );

        assert!(job.run(units).is_err());
    }
}
