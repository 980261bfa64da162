use std::collections::BTreeMap;

use errors::*;
use intermediate::IntermediateInputKV;
use partition::{Partition, PartitionInputKV};

/// Values grouped by key, for a single partition.
pub type PartitionGroups<K, V> = BTreeMap<K, Vec<V>>;

/// `group_by_partition` is the grouping barrier between the map and reduce phases.
///
/// Every pair produced by every map unit is assigned a partition by the `partitioner` and then
/// collected under its key, so that one reducer invocation sees all values for a key. Values keep
/// the order in which the map units are supplied, which lets reducers resolve duplicates on a
/// last-observed basis.
pub fn group_by_partition<K, V, P, I>(
    map_outputs: I,
    partitioner: &P,
) -> Result<BTreeMap<u64, PartitionGroups<K, V>>>
where
    K: Ord,
    P: Partition<K, V>,
    I: IntoIterator<Item = Vec<(K, V)>>,
{
    let mut partitions: BTreeMap<u64, PartitionGroups<K, V>> = BTreeMap::new();

    for unit_output in map_outputs {
        for (key, value) in unit_output {
            let partition = partitioner
                .partition(PartitionInputKV::new(&key, &value))
                .chain_err(|| "Error partitioning map output.")?;

            partitions
                .entry(partition)
                .or_insert_with(BTreeMap::new)
                .entry(key)
                .or_insert_with(Vec::new)
                .push(value);
        }
    }

    Ok(partitions)
}

/// Converts the groups of one partition into the reduce input batch, in key order.
pub fn into_reduce_inputs<K, V>(groups: PartitionGroups<K, V>) -> Vec<IntermediateInputKV<K, V>> {
    groups
        .into_iter()
        .map(|(key, values)| IntermediateInputKV::new(key, values))
        .collect()
}
