use std::collections::BTreeMap;

use cerberus::{EmitIntermediate, Map, MapInputKV, Result, ResultExt};

use records::ShopRecord;
use value::StreetValue;

/// Counts the shops of each street within one processing unit.
///
/// The running counts live only for the duration of a single `map` call and are emitted once,
/// one `ShopCount` per street, when the unit has been read. Different units may report the same
/// street; the join adds their counts together.
pub struct ShopCountMapper;

impl Map for ShopCountMapper {
    type Key = String;
    type Value = StreetValue;

    fn map<E>(&self, input: MapInputKV, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        let mut shop_counts: BTreeMap<String, u64> = BTreeMap::new();

        for line in input.value.lines() {
            let record = ShopRecord::parse(line)
                .chain_err(|| format!("Error parsing shop registry unit of {}", input.key))?;
            *shop_counts.entry(record.street_name).or_insert(0) += 1;
        }

        debug!(
            "Shop unit of {} counted {} streets",
            input.key,
            shop_counts.len()
        );
        for (street_name, count) in shop_counts {
            emitter
                .emit(street_name, StreetValue::ShopCount(count))
                .chain_err(|| "Error emitting map key-value pair.")?;
        }
        Ok(())
    }
}
