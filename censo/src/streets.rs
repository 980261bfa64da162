use cerberus::{EmitIntermediate, Map, MapInputKV, Result, ResultExt};

use records::StreetDirectoryRecord;
use value::StreetValue;

/// Emits the zero-padded code of every street directory row, keyed by street name.
///
/// Nothing is aggregated here: duplicate street names are all emitted and left for the join to
/// resolve.
pub struct StreetCodeMapper;

impl Map for StreetCodeMapper {
    type Key = String;
    type Value = StreetValue;

    fn map<E>(&self, input: MapInputKV, mut emitter: E) -> Result<()>
    where
        E: EmitIntermediate<Self::Key, Self::Value>,
    {
        for line in input.value.lines() {
            let record = StreetDirectoryRecord::parse(line)
                .chain_err(|| format!("Error parsing street directory unit of {}", input.key))?;
            emitter
                .emit(record.street_name, StreetValue::StreetCode(record.street_code))
                .chain_err(|| "Error emitting map key-value pair.")?;
        }
        Ok(())
    }
}
