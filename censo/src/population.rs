use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use errors::*;
use records::PopulationRecord;

/// In-memory lookup table from street code to inhabitant count.
///
/// The index is built once, before any join work, and never changes afterwards; reducers share it
/// read-only.
#[derive(Debug, Default)]
pub struct PopulationIndex {
    inhabitants: HashMap<String, String>,
}

impl PopulationIndex {
    /// Loads the population table at `path`.
    ///
    /// A missing or unreadable file is a `MissingPopulationFile` error: there is no way to run the
    /// join without the table.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .chain_err(|| ErrorKind::MissingPopulationFile(path.display().to_string()))?;

        let index = PopulationIndex::from_reader(BufReader::new(file))
            .chain_err(|| format!("Error loading population table {}", path.display()))?;
        if index.is_empty() {
            warn!("Population table {} has no rows", path.display());
        }
        info!(
            "Loaded population index from {} with {} street codes",
            path.display(),
            index.len()
        );
        Ok(index)
    }

    /// Builds the index from every line of `reader`. Later rows for the same code replace earlier
    /// ones.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut inhabitants = HashMap::new();
        for line in reader.lines() {
            let line = line.chain_err(|| "Error reading population table")?;
            let record = PopulationRecord::parse(&line)?;
            inhabitants.insert(record.street_code, record.inhabitants);
        }
        Ok(PopulationIndex { inhabitants })
    }

    pub fn lookup(&self, street_code: &str) -> Option<&str> {
        self.inhabitants.get(street_code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.inhabitants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inhabitants.is_empty()
    }
}
