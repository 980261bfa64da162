use std::fmt;
use std::fmt::Write;
use std::sync::Arc;

use cerberus::{EmitFinal, IntermediateInputKV, Reduce, ResultExt};
use cerberus;

use errors::{Error, ErrorKind, Result};
use population::PopulationIndex;
use value::StreetValue;

/// Printed instead of the inhabitants when a street has no code or its code is not in the
/// population table.
pub const NO_INDEX: &str = "No indice";
/// Printed instead of the shop count when a street has none.
pub const NO_DATA: &str = "No Data";

pub const STREET_COLUMN_WIDTH: usize = 40;
pub const SHOP_COUNT_COLUMN_WIDTH: usize = 10;
pub const INHABITANTS_COLUMN_WIDTH: usize = 10;
/// Separates the street/shop columns from the population columns in every output row.
pub const KEY_VALUE_SEPARATOR: char = '\t';

/// One line of the job output.
///
/// The text form is a fixed-width format read by downstream tools:
///
/// ```text
/// <street, 40 wide><shops, 10 wide>\t<inhabitants, 10 wide><inhabitants per shop>
/// ```
///
/// When the inhabitants are unknown the row ends with `No indice` and has no ratio.
#[derive(Debug, PartialEq)]
pub struct JoinedRow {
    pub street_name: String,
    pub shop_count: Option<u64>,
    pub inhabitants: Option<String>,
    pub ratio: Option<u64>,
}

impl fmt::Display for JoinedRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<width$}", self.street_name, width = STREET_COLUMN_WIDTH)?;
        match self.shop_count {
            Some(count) => write!(f, "{:<width$}", count, width = SHOP_COUNT_COLUMN_WIDTH)?,
            None => write!(f, "{:<width$}", NO_DATA, width = SHOP_COUNT_COLUMN_WIDTH)?,
        }
        f.write_char(KEY_VALUE_SEPARATOR)?;

        match (&self.inhabitants, self.ratio) {
            (&Some(ref inhabitants), Some(ratio)) => write!(
                f,
                "{:<width$}{}",
                inhabitants,
                ratio,
                width = INHABITANTS_COLUMN_WIDTH
            ),
            (&Some(ref inhabitants), None) => f.write_str(inhabitants),
            (&None, _) => f.write_str(NO_INDEX),
        }
    }
}

/// Joins shop counts, street codes and the population table for one street at a time.
pub struct JoinReducer {
    population: Arc<PopulationIndex>,
    min_shops: i64,
}

impl JoinReducer {
    pub fn new(population: Arc<PopulationIndex>, min_shops: i64) -> Self {
        JoinReducer {
            population,
            min_shops,
        }
    }

    /// Resolves every value collected for `street_name` into an output row.
    ///
    /// Shop counts reported by different map units are added up and the last street code seen
    /// wins. Returns `None` when the street has no shops or not more than `min_shops` of them. A
    /// negative `min_shops` lets every street with at least one shop through.
    pub fn join(&self, street_name: String, values: Vec<StreetValue>) -> Result<Option<JoinedRow>> {
        let mut shop_count: Option<u64> = None;
        let mut street_code: Option<String> = None;

        for value in values {
            match value {
                StreetValue::ShopCount(count) => {
                    shop_count = Some(shop_count.unwrap_or(0) + count);
                }
                StreetValue::StreetCode(code) => street_code = Some(code),
            }
        }

        let shop_count = match shop_count {
            Some(count) if self.min_shops < 0 || count > self.min_shops as u64 => count,
            _ => return Ok(None),
        };

        let inhabitants = street_code
            .as_ref()
            .and_then(|code| self.population.lookup(code));
        let ratio = match inhabitants {
            Some(inhabitants) => {
                let inhabitants: u64 = inhabitants.parse().map_err(|_| {
                    Error::from(ErrorKind::InvalidInhabitants(
                        street_name.clone(),
                        inhabitants.to_owned(),
                    ))
                })?;
                inhabitants.checked_div(shop_count)
            }
            None => {
                debug!(
                    "No population entry for street {} (code {:?})",
                    street_name,
                    street_code
                );
                None
            }
        };

        Ok(Some(JoinedRow {
            street_name,
            shop_count: Some(shop_count),
            inhabitants: inhabitants.map(str::to_owned),
            ratio,
        }))
    }
}

impl Reduce<String, StreetValue> for JoinReducer {
    type Output = String;

    fn reduce<E>(
        &self,
        input: IntermediateInputKV<String, StreetValue>,
        mut emitter: E,
    ) -> cerberus::Result<()>
    where
        E: EmitFinal<Self::Output>,
    {
        let row = self.join(input.key, input.values)
            .chain_err(|| "Error joining street values.")?;
        if let Some(row) = row {
            emitter
                .emit(row.to_string())
                .chain_err(|| "Error emitting joined row.")?;
        }
        Ok(())
    }
}
