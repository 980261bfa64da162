use errors::*;

pub const FIELD_SEPARATOR: char = ',';

/// Width every street code is rendered at, left-padded with zeros.
pub const STREET_CODE_WIDTH: usize = 5;

const SHOP_STREET_FIELD: usize = 5;
const DIRECTORY_STREET_FIELD: usize = 1;
const DIRECTORY_CODE_FIELD: usize = 2;
const POPULATION_CODE_FIELD: usize = 0;
const POPULATION_INHABITANTS_FIELD: usize = 1;

/// Splits a row on commas and checks it has at least `required` fields.
fn split_fields<'a>(source: &str, line: &'a str, required: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < required {
        return Err(ErrorKind::MalformedRow(source.to_owned(), line.to_owned(), required).into());
    }
    Ok(fields)
}

/// Left-pads a street code with `'0'` up to `STREET_CODE_WIDTH` characters.
///
/// Longer codes are returned unchanged.
pub fn pad_street_code(code: &str) -> String {
    format!("{:0>width$}", code, width = STREET_CODE_WIDTH)
}

/// A row of the shop registry. Only the street the shop is on takes part in the job.
#[derive(Debug, PartialEq)]
pub struct ShopRecord {
    pub street_name: String,
}

impl ShopRecord {
    pub fn parse(line: &str) -> Result<Self> {
        let fields = split_fields("shop registry", line, SHOP_STREET_FIELD + 1)?;
        Ok(ShopRecord {
            street_name: fields[SHOP_STREET_FIELD].trim().to_owned(),
        })
    }
}

/// A row of the street directory, with its code already padded.
#[derive(Debug, PartialEq)]
pub struct StreetDirectoryRecord {
    pub street_name: String,
    pub street_code: String,
}

impl StreetDirectoryRecord {
    pub fn parse(line: &str) -> Result<Self> {
        let fields = split_fields("street directory", line, DIRECTORY_CODE_FIELD + 1)?;
        Ok(StreetDirectoryRecord {
            street_name: fields[DIRECTORY_STREET_FIELD].trim().to_owned(),
            street_code: pad_street_code(fields[DIRECTORY_CODE_FIELD].trim()),
        })
    }
}

/// A row of the population table.
#[derive(Debug, PartialEq)]
pub struct PopulationRecord {
    pub street_code: String,
    pub inhabitants: String,
}

impl PopulationRecord {
    pub fn parse(line: &str) -> Result<Self> {
        let fields = split_fields("population", line, POPULATION_INHABITANTS_FIELD + 1)?;
        Ok(PopulationRecord {
            street_code: fields[POPULATION_CODE_FIELD].trim().to_owned(),
            inhabitants: fields[POPULATION_INHABITANTS_FIELD].trim().to_owned(),
        })
    }
}
