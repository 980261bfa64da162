/// The value half of every intermediate pair, keyed by street name.
///
/// Both mappers feed the same keyed stream; the variant records which dataset a value came from.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum StreetValue {
    /// Shops counted on the street by one processing unit.
    ShopCount(u64),
    /// Zero-padded code of the street in the street directory.
    StreetCode(String),
}
