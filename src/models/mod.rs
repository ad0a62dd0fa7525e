use serde::{Deserialize, Deserializer};

pub mod product;
pub mod response;
pub mod result_set;

pub use product::Product;
pub use response::{HealthResponse, MatchResponse};
pub use result_set::{Preview, ResultSet};

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
