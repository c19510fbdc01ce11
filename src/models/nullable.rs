use serde::{Deserialize, Deserializer};

/// Read an explicit `null` the same way as a missing field: as `T::default()`.
///
/// The backend serializes boxed numbers and strings, so any of them may arrive as `null`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
