//! CBOR encoding of records into the opaque bytes the store contract
//! expects.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

pub(crate) fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::ser::into_writer(value, &mut bytes)?;
    Ok(bytes)
}

pub(crate) fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(ciborium::de::from_reader(bytes)?)
}
