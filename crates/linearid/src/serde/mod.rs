//! `#[serde(with = "...")]` adapters for Linear IDs.
//!
//! ```
//! use linearid::id::Lid128;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     #[serde(with = "linearid::serde::as_hex")]
//!     id: Lid128,
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::id::LinearId;

    /// Serialize a Linear ID as its native integer representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: LinearId,
        ID::Ty: Serialize,
        S: Serializer,
    {
        id.to_raw().serialize(s)
    }

    /// Deserialize a Linear ID from its native integer representation.
    ///
    /// Every integer of the backing width is a valid ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: LinearId,
        ID::Ty: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        <ID::Ty>::deserialize(d).map(ID::from_raw)
    }
}

pub mod as_hex {
    use super::{Deserializer, Serializer};
    use crate::codec::{LeBytes, LinearIdCodecExt};

    /// Serialize a Linear ID as its canonical lowercase hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<ID, S>(id: &ID, s: S) -> Result<S::Ok, S::Error>
    where
        ID: LinearIdCodecExt,
        ID::Ty: LeBytes,
        S: Serializer,
    {
        let mut buf = <ID::Ty as LeBytes>::HexArray::default();
        id.encode_hex_to_buf(&mut buf);
        // Hex output is always ASCII.
        let hex = core::str::from_utf8(buf.as_ref())
            .map_err(<S::Error as serde::ser::Error>::custom)?;
        s.serialize_str(hex)
    }

    /// Deserialize a Linear ID from its hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails or the string is
    /// not a well-formed hex ID.
    pub fn deserialize<'de, ID, D>(d: D) -> Result<ID, D::Error>
    where
        ID: LinearIdCodecExt,
        ID::Ty: LeBytes,
        D: Deserializer<'de>,
    {
        struct HexVisitor<ID>(core::marker::PhantomData<ID>);

        impl<ID> serde::de::Visitor<'_> for HexVisitor<ID>
        where
            ID: LinearIdCodecExt,
            ID::Ty: LeBytes,
        {
            type Value = ID;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a fixed-width hex encoded Linear ID")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                ID::from_hex(v).map_err(serde::de::Error::custom)
            }
        }

        d.deserialize_str(HexVisitor(core::marker::PhantomData))
    }
}
