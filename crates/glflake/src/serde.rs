use crate::Id;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Serializes as the quoted decimal string, like [`Id::to_json`].
impl Serialize for Id {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.collect_str(self)
    }
}

/// Deserializes only from a decimal string; a bare number is rejected.
impl<'de> Deserialize<'de> for Id {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = Id;

            fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                formatter.write_str("a decimal id string")
            }

            #[inline]
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        d.deserialize_str(DecimalVisitor)
    }
}

/// Serde adapter for the native integer form, for `#[serde(with = "...")]`.
pub mod as_native {
    use super::{Deserialize, Deserializer, Serialize, Serializer};
    use crate::Id;

    /// Serialize an ID as its `i64` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying serializer fails.
    pub fn serialize<S>(id: &Id, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        id.to_i64().serialize(s)
    }

    /// Deserialize an ID from an `i64` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying deserializer fails.
    pub fn deserialize<'de, D>(d: D) -> Result<Id, D::Error>
    where
        D: Deserializer<'de>,
    {
        i64::deserialize(d).map(Id::from_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_string() {
        let id = Id::from_i64(13587);
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""13587""#);
        assert_eq!(serde_json::to_vec(&id).unwrap(), id.to_json());
    }

    #[test]
    fn deserializes_from_string_only() {
        let id: Id = serde_json::from_str(r#""13587""#).unwrap();
        assert_eq!(id, Id::from_i64(13587));

        assert!(serde_json::from_str::<Id>("1").is_err());
        assert!(serde_json::from_str::<Id>(r#""invalid""#).is_err());
        assert!(serde_json::from_str::<Id>(r#""99999999999999999999""#).is_err());
    }

    #[test]
    fn native_roundtrip() {
        #[derive(PartialEq, Eq, Debug, Serialize, Deserialize)]
        struct Row {
            #[serde(with = "as_native")]
            id: Id,
        }

        let row = Row {
            id: Id::from_i64(1931386430720256),
        };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value, json!({ "id": 1931386430720256_i64 }));
        assert_eq!(serde_json::from_value::<Row>(value).unwrap(), row);
    }

    #[test]
    fn parts_serialize_with_field_names() {
        let parts = Id::from_i64(1931386430720256).decompose();
        assert_eq!(
            serde_json::to_value(parts).unwrap(),
            json!({
                "id": 1931386430720256_i64,
                "msb": 0,
                "time": 115119602,
                "machine-id": 8329,
                "sequence": 0,
            })
        );
    }

    #[test]
    fn deserialize_agrees_with_from_json() {
        let inputs: [&[u8]; 16] = [
            br#""13587""#,
            b" \"13587\" ",
            b"\"13587\"\n",
            b"\r\n\t\"-42\"",
            br#""\u0031""#,
            br#""\u0031\u0032""#,
            br#""\u00e9""#,
            br#""1\n""#,
            br#""1\x""#,
            br#""12\""#,
            br#""""#,
            b"1",
            b"",
            b"   ",
            b"\"1\n\"",
            br#""0000000000000013587""#,
        ];
        for raw in inputs {
            assert_eq!(
                serde_json::from_slice::<Id>(raw).ok(),
                Id::from_json(raw).ok(),
                "input {:?}",
                String::from_utf8_lossy(raw)
            );
        }
    }
}
