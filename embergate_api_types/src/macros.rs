/// Pulls `$key` out of a `serde_json::Map` and deserializes it, turning a
/// missing field or a schema mismatch into a `DecodeError` instead of
/// panicking.
macro_rules! field {
    ($map:ident, $key:literal) => {
        serde_json::from_value(
            $map.remove($key)
                .ok_or_else(|| crate::DecodeError::MissingField($key))?,
        )
        .map_err(|_| crate::DecodeError::SchemaMismatch($key))?
    };
}
