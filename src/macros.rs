/// Reads an optional numeric field, resolving it to the sentinel of its type
/// when it is empty or unparseable.
///
/// `accept!(raw, 8, f64)` yields `-1.0` for a missing HDOP, `accept!(raw, 7,
/// i32)` yields `-1` for a missing satellite count.
#[macro_export]
macro_rules! accept {
    ($raw:expr, $idx:expr, f64) => {
        $raw.number::<f64>($idx)
            .unwrap_or($crate::convert::FLOAT_SENTINEL)
    };
    ($raw:expr, $idx:expr, i32) => {
        $raw.number::<i32>($idx)
            .unwrap_or($crate::convert::INT_SENTINEL)
    };
}

/// Reads a field that must be one of a small fixed set, returning
/// `ParseError::InvalidEnum` from the enclosing function otherwise.
///
/// `$conv` maps the raw `&str` to an `Option` of the enumeration.
#[macro_export]
macro_rules! expect {
    ($raw:expr, $kind:expr, $idx:expr, $name:expr, $conv:path) => {{
        let field = $raw.field($idx);
        match $conv(field) {
            Some(v) => v,
            None => {
                return Err($crate::err::ParseError::InvalidEnum(
                    $kind,
                    $name,
                    field.to_owned(),
                ))
            }
        }
    }};
}
