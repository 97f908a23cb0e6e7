//! State inspection for debuggers, test scripts and the trace log.
//!
//! Components answer dotted path queries (`cpu.pc`, `shift.result`) with a
//! small dynamically-typed [`Value`]. Queries never affect emulation state.

use std::fmt;

/// A dynamically-typed value for state queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Bool(bool),
    /// Register-sized byte; displayed as `0xNN`.
    U8(u8),
    /// Address or register pair; displayed as `0xNNNN`.
    U16(u16),
    /// Counter; displayed in decimal.
    U64(u64),
    String(String),
}

impl Value {
    /// Numeric view of the value, if it has one.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match *self {
            Value::Bool(v) => Some(u64::from(v)),
            Value::U8(v) => Some(u64::from(v)),
            Value::U16(v) => Some(u64::from(v)),
            Value::U64(v) => Some(v),
            Value::String(_) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::U8(v) => write!(f, "{v:#04X}"),
            Value::U16(v) => write!(f, "{v:#06X}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_from!(bool => Bool, u8 => U8, u16 => U16, u64 => U64, String => String);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

/// Parse an address path segment: `0x2400`, `$2400` or decimal `9216`.
#[must_use]
pub fn parse_address(text: &str) -> Option<u16> {
    match text.strip_prefix("0x").or_else(|| text.strip_prefix('$')) {
        Some(hex) => u16::from_str_radix(hex, 16).ok(),
        None => text.parse().ok(),
    }
}

/// A component whose state can be inspected.
pub trait Observable {
    /// Look up one property by dotted path, e.g. `pc`, `flags.z`.
    ///
    /// Returns `None` for paths the component does not recognise.
    fn query(&self, path: &str) -> Option<Value>;

    /// Every path `query` answers. Families are written with a placeholder,
    /// e.g. `memory.<address>`.
    fn query_paths(&self) -> &'static [&'static str];
}
