//! Named draw operations, for tools and traces that pick a draw at runtime.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::source::RandomSource;

/// One call against a [`RandomSource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawStep {
    /// `next_int()`.
    Int,
    /// `next_int_bounded(bound)`.
    Bounded(i32),
    /// `next_long()`.
    Long,
    /// `next_float()`, widened to `f64`.
    Float,
    /// `next_double()`.
    Double,
    /// `next_boolean()`.
    Boolean,
    /// `next_gaussian()`.
    Gaussian,
    /// `next_bytes` into a buffer of this length.
    Bytes(usize),
}

/// Value produced by a [`DrawStep`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DrawValue {
    /// Integer draws of any width.
    Integer(i64),
    /// Floating-point draws.
    Float(f64),
    /// Boolean draws.
    Boolean(bool),
    /// Byte buffers.
    Bytes(Vec<u8>),
}

impl DrawStep {
    /// Execute the step against `source`.
    pub fn apply<R: RandomSource + ?Sized>(self, source: &mut R) -> Result<DrawValue> {
        let value = match self {
            Self::Int => DrawValue::Integer(source.next_int().into()),
            Self::Bounded(bound) => DrawValue::Integer(source.next_int_bounded(bound)?.into()),
            Self::Long => DrawValue::Integer(source.next_long()),
            Self::Float => DrawValue::Float(source.next_float().into()),
            Self::Double => DrawValue::Float(source.next_double()),
            Self::Boolean => DrawValue::Boolean(source.next_boolean()),
            Self::Gaussian => DrawValue::Float(source.next_gaussian()),
            Self::Bytes(len) => {
                let mut buf = vec![0u8; len];
                source.next_bytes(&mut buf);
                DrawValue::Bytes(buf)
            }
        };
        Ok(value)
    }
}

impl std::fmt::Display for DrawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Bytes(bytes) => {
                for byte in bytes {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}
