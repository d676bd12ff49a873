//! Options-holder interface for the latch binding system.
//!
//! The binder never inspects a holder's concrete type. Each holder type
//! implements [`Options`], exposing its fields one at a time as [`Slot`]
//! values: mutable references tagged with the field's declared type. This is
//! the whole contract between a holder and the binder.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved field name that collects positional (non-flag) tokens.
pub const REST_FIELD: &str = "RestArgs";

/// Type tag for a bindable field.
///
/// The integer and float tags carry the declared bit width, which the binder
/// enforces during value coercion. `Int` and `Uint` are the platform-width
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    Bool,
    Int,
    I8,
    I16,
    I32,
    I64,
    Uint,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Str,
    StrList,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::Bool => "bool",
            FieldKind::Int => "int",
            FieldKind::I8 => "int<8>",
            FieldKind::I16 => "int<16>",
            FieldKind::I32 => "int<32>",
            FieldKind::I64 => "int<64>",
            FieldKind::Uint => "uint",
            FieldKind::U8 => "uint<8>",
            FieldKind::U16 => "uint<16>",
            FieldKind::U32 => "uint<32>",
            FieldKind::U64 => "uint<64>",
            FieldKind::F32 => "float<32>",
            FieldKind::F64 => "float<64>",
            FieldKind::Str => "string",
            FieldKind::StrList => "list of strings",
        };
        write!(f, "{}", name)
    }
}

/// A mutable view of a single holder field.
///
/// Each variant borrows the field for the duration of one assignment, so the
/// holder stays owned by the caller throughout binding.
pub enum Slot<'a> {
    Bool(&'a mut bool),
    Int(&'a mut isize),
    I8(&'a mut i8),
    I16(&'a mut i16),
    I32(&'a mut i32),
    I64(&'a mut i64),
    Uint(&'a mut usize),
    U8(&'a mut u8),
    U16(&'a mut u16),
    U32(&'a mut u32),
    U64(&'a mut u64),
    F32(&'a mut f32),
    F64(&'a mut f64),
    Str(&'a mut String),
    StrList(&'a mut Vec<String>),
}

impl Slot<'_> {
    /// The declared type of the underlying field.
    pub fn kind(&self) -> FieldKind {
        match self {
            Slot::Bool(_) => FieldKind::Bool,
            Slot::Int(_) => FieldKind::Int,
            Slot::I8(_) => FieldKind::I8,
            Slot::I16(_) => FieldKind::I16,
            Slot::I32(_) => FieldKind::I32,
            Slot::I64(_) => FieldKind::I64,
            Slot::Uint(_) => FieldKind::Uint,
            Slot::U8(_) => FieldKind::U8,
            Slot::U16(_) => FieldKind::U16,
            Slot::U32(_) => FieldKind::U32,
            Slot::U64(_) => FieldKind::U64,
            Slot::F32(_) => FieldKind::F32,
            Slot::F64(_) => FieldKind::F64,
            Slot::Str(_) => FieldKind::Str,
            Slot::StrList(_) => FieldKind::StrList,
        }
    }
}

/// Capability interface implemented by every options-holder type.
///
/// `field` looks a field up by its declared name. The binder always asks with
/// the first letter of the flag upper-cased, so implementations match on
/// capitalized names (`"Verbose"`, not `"verbose"`); the remaining letters
/// are compared as written. Positional tokens are routed through the
/// [`REST_FIELD`] name, which, when declared, must expose a
/// [`Slot::StrList`].
pub trait Options {
    /// Look up a mutable slot for the named field.
    fn field(&mut self, name: &str) -> Option<Slot<'_>>;
}
