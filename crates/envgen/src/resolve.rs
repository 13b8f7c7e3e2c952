//! Type-to-parser resolution.
//!
//! A fixed table maps every supported primitive to the parse operation the
//! loader runs on the raw variable, whether that operation can fail, the bit
//! width it parses at and the narrowing conversion applied afterwards.
//!
//! | Type | Operation | Can fail | Bits | Narrowing |
//! |------|-----------|----------|------|-----------|
//! | `String` | raw | no | 0 | - |
//! | `bool` | bool | yes | 0 | - |
//! | `isize` | word | yes | 0 | - |
//! | `i8` `i16` `i32` | signed (`i64`) | yes | 8/16/32 | `try_from` |
//! | `i64` | signed (`i64`) | yes | 64 | - |
//! | `usize` | unsigned (`u64`) | yes | 0 | `try_from` |
//! | `u8` `u16` `u32` | unsigned (`u64`) | yes | 8/16/32 | `try_from` |
//! | `u64` | unsigned (`u64`) | yes | 64 | - |
//! | `f32` | float (`f64`) | yes | 32 | `as f32` |
//! | `f64` | float (`f64`) | yes | 64 | - |
//! | `Duration` | duration | yes | 0 | - |
//!
//! Types are matched by their written path, so `Duration`,
//! `std::time::Duration` and `core::time::Duration` all resolve, while an
//! alias such as `type Port = u16;` does not.

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;
use syn::Type;

use crate::catalog::type_path_name;

/// A supported leaf type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Primitive {
    /// `String`
    String,
    /// `bool`
    Bool,
    /// `isize`
    Isize,
    /// `i8`
    I8,
    /// `i16`
    I16,
    /// `i32`
    I32,
    /// `i64`
    I64,
    /// `usize`
    Usize,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `f32`
    F32,
    /// `f64`
    F64,
    /// `std::time::Duration`
    Duration,
}

/// How the loader turns the raw variable into a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParseOp {
    /// Use the string as is.
    Raw,
    /// `1 t T TRUE true True` or `0 f F FALSE false False`.
    Bool,
    /// Base-10 integer parsed directly at the platform word size.
    Word,
    /// Base-10 integer parsed as `i64`.
    Signed,
    /// Base-10 integer parsed as `u64`.
    Unsigned,
    /// Decimal float parsed as `f64`.
    Float,
    /// Unit-suffixed time span such as `1h30m` or `250ms`.
    Duration,
}

impl ParseOp {
    /// The type the operation produces before any narrowing.
    #[must_use]
    pub const fn parsed(self) -> Primitive {
        match self {
            Self::Raw => Primitive::String,
            Self::Bool => Primitive::Bool,
            Self::Word => Primitive::Isize,
            Self::Signed => Primitive::I64,
            Self::Unsigned => Primitive::U64,
            Self::Float => Primitive::F64,
            Self::Duration => Primitive::Duration,
        }
    }
}

/// Parser metadata for one primitive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserMetadata {
    /// The parse operation.
    pub op: ParseOp,

    /// Whether malformed input makes the operation fail.
    pub can_fail: bool,

    /// Bit width of sized numeric types, `0` otherwise.
    pub bits: u8,

    /// Target of the narrowing conversion, `None` when the parsed width
    /// already matches the field.
    pub cast: Option<Primitive>,
}

impl ParserMetadata {
    const fn new(op: ParseOp, bits: u8, cast: Option<Primitive>) -> Self {
        Self {
            op,
            can_fail: !matches!(op, ParseOp::Raw),
            bits,
            cast,
        }
    }
}

/// Written type names accepted for each primitive.
const TYPE_NAMES: &[(&str, Primitive)] = &[
    ("String", Primitive::String),
    ("std::string::String", Primitive::String),
    ("alloc::string::String", Primitive::String),
    ("bool", Primitive::Bool),
    ("isize", Primitive::Isize),
    ("i8", Primitive::I8),
    ("i16", Primitive::I16),
    ("i32", Primitive::I32),
    ("i64", Primitive::I64),
    ("usize", Primitive::Usize),
    ("u8", Primitive::U8),
    ("u16", Primitive::U16),
    ("u32", Primitive::U32),
    ("u64", Primitive::U64),
    ("f32", Primitive::F32),
    ("f64", Primitive::F64),
    ("Duration", Primitive::Duration),
    ("std::time::Duration", Primitive::Duration),
    ("core::time::Duration", Primitive::Duration),
];

impl Primitive {
    /// Every supported primitive, in table order.
    pub const ALL: [Self; 15] = [
        Self::String,
        Self::Bool,
        Self::Isize,
        Self::I8,
        Self::I16,
        Self::I32,
        Self::I64,
        Self::Usize,
        Self::U8,
        Self::U16,
        Self::U32,
        Self::U64,
        Self::F32,
        Self::F64,
        Self::Duration,
    ];

    /// Looks up a written type name such as `u16` or `std::time::Duration`.
    #[must_use]
    pub fn lookup(name: &str) -> Option<Self> {
        TYPE_NAMES
            .iter()
            .find(|(written, _)| *written == name)
            .map(|(_, primitive)| *primitive)
    }

    /// Resolves a declared field type.
    #[must_use]
    pub fn resolve(ty: &Type) -> Option<Self> {
        type_path_name(ty).and_then(|name| Self::lookup(&name))
    }

    /// The parser table row for this primitive.
    #[must_use]
    pub const fn metadata(self) -> ParserMetadata {
        use ParseOp::{Bool, Duration, Float, Raw, Signed, Unsigned, Word};

        match self {
            Self::String => ParserMetadata::new(Raw, 0, None),
            Self::Bool => ParserMetadata::new(Bool, 0, None),
            Self::Isize => ParserMetadata::new(Word, 0, None),
            Self::I8 => ParserMetadata::new(Signed, 8, Some(Self::I8)),
            Self::I16 => ParserMetadata::new(Signed, 16, Some(Self::I16)),
            Self::I32 => ParserMetadata::new(Signed, 32, Some(Self::I32)),
            Self::I64 => ParserMetadata::new(Signed, 64, None),
            Self::Usize => ParserMetadata::new(Unsigned, 0, Some(Self::Usize)),
            Self::U8 => ParserMetadata::new(Unsigned, 8, Some(Self::U8)),
            Self::U16 => ParserMetadata::new(Unsigned, 16, Some(Self::U16)),
            Self::U32 => ParserMetadata::new(Unsigned, 32, Some(Self::U32)),
            Self::U64 => ParserMetadata::new(Unsigned, 64, None),
            Self::F32 => ParserMetadata::new(Float, 32, Some(Self::F32)),
            Self::F64 => ParserMetadata::new(Float, 64, None),
            Self::Duration => ParserMetadata::new(Duration, 0, None),
        }
    }

    /// Short name for messages and documentation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Bool => "bool",
            Self::Isize => "isize",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Usize => "usize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Duration => "Duration",
        }
    }

    /// Fully qualified type tokens, usable without any imports.
    #[must_use]
    pub fn rust_type(self) -> QuoteStream {
        match self {
            Self::String => quote!(::std::string::String),
            Self::Bool => quote!(bool),
            Self::Isize => quote!(isize),
            Self::I8 => quote!(i8),
            Self::I16 => quote!(i16),
            Self::I32 => quote!(i32),
            Self::I64 => quote!(i64),
            Self::Usize => quote!(usize),
            Self::U8 => quote!(u8),
            Self::U16 => quote!(u16),
            Self::U32 => quote!(u32),
            Self::U64 => quote!(u64),
            Self::F32 => quote!(f32),
            Self::F64 => quote!(f64),
            Self::Duration => quote!(::std::time::Duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_golden() {
        use ParseOp::*;

        let expected: &[(Primitive, ParseOp, bool, u8, Option<Primitive>)] = &[
            (Primitive::String, Raw, false, 0, None),
            (Primitive::Bool, Bool, true, 0, None),
            (Primitive::Isize, Word, true, 0, None),
            (Primitive::I8, Signed, true, 8, Some(Primitive::I8)),
            (Primitive::I16, Signed, true, 16, Some(Primitive::I16)),
            (Primitive::I32, Signed, true, 32, Some(Primitive::I32)),
            (Primitive::I64, Signed, true, 64, None),
            (Primitive::Usize, Unsigned, true, 0, Some(Primitive::Usize)),
            (Primitive::U8, Unsigned, true, 8, Some(Primitive::U8)),
            (Primitive::U16, Unsigned, true, 16, Some(Primitive::U16)),
            (Primitive::U32, Unsigned, true, 32, Some(Primitive::U32)),
            (Primitive::U64, Unsigned, true, 64, None),
            (Primitive::F32, Float, true, 32, Some(Primitive::F32)),
            (Primitive::F64, Float, true, 64, None),
            (Primitive::Duration, Duration, true, 0, None),
        ];

        assert_eq!(expected.len(), Primitive::ALL.len());
        for (primitive, op, can_fail, bits, cast) in expected {
            let meta = primitive.metadata();
            assert_eq!(meta.op, *op, "{primitive:?}");
            assert_eq!(meta.can_fail, *can_fail, "{primitive:?}");
            assert_eq!(meta.bits, *bits, "{primitive:?}");
            assert_eq!(meta.cast, *cast, "{primitive:?}");
        }
    }

    #[test]
    fn test_every_primitive_resolves_by_name() {
        for primitive in Primitive::ALL {
            assert_eq!(Primitive::lookup(primitive.name()), Some(primitive));
        }
    }

    #[test]
    fn test_resolve_declared_types() {
        let resolve = |src: &str| Primitive::resolve(&syn::parse_str::<Type>(src).unwrap());

        assert_eq!(resolve("std::time::Duration"), Some(Primitive::Duration));
        assert_eq!(resolve("::core::time::Duration"), Some(Primitive::Duration));
        assert_eq!(resolve("std::string::String"), Some(Primitive::String));
        assert_eq!(resolve("time::Duration"), None);
        assert_eq!(resolve("Option<String>"), None);
        assert_eq!(resolve("char"), None);
        assert_eq!(resolve("i128"), None);
    }

    #[test]
    fn test_narrowing_never_widens() {
        for primitive in Primitive::ALL {
            let meta = primitive.metadata();
            if let Some(cast) = meta.cast {
                assert_eq!(cast, primitive);
                assert_ne!(meta.op.parsed(), primitive);
            } else {
                assert_eq!(meta.op.parsed(), primitive, "{primitive:?}");
            }
        }
    }
}
