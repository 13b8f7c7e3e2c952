//! Private parse helpers emitted into the loader module.
//!
//! Integers and floats parse with `str::parse`, but booleans and durations
//! accept spellings the standard library does not, so the module carries its
//! own parsers. Each helper is only emitted when some leaf needs it.
//!
//! - `parse_bool` accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
//! - `parse_duration` accepts a sequence of decimal numbers, each with an
//!   optional fraction and a unit (`ns`, `us`, `µs`, `ms`, `s`, `m`, `h`),
//!   such as `300ms` or `1h15m30.5s`. A bare `0` is zero. A leading `-` only
//!   parses when the span is zero, as in `-0s`, since
//!   [`Duration`](std::time::Duration) cannot hold negative spans.

use proc_macro2::TokenStream as QuoteStream;
use quote::quote;

use super::RenderContext;
use crate::resolve::ParseOp;

/// Emits the helpers required by the context's leaves.
pub fn generate_helpers(ctx: &RenderContext<'_>) -> QuoteStream {
    let needs = |op: ParseOp| ctx.leaves.iter().any(|leaf| leaf.parser.op == op);

    let bool_helper = needs(ParseOp::Bool).then(|| parse_bool(&ctx.cfg));
    let duration_helper = needs(ParseOp::Duration).then(|| parse_duration(&ctx.cfg));

    quote! {
        #bool_helper
        #duration_helper
    }
}

fn parse_bool(cfg: &QuoteStream) -> QuoteStream {
    quote! {
        #cfg
        fn parse_bool(raw: &str) -> ::std::option::Option<bool> {
            match raw {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
                _ => None,
            }
        }
    }
}

fn parse_duration(cfg: &QuoteStream) -> QuoteStream {
    quote! {
        #cfg
        fn parse_duration(raw: &str) -> ::std::option::Option<::std::time::Duration> {
            let negative = raw.starts_with('-');
            let mut rest = raw.strip_prefix(['+', '-']).unwrap_or(raw);
            if rest == "0" {
                return Some(::std::time::Duration::ZERO);
            }
            if rest.is_empty() {
                return None;
            }

            let digits = |s: &str| s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
            let mut total: u128 = 0;

            while !rest.is_empty() {
                let (whole, tail) = rest.split_at(digits(rest));
                let (fraction, tail) = match tail.strip_prefix('.') {
                    Some(after) => after.split_at(digits(after)),
                    None => ("", tail),
                };
                if whole.is_empty() && fraction.is_empty() {
                    return None;
                }

                let unit_len = tail
                    .find(|c: char| c == '.' || c.is_ascii_digit())
                    .unwrap_or(tail.len());
                let (unit, tail) = tail.split_at(unit_len);
                let scale: u128 = match unit {
                    "ns" => 1,
                    "us" | "\u{b5}s" | "\u{3bc}s" => 1_000,
                    "ms" => 1_000_000,
                    "s" => 1_000_000_000,
                    "m" => 60_000_000_000,
                    "h" => 3_600_000_000_000,
                    _ => return None,
                };

                if !whole.is_empty() {
                    let whole: u128 = whole.parse().ok()?;
                    total = total.checked_add(whole.checked_mul(scale)?)?;
                }

                let mut numerator: u128 = 0;
                let mut denominator: u128 = 1;
                for digit in fraction.bytes() {
                    if denominator >= 1_000_000_000_000_000_000 {
                        break;
                    }
                    numerator = numerator * 10 + u128::from(digit - b'0');
                    denominator *= 10;
                }
                total = total.checked_add(numerator * scale / denominator)?;

                rest = tail;
            }

            if negative && total != 0 {
                return None;
            }
            let nanos = <u64 as ::std::convert::TryFrom<u128>>::try_from(total).ok()?;
            Some(::std::time::Duration::from_nanos(nanos))
        }
    }
}
