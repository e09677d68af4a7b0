//! Built-in transforms registered by [`Masker::new`](crate::Masker::new).
//!
//! | Mask type | Category       | Argument         | Result                                   |
//! |-----------|----------------|------------------|------------------------------------------|
//! | `filled`  | text           | optional count   | mask characters, one per input character |
//! | `fixed`   | text           | none             | exactly eight mask characters            |
//! | `hash`    | text           | none             | lowercase hex SHA-1 of the UTF-8 bytes   |
//! | `random`  | int, uint      | bound `N > 0`    | uniform integer in `[0, N)`              |
//! | `random`  | float          | `I` or `I.D`     | uniform in `[0, I)` cut to `D` digits    |
//! | `zero`    | any            | none             | the value's zero                         |

use std::any::Any;

use rand::Rng;
use sha1::{Digest, Sha1};

use super::registry::{AnyValue, TransformContext};
use crate::TransformError;

/// Fills with mask characters.
pub const MASK_TYPE_FILLED: &str = "filled";
/// Eight mask characters regardless of input.
pub const MASK_TYPE_FIXED: &str = "fixed";
/// SHA-1 digest.
pub const MASK_TYPE_HASH: &str = "hash";
/// Bounded pseudo-random replacement.
pub const MASK_TYPE_RANDOM: &str = "random";
/// Zero-value replacement for any shape.
pub const MASK_TYPE_ZERO: &str = "zero";

/// Default mask character.
pub const DEFAULT_MASK_CHAR: &str = "*";

/// Number of mask characters produced by `fixed`.
pub const FIXED_LENGTH: usize = 8;

/// Largest explicit count accepted by `filledN`.
pub const MAX_FILLED_COUNT: usize = 1 << 20;

// =============================================================================
// Text
// =============================================================================

/// `filled[N]`: `N` mask characters, or one per input character when `N` is absent.
pub fn filled(ctx: &TransformContext<'_>, arg: &str, value: &str) -> Result<String, TransformError> {
    let count = if arg.is_empty() {
        value.chars().count()
    } else {
        let count = arg.parse::<usize>().map_err(|err| {
            TransformError::invalid_argument(arg, format!("expected a character count: {err}"))
        })?;
        if count > MAX_FILLED_COUNT {
            return Err(TransformError::invalid_argument(
                arg,
                format!("count too large (at most {MAX_FILLED_COUNT})"),
            ));
        }
        count
    };
    if count.checked_mul(ctx.mask_char().len()).is_none_or(|len| len > isize::MAX.unsigned_abs()) {
        return Err(TransformError::invalid_argument(arg, "count too large"));
    }
    Ok(ctx.mask_char().repeat(count))
}

/// `fixed`: always [`FIXED_LENGTH`] mask characters.
pub fn fixed(ctx: &TransformContext<'_>, _arg: &str, _value: &str) -> Result<String, TransformError> {
    Ok(ctx.mask_char().repeat(FIXED_LENGTH))
}

/// `hash`: lowercase hex SHA-1 of the UTF-8 encoding.
pub fn hash(_ctx: &TransformContext<'_>, _arg: &str, value: &str) -> Result<String, TransformError> {
    let mut hasher = Sha1::new();
    hasher.update(value.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

// =============================================================================
// Numbers
// =============================================================================

/// `randomN` for signed integers: uniform in `[0, N)`.
pub fn random_int(ctx: &TransformContext<'_>, arg: &str, _value: i64) -> Result<i64, TransformError> {
    let bound = arg.parse::<i64>().map_err(|err| {
        TransformError::invalid_argument(arg, format!("expected an integer bound: {err}"))
    })?;
    if bound <= 0 {
        return Err(TransformError::invalid_argument(arg, "bound must be positive"));
    }
    Ok(ctx.with_rng(|rng| rng.gen_range(0..bound)))
}

/// `randomN` for unsigned integers: uniform in `[0, N)`.
pub fn random_uint(ctx: &TransformContext<'_>, arg: &str, _value: u64) -> Result<u64, TransformError> {
    let bound = arg.parse::<u64>().map_err(|err| {
        TransformError::invalid_argument(arg, format!("expected an integer bound: {err}"))
    })?;
    if bound == 0 {
        return Err(TransformError::invalid_argument(arg, "bound must be positive"));
    }
    Ok(ctx.with_rng(|rng| rng.gen_range(0..bound)))
}

/// `randomI.D` for floats: uniform in `[0, I)`, truncated to `D` decimal digits.
///
/// `D` may not exceed [`f64::DIGITS`].
#[allow(clippy::cast_precision_loss, clippy::cast_possible_wrap)]
pub fn random_float(ctx: &TransformContext<'_>, arg: &str, _value: f64) -> Result<f64, TransformError> {
    let mut parts = arg.split('.');
    let integer = parts.next().unwrap_or_default();
    let digits = parts.next();
    if parts.next().is_some() {
        return Err(TransformError::invalid_argument(arg, "expected `I` or `I.D`"));
    }

    let bound = integer.parse::<u64>().map_err(|err| {
        TransformError::invalid_argument(arg, format!("expected an integer part: {err}"))
    })?;
    let digits = match digits {
        Some(digits) => digits.parse::<u32>().map_err(|err| {
            TransformError::invalid_argument(arg, format!("expected a digit count: {err}"))
        })?,
        None => 0,
    };
    if digits > f64::DIGITS {
        return Err(TransformError::invalid_argument(
            arg,
            format!("digit count must be between 0 and {}", f64::DIGITS),
        ));
    }
    let scale = 10f64.powi(digits as i32);

    let sample: f64 = ctx.with_rng(|rng| rng.r#gen());
    let scaled = sample * bound as f64 * scale;
    if !scaled.is_finite() {
        return Err(TransformError::invalid_argument(arg, "bound and digit count overflow"));
    }
    Ok(scaled.trunc() / scale)
}

// =============================================================================
// Any
// =============================================================================

/// `zero`: the zero value of whatever type is being masked.
pub fn zero(
    _ctx: &TransformContext<'_>,
    _arg: &str,
    value: AnyValue<'_>,
) -> Result<Box<dyn Any>, TransformError> {
    Ok(value.zero())
}
