//! Passthrough `Maskable` implementations for types with no maskable leaves.
//!
//! These are copied verbatim. A `zero` any-type transform still replaces
//! them with their zero value. `NonZero*` types have no zero, so theirs is `1`.

use std::{
    cmp::Ordering,
    marker::PhantomData,
    num::{
        NonZeroI8, NonZeroI16, NonZeroI32, NonZeroI64, NonZeroI128, NonZeroIsize, NonZeroU8,
        NonZeroU16, NonZeroU32, NonZeroU64, NonZeroU128, NonZeroUsize,
    },
    time::Duration,
};

use super::impl_maskable_passthrough;
use crate::engine::{
    error::MaskError,
    masker::Masker,
    traits::{Maskable, Shape},
};

// =============================================================================
// Scalars without a category
// =============================================================================

impl_maskable_passthrough!(bool);
impl_maskable_passthrough!(char, '\0');
impl_maskable_passthrough!(());
impl_maskable_passthrough!(i128);
impl_maskable_passthrough!(u128);

// =============================================================================
// NonZero integers (zero is the value closest to zero: 1)
// =============================================================================

macro_rules! nonzero_one {
    ($ty:ty) => {
        const {
            match <$ty>::new(1) {
                Some(one) => one,
                None => unreachable!(),
            }
        }
    };
}

impl_maskable_passthrough!(NonZeroI8, nonzero_one!(NonZeroI8));
impl_maskable_passthrough!(NonZeroI16, nonzero_one!(NonZeroI16));
impl_maskable_passthrough!(NonZeroI32, nonzero_one!(NonZeroI32));
impl_maskable_passthrough!(NonZeroI64, nonzero_one!(NonZeroI64));
impl_maskable_passthrough!(NonZeroI128, nonzero_one!(NonZeroI128));
impl_maskable_passthrough!(NonZeroIsize, nonzero_one!(NonZeroIsize));
impl_maskable_passthrough!(NonZeroU8, NonZeroU8::MIN);
impl_maskable_passthrough!(NonZeroU16, NonZeroU16::MIN);
impl_maskable_passthrough!(NonZeroU32, NonZeroU32::MIN);
impl_maskable_passthrough!(NonZeroU64, NonZeroU64::MIN);
impl_maskable_passthrough!(NonZeroU128, NonZeroU128::MIN);
impl_maskable_passthrough!(NonZeroUsize, NonZeroUsize::MIN);

// =============================================================================
// Other std types
// =============================================================================

impl_maskable_passthrough!(Duration);
impl_maskable_passthrough!(Ordering, Ordering::Equal);

impl<T: 'static> Maskable for PhantomData<T> {
    const SHAPE: Shape = Shape::Opaque;

    fn mask_with(&self, _masker: &Masker, _annotation: &str) -> Result<Self, MaskError> {
        Ok(PhantomData)
    }

    fn zero_value() -> Self {
        PhantomData
    }

    fn is_zero(&self) -> bool {
        true
    }
}

// =============================================================================
// Date/time passthrough implementations (feature-gated)
// =============================================================================

#[cfg(feature = "chrono")]
mod chrono_passthrough {
    use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

    use super::impl_maskable_passthrough;

    impl_maskable_passthrough!(DateTime<Utc>);
    impl_maskable_passthrough!(NaiveDateTime);
    impl_maskable_passthrough!(NaiveDate);
    impl_maskable_passthrough!(NaiveTime, NaiveTime::MIN);
    impl_maskable_passthrough!(TimeDelta, TimeDelta::zero());
}

#[cfg(feature = "time")]
mod time_passthrough {
    use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

    use super::impl_maskable_passthrough;

    impl_maskable_passthrough!(OffsetDateTime, OffsetDateTime::UNIX_EPOCH);
    impl_maskable_passthrough!(PrimitiveDateTime, PrimitiveDateTime::MIN);
    impl_maskable_passthrough!(Date, Date::MIN);
    impl_maskable_passthrough!(Time, Time::MIDNIGHT);
    impl_maskable_passthrough!(Duration, Duration::ZERO);
    impl_maskable_passthrough!(UtcOffset, UtcOffset::UTC);
}

// =============================================================================
// UUID passthrough implementation (feature-gated)
// =============================================================================

#[cfg(feature = "uuid")]
mod uuid_passthrough {
    use uuid::Uuid;

    use super::impl_maskable_passthrough;

    impl_maskable_passthrough!(Uuid, Uuid::nil());
}
