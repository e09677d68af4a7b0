//! Annotation parsing.
//!
//! An annotation is `<mask type><argument>` with no separator, e.g.
//! `random1000` or `random100000.4`. The mask type is found by prefix match
//! against the names registered for a category.

/// A parsed annotation borrowed from the original string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Annotation<'a> {
    mask_type: &'a str,
    argument: &'a str,
}

impl<'a> Annotation<'a> {
    /// The matched mask type.
    pub fn mask_type(&self) -> &'a str {
        self.mask_type
    }

    /// Everything after the mask type, possibly empty.
    pub fn argument(&self) -> &'a str {
        self.argument
    }
}

/// Splits `annotation` against a set of candidate mask types.
///
/// Returns `None` for an empty annotation or when no candidate is a prefix of
/// it. When several candidates match, the longest one wins, so `hash` and
/// `hashmd5` can coexist.
pub fn parse_annotation<'a, 'b, I>(annotation: &'a str, mask_types: I) -> Option<Annotation<'a>>
where
    I: IntoIterator<Item = &'b str>,
{
    if annotation.is_empty() {
        return None;
    }
    let len = mask_types
        .into_iter()
        .filter(|mask_type| annotation.starts_with(mask_type))
        .map(str::len)
        .max()?;
    let (mask_type, argument) = annotation.split_at(len);
    Some(Annotation {
        mask_type,
        argument,
    })
}
