use crate::HeadingRecord;
use std::borrow::Cow;

/// Merge real and synthetic headings into one list ordered by start line.
///
/// Real headings come first on equal lines. Neither input is modified; when
/// there is nothing to merge the real list is borrowed as-is.
pub fn merge_headings<'a>(
    real: &'a [HeadingRecord],
    synthetic: Option<&[HeadingRecord]>,
) -> Cow<'a, [HeadingRecord]> {
    let Some(synthetic) = synthetic.filter(|records| !records.is_empty()) else {
        return Cow::Borrowed(real);
    };

    let mut merged = Vec::with_capacity(real.len() + synthetic.len());
    merged.extend_from_slice(real);
    merged.extend_from_slice(synthetic);
    // `sort_by_key` is stable, which keeps real before synthetic on ties.
    merged.sort_by_key(|heading| heading.start.line);
    Cow::Owned(merged)
}
