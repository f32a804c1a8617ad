//! Button label wrapping
//!
//! Labels are drawn on at most two lines. The first line is the longest
//! run of whole words that fits the available width; everything after it
//! goes on the second line unmeasured. A first word that is already too
//! wide is kept on line one anyway and overflows the button.

/// Split `label` after its `count`-th space.
///
/// Returns the text before that space and the text after it, or the whole
/// label and `None` when it has fewer than `count` spaces.
fn split_at_space(label: &str, count: usize) -> (&str, Option<&str>) {
    match label.match_indices(' ').nth(count.saturating_sub(1)) {
        Some((index, _)) if count > 0 => (&label[..index], Some(&label[index + 1..])),
        _ => (label, None),
    }
}

/// Wrap `label` into one or two lines no wider than `max_width`, using
/// `measure` to get the pixel width of a candidate first line.
pub fn wrap_label<'a>(
    label: &'a str,
    max_width: u32,
    mut measure: impl FnMut(&str) -> u32,
) -> (&'a str, Option<&'a str>) {
    let mut count = 1;
    loop {
        let (first, rest) = split_at_space(label, count);
        let width = measure(first);

        if width > max_width && count == 1 {
            return (first, rest);
        }
        if width < max_width && rest.is_some() {
            count += 1;
            continue;
        }
        if width > max_width {
            return split_at_space(label, count - 1);
        }
        return (first, rest);
    }
}
