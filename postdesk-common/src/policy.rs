//! Rules applied to a post before it is written.

use crate::model::{Categorized, HasBody};

/// Bodies longer than this many characters get shortened.
pub const BODY_MAX_LEN: usize = 20;
/// Number of characters kept from a shortened body.
pub const BODY_TRUNCATED_LEN: usize = 9;
pub const ELLIPSIS: &str = "...";

/// Shortens an overlong body to its first [`BODY_TRUNCATED_LEN`] characters
/// followed by [`ELLIPSIS`].
///
/// Lengths are counted in `char`s so multi-byte text is never split inside a
/// code point. Returns whether the body was changed.
pub fn truncate_body<T: HasBody + ?Sized>(entity: &mut T) -> bool {
    let body = entity.body();
    if body.chars().count() <= BODY_MAX_LEN {
        return false;
    }

    let mut shortened: String = body.chars().take(BODY_TRUNCATED_LEN).collect();
    shortened.push_str(ELLIPSIS);
    entity.set_body(shortened);

    true
}

/// Fixed label for a post type code, if the code has one.
#[must_use]
pub fn category_for(type_code: i32) -> Option<&'static str> {
    match type_code {
        1 => Some("Entertainment"),
        2 => Some("Politics"),
        3 => Some("Soccer"),
        _ => None,
    }
}

/// Overwrites the category with the label for the entity's type code.
///
/// Unmapped codes keep whatever category the caller supplied.
pub fn apply_category<T: Categorized + ?Sized>(entity: &mut T) {
    if let Some(label) = category_for(entity.type_code())
        && entity.category() != label
    {
        entity.set_category(label.to_owned());
    }
}
