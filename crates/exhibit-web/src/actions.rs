// Pure decoding of the data attributes read by delegated listeners; no DOM
// access so they can be exercised host-side.

use exhibit_core::LetterSelector;

pub const DELETE_POST_ATTR: &str = "data-delete-post";
pub const DELETE_COMMENT_ATTR: &str = "data-delete-comment";
pub const COMMENT_FORM_ATTR: &str = "data-comment-for";
pub const LETTER_ATTR: &str = "data-letter";
pub const SLUG_ATTR: &str = "data-slug";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForumAction {
    DeletePost(u32),
    DeleteComment(u32),
}

#[inline]
pub fn parse_id(raw: Option<&str>) -> Option<u32> {
    raw?.trim().parse().ok()
}

/// Decodes a delete button from its two possible attributes.
pub fn forum_action(delete_post: Option<&str>, delete_comment: Option<&str>) -> Option<ForumAction> {
    parse_id(delete_post)
        .map(ForumAction::DeletePost)
        .or_else(|| parse_id(delete_comment).map(ForumAction::DeleteComment))
}

pub fn letter_for_button(raw: Option<&str>) -> Option<LetterSelector> {
    raw?.parse().ok()
}
