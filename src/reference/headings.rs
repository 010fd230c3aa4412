//! Object-literal heading demotion.
//!
//! The markdown theme renders members of an object-literal declaration at
//! the same heading level as the declaration itself. On a single page that
//! flattens the outline, so members between an object-literal marker and
//! the next `___` divider are pushed down one level.

/// Substring marking an object-literal declaration heading.
pub const OBJECT_LITERAL_MARKER: &str = "### ▪ **";

/// Substring marking the end of a member block.
pub const DIVIDER: &str = "___";

const HEADING: &str = "###";

/// Prepends `#` to every `###` heading inside an object-literal block.
///
/// The marker line itself is inside the block. A line holding both the
/// marker and the divider closes the block before it is examined.
#[must_use]
pub fn demote_object_literal_headings(docs: &str) -> String {
    let mut in_object_literal = false;
    docs.split('\n')
        .map(|line| {
            if line.contains(OBJECT_LITERAL_MARKER) {
                in_object_literal = true;
            }
            if line.contains(DIVIDER) {
                in_object_literal = false;
            }
            if in_object_literal && line.contains(HEADING) {
                format!("#{line}")
            } else {
                line.to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
