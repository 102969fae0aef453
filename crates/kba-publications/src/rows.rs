use crate::model::PositionedFragment;

pub const ROW_DEVIATION: u32 = 2;

/// Sequences shorter than `min_fragments` are not a table and yield no rows.
#[must_use]
pub fn cluster_rows(
    fragments: Vec<PositionedFragment>,
    min_fragments: usize,
) -> Vec<Vec<PositionedFragment>> {
    if fragments.is_empty() || fragments.len() < min_fragments {
        return Vec::new();
    }

    let mut rows = Vec::new();
    let mut current = Vec::new();
    let mut fragments = fragments.into_iter().peekable();

    while let Some(fragment) = fragments.next() {
        let closes = fragments
            .peek()
            .is_none_or(|next| next.y.abs_diff(fragment.y) > ROW_DEVIATION);
        current.push(fragment);
        if closes {
            rows.push(std::mem::take(&mut current));
        }
    }

    rows
}
