use crate::schema::Column;

fn distance(x: i32, anchor: i32) -> i64 {
    (i64::from(x) - i64::from(anchor)).abs()
}

/// Nearest anchor to `x`. Equidistant anchors resolve to the one listed first.
#[must_use]
pub fn nearest_anchor(x: i32, anchors: &[i32]) -> Option<i32> {
    nearest_by(x, anchors, |anchor| *anchor).copied()
}

#[must_use]
pub fn nearest_column<F>(x: i32, columns: &[Column<F>]) -> Option<&Column<F>> {
    nearest_by(x, columns, |column| column.anchor)
}

fn nearest_by<T>(x: i32, items: &[T], anchor: impl Fn(&T) -> i32) -> Option<&T> {
    let (first, rest) = items.split_first()?;
    let mut best = first;
    for item in rest {
        if distance(x, anchor(item)) < distance(x, anchor(best)) {
            best = item;
        }
    }
    Some(best)
}
