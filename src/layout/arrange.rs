//! Sequence helpers shared by the ordering stages.

/// Arrange a descending sequence so the first item sits in the centre and the
/// rest alternate left and right of it, falling away on both sides.
pub fn mountain_sort<T: Clone>(descending: &[T]) -> Vec<T> {
    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut centre = Vec::new();
    for (i, item) in descending.iter().enumerate() {
        if i == 0 {
            centre.push(item.clone());
        } else if i % 2 == 1 {
            left.push(item.clone());
        } else {
            right.push(item.clone());
        }
    }
    left.reverse();
    left.into_iter().chain(centre).chain(right).collect()
}

/// Splice `insert` into `target` at `floor(len / 2)`.
pub fn insert_in_middle<T: Clone>(target: &[T], insert: &[T]) -> Vec<T> {
    let middle = target.len() / 2;
    let mut result = Vec::with_capacity(target.len() + insert.len());
    result.extend_from_slice(&target[..middle]);
    result.extend_from_slice(insert);
    result.extend_from_slice(&target[middle..]);
    result
}

/// Spread the shorter sequence evenly through the longer one.
///
/// With equal lengths `a` is treated as the longer input. An empty shorter
/// input returns the longer one unchanged.
pub fn interleave_balanced<T: Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let (longer, shorter) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if shorter.is_empty() {
        return longer.to_vec();
    }

    let total = longer.len() + shorter.len();
    let interval = total / shorter.len();
    let mut result = Vec::with_capacity(total);
    let (mut i, mut j) = (0, 0);
    for k in 0..total {
        if k % interval == interval - 1 && j < shorter.len() {
            result.push(shorter[j].clone());
            j += 1;
        } else if i < longer.len() {
            result.push(longer[i].clone());
            i += 1;
        }
    }
    result.extend_from_slice(&longer[i..]);
    result.extend_from_slice(&shorter[j..]);
    result
}

#[cfg(test)]
#[path = "../../tests/rust/test_arrange.rs"]
mod tests;
