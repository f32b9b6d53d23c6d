/// Down-sample `items` to at most `stop_count` evenly spaced entries.
///
/// - `stop_count >= len`: everything, unchanged
/// - `stop_count <= 0`: nothing
/// - otherwise exactly `stop_count` entries, the last of which is always the
///   final input entry
///
/// The middle `stop_count - 1` picks come from `floor(n * stride)` over the
/// input without its last entry. Picks are not de-duplicated.
pub fn trim<T: Clone>(items: &[T], stop_count: i64) -> Vec<T> {
    if stop_count >= items.len() as i64 {
        return items.to_vec();
    }
    if stop_count <= 0 {
        return Vec::new();
    }

    // 0 < stop_count < len, so there is a last item
    let (last, body) = match items.split_last() {
        Some(split) => split,
        None => return Vec::new(),
    };

    let middle_slots = (stop_count - 1) as usize;
    let mut result = Vec::with_capacity(stop_count as usize);

    if middle_slots > 0 {
        let stride = body.len() as f64 / middle_slots as f64;
        for n in 0..middle_slots {
            let index = (n as f64 * stride).floor() as usize;
            result.push(body[index.min(body.len() - 1)].clone());
        }
    }

    result.push(last.clone());
    result
}
