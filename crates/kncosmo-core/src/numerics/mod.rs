/// Evenly spaced samples over the closed interval `[start, end]`.
///
/// A single sample collapses to `[start]`; the final sample is pinned to `end`
/// so the grid never drifts past the interval through accumulated rounding.
pub fn linear_grid(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / ((count - 1) as f64);
            let mut grid = (0..count)
                .map(|index| start + step * (index as f64))
                .collect::<Vec<_>>();
            if let Some(last) = grid.last_mut() {
                *last = end;
            }
            grid
        }
    }
}

/// Centres of `count` equal-width bins spanning `[start, end]`.
pub fn bin_centers(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }

    let width = (end - start) / (count as f64);
    (0..count)
        .map(|index| start + width * (index as f64 + 0.5))
        .collect()
}
