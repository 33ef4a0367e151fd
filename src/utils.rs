//! Closed-form counts for graph dimensions.
//!
//! These are handy for pre-sizing buffers and for checking listings. Each one
//! returns `None` when the count does not fit in `usize`.

/// Number of nodes in a `down_cnt × right_cnt` grid.
#[inline]
pub fn node_count(down_cnt: usize, right_cnt: usize) -> Option<usize> {
    down_cnt.checked_mul(right_cnt)
}

/// Number of down, right and diagonal edges in a `down_cnt × right_cnt` grid.
pub fn grid_edge_count(down_cnt: usize, right_cnt: usize) -> Option<usize> {
    if down_cnt == 0 || right_cnt == 0 {
        return Some(0);
    }
    let downs = (down_cnt - 1).checked_mul(right_cnt)?;
    let rights = down_cnt.checked_mul(right_cnt - 1)?;
    let diagonals = (down_cnt - 1).checked_mul(right_cnt - 1)?;
    downs.checked_add(rights)?.checked_add(diagonals)
}

/// Number of edges a fitting graph lists: the grid edges plus
/// `down_cnt - 1` entry and `down_cnt - 1` exit free rides.
pub fn fitting_edge_count(down_cnt: usize, right_cnt: usize) -> Option<usize> {
    if down_cnt == 0 || right_cnt == 0 {
        return Some(0);
    }
    let free_rides = (down_cnt - 1).checked_mul(2)?;
    grid_edge_count(down_cnt, right_cnt)?.checked_add(free_rides)
}
