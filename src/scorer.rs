//! Pluggable edge scoring.
//!
//! A [`Scorer`] turns the sequence elements an edge consumes into a weight.
//! Diagonal edges consume one element from each sequence, down edges only one
//! from the down sequence and right edges only one from the right sequence.
//! Scorers must be pure: the same inputs always give the same weight.

/// Weight of an edge from the elements it consumes.
///
/// `ctx` carries the edge being scored. At most one of `down` / `right` is
/// `None` for any grid edge.
pub trait Scorer<C, D, R, W> {
    fn score(&self, ctx: Option<&C>, down: Option<&D>, right: Option<&R>) -> W;
}

impl<C, D, R, W, F> Scorer<C, D, R, W> for F
where
    F: Fn(Option<&C>, Option<&D>, Option<&R>) -> W,
{
    #[inline]
    fn score(&self, ctx: Option<&C>, down: Option<&D>, right: Option<&R>) -> W {
        self(ctx, down, right)
    }
}

/// Fixed weights for match, mismatch and each kind of gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimpleScorer<W> {
    pub match_weight: W,
    pub mismatch_weight: W,
    /// Right-only move: the down element is missing.
    pub down_missing_weight: W,
    /// Down-only move: the right element is missing.
    pub right_missing_weight: W,
    pub both_missing_weight: W,
}

impl<W: Copy> SimpleScorer<W> {
    /// Symmetric scorer: one weight for every gap.
    pub fn new(match_weight: W, mismatch_weight: W, gap_weight: W) -> Self {
        Self {
            match_weight,
            mismatch_weight,
            down_missing_weight: gap_weight,
            right_missing_weight: gap_weight,
            both_missing_weight: gap_weight,
        }
    }

    /// Different weights for gaps in the down and in the right sequence.
    ///
    /// No grid edge leaves both elements out, so `both_missing_weight` only
    /// matters to callers scoring by hand; it is set to `down_gap_weight`.
    /// Assign the field directly to choose another value.
    pub fn with_asymmetric_gaps(
        match_weight: W,
        mismatch_weight: W,
        down_gap_weight: W,
        right_gap_weight: W,
    ) -> Self {
        Self {
            match_weight,
            mismatch_weight,
            down_missing_weight: down_gap_weight,
            right_missing_weight: right_gap_weight,
            both_missing_weight: down_gap_weight,
        }
    }
}

impl<C, E: PartialEq, W: Copy> Scorer<C, E, E, W> for SimpleScorer<W> {
    fn score(&self, _ctx: Option<&C>, down: Option<&E>, right: Option<&E>) -> W {
        match (down, right) {
            (Some(d), Some(r)) if d == r => self.match_weight,
            (Some(_), Some(_)) => self.mismatch_weight,
            (None, Some(_)) => self.down_missing_weight,
            (Some(_), None) => self.right_missing_weight,
            (None, None) => self.both_missing_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_scorer_cases() {
        let s = SimpleScorer::new(5.0, -4.0, -1.0);
        let score = |d: Option<&u8>, r: Option<&u8>| Scorer::<(), u8, u8, f64>::score(&s, None, d, r);
        assert_eq!(score(Some(&b'A'), Some(&b'A')), 5.0);
        assert_eq!(score(Some(&b'A'), Some(&b'C')), -4.0);
        assert_eq!(score(Some(&b'A'), None), -1.0);
        assert_eq!(score(None, Some(&b'A')), -1.0);
    }

    #[test]
    fn asymmetric_gaps() {
        // gap in the down sequence costs -2, gap in the right sequence -3
        let s = SimpleScorer::with_asymmetric_gaps(1, -1, -2, -3);
        let score = |d: Option<&char>, r: Option<&char>| Scorer::<(), char, char, i32>::score(&s, None, d, r);
        // right-only move: down element missing, so a gap in the down sequence
        assert_eq!(score(None, Some(&'x')), -2);
        // down-only move: right element missing
        assert_eq!(score(Some(&'x'), None), -3);
        assert_eq!(score(None, None), -2);
        assert_eq!(s.both_missing_weight, s.down_missing_weight);
    }

    #[test]
    fn closures_are_scorers() {
        let by_len = |_: Option<&()>, d: Option<&String>, r: Option<&String>| -> usize {
            d.map_or(0, String::len) + r.map_or(0, String::len)
        };
        let a = String::from("abc");
        let b = String::from("de");
        assert_eq!(by_len.score(None, Some(&a), Some(&b)), 5);
        assert_eq!(by_len.score(None, None, Some(&b)), 2);
    }
}
