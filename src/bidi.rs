//! Lazy, restartable bidirectional sequences over stepped state.
//!
//! A [`Cursor`] is any small piece of state that can read the value at its
//! position and step one position forwards or backwards. Wrapping a begin and
//! an end cursor in a [`BidiView`] gives a sequence that can be iterated from
//! either side, any number of times, without materialising anything.
//!
//! ```
//! use fitting_align::bidi::{BidiView, Cursor};
//!
//! #[derive(Clone, PartialEq)]
//! struct Squares(u32);
//!
//! impl Cursor for Squares {
//!     type Item = u32;
//!     fn value(&self) -> u32 { self.0 * self.0 }
//!     fn to_next(&mut self) { self.0 += 1 }
//!     fn to_prev(&mut self) { self.0 -= 1 }
//! }
//!
//! let view = BidiView::new(Squares(1), Squares(4));
//! assert_eq!(view.iter().collect::<Vec<_>>(), vec![1, 4, 9]);
//! assert_eq!(view.iter().rev().collect::<Vec<_>>(), vec![9, 4, 1]);
//! ```

use std::iter::FusedIterator;

/// Stepped state that can be read and moved in both directions.
///
/// Two cursors denote the same position exactly when they compare equal;
/// iteration over a [`BidiView`] ends when its front and back cursors meet.
pub trait Cursor: Clone + PartialEq {
    type Item;

    /// Value at the current position. Only called on positions before `end`.
    fn value(&self) -> Self::Item;

    /// Step forward one position. Stepping past `end` is a logic error.
    fn to_next(&mut self);

    /// Step back one position. Stepping before `begin` is a logic error.
    fn to_prev(&mut self);
}

/// Half-open `[begin, end)` range of cursor positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidiView<C> {
    begin: C,
    end: C,
}

impl<C: Cursor> BidiView<C> {
    pub fn new(begin: C, end: C) -> Self {
        Self { begin, end }
    }

    /// Fresh iterator starting at `begin`; the view itself is never consumed.
    pub fn iter(&self) -> BidiIter<C> {
        BidiIter {
            front: self.begin.clone(),
            back: self.end.clone(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }
}

impl<C: Cursor> IntoIterator for BidiView<C> {
    type Item = C::Item;
    type IntoIter = BidiIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        BidiIter {
            front: self.begin,
            back: self.end,
        }
    }
}

impl<'a, C: Cursor> IntoIterator for &'a BidiView<C> {
    type Item = C::Item;
    type IntoIter = BidiIter<C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator produced by a [`BidiView`].
#[derive(Debug, Clone)]
pub struct BidiIter<C> {
    front: C,
    back: C,
}

impl<C: Cursor> Iterator for BidiIter<C> {
    type Item = C::Item;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        let value = self.front.value();
        self.front.to_next();
        Some(value)
    }
}

impl<C: Cursor> DoubleEndedIterator for BidiIter<C> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front == self.back {
            return None;
        }
        self.back.to_prev();
        Some(self.back.value())
    }
}

impl<C: Cursor> FusedIterator for BidiIter<C> {}
