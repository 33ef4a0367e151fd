//! Validating / non-validating switch.
//!
//! Every graph type carries a [`CheckPolicy`] type parameter. [`Checked`]
//! verifies node and edge existence and sequence sizes before touching
//! storage; [`Unchecked`] turns every such check into a no-op the optimiser
//! removes, for hot loops whose inputs are already known to be valid.
//!
//! With [`Unchecked`], a bad node or edge is a caller bug: the operation may
//! panic on an out-of-range index or act on the wrong cell.

use crate::error::{GraphError, Result};

/// Type-level switch selecting whether contract checks run.
pub trait CheckPolicy {
    /// Whether checks run under this policy.
    const ENABLED: bool;

    /// Return `err()` when checks are enabled and `ok()` is false.
    #[inline(always)]
    fn ensure(ok: impl FnOnce() -> bool, err: impl FnOnce() -> GraphError) -> Result<()> {
        if Self::ENABLED && !ok() {
            Err(err())
        } else {
            Ok(())
        }
    }
}

/// Run all contract checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Checked;

/// Skip all contract checks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unchecked;

impl CheckPolicy for Checked {
    const ENABLED: bool = true;
}

impl CheckPolicy for Unchecked {
    const ENABLED: bool = false;
}
