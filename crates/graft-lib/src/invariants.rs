//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::runtime::Parser;

impl Parser<'_> {
    pub(crate) fn ensure_frame(&self, present: bool) {
        assert!(present, "parser: rule exit without matching enter");
    }
}

pub(crate) fn ensure_marker<M>(marker: Option<M>) -> M {
    marker.unwrap_or_else(|| panic!("projector: rule exit with empty marker stack"))
}

pub(crate) fn ensure_markers_balanced(open: usize) {
    assert_eq!(open, 0, "projector: {open} markers left open after projection");
}

pub(crate) fn ensure_innermost(open: Option<usize>, marker: usize) {
    assert_eq!(
        open,
        Some(marker),
        "tree builder: marker {marker} closed out of order (innermost open is {open:?})"
    );
}

pub(crate) fn ensure_open(open: &[usize], marker: usize) -> usize {
    open.iter()
        .rposition(|m| *m == marker)
        .unwrap_or_else(|| panic!("tree builder: rollback to marker {marker} that is not open"))
}

pub(crate) fn ensure_finished(open: usize) {
    assert_eq!(open, 0, "tree builder: finish with {open} open markers");
}
