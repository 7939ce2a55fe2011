//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{ElementTypes, RuleIndex, TokenType};

impl ElementTypes {
    pub(crate) fn ensure_token(&self, ty: TokenType) {
        assert!(
            !ty.is_eof() && (ty.raw() as usize) < self.token_count(),
            "ElementTypes: {ty:?} has no element (vocabulary holds {} types)",
            self.token_count()
        );
    }

    pub(crate) fn ensure_rule(&self, rule: RuleIndex) {
        assert!(
            rule.as_usize() < self.rule_count(),
            "ElementTypes: rule {} out of range (grammar has {} rules)",
            rule.raw(),
            self.rule_count()
        );
    }
}
