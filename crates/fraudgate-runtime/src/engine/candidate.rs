//! Things a console component can match

use crate::context::AttributeMap;
use crate::error::Result;
use crate::evaluator::Evaluator;
use crate::lists::entry_matches;
use fraudgate_core::{CompiledRule, Decision, ListEntry};

/// A compiled rule or list entry evaluated by a component
pub trait Candidate {
    fn id(&self) -> &str;
    fn decision(&self) -> Decision;
    fn is_test(&self) -> bool;
    fn matches(&self, attributes: &AttributeMap) -> Result<bool>;
}

impl Candidate for CompiledRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn decision(&self) -> Decision {
        self.decision
    }

    fn is_test(&self) -> bool {
        self.is_test
    }

    fn matches(&self, attributes: &AttributeMap) -> Result<bool> {
        Evaluator::evaluate(&self.expression_text, attributes)
    }
}

impl Candidate for ListEntry {
    fn id(&self) -> &str {
        &self.id
    }

    fn decision(&self) -> Decision {
        self.decision
    }

    fn is_test(&self) -> bool {
        self.is_test
    }

    fn matches(&self, attributes: &AttributeMap) -> Result<bool> {
        entry_matches(self, attributes)
    }
}
