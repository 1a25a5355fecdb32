//! Cascade groups: contiguous same-kind operations sharing one enabled flag.

use crate::catalog::CascadeKind;
use crate::op::node::OperationNode;
use serde::{Deserialize, Serialize};

/// Argument written on every member of a disabled group.
pub const DISABLED_ARG: &str = "disabled";

/// A contiguous run of same-cascade operations edited as one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeGroup {
    pub kind: CascadeKind,
    pub members: Vec<OperationNode>,
    pub enabled: bool,
}

impl CascadeGroup {
    pub fn new(kind: CascadeKind) -> Self {
        Self {
            kind,
            members: Vec::new(),
            enabled: true,
        }
    }

    /// Group holding only the kind's default member, e.g. `BCWHIT()`.
    pub fn with_default_member(kind: CascadeKind) -> Self {
        let mut group = Self::new(kind);
        group.members.push(OperationNode::new(kind.default_member()));
        group
    }

    /// Add a member, lifting a `disabled=true` marker onto the group.
    ///
    /// Members of another kind are rejected and handed back.
    pub fn push(&mut self, mut member: OperationNode) -> Result<(), OperationNode> {
        if member.cascade != Some(self.kind) {
            return Err(member);
        }
        if let Some(flag) = member.remove_arg(DISABLED_ARG) {
            if flag.eq_ignore_ascii_case("true") {
                self.enabled = false;
            }
        }
        self.members.push(member);
        Ok(())
    }

    /// Member lines as written to a script.
    pub fn member_texts(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|m| {
                if self.enabled {
                    m.to_text()
                } else {
                    m.clone().with_arg(DISABLED_ARG, "true").to_text()
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
