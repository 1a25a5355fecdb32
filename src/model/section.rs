//! Processing sections: the per-dimension scope holding an ordered list of
//! operations and cascade groups.

use crate::catalog::CascadeKind;
use crate::edit::position;
use crate::op::{CascadeGroup, OperationNode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direct ("D") sections cover zero or one dimension, indirect ("I") more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionKind {
    Direct,
    Indirect,
}

impl SectionKind {
    pub fn for_dims(dims: &[usize]) -> Self {
        if dims.len() <= 1 {
            SectionKind::Direct
        } else {
            SectionKind::Indirect
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            SectionKind::Direct => "D",
            SectionKind::Indirect => "I",
        }
    }
}

/// Sections are keyed by their 0-based dims, disambiguated by order when the
/// same dims are opened again.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectionKey {
    pub dims: Vec<usize>,
    pub order: usize,
}

impl SectionKey {
    pub fn new(dims: Vec<usize>, order: usize) -> Self {
        Self { dims, order }
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dims: Vec<String> = self.dims.iter().map(|d| (d + 1).to_string()).collect();
        write!(
            f,
            "{}{}[{}]",
            SectionKind::for_dims(&self.dims).tag(),
            self.order,
            dims.join(",")
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SectionEntry {
    Op(OperationNode),
    Group(CascadeGroup),
}

impl SectionEntry {
    fn texts(&self) -> Vec<String> {
        match self {
            SectionEntry::Op(op) => vec![op.to_text()],
            SectionEntry::Group(g) => g.member_texts(),
        }
    }
}

/// Grouping state carried across consecutive pushes into one section.
///
/// Holds the index of the cascade group still accepting contiguous members.
/// A group opened by a pseudo-op starts out holding a placeholder default
/// member that the first explicit member replaces.
#[derive(Debug, Default, Clone)]
pub struct GroupCursor {
    open: Option<usize>,
    placeholder: bool,
}

impl GroupCursor {
    pub fn close(&mut self) {
        self.open = None;
        self.placeholder = false;
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingSection {
    pub order: usize,
    pub dims: Vec<usize>,
    pub kind: SectionKind,
    pub operations: Vec<SectionEntry>,
}

impl ProcessingSection {
    pub fn new(dims: Vec<usize>, order: usize) -> Self {
        Self {
            order,
            kind: SectionKind::for_dims(&dims),
            dims,
            operations: Vec::new(),
        }
    }

    pub fn key(&self) -> SectionKey {
        SectionKey::new(self.dims.clone(), self.order)
    }

    /// Append an operation, joining the open group when it continues the same
    /// cascade. Anything else closes the open group.
    pub fn push_operation(&mut self, node: OperationNode, cursor: &mut GroupCursor) {
        let Some(kind) = node.cascade else {
            cursor.close();
            self.operations.push(SectionEntry::Op(node));
            return;
        };

        let node = match cursor.open.and_then(|i| self.operations.get_mut(i)) {
            Some(SectionEntry::Group(group)) => {
                if cursor.placeholder && group.kind == kind {
                    group.members.clear();
                    cursor.placeholder = false;
                }
                match group.push(node) {
                    Ok(()) => return,
                    Err(node) => node,
                }
            }
            _ => node,
        };

        let mut group = CascadeGroup::new(kind);
        if let Err(node) = group.push(node) {
            self.operations.push(SectionEntry::Op(node));
            cursor.close();
            return;
        }
        self.operations.push(SectionEntry::Group(group));
        cursor.open = Some(self.operations.len() - 1);
        cursor.placeholder = false;
    }

    /// Force-open a group holding only the kind's default member.
    ///
    /// An open group of the same kind already continues the cascade, so it is
    /// left as is and no placeholder is added.
    pub fn open_default_group(&mut self, kind: CascadeKind, cursor: &mut GroupCursor) {
        if let Some(SectionEntry::Group(group)) = cursor.open.and_then(|i| self.operations.get(i)) {
            if group.kind == kind {
                return;
            }
        }
        self.operations
            .push(SectionEntry::Group(CascadeGroup::with_default_member(kind)));
        cursor.open = Some(self.operations.len() - 1);
        cursor.placeholder = true;
    }

    /// Operation lines in order, with groups flattened into their members.
    pub fn operation_texts(&self) -> Vec<String> {
        self.operations.iter().flat_map(SectionEntry::texts).collect()
    }

    /// Number of flattened operation lines.
    pub fn operation_count(&self) -> usize {
        self.operations
            .iter()
            .map(|e| match e {
                SectionEntry::Op(_) => 1,
                SectionEntry::Group(g) => g.len(),
            })
            .sum()
    }

    /// Operation at a flattened index.
    pub fn operation_at(&self, index: usize) -> Option<&OperationNode> {
        self.operations
            .iter()
            .flat_map(|e| match e {
                SectionEntry::Op(op) => std::slice::from_ref(op).iter(),
                SectionEntry::Group(g) => g.members.iter(),
            })
            .nth(index)
    }

    /// Place `text` in the flattened operation list and regroup.
    ///
    /// See [`position::set_operation`] for how the index is resolved.
    pub fn set_operation(&mut self, text: &str, force_index: Option<usize>, append: bool) -> usize {
        let mut texts = self.operation_texts();
        let index = position::set_operation(&mut texts, text, force_index, append);
        self.rebuild(&texts);
        index
    }

    /// Remove the flattened operation at `index`, returning its text.
    pub fn remove_operation(&mut self, index: usize) -> Option<String> {
        let mut texts = self.operation_texts();
        if index >= texts.len() {
            return None;
        }
        let removed = texts.remove(index);
        self.rebuild(&texts);
        Some(removed)
    }

    fn rebuild(&mut self, texts: &[String]) {
        self.operations.clear();
        let mut cursor = GroupCursor::default();
        for text in texts {
            self.push_operation(OperationNode::from_text(text), &mut cursor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_with(lines: &[&str]) -> ProcessingSection {
        let mut section = ProcessingSection::new(vec![0], 0);
        let mut cursor = GroupCursor::default();
        for l in lines {
            section.push_operation(OperationNode::from_text(l), &mut cursor);
        }
        section
    }

    #[test]
    fn kind_follows_dim_count() {
        assert_eq!(ProcessingSection::new(vec![], 0).kind, SectionKind::Direct);
        assert_eq!(ProcessingSection::new(vec![0], 0).kind, SectionKind::Direct);
        assert_eq!(ProcessingSection::new(vec![1, 2], 0).kind, SectionKind::Indirect);
    }

    #[test]
    fn key_display_is_one_based() {
        assert_eq!(SectionKey::new(vec![1, 2], 3).to_string(), "I3[2,3]");
        assert_eq!(SectionKey::new(vec![], 0).to_string(), "D0[]");
    }

    #[test]
    fn contiguous_members_share_a_group() {
        let section = section_with(&["SB()", "GM(gf=1.0)", "ZF()", "EXPD(lb=2)"]);
        assert_eq!(section.operations.len(), 3);
        match &section.operations[0] {
            SectionEntry::Group(g) => assert_eq!(g.len(), 2),
            other => panic!("expected group, got {:?}", other),
        }
        assert!(matches!(section.operations[2], SectionEntry::Group(_)));
        assert_eq!(section.operation_count(), 4);
        assert_eq!(section.operation_at(2).map(|o| o.name.as_str()), Some("ZF"));
        assert_eq!(section.operation_at(4), None);
    }

    #[test]
    fn adjacent_groups_of_different_kinds_stay_apart() {
        let section = section_with(&["SB()", "BCWHIT()"]);
        assert_eq!(section.operations.len(), 2);
    }

    #[test]
    fn placeholder_is_replaced_by_first_member() {
        let mut section = ProcessingSection::new(vec![0], 0);
        let mut cursor = GroupCursor::default();
        section.open_default_group(CascadeKind::Baseline, &mut cursor);
        section.push_operation(OperationNode::from_text("BCPOLY(order=3)"), &mut cursor);
        section.push_operation(OperationNode::from_text("BCMED()"), &mut cursor);
        assert_eq!(section.operation_texts(), vec!["BCPOLY(order=3)", "BCMED()"]);
    }

    #[test]
    fn pseudo_op_joins_open_group_of_same_kind() {
        let mut section = ProcessingSection::new(vec![0], 0);
        let mut cursor = GroupCursor::default();
        section.push_operation(OperationNode::from_text("BCPOLY()"), &mut cursor);
        section.open_default_group(CascadeKind::Baseline, &mut cursor);
        section.push_operation(OperationNode::from_text("BCMED()"), &mut cursor);
        assert_eq!(section.operations.len(), 1);
        assert_eq!(section.operation_texts(), vec!["BCPOLY()", "BCMED()"]);

        // A different kind still opens its own placeholder group.
        section.open_default_group(CascadeKind::Nus, &mut cursor);
        assert_eq!(section.operations.len(), 2);
        assert_eq!(section.operation_texts(), vec!["BCPOLY()", "BCMED()", "NESTA()"]);
    }

    #[test]
    fn set_operation_regroups() {
        let mut section = section_with(&["ZF()", "FT()"]);
        assert_eq!(section.set_operation("blackman()", None, false), 0);
        assert_eq!(section.set_operation("SB(c=0.5)", None, false), 1);
        assert_eq!(section.operation_texts(), vec!["BLACKMAN()", "SB(c=0.5)", "ZF()", "FT()"]);
        assert_eq!(section.operations.len(), 3);
    }

    #[test]
    fn remove_operation_flattened() {
        let mut section = section_with(&["SB()", "ZF()", "FT()"]);
        assert_eq!(section.remove_operation(1).as_deref(), Some("ZF()"));
        assert_eq!(section.remove_operation(5), None);
        assert_eq!(section.operation_texts(), vec!["SB()", "FT()"]);
    }
}
