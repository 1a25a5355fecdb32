//! A single operation line: upper-case name plus its arguments.

use crate::catalog::{self, CascadeKind, canonicalize};
use crate::op::args::{self, Arg};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single parsed operation: upper-cased name plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationNode {
    pub name: String,
    pub args: Vec<Arg>,
    /// Cascade group this operation collapses into, if any.
    pub cascade: Option<CascadeKind>,
}

impl OperationNode {
    pub fn new(name: &str) -> Self {
        let name = catalog::normalize(name);
        let cascade = catalog::catalog().cascade_kind(&name);
        Self {
            name,
            args: Vec::new(),
            cascade,
        }
    }

    /// Build a node from operation text. Missing parens are tolerated, so this
    /// never fails: `"ft"` yields `FT()`.
    pub fn from_text(text: &str) -> Self {
        let canon = canonicalize(text);
        let mut node = Self::new(&canon);
        if let Some(open) = canon.find('(') {
            let inner = &canon[open + 1..canon.len() - 1];
            node.args = args::parse_args(inner);
        }
        node
    }

    pub fn with_arg(mut self, key: &str, value: impl Into<String>) -> Self {
        self.set_arg(key, value);
        self
    }

    pub fn arg(&self, key: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|a| a.key.as_deref() == Some(key))
            .map(|a| a.value.as_str())
    }

    /// Replace the value of `key`, or append it when absent.
    pub fn set_arg(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.args.iter_mut().find(|a| a.key.as_deref() == Some(key)) {
            Some(a) => a.value = value,
            None => self.args.push(Arg::keyed(key, value)),
        }
    }

    pub fn remove_arg(&mut self, key: &str) -> Option<String> {
        let i = self.args.iter().position(|a| a.key.as_deref() == Some(key))?;
        Some(self.args.remove(i).value)
    }

    /// Canonical text; always carries parens, even with no args.
    pub fn to_text(&self) -> String {
        format!("{}({})", self.name, args::join_args(&self.args))
    }
}

impl fmt::Display for OperationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_text_normalizes_name() {
        let node = OperationNode::from_text("  apodize(lb=1.0,c=0.5) ");
        assert_eq!(node.name, "APODIZE");
        assert_eq!(node.cascade, Some(CascadeKind::Apodization));
        assert_eq!(node.arg("lb"), Some("1.0"));
        assert_eq!(node.to_text(), "APODIZE(lb=1.0,c=0.5)");
    }

    #[test]
    fn bare_name_gets_parens() {
        let node = OperationNode::from_text("ft");
        assert_eq!(node.to_text(), "FT()");
        assert_eq!(node.cascade, None);
        assert!(node.args.is_empty());
    }

    #[test]
    fn arg_editing() {
        let mut node = OperationNode::new("zf").with_arg("size", "4096");
        node.set_arg("size", "8192");
        node.set_arg("factor", "1");
        assert_eq!(node.to_text(), "ZF(size=8192,factor=1)");
        assert_eq!(node.remove_arg("size").as_deref(), Some("8192"));
        assert_eq!(node.remove_arg("size"), None);
        assert_eq!(node.to_string(), "ZF(factor=1)");
    }
}
