//! Pipeline model: header lines plus the ordered processing sections a script
//! parses into.

pub mod section;

pub use section::{GroupCursor, ProcessingSection, SectionEntry, SectionKey, SectionKind};

use crate::Result;
use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};

/// Parsed pipeline. Sections keep first-insertion order.
///
/// The model is owned by a single editing session; consumers should take a
/// fresh serialization instead of holding references across a mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineModel {
    pub header_lines: Vec<String>,
    pub sections: Vec<ProcessingSection>,
}

impl PipelineModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.header_lines.is_empty() && self.sections.is_empty()
    }

    /// Open a new section for `dims` and return its key.
    ///
    /// Sections are never merged: if a section with the same dims already
    /// exists, the new one gets an order one past the highest order so far.
    pub fn add_section(&mut self, dims: Vec<usize>) -> SectionKey {
        let current = self.sections.iter().map(|s| s.order).max().unwrap_or(0);
        let order = if self.sections.iter().any(|s| s.dims == dims) {
            current + 1
        } else {
            current
        };
        let key = SectionKey::new(dims.clone(), order);
        self.sections.push(ProcessingSection::new(dims, order));
        key
    }

    pub fn section(&self, key: &SectionKey) -> Option<&ProcessingSection> {
        self.sections
            .iter()
            .find(|s| s.dims == key.dims && s.order == key.order)
    }

    pub fn section_mut(&mut self, key: &SectionKey) -> Option<&mut ProcessingSection> {
        self.sections
            .iter_mut()
            .find(|s| s.dims == key.dims && s.order == key.order)
    }

    pub fn keys(&self) -> Vec<SectionKey> {
        self.sections.iter().map(ProcessingSection::key).collect()
    }

    /// Flattened operation lines of one section.
    pub fn operations_for_section(&self, key: &SectionKey) -> Result<Vec<String>> {
        self.section(key)
            .map(ProcessingSection::operation_texts)
            .ok_or_else(|| anyhow!("no processing section {}", key))
    }

    /// Place an operation in a section at its canonical position, replacing an
    /// existing operation of the same name. Returns the resolved index.
    pub fn set_operation(&mut self, key: &SectionKey, text: &str) -> Result<usize> {
        let section = self
            .section_mut(key)
            .with_context(|| format!("set operation {:?}: no processing section {}", text, key))?;
        Ok(section.set_operation(text, None, false))
    }
}
