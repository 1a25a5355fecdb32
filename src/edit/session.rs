//! Editing session: keeps an operation's text in step with edits to its
//! structured parameters.
//!
//! A session is either idle or editing one operation, identified by its
//! section, flattened index and normalized name. Parameter edits are applied
//! only while editing, and only when they target the operation the session
//! still has selected; late edits for a previous selection are dropped.

use crate::catalog::normalize;
use crate::edit::params::{self, format_real, parse_real};
use crate::model::{PipelineModel, SectionKey};
use crate::op::OperationNode;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTarget {
    pub section: SectionKey,
    pub index: usize,
    pub op_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing(EditTarget),
}

/// One structured-parameter change coming from the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamEdit {
    /// Operation the editor believes it is editing.
    pub op_name: String,
    pub param: String,
    pub value: String,
}

impl ParamEdit {
    pub fn new(op_name: &str, param: &str, value: impl Into<String>) -> Self {
        Self {
            op_name: op_name.to_string(),
            param: param.to_string(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// The operation was rewritten in place.
    Applied { index: usize, text: String },
    /// No operation selected.
    Idle,
    /// The edit no longer matches the selected operation.
    Stale,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditingSession {
    state: SessionState,
    /// Fraction along the dimension where first-order phase has no effect.
    pivot_fraction: f64,
}

impl Default for EditingSession {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            pivot_fraction: 0.0,
        }
    }
}

impl EditingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pivot_fraction(mut self, pivot_fraction: f64) -> Self {
        self.pivot_fraction = pivot_fraction;
        self
    }

    pub fn pivot_fraction(&self) -> f64 {
        self.pivot_fraction
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Select the operation at `index` of `section`. Selecting something that
    /// does not exist leaves the session idle.
    pub fn select(mut self, model: &PipelineModel, section: SectionKey, index: usize) -> Self {
        self.state = match model.section(&section).and_then(|s| s.operation_at(index)) {
            Some(op) => SessionState::Editing(EditTarget {
                op_name: op.name.clone(),
                section,
                index,
            }),
            None => SessionState::Idle,
        };
        self
    }

    pub fn deselect(mut self) -> Self {
        self.state = SessionState::Idle;
        self
    }

    /// Apply one parameter edit to the selected operation.
    ///
    /// The operation text is regenerated and written back at its current
    /// index, so an edit never moves it.
    pub fn apply(&self, model: &mut PipelineModel, edit: &ParamEdit) -> EditOutcome {
        let SessionState::Editing(target) = &self.state else {
            tracing::debug!(op = %edit.op_name, param = %edit.param, "edit while idle, dropped");
            return EditOutcome::Idle;
        };
        if normalize(&edit.op_name) != target.op_name {
            tracing::debug!(
                selected = %target.op_name,
                op = %edit.op_name,
                "stale edit for previous selection, dropped"
            );
            return EditOutcome::Stale;
        }
        let Some(section) = model.section_mut(&target.section) else {
            tracing::debug!(section = %target.section, "selected section is gone, edit dropped");
            return EditOutcome::Stale;
        };
        let Some(current) = section.operation_texts().into_iter().nth(target.index) else {
            return EditOutcome::Stale;
        };
        let op = OperationNode::from_text(&current);
        if op.name != target.op_name {
            tracing::debug!(found = %op.name, selected = %target.op_name, "operation moved, edit dropped");
            return EditOutcome::Stale;
        }

        let mut edited = BTreeMap::new();
        if edit.param == "ph1" && params::is_phase_family(&op.name) {
            if let Some(ph0) = self.back_solve_ph0(&op, &edit.value) {
                edited.insert("ph0".to_string(), ph0);
            }
        }
        edited.insert(edit.param.clone(), edit.value.clone());

        let text = params::regenerate_text(&op, &edited);
        let index = section.set_operation(&text, Some(target.index), false);
        EditOutcome::Applied { index, text }
    }

    /// New zero-order phase after a first-order change:
    /// `ph0 - (new_ph1 - old_ph1) * pivot_fraction`.
    fn back_solve_ph0(&self, op: &OperationNode, new_ph1: &str) -> Option<String> {
        let current = |key: &str| op.arg(key).and_then(|v| parse_real(key, v)).unwrap_or(0.0);
        let new_ph1 = parse_real("ph1", new_ph1)?;
        let delta = new_ph1 - current("ph1");
        Some(format_real(current("ph0") - delta * self.pivot_fraction))
    }
}

/// Apply an edit as a value transformation of session and model.
pub fn apply_edit(
    session: EditingSession,
    mut model: PipelineModel,
    edit: &ParamEdit,
) -> (EditingSession, PipelineModel) {
    session.apply(&mut model, edit);
    (session, model)
}
