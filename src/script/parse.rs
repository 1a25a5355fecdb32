//! Line-oriented script parser.
//!
//! Single pass, one directive per line, no lookahead. Malformed lines are
//! skipped rather than reported so hand-edited scripts still load.

use crate::catalog::{CascadeKind, normalize};
use crate::catalog::table::HEADER_PROPERTIES;
use crate::diagnostics;
use crate::model::{GroupCursor, PipelineModel};
use crate::op::OperationNode;
use once_cell::sync::Lazy;
use regex::Regex;

// 1) name: everything before the first '('
// 2) args: everything up to the final ')'
static LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^(]*)\((.*)\)$").expect("line pattern is valid"));

/// Receiver for `markrows(...)` directives, which are not part of the model.
pub trait RowSkipSink {
    fn mark_rows(&mut self, args: &str);
}

/// Sink that drops row-skip directives.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardRows;

impl RowSkipSink for DiscardRows {
    fn mark_rows(&mut self, _args: &str) {}
}

impl RowSkipSink for Vec<String> {
    fn mark_rows(&mut self, args: &str) {
        self.push(args.to_string());
    }
}

/// Parser state threaded through the line loop.
#[derive(Debug, Default)]
struct ParseState {
    /// Index of the active section in `model.sections`.
    active: Option<usize>,
    cursor: GroupCursor,
}

/// Parse a script into a pipeline model. Never fails; see [`parse_with`].
pub fn parse(script: &str) -> PipelineModel {
    parse_with(script, &mut DiscardRows)
}

/// Parse a script, forwarding `markrows` arguments to `rows`.
pub fn parse_with(script: &str, rows: &mut dyn RowSkipSink) -> PipelineModel {
    let mut model = PipelineModel::new();
    let mut state = ParseState::default();

    for (lineno, raw) in script.lines().enumerate() {
        let lno = lineno + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let bare = line.split('(').next().unwrap_or("").trim();
        if let Some(kind) = CascadeKind::from_pseudo_op(bare) {
            open_pseudo_group(&mut model, &mut state, kind, lno);
            continue;
        }

        let Some(caps) = LINE_RE.captures(line) else {
            diagnostics::debug(format!("line {}: malformed, skipped: {:?}", lno, line));
            continue;
        };
        let op_name = caps.get(1).map_or("", |m| m.as_str()).trim();
        let args = caps.get(2).map_or("", |m| m.as_str());

        // `dim(2)` is the directive too; a node named DIM would re-parse as one.
        if normalize(op_name) == "DIM" {
            model.add_section(parse_dims(args, lno));
            state.active = Some(model.sections.len() - 1);
            state.cursor.close();
            continue;
        }
        if op_name == "markrows" {
            rows.mark_rows(args);
            continue;
        }

        match state.active.and_then(|i| model.sections.get_mut(i)) {
            Some(section) => {
                if op_name == "run" {
                    continue;
                }
                section.push_operation(OperationNode::from_text(line), &mut state.cursor);
            }
            None if HEADER_PROPERTIES.contains(&op_name) => {
                model.header_lines.push(line.to_string());
            }
            None => {
                diagnostics::debug(format!(
                    "line {}: {:?} outside any DIM section, skipped",
                    lno, op_name
                ));
            }
        }
    }

    model
}

fn open_pseudo_group(model: &mut PipelineModel, state: &mut ParseState, kind: CascadeKind, lno: usize) {
    match state.active.and_then(|i| model.sections.get_mut(i)) {
        Some(section) => section.open_default_group(kind, &mut state.cursor),
        None => diagnostics::debug(format!(
            "line {}: {:?} group outside any DIM section, skipped",
            lno, kind
        )),
    }
}

/// Parse `DIM` arguments: 1-based numbers to 0-based dims. Empty means all.
fn parse_dims(args: &str, lno: usize) -> Vec<usize> {
    let mut dims = Vec::new();
    for part in args.split(',') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        match p.parse::<usize>() {
            Ok(d) if d >= 1 => dims.push(d - 1),
            _ => diagnostics::warn(format!("line {}: bad DIM element {:?}, ignored", lno, p)),
        }
    }
    dims
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SectionEntry, SectionKey, SectionKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn header_lines_before_first_dim() {
        let model = parse("sw(5000.0,3000.0)\nsf(600.1,60.8)\nlabel(H1,N15)\nbogus(1)\nDIM(1)\nsw(1)\n");
        assert_eq!(
            model.header_lines,
            vec!["sw(5000.0,3000.0)", "sf(600.1,60.8)", "label(H1,N15)"]
        );
        // Inside a section a header property is just another operation.
        assert_eq!(model.sections[0].operation_texts(), vec!["SW(1)"]);
    }

    #[test]
    fn comments_blank_and_run_are_ignored() {
        let model = parse("# processing\n\nDIM(1)\n   # indented comment\nFT()\nrun()\n");
        assert_eq!(model.sections.len(), 1);
        assert_eq!(model.sections[0].operation_texts(), vec!["FT()"]);
    }

    #[test]
    fn dims_are_zero_based() {
        let model = parse("DIM(2,3)\nFT()\nDIM()\nPHASE()\n");
        assert_eq!(model.sections[0].dims, vec![1, 2]);
        assert_eq!(model.sections[0].kind, SectionKind::Indirect);
        assert!(model.sections[1].dims.is_empty());
        assert_eq!(model.sections[1].kind, SectionKind::Direct);
    }

    #[test]
    fn bad_dim_elements_are_dropped() {
        let model = parse("DIM(0,x,2)\n");
        assert_eq!(model.sections[0].dims, vec![1]);
    }

    #[test]
    fn repeated_dims_open_a_new_section() {
        let model = parse("DIM(1)\nFT()\nDIM(2)\nFT()\nDIM(1)\nPHASE()\n");
        assert_eq!(
            model.keys(),
            vec![
                SectionKey::new(vec![0], 0),
                SectionKey::new(vec![1], 0),
                SectionKey::new(vec![0], 1),
            ]
        );
        assert_eq!(model.sections[2].operation_texts(), vec!["PHASE()"]);
    }

    #[test]
    fn dim_closes_open_group() {
        let model = parse("DIM(1)\nSB()\nDIM(2)\nSB()\n");
        assert_eq!(model.sections[0].operations.len(), 1);
        assert_eq!(model.sections[1].operations.len(), 1);
    }

    #[test]
    fn pseudo_ops_open_default_groups() {
        let model = parse("DIM(1)\nFT()\nBaselineGroup\nDIM(2)\nNUSGroup()\nIST(threshold=0.9)\nFT()\n");
        assert_eq!(model.sections[0].operation_texts(), vec!["FT()", "BCWHIT()"]);
        assert_eq!(
            model.sections[1].operation_texts(),
            vec!["IST(threshold=0.9)", "FT()"]
        );
        match &model.sections[1].operations[0] {
            SectionEntry::Group(g) => assert_eq!(g.len(), 1),
            other => panic!("expected group, got {:?}", other),
        }
    }

    #[test]
    fn pseudo_op_outside_section_is_dropped() {
        let model = parse("BaselineGroup()\n");
        assert!(model.is_empty());
    }

    #[test]
    fn markrows_goes_to_sink() {
        let mut rows: Vec<String> = Vec::new();
        let model = parse_with("DIM(1)\nmarkrows([1,2],[5])\nFT()\n", &mut rows);
        assert_eq!(rows, vec!["[1,2],[5]"]);
        assert_eq!(model.sections[0].operation_texts(), vec!["FT()"]);
    }

    #[test]
    fn dim_directive_ignores_case() {
        let model = parse("DIM(1)\ndim(2)\nFT()\nDim(1)\n");
        assert_eq!(
            model.keys(),
            vec![
                SectionKey::new(vec![0], 0),
                SectionKey::new(vec![1], 0),
                SectionKey::new(vec![0], 1),
            ]
        );
        assert!(model.sections[0].operations.is_empty());
        assert_eq!(model.sections[1].operation_texts(), vec!["FT()"]);
    }

    #[test]
    fn orphan_operations_are_dropped() {
        let model = parse("FT()\nZF()\n");
        assert!(model.is_empty());
    }

    #[test]
    fn disabled_members_mark_the_group() {
        let model = parse("DIM(1)\nSB(disabled=true)\nGM(g1=2.0)\n");
        match &model.sections[0].operations[0] {
            SectionEntry::Group(g) => {
                assert!(!g.enabled);
                assert_eq!(g.members[0].to_text(), "SB()");
            }
            other => panic!("expected group, got {:?}", other),
        }
    }
}
