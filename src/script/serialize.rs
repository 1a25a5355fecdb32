//! Script writer, the inverse of the parser.

use crate::model::{PipelineModel, ProcessingSection};

/// Write a model back to script text: header lines first, then each section
/// as a `DIM(...)` line followed by its operation lines.
pub fn serialize(model: &PipelineModel) -> String {
    let mut out = String::new();
    for line in &model.header_lines {
        out.push_str(line);
        out.push('\n');
    }
    for section in &model.sections {
        out.push_str(&dim_line(section));
        out.push('\n');
        for op in section.operation_texts() {
            out.push_str(&op);
            out.push('\n');
        }
    }
    out
}

/// `DIM(...)` with 1-based dims; empty for an all-dims section.
pub fn dim_line(section: &ProcessingSection) -> String {
    let dims: Vec<String> = section.dims.iter().map(|d| (d + 1).to_string()).collect();
    format!("DIM({})", dims.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn writes_header_then_sections() {
        let model = parse("sw(5000.0)\nDIM(1)\nsb(c=0.5)\nzf()\nft()\nDIM()\nDIM(2,3)\nFT()\n");
        assert_eq!(
            serialize(&model),
            "sw(5000.0)\nDIM(1)\nSB(c=0.5)\nZF()\nFT()\nDIM()\nDIM(2,3)\nFT()\n"
        );
    }

    #[test]
    fn empty_model_is_empty_text() {
        assert_eq!(serialize(&parse("")), "");
        assert_eq!(serialize(&parse("ZF\n# nothing\n")), "");
    }

    #[test]
    fn disabled_group_keeps_flag() {
        let text = "DIM(1)\nSB(c=0.5,disabled=true)\nEXPD(disabled=true)\nFT()\n";
        assert_eq!(serialize(&parse(text)), text);
    }
}
