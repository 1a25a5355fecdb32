//! Operation position resolution: where an operation line belongs in a
//! section's ordered operation list.

use crate::catalog::{self, canonicalize, normalize};

/// Resolve the index for `text` in `ops` and write it there.
///
/// The index is `force_index` when given, else the index of an existing
/// operation with the same name, else the canonical insertion index. An
/// existing entry at that index with the same name is replaced unless
/// `append` is set; otherwise the text is inserted and later entries shift
/// right. Out-of-range indexes append.
pub fn set_operation(
    ops: &mut Vec<String>,
    text: &str,
    force_index: Option<usize>,
    append: bool,
) -> usize {
    let canon = canonicalize(text);
    let index = force_index.unwrap_or_else(|| resolve_index(ops.as_slice(), &canon));

    if index >= ops.len() {
        ops.push(canon);
        return ops.len() - 1;
    }
    if !append && normalize(&ops[index]) == normalize(&canon) {
        ops[index] = canon;
    } else {
        ops.insert(index, canon);
    }
    index
}

/// Index an operation would take without modifying `ops`.
pub fn resolve_index<S: AsRef<str>>(ops: &[S], text: &str) -> usize {
    let cat = catalog::catalog();
    cat.current_index(ops, text)
        .unwrap_or_else(|| cat.insertion_index(ops, text))
}
