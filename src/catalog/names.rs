//! Name normalization for operation text.

/// Reduce an operation fragment to its bare catalog name.
///
/// Trims whitespace, cuts at the first `(` or space and upper-cases.
/// `" ft(size=4096)"` becomes `"FT"`.
pub fn normalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let end = trimmed.find(['(', ' ']).unwrap_or(trimmed.len());
    trimmed[..end].to_uppercase()
}

/// Like [`normalize`] but keeps (or adds) the argument list.
///
/// `"ft"` becomes `"FT()"`, `"ft(size=4096)"` becomes `"FT(size=4096)"`.
/// Argument text is kept verbatim.
pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    let name = normalize(trimmed);
    match trimmed.find('(') {
        Some(open) => {
            let rest = &trimmed[open + 1..];
            let inner = rest.strip_suffix(')').unwrap_or(rest);
            format!("{}({})", name, inner.trim())
        }
        None => format!("{}()", name),
    }
}
