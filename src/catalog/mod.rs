//! Operation catalog: the fixed, ordered list of operation names.
//!
//! The catalog is built once from [`table::OPERATION_TABLE`] and never
//! mutated. Positions are precomputed into a name -> index map so insertion
//! lookups do not rescan the table.

pub mod names;
pub mod table;

pub use names::{canonicalize, normalize};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cascade kinds that collapse into a single editable group in a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CascadeKind {
    Apodization,
    Baseline,
    Nus,
}

impl CascadeKind {
    /// Member used when a group is opened by its pseudo-op with nothing after it.
    pub fn default_member(self) -> &'static str {
        match self {
            CascadeKind::Apodization => "APODIZE",
            CascadeKind::Baseline => "BCWHIT",
            CascadeKind::Nus => "NESTA",
        }
    }

    /// Bare directive that force-opens a group of this kind, if there is one.
    pub fn pseudo_op(self) -> Option<&'static str> {
        match self {
            CascadeKind::Apodization => None,
            CascadeKind::Baseline => Some("BaselineGroup"),
            CascadeKind::Nus => Some("NUSGroup"),
        }
    }

    pub fn from_pseudo_op(name: &str) -> Option<CascadeKind> {
        [CascadeKind::Baseline, CascadeKind::Nus]
            .into_iter()
            .find(|k| k.pseudo_op() == Some(name))
    }
}

/// One row of the catalog.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    pub name: &'static str,
    /// Cascade marker this entry sits under, e.g. `"Cascade-Transform"`.
    pub cascade: &'static str,
    /// True for the `Cascade-*` marker rows themselves.
    pub is_marker: bool,
}

#[derive(Debug)]
pub struct OperationCatalog {
    entries: Vec<CatalogEntry>,
    positions: HashMap<String, usize>,
}

static CATALOG: Lazy<OperationCatalog> =
    Lazy::new(|| OperationCatalog::from_table(table::OPERATION_TABLE));

/// The process-wide catalog.
pub fn catalog() -> &'static OperationCatalog {
    &CATALOG
}

impl OperationCatalog {
    /// Build a catalog from an ordered table. Later duplicates are ignored so
    /// names stay unique.
    pub fn from_table(table: &[&'static str]) -> Self {
        let mut entries = Vec::with_capacity(table.len());
        let mut positions = HashMap::with_capacity(table.len());
        let mut cascade = "";
        for &name in table {
            let is_marker = name.starts_with(table::CASCADE_PREFIX);
            if is_marker {
                cascade = name;
            }
            let key = normalize(name);
            if positions.contains_key(&key) {
                continue;
            }
            positions.insert(key, entries.len());
            entries.push(CatalogEntry {
                name,
                cascade,
                is_marker,
            });
        }
        Self { entries, positions }
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Catalog position of an operation name (any case, args allowed).
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(&normalize(name)).copied()
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Cascade marker an operation sits under, if it is in the catalog.
    pub fn cascade_of(&self, name: &str) -> Option<&'static str> {
        self.position(name).map(|p| self.entries[p].cascade)
    }

    /// Cascade group kind an operation belongs to, if any.
    pub fn cascade_kind(&self, name: &str) -> Option<CascadeKind> {
        let norm = normalize(name);
        if table::NUS_MEMBERS.contains(&norm.as_str()) {
            return Some(CascadeKind::Nus);
        }
        match self.cascade_of(&norm)? {
            "Cascade-Apodization" => Some(CascadeKind::Apodization),
            "Cascade-Baseline" => Some(CascadeKind::Baseline),
            _ => None,
        }
    }

    /// Operation names starting with `fragment`, rendered as `NAME()`.
    ///
    /// Results follow catalog order rather than alphabetical order, so the
    /// suggestions read in processing order. Cascade markers are skipped.
    pub fn match_prefix(&self, fragment: &str) -> Vec<String> {
        let prefix = normalize(fragment);
        self.entries
            .iter()
            .filter(|e| !e.is_marker && normalize(e.name).starts_with(&prefix))
            .map(|e| canonicalize(e.name))
            .collect()
    }

    /// First index in `ops` whose normalized name equals `target`'s.
    pub fn current_index<S: AsRef<str>>(&self, ops: &[S], target: &str) -> Option<usize> {
        let target = normalize(target);
        ops.iter().position(|op| normalize(op.as_ref()) == target)
    }

    /// Index at which `target` belongs in `ops`.
    ///
    /// An existing entry with the same name wins. Otherwise the result is the
    /// first entry whose catalog position is at or after `target`'s; entries
    /// missing from the catalog are passed over. Unknown targets append.
    pub fn insertion_index<S: AsRef<str>>(&self, ops: &[S], target: &str) -> usize {
        if let Some(i) = self.current_index(ops, target) {
            return i;
        }
        let Some(target_pos) = self.position(target) else {
            return ops.len();
        };
        ops.iter()
            .position(|op| {
                self.position(op.as_ref())
                    .is_some_and(|p| p >= target_pos)
            })
            .unwrap_or(ops.len())
    }
}

/// Catalog-backed shorthand for [`OperationCatalog::is_known`].
pub fn is_known(name: &str) -> bool {
    catalog().is_known(name)
}

/// Catalog-backed shorthand for [`OperationCatalog::match_prefix`].
pub fn match_prefix(fragment: &str) -> Vec<String> {
    catalog().match_prefix(fragment)
}

/// Catalog-backed shorthand for [`OperationCatalog::current_index`].
pub fn current_index<S: AsRef<str>>(ops: &[S], target: &str) -> Option<usize> {
    catalog().current_index(ops, target)
}

/// Catalog-backed shorthand for [`OperationCatalog::insertion_index`].
pub fn insertion_index<S: AsRef<str>>(ops: &[S], target: &str) -> usize {
    catalog().insertion_index(ops, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_ordered() {
        let cat = catalog();
        assert_eq!(cat.entries().len(), table::OPERATION_TABLE.len());
        assert!(cat.position("APODIZE") < cat.position("ZF"));
        assert!(cat.position("ZF") < cat.position("FT"));
        assert!(cat.position("PHASE") < cat.position("BCWHIT"));
    }

    #[test]
    fn lookups_ignore_case_and_args() {
        assert!(is_known("ft"));
        assert!(is_known("Phase(ph0=1.0)"));
        assert!(!is_known("NOPE"));
        assert_eq!(catalog().cascade_of("ft()"), Some("Cascade-Transform"));
    }

    #[test]
    fn cascade_kinds() {
        let cat = catalog();
        assert_eq!(cat.cascade_kind("blackman"), Some(CascadeKind::Apodization));
        assert_eq!(cat.cascade_kind("BCPOLY()"), Some(CascadeKind::Baseline));
        assert_eq!(cat.cascade_kind("NESTA"), Some(CascadeKind::Nus));
        assert_eq!(cat.cascade_kind("LP"), None);
        assert_eq!(cat.cascade_kind("FT"), None);
        assert_eq!(cat.cascade_kind("UNKNOWN"), None);
    }

    #[test]
    fn match_prefix_follows_catalog_order() {
        assert_eq!(match_prefix("b"), vec!["BLACKMAN()", "BCWHIT()", "BCPOLY()", "BCSINE()", "BCMED()", "BCAUTO()"]);
        assert_eq!(match_prefix("phase"), vec!["PHASE()", "PHASEND()"]);
        assert!(match_prefix("cascade").is_empty());
        assert!(match_prefix("zzz").is_empty());
    }

    #[test]
    fn current_index_finds_first_match() {
        let ops = ["ZF()", "FT()", "ft(inv=true)"];
        assert_eq!(current_index(&ops, "FT(size=8)"), Some(1));
        assert_eq!(current_index(&ops, "PHASE"), None);
    }

    #[test]
    fn insertion_index_uses_catalog_order() {
        let ops = ["ZF()", "FT()"];
        assert_eq!(insertion_index(&ops, "BLACKMAN()"), 0);
        assert_eq!(insertion_index(&ops, "PHASE()"), 2);
        assert_eq!(insertion_index(&ops, "FT(size=4)"), 1);

        let ops = ["SB()", "FT()", "BCWHIT()"];
        assert_eq!(insertion_index(&ops, "ZF()"), 1);
        assert_eq!(insertion_index(&ops, "PHASE()"), 2);
    }

    #[test]
    fn insertion_index_skips_unknown_entries() {
        let ops = ["CUSTOM()", "FT()"];
        assert_eq!(insertion_index(&ops, "ZF()"), 1);
        assert_eq!(insertion_index(&ops, "MYSTERY()"), 2);
    }

    #[test]
    fn catalog_from_table_drops_duplicates() {
        let cat = OperationCatalog::from_table(&["Cascade-A", "X", "Y", "x"]);
        assert_eq!(cat.entries().len(), 3);
        assert_eq!(cat.position("x"), Some(1));
        assert_eq!(cat.cascade_of("Y"), Some("Cascade-A"));
    }
}
