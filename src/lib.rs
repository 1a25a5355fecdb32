//! Canonical text model for multi-dimensional spectral processing scripts.
//!
//! A script is a list of `NAME(key=value,...)` lines split into sections by
//! `DIM(...)` directives. This crate parses scripts into a [`PipelineModel`],
//! writes them back out, keeps new operations at their catalog position and
//! rewrites an operation's text from structured parameter edits.
//!
//! ```
//! let mut model = procscript::parse("DIM(1)\nZF()\nFT()\n");
//! let key = model.keys()[0].clone();
//! assert_eq!(model.set_operation(&key, "blackman()").unwrap(), 0);
//! assert_eq!(procscript::serialize(&model), "DIM(1)\nBLACKMAN()\nZF()\nFT()\n");
//! ```

pub mod catalog;
pub mod diagnostics;
pub mod edit;
pub mod model;
pub mod op;
pub mod script;

pub type Result<T> = anyhow::Result<T>;

pub use catalog::{CascadeKind, OperationCatalog, canonicalize, match_prefix, normalize};
pub use edit::{EditOutcome, EditingSession, ParamEdit, apply_edit, regenerate_text};
pub use model::{PipelineModel, ProcessingSection, SectionEntry, SectionKey, SectionKind};
pub use op::{Arg, CascadeGroup, OperationNode};
pub use script::{RowSkipSink, parse, parse_with, serialize};
