//! Edits flowing back into the model: position resolution for new
//! operations and structured-parameter synchronization for existing ones.

pub mod params;
pub mod position;
pub mod session;

pub use params::{ParamKind, ParamSpec, regenerate_text, schema_for};
pub use position::set_operation;
pub use session::{EditOutcome, EditTarget, EditingSession, ParamEdit, SessionState, apply_edit};
