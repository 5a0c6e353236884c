//! Serializes a plan plus patient and macro context into a paginated PDF.

mod pdf;

pub use pdf::{render_diet_plan, suggested_filename, ExportRequest};
