pub mod formatter;

pub use formatter::{format_claim, format_submission, should_use_colors};
