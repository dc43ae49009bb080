//! Filing of new submissions into the materials tree
//!
//! Filing is split into pure steps and one side-effecting step:
//!
//! - [`classify`]: infers title and author from upload naming conventions, or reports
//!   the submission as ambiguous so the caller can ask for them
//! - [`slug`]: normalized directory and file names derived from title and author
//! - [`file`]: moves the submission into `<category>/<slug>/` and writes its sidecar

pub mod classify;
pub mod file;
pub mod slug;

pub use classify::{Classification, classify, parse_readme_header, parse_upload_filename};
pub use file::{FiledEntry, FilingPlan, FilingRequest, file_entry, plan_filing};
pub use slug::{author_slug, parse_custom_filename, target_filename, title_slug};
