pub mod paths;

pub use paths::{md_path, normalize_path, split_extension};
