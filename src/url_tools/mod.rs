mod fixer;
mod parser;
mod query;

pub use fixer::{apply_all_fixes, apply_fix, build_clean_url, parse_suggestion};
pub use parser::{parse, parse_with, ParseOptions, ParsedUrl};
