pub mod errors;
pub mod locale;
pub mod matching;
pub mod qualifiers;
pub mod res_table_config;

pub use errors::ConfigError;
pub use matching::is_better_match;
pub use qualifiers::{ParsedQualifiers, parse, parse_with};
pub use res_table_config::*;
