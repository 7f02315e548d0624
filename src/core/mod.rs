// Public modules
pub mod casing;
pub mod error;
pub mod language;
pub mod settings;

// Re-export common types for convenience
pub use casing::{
    apply_reports, split_lines, CasingConvention, CasingOutcome, DiffEntry, Engine, QuoteCarry,
    RenamePair, RenameReport,
};
pub use error::{Error, ErrorCode, Result};
pub use language::{LanguageRegistry, LanguageTable};
pub use settings::CasingSettings;
