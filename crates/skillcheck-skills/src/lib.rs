//! Skill document parsing and validation for skillcheck.
//!
//! Parses `SKILL.md` files (YAML frontmatter plus Markdown body), validates
//! them against the Agent Skills and Claude Code specifications, and
//! classifies the results. `CLAUDE.md` companion files are parsed leniently
//! and checked alongside.

pub mod checker;
pub mod companion;
pub mod frontmatter;
pub mod models;
pub mod parser;
pub mod tools;
pub mod validation;

pub use checker::{check, check_all, CheckReport, CompanionReport, SpecResult, Status};
pub use companion::{find_companion, parse_companion, validate_companion};
pub use frontmatter::{extract, extract_lenient, Frontmatter, FrontmatterError};
pub use models::{CompanionDocument, Issue, SkillDocument, Spec, ValidationResult};
pub use parser::{parse, parse_many, parse_str, SkillError, SKILL_FILE_NAME};
pub use tools::{tokenize, Convention};
pub use validation::{validate, validate_many};
