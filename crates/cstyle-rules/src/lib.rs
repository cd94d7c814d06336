//! # cstyle-rules
//!
//! Built-in style rules for cstyle.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | CSC001 | `upper-camel-case-types` | Record and enum names in `UpperCamelCase` |
//! | CSC002 | `lower-snake-case-names` | Function, variable and label names in `lower_snake_case` |
//! | CSC003 | `screaming-snake-case-constants` | Constants and enumerators in `UPPER_CASE` |
//! | CSC004 | `literal-control-character` | No control characters in string literals |
//! | CSC005 | `raw-control-character` | No control characters anywhere in the file |
//! | CSC006 | `forbidden-call` | No `gets`, `strcpy`, `sprintf` |
//! | CSC007 | `non-ascii-identifier` | ASCII-only identifiers |
//! | CSC008 | `main-must-return` | `main` ends with `return` |
//!
//! ## Usage
//!
//! ```ignore
//! use cstyle_core::Analyzer;
//! use cstyle_rules::{ForbiddenCall, UpperCamelCaseTypes};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(UpperCamelCaseTypes::new())
//!     .rule(ForbiddenCall::new().with_functions(["gets", "strcat"]))
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod forbidden_call;
pub mod literal_control_character;
pub mod lower_snake_case;
pub mod main_must_return;
pub mod non_ascii_identifier;
pub mod raw_control_character;
pub mod screaming_snake_case;
pub mod upper_camel_case;

mod naming;
mod presets;

#[cfg(test)]
mod test_support;

pub use forbidden_call::ForbiddenCall;
pub use literal_control_character::LiteralControlCharacter;
pub use lower_snake_case::LowerSnakeCaseNames;
pub use main_must_return::MainMustReturn;
pub use non_ascii_identifier::NonAsciiIdentifier;
pub use presets::{all_rules, minimal_rules, recommended_rules, rule_set, rules_by_names, Preset};
pub use raw_control_character::RawControlCharacter;
pub use screaming_snake_case::ScreamingSnakeCaseConstants;
pub use upper_camel_case::UpperCamelCaseTypes;

/// Re-export core types for convenience.
pub use cstyle_core::{Rule, Severity, Violation};
