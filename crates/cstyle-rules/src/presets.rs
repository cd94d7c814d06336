//! Rule presets and configuration-driven rule sets.

use crate::{
    ForbiddenCall, LiteralControlCharacter, LowerSnakeCaseNames, MainMustReturn,
    NonAsciiIdentifier, RawControlCharacter, ScreamingSnakeCaseConstants, UpperCamelCaseTypes,
};
use cstyle_core::{Config, RuleBox};
use tracing::debug;

/// Preset configurations for cstyle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Every built-in rule.
    #[default]
    Recommended,
    /// Type naming and string literal checks only.
    Minimal,
}

impl Preset {
    /// Returns the rules for this preset with default settings.
    #[must_use]
    pub fn rules(self) -> Vec<RuleBox> {
        match self {
            Self::Recommended => recommended_rules(),
            Self::Minimal => minimal_rules(),
        }
    }
}

impl std::str::FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recommended" => Ok(Self::Recommended),
            "minimal" => Ok(Self::Minimal),
            other => Err(format!(
                "unknown preset `{other}`. Valid values: recommended, minimal"
            )),
        }
    }
}

/// Returns the recommended set of rules.
///
/// Includes every built-in rule, in code order.
#[must_use]
pub fn recommended_rules() -> Vec<RuleBox> {
    all_rules()
}

/// Returns the minimal set of rules.
///
/// Includes:
/// - `upper-camel-case-types` (CSC001)
/// - `literal-control-character` (CSC004)
#[must_use]
pub fn minimal_rules() -> Vec<RuleBox> {
    vec![
        Box::new(UpperCamelCaseTypes::new()),
        Box::new(LiteralControlCharacter::new()),
    ]
}

/// Returns all available rules.
#[must_use]
pub fn all_rules() -> Vec<RuleBox> {
    vec![
        Box::new(UpperCamelCaseTypes::new()),
        Box::new(LowerSnakeCaseNames::new()),
        Box::new(ScreamingSnakeCaseConstants::new()),
        Box::new(LiteralControlCharacter::new()),
        Box::new(RawControlCharacter::new()),
        Box::new(ForbiddenCall::new()),
        Box::new(NonAsciiIdentifier::new()),
        Box::new(MainMustReturn::new()),
    ]
}

/// Builds the rules of `preset`, applying rule options from `config` and
/// dropping the rules it disables.
#[must_use]
pub fn rule_set(preset: Preset, config: &Config) -> Vec<RuleBox> {
    let names: Vec<&'static str> = preset.rules().iter().map(|r| r.name()).collect();
    names
        .into_iter()
        .filter(|name| {
            let enabled = config.is_rule_enabled(name);
            if !enabled {
                debug!("Rule disabled by config: {name}");
            }
            enabled
        })
        .filter_map(|name| configured_rule(name, config))
        .collect()
}

/// Selects rules by name or code, applying options from `config`.
///
/// # Errors
///
/// Returns the first selector that matches no rule.
pub fn rules_by_names<S: AsRef<str>>(selectors: &[S], config: &Config) -> Result<Vec<RuleBox>, String> {
    let known = all_rules();
    let mut rules = Vec::new();
    for selector in selectors {
        let selector = selector.as_ref().trim();
        let name = known
            .iter()
            .find(|r| r.name() == selector || r.code().eq_ignore_ascii_case(selector))
            .map(|r| r.name())
            .ok_or_else(|| selector.to_string())?;
        if let Some(rule) = configured_rule(name, config) {
            rules.push(rule);
        }
    }
    Ok(rules)
}

fn configured_rule(name: &str, config: &Config) -> Option<RuleBox> {
    let options = config.rule_config(name);
    let rule: RuleBox = match name {
        crate::upper_camel_case::NAME => Box::new(UpperCamelCaseTypes::new()),
        crate::lower_snake_case::NAME => Box::new(LowerSnakeCaseNames::new()),
        crate::screaming_snake_case::NAME => Box::new(ScreamingSnakeCaseConstants::new()),
        crate::literal_control_character::NAME => {
            let fix_tabs = options.is_some_and(|o| o.get_bool("fix_tabs", false));
            Box::new(LiteralControlCharacter::new().fix_tabs(fix_tabs))
        }
        crate::raw_control_character::NAME => Box::new(RawControlCharacter::new()),
        crate::forbidden_call::NAME => {
            let rule = ForbiddenCall::new();
            match options.and_then(|o| o.get_str_array("functions")) {
                Some(functions) => Box::new(rule.with_functions(functions)),
                None => Box::new(rule),
            }
        }
        crate::non_ascii_identifier::NAME => Box::new(NonAsciiIdentifier::new()),
        crate::main_must_return::NAME => Box::new(MainMustReturn::new()),
        _ => return None,
    };
    Some(rule)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(rules: &[RuleBox]) -> Vec<&'static str> {
        rules.iter().map(|r| r.name()).collect()
    }

    #[test]
    fn test_preset_rules() {
        assert_eq!(Preset::Recommended.rules().len(), 8);
        assert_eq!(
            names(&Preset::Minimal.rules()),
            ["upper-camel-case-types", "literal-control-character"]
        );
    }

    #[test]
    fn test_codes_are_unique() {
        let rules = all_rules();
        let mut codes: Vec<_> = rules.iter().map(|r| r.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), rules.len());
    }

    #[test]
    fn test_rule_set_drops_disabled() {
        let config = Config::parse(
            r#"
[rules.main-must-return]
enabled = false
"#,
        )
        .unwrap();
        let rules = rule_set(Preset::Recommended, &config);
        assert_eq!(rules.len(), 7);
        assert!(!names(&rules).contains(&"main-must-return"));
    }

    #[test]
    fn test_rules_by_name_or_code() {
        let config = Config::default();
        let rules = rules_by_names(&["forbidden-call", "csc001"], &config).unwrap();
        assert_eq!(names(&rules), ["forbidden-call", "upper-camel-case-types"]);
        assert_eq!(
            rules_by_names(&["no-such-rule"], &config).err().as_deref(),
            Some("no-such-rule")
        );
    }

    #[test]
    fn test_preset_parse() {
        assert_eq!("minimal".parse::<Preset>(), Ok(Preset::Minimal));
        assert!("strict".parse::<Preset>().is_err());
    }
}
