use crate::{entity::enums::PlatingProcess, error::FieldError};

/// Shortest code accepted for a new SPU or SKU.
pub const MIN_CODE_LEN: usize = 4;

/// Stored in place of a blank optional SKU text attribute.
pub const TEXT_SENTINEL: &str = "无";

/// A root category is level 1; a child sits strictly below its parent.
pub fn check_hierarchy(parent_level: Option<i32>, level: i32) -> Result<(), FieldError> {
    match parent_level {
        Some(parent_level) if level <= parent_level => Err(FieldError::new(
            "level",
            "A child category's level must be greater than its parent's level",
        )),
        None if level != 1 => Err(FieldError::new(
            "level",
            "A category without a parent must be level 1",
        )),
        _ => Ok(()),
    }
}

/// Validates the code of a record being created and returns it trimmed.
pub fn check_new_code(code: &str) -> Result<String, FieldError> {
    let code = code.trim();
    if code.chars().count() < MIN_CODE_LEN {
        return Err(FieldError::new(
            "code",
            format!("Code must be at least {MIN_CODE_LEN} characters"),
        ));
    }
    Ok(code.to_string())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn text_or_sentinel(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| TEXT_SENTINEL.to_string())
}

pub fn plating_or_sentinel(value: Option<String>) -> Result<PlatingProcess, FieldError> {
    match non_blank(value) {
        None => Ok(PlatingProcess::None),
        Some(v) => PlatingProcess::parse(&v).ok_or_else(|| {
            FieldError::new("plating_process", format!("Unknown plating process `{v}`"))
        }),
    }
}

/// Optional SKU attributes after blank values were replaced by sentinels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkuAttributes {
    pub provider_name: String,
    pub plating_process: PlatingProcess,
    pub color: String,
    pub material: String,
}

impl SkuAttributes {
    pub fn normalize(
        provider_name: Option<String>,
        plating_process: Option<String>,
        color: Option<String>,
        material: Option<String>,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            provider_name: text_or_sentinel(provider_name),
            plating_process: plating_or_sentinel(plating_process)?,
            color: text_or_sentinel(color),
            material: text_or_sentinel(material),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_accepts_exactly_the_valid_pairs() {
        for level in -2..=6 {
            assert_eq!(check_hierarchy(None, level).is_ok(), level == 1, "root level {level}");
            for parent_level in 1..=5 {
                assert_eq!(
                    check_hierarchy(Some(parent_level), level).is_ok(),
                    level > parent_level,
                    "parent {parent_level}, level {level}"
                );
            }
        }
    }

    #[test]
    fn hierarchy_errors_point_at_level() {
        let err = check_hierarchy(Some(1), 1).unwrap_err();
        assert_eq!(err.field, "level");
    }

    #[test]
    fn code_length_boundary() {
        assert!(check_new_code("ABC").is_err());
        assert_eq!(check_new_code("ABCD").unwrap(), "ABCD");
        assert_eq!(check_new_code("  ABCDE ").unwrap(), "ABCDE");
        assert!(check_new_code("  AB  ").is_err());
    }

    #[test]
    fn code_length_counts_characters_not_bytes() {
        assert!(check_new_code("戒指").is_err());
        assert!(check_new_code("金戒指一").is_ok());
    }

    #[test]
    fn blank_attributes_become_sentinels() {
        let attrs = SkuAttributes::normalize(None, Some("  ".into()), Some(String::new()), None)
            .unwrap();
        assert_eq!(attrs.provider_name, TEXT_SENTINEL);
        assert_eq!(attrs.plating_process, PlatingProcess::None);
        assert_eq!(attrs.color, TEXT_SENTINEL);
        assert_eq!(attrs.material, TEXT_SENTINEL);
    }

    #[test]
    fn filled_attributes_are_kept() {
        let attrs = SkuAttributes::normalize(
            Some("Acme".into()),
            Some("rose_gold".into()),
            Some("red".into()),
            Some(" brass ".into()),
        )
        .unwrap();
        assert_eq!(attrs.provider_name, "Acme");
        assert_eq!(attrs.plating_process, PlatingProcess::RoseGold);
        assert_eq!(attrs.color, "red");
        assert_eq!(attrs.material, "brass");
    }

    #[test]
    fn unknown_plating_is_rejected() {
        let err = plating_or_sentinel(Some("chrome".into())).unwrap_err();
        assert_eq!(err.field, "plating_process");
    }
}
