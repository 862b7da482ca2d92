pub mod auth;
pub mod categories;
pub mod skus;
pub mod spus;
pub mod stocks;

use validator::ValidationError;

/// Rejects text that is empty once surrounding whitespace is dropped.
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("Must not be blank".into());
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::not_blank;

    #[test]
    fn whitespace_only_is_blank() {
        assert!(not_blank("   ").is_err());
        assert!(not_blank("\t\n").is_err());
        assert!(not_blank(" ring ").is_ok());
    }
}
