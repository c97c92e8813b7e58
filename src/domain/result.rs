//! Result type alias for ClinSynth
//!
//! This module provides a convenient Result type alias that uses ClinSynthError
//! as the error type.

use super::errors::ClinSynthError;

/// Result type alias for ClinSynth operations
///
/// # Examples
///
/// ```
/// use clinsynth::domain::result::Result;
/// use clinsynth::domain::errors::ClinSynthError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(ClinSynthError::MissingInput("vitals.csv".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, ClinSynthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ClinSynthError::Io("disk full".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<u64> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
