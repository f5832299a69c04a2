//! Column-name normalization.

/// Normalizes a column identifier: trim, lowercase, spaces to underscores.
///
/// Applying it twice gives the same result as applying it once.
///
/// # Examples
///
/// ```
/// use marine_ingest::normalize_column_name;
///
/// assert_eq!(normalize_column_name("  Data Value "), "data_value");
/// assert_eq!(normalize_column_name("data_value"), "data_value");
/// ```
pub fn normalize_column_name(value: &str) -> String {
    value.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_column_name() {
        assert_eq!(normalize_column_name("  Magnitude  "), "magnitude");
        assert_eq!(normalize_column_name("Series Reference"), "series_reference");
        assert_eq!(normalize_column_name("a  b"), "a__b");
    }

    #[test]
    fn test_normalize_column_name_idempotent() {
        let once = normalize_column_name(" Data Value ");
        assert_eq!(normalize_column_name(&once), once);
    }
}
