use std::fmt::Display;

/// Returns the noun suffix and the joined value list for a set of peak values.
///
/// Several values give `("s", "a, b")`, a single value gives `("", "a")`.
/// Returns `None` for an empty slice.
pub fn pluralize<T: Display>(values: &[T]) -> Option<(&'static str, String)> {
    match values {
        [] => None,
        [only] => Some(("", only.to_string())),
        many => {
            let joined = many
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Some(("s", joined))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize_single_value() {
        assert_eq!(pluralize(&[9]), Some(("", "9".to_string())));
    }

    #[test]
    fn test_pluralize_multiple_values() {
        assert_eq!(pluralize(&[9, 10]), Some(("s", "9, 10".to_string())));
        assert_eq!(
            pluralize(&["Monday", "Friday", "Sunday"]),
            Some(("s", "Monday, Friday, Sunday".to_string()))
        );
    }

    #[test]
    fn test_pluralize_empty() {
        let empty: [u32; 0] = [];
        assert_eq!(pluralize(&empty), None);
    }
}
