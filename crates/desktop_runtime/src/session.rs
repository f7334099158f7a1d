//! Lock-screen credential checks.

/// Whether `input` unlocks a profile whose password is `password`.
///
/// An empty submission is accepted as a guest sign-in. Otherwise the comparison ignores case
/// and surrounding whitespace.
pub fn password_matches(input: &str, password: &str) -> bool {
    let input = input.trim();
    input.is_empty() || input.to_lowercase() == password.trim().to_lowercase()
}

/// Masked rendering of the password field.
pub fn masked_password(input: &str) -> String {
    "•".repeat(input.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_guest_sign_in() {
        assert!(password_matches("", "macos"));
        assert!(password_matches("   ", "macos"));
    }

    #[test]
    fn comparison_ignores_case() {
        assert!(password_matches("MacOS", "macos"));
        assert!(!password_matches("windows", "macos"));
    }

    #[test]
    fn mask_counts_characters_not_bytes() {
        assert_eq!(masked_password("äb"), "••");
    }
}
