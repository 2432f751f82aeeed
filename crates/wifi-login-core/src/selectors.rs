//! CSS selectors for the captive-portal form.
//!
//! The flow assumes a generic two-field form: an `input` named `username`
//! and one named `password`.  Hidden inputs with the same names (some portals
//! carry them for CSRF or pre-filled values) are excluded.

/// The visible username field.
pub const USERNAME_FIELD: &str = r#"input[name="username"]:not([type="hidden"])"#;

/// The visible password field.
pub const PASSWORD_FIELD: &str = r#"input[name="password"]:not([type="hidden"])"#;

/// Submit controls, in the order they are tried.
pub const SUBMIT_CONTROLS: [&str; 2] = [r#"input[type="submit"]"#, r#"button[type="submit"]"#];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_submit_is_tried_before_button_submit() {
        assert!(SUBMIT_CONTROLS[0].starts_with("input"));
        assert!(SUBMIT_CONTROLS[1].starts_with("button"));
    }

    #[test]
    fn test_credential_selectors_exclude_hidden_inputs() {
        assert!(USERNAME_FIELD.contains(r#":not([type="hidden"])"#));
        assert!(PASSWORD_FIELD.contains(r#":not([type="hidden"])"#));
    }
}
