use validator::ValidateEmail;

/// Emails are compared and stored trimmed and lowercased
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    email.validate_email()
}

/// Splits a list of emails given as a single string, e.g. a form field
/// or a csv cell. Both `,` and `;` are accepted as separators.
pub fn split_email_list(emails: &str) -> Vec<String> {
    emails
        .split(|c| c == ',' || c == ';')
        .map(normalize_email)
        .filter(|e| !e.is_empty())
        .collect()
}
