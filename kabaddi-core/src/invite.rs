//! Invite codes for teams and tournaments.
//!
//! A code is a short prefix derived from the entity name plus six random hex
//! characters, e.g. `THU-9F3A1C`. Codes are compared case-insensitively so
//! users can type them however they like.

use uuid::Uuid;

const PREFIX_LEN: usize = 3;
const SUFFIX_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InviteKind {
    Team,
    Tournament,
}

impl InviteKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Tournament => "tournament",
        }
    }
}

pub fn generate_invite_code(name: &str) -> String {
    let mut prefix: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(PREFIX_LEN)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    while prefix.len() < PREFIX_LEN {
        prefix.push('X');
    }

    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect::<String>()
        .to_ascii_uppercase();

    format!("{prefix}-{suffix}")
}

pub fn normalize_invite_code(input: &str) -> String {
    input.trim().to_ascii_uppercase()
}

pub fn invite_codes_match(stored: &str, input: &str) -> bool {
    let input = normalize_invite_code(input);
    !input.is_empty() && normalize_invite_code(stored) == input
}

/// Text handed to the platform share sheet.
pub fn share_message(kind: InviteKind, name: &str, code: &str) -> String {
    format!(
        "Join my Kabaddi {} \"{}\" with code: {}",
        kind.as_str(),
        name,
        code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        let code = generate_invite_code("Thunderbolts");
        assert_eq!(code.len(), PREFIX_LEN + 1 + SUFFIX_LEN);
        assert!(code.starts_with("THU-"));
        assert!(code[4..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(code[4..], code[4..].to_ascii_uppercase());
    }

    #[test]
    fn test_short_and_symbolic_names_padded() {
        assert!(generate_invite_code("A1").starts_with("A1X-"));
        assert!(generate_invite_code("!!").starts_with("XXX-"));
        assert!(generate_invite_code("Désert Storm").starts_with("DSE-"));
    }

    #[test]
    fn test_codes_differ() {
        assert_ne!(generate_invite_code("Cup"), generate_invite_code("Cup"));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        assert!(invite_codes_match("THU-9F3A1C", "  thu-9f3a1c "));
        assert!(!invite_codes_match("THU-9F3A1C", "THU-000000"));
        assert!(!invite_codes_match("", "   "));
    }

    #[test]
    fn test_share_message() {
        assert_eq!(
            share_message(InviteKind::Team, "Thunderbolts", "THU-9F3A1C"),
            "Join my Kabaddi team \"Thunderbolts\" with code: THU-9F3A1C"
        );
        assert_eq!(
            share_message(InviteKind::Tournament, "Monsoon Cup", "MON-ABC123"),
            "Join my Kabaddi tournament \"Monsoon Cup\" with code: MON-ABC123"
        );
    }
}
