use once_cell::sync::Lazy;
use regex::Regex;

// Same shape a browser accepts for `<input type="email">`.
static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("email pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CredentialIssue {
    EmailMissing,
    EmailMalformed,
    PasswordMissing,
    PasswordTooShort { minimum: usize },
}

impl CredentialIssue {
    pub fn label(&self) -> String {
        match self {
            Self::EmailMissing => "email is empty".into(),
            Self::EmailMalformed => "email is malformed".into(),
            Self::PasswordMissing => "password is empty".into(),
            Self::PasswordTooShort { minimum } => {
                format!("password is shorter than {minimum} characters")
            }
        }
    }
}

pub fn check_email(email: &str) -> Result<(), CredentialIssue> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CredentialIssue::EmailMissing);
    }
    if !EMAIL.is_match(email) {
        return Err(CredentialIssue::EmailMalformed);
    }
    Ok(())
}

pub fn check_password(password: &str, minimum: usize) -> Result<(), CredentialIssue> {
    if password.is_empty() {
        return Err(CredentialIssue::PasswordMissing);
    }
    if password.chars().count() < minimum {
        return Err(CredentialIssue::PasswordTooShort { minimum });
    }
    Ok(())
}

/// Outcome of checking both login fields. Both checks always run so each
/// failing field gets its own feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CredentialCheck {
    pub email: Result<(), CredentialIssue>,
    pub password: Result<(), CredentialIssue>,
}

impl CredentialCheck {
    pub fn run(email: &str, password: &str, password_minimum: usize) -> Self {
        Self {
            email: check_email(email),
            password: check_password(password, password_minimum),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.email.is_ok() && self.password.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::Fake;
    use fake::faker::internet::en::SafeEmail;
    use quickcheck::{Arbitrary, Gen};

    #[derive(Debug, Clone)]
    struct ValidEmailFixture(pub String);

    impl Arbitrary for ValidEmailFixture {
        fn arbitrary<G: Gen>(g: &mut G) -> Self {
            let email = SafeEmail().fake_with_rng(g);
            Self(email)
        }
    }

    #[test]
    fn empty_email_is_rejected() {
        assert_eq!(check_email(""), Err(CredentialIssue::EmailMissing));
        assert_eq!(check_email("   "), Err(CredentialIssue::EmailMissing));
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["ana", "ana@", "@b.com", "a b@c.com", "a@-b.com", "a@b..com"] {
            assert_eq!(
                check_email(email),
                Err(CredentialIssue::EmailMalformed),
                "{email}"
            );
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(check_email("  a@b.com "), Ok(()));
        assert_eq!(check_email("a@localhost"), Ok(()));
    }

    #[quickcheck_macros::quickcheck]
    fn generated_emails_are_accepted(valid_email: ValidEmailFixture) -> bool {
        check_email(&valid_email.0).is_ok()
    }

    #[test]
    fn password_length_is_counted_in_characters() {
        assert_eq!(check_password("", 4), Err(CredentialIssue::PasswordMissing));
        assert_eq!(
            check_password("abc", 4),
            Err(CredentialIssue::PasswordTooShort { minimum: 4 })
        );
        assert_eq!(check_password("abcd", 4), Ok(()));
        assert_eq!(check_password("ñañá", 4), Ok(()));
        assert_eq!(
            check_password("😀😀", 4),
            Err(CredentialIssue::PasswordTooShort { minimum: 4 })
        );
    }

    #[test]
    fn labels_name_the_minimum() {
        assert_eq!(
            CredentialIssue::PasswordTooShort { minimum: 6 }.label(),
            "password is shorter than 6 characters"
        );
        assert_eq!(CredentialIssue::EmailMalformed.label(), "email is malformed");
    }

    #[test]
    fn both_fields_are_checked_independently() {
        let check = CredentialCheck::run("nope", "12", 4);
        assert!(check.email.is_err());
        assert!(check.password.is_err());
        assert!(!check.is_valid());

        let check = CredentialCheck::run("a@b.com", "12", 4);
        assert!(check.email.is_ok());
        assert!(!check.is_valid());

        assert!(CredentialCheck::run("a@b.com", "1234", 4).is_valid());
    }
}
