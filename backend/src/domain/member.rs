//! Member identity carried by authenticated requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for member primitives.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemberValidationError {
    /// Identifier was zero or negative.
    #[error("member id must be a positive integer, got {0}")]
    NonPositiveId(i64),
    /// Role string did not name a known role.
    #[error("unknown member role: {0}")]
    UnknownRole(String),
}

/// Positive numeric member identifier.
///
/// # Examples
/// ```
/// use backend::domain::MemberId;
///
/// assert_eq!(MemberId::new(7).unwrap().get(), 7);
/// assert!(MemberId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct MemberId(i64);

impl MemberId {
    /// Validate that `raw` is a positive integer.
    pub fn new(raw: i64) -> Result<Self, MemberValidationError> {
        if raw < 1 {
            return Err(MemberValidationError::NonPositiveId(raw));
        }
        Ok(Self(raw))
    }

    /// Raw numeric value.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for MemberId {
    type Error = MemberValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MemberId> for i64 {
    fn from(value: MemberId) -> Self {
        value.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Member role.
///
/// Stored and serialised in upper case (`NORMAL`, `ADMIN`). Further roles
/// may be added, so match with a wildcard arm outside this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular diary author.
    #[default]
    Normal,
    /// Operator with administrative access.
    Admin,
}

impl Role {
    /// Canonical string form.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = MemberValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NORMAL" => Ok(Self::Normal),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(MemberValidationError::UnknownRole(s.to_owned())),
        }
    }
}

/// Authenticated member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    id: MemberId,
    email: String,
    name: String,
    profile_url: Option<String>,
    role: Role,
}

impl Member {
    /// Assemble a member from already-validated parts.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::{Member, MemberId, Role};
    ///
    /// let member = Member::new(
    ///     MemberId::new(1).unwrap(),
    ///     "writer@example.com",
    ///     "Writer",
    ///     None,
    ///     Role::Normal,
    /// );
    /// assert_eq!(member.id().get(), 1);
    /// ```
    pub fn new(
        id: MemberId,
        email: impl Into<String>,
        name: impl Into<String>,
        profile_url: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            profile_url,
            role,
        }
    }

    pub fn id(&self) -> MemberId {
        self.id
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn profile_url(&self) -> Option<&str> {
        self.profile_url.as_deref()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-1)]
    #[case(i64::MIN)]
    fn member_id_rejects_non_positive(#[case] raw: i64) {
        let err = MemberId::new(raw).expect_err("non-positive ids are rejected");
        assert_eq!(err, MemberValidationError::NonPositiveId(raw));
    }

    #[rstest]
    fn member_id_deserialises_through_validation() {
        let ok: MemberId = serde_json::from_str("12").expect("positive id");
        assert_eq!(ok.get(), 12);
        assert!(serde_json::from_str::<MemberId>("0").is_err());
    }

    #[rstest]
    #[case("NORMAL", Role::Normal)]
    #[case("normal", Role::Normal)]
    #[case(" ADMIN ", Role::Admin)]
    fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), expected);
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        let err = "GUEST".parse::<Role>().expect_err("unknown role");
        assert_eq!(err, MemberValidationError::UnknownRole("GUEST".to_owned()));
    }

    #[rstest]
    fn role_serialises_upper_case() {
        assert_eq!(
            serde_json::to_string(&Role::Admin).expect("serialise"),
            "\"ADMIN\""
        );
    }
}
