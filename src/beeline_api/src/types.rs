use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValueError {
    #[error("invalid login: must be a non-empty identifier without whitespace or path separators")]
    Login,
    #[error("invalid password: must be a non-empty string")]
    Password,
}

/// Portal login, usually the 10-digit phone number without the `+7` prefix.
///
/// It also names the session file, hence the path separator check.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);
impl Login {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        let t = s.trim();
        if !t.is_empty()
            && !t
                .chars()
                .any(|c| c.is_whitespace() || c == '/' || c == '\\')
            && t != "."
            && t != ".."
        {
            Ok(Self(t.into()))
        } else {
            Err(ValueError::Login)
        }
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl FromStr for Login {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl AsRef<str> for Login {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl std::fmt::Display for Login {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);
impl Password {
    pub fn new(s: &str) -> Result<Self, ValueError> {
        if s.is_empty() {
            Err(ValueError::Password)
        } else {
            Ok(Self(s.into()))
        }
    }
}
impl FromStr for Password {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}
