//! Permission tokens and the permission set granted by the session.
//!
//! Tokens are opaque strings checked by membership. Two spellings are in
//! circulation: `"create employees"` (canonical) and `"employees-create"`
//! (legacy). Both are normalized to the canonical form on the way in, so a
//! set built from either spelling answers the same questions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::system::auth::UserInfo;

/// Action part of a permission token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verb {
    View,
    Create,
    Update,
    Delete,
    Import,
    Export,
}

impl Verb {
    pub const ALL: [Verb; 6] = [
        Verb::View,
        Verb::Create,
        Verb::Update,
        Verb::Delete,
        Verb::Import,
        Verb::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Import => "import",
            Self::Export => "export",
        }
    }

    /// Accepts the verb spellings seen in both token conventions.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "view" | "read" | "list" => Some(Self::View),
            "create" | "add" => Some(Self::Create),
            "update" | "edit" => Some(Self::Update),
            "delete" | "remove" => Some(Self::Delete),
            "import" => Some(Self::Import),
            "export" => Some(Self::Export),
            _ => None,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured permission: verb applied to a resource (plural, e.g. `employees`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permission {
    pub verb: Verb,
    pub resource: String,
}

impl Permission {
    pub fn new(verb: Verb, resource: impl Into<String>) -> Self {
        Self {
            verb,
            resource: resource.into().trim().to_ascii_lowercase(),
        }
    }

    /// Parse either `"<verb> <resource>"` or `"<resource>-<verb>"`.
    ///
    /// Resources may contain dashes themselves (`leave-types-update`), so the
    /// legacy form is split on the LAST dash.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        if token.is_empty() {
            return None;
        }

        if let Some((verb, resource)) = token.split_once(' ') {
            let resource = resource.trim();
            if let Some(verb) = Verb::parse(verb) {
                if !resource.is_empty() && !resource.contains(' ') {
                    return Some(Self::new(verb, resource));
                }
            }
            return None;
        }

        let (resource, verb) = token.rsplit_once('-')?;
        let verb = Verb::parse(verb)?;
        if resource.is_empty() {
            return None;
        }
        Some(Self::new(verb, resource))
    }

    /// Canonical token, e.g. `"create employees"`
    pub fn token(&self) -> String {
        format!("{} {}", self.verb, self.resource)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.verb, self.resource)
    }
}

/// Normalize a raw token to the canonical spelling.
///
/// Tokens that follow neither convention are kept as-is (trimmed); they are
/// still valid opaque capabilities, they just cannot be translated.
pub fn canonical_token(raw: &str) -> String {
    match Permission::parse(raw) {
        Some(p) => p.token(),
        None => raw.trim().to_string(),
    }
}

/// Immutable snapshot of the permissions granted to the current viewer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    tokens: BTreeSet<String>,
}

impl PermissionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = tokens
            .into_iter()
            .map(|t| canonical_token(t.as_ref()))
            .filter(|t| !t.is_empty())
            .collect();
        Self { tokens }
    }

    /// No session, or a session without permissions, grants nothing.
    pub fn from_session(user: Option<&UserInfo>) -> Self {
        match user {
            Some(u) => Self::from_tokens(&u.user_permissions),
            None => Self::empty(),
        }
    }

    pub fn allows(&self, token: &str) -> bool {
        self.tokens.contains(&canonical_token(token))
    }

    pub fn allows_permission(&self, permission: &Permission) -> bool {
        self.tokens.contains(&permission.token())
    }

    pub fn allows_any<I, S>(&self, tokens: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tokens.into_iter().any(|t| self.allows(t.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_conventions() {
        let a = Permission::parse("create employees").unwrap();
        let b = Permission::parse("employees-create").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.token(), "create employees");

        let legacy = Permission::parse("billers-update").unwrap();
        assert_eq!(legacy, Permission::new(Verb::Update, "billers"));
    }

    #[test]
    fn test_parse_dashed_resource() {
        let p = Permission::parse("leave-types-delete").unwrap();
        assert_eq!(p.resource, "leave-types");
        assert_eq!(p.verb, Verb::Delete);
        assert_eq!(p.token(), "delete leave-types");
    }

    #[test]
    fn test_unparseable_tokens_stay_opaque() {
        assert_eq!(Permission::parse("superuser"), None);
        assert_eq!(Permission::parse("fly to the moon"), None);
        assert_eq!(canonical_token("  superuser "), "superuser");

        let set = PermissionSet::from_tokens(["superuser"]);
        assert!(set.allows("superuser"));
        assert!(!set.allows("create employees"));
    }

    #[test]
    fn test_membership_is_convention_independent() {
        let set = PermissionSet::from_tokens(["employees-create", "VIEW Departments"]);
        assert!(set.allows("create employees"));
        assert!(set.allows("employees-create"));
        assert!(set.allows("view departments"));
        assert!(set.allows("departments-view"));
        assert!(!set.allows("delete employees"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_missing_session_grants_nothing() {
        let set = PermissionSet::from_session(None);
        assert!(set.is_empty());
        assert!(!set.allows("view departments"));

        let user = UserInfo {
            id: "u1".into(),
            username: "hr".into(),
            full_name: None,
            email: None,
            is_admin: false,
            user_permissions: vec![],
        };
        assert!(PermissionSet::from_session(Some(&user)).is_empty());
    }

    #[test]
    fn test_allows_any() {
        let set = PermissionSet::from_tokens(["export suppliers"]);
        assert!(set.allows_any(["import suppliers", "suppliers-export"]));
        assert!(!set.allows_any(Vec::<String>::new()));
    }
}
