//! Preview sandbox policy.
//!
//! The preview iframe runs with an explicit set of capability grants.
//! Nothing is implied: every grant is named in the policy, and the policy
//! renders deterministically into the iframe `sandbox` attribute.
//!
//! The baseline grants scripts and same-origin access. Same-origin lets
//! pad scripts use storage and other origin-bound APIs, at the price that
//! the preview document can also reach the shell's origin state. Dropping
//! `same-origin` from `[preview] sandbox` trades those APIs for isolation.
//! Either way, every document swap tears the iframe down, so leaked
//! timers or globals never outlive their document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A single iframe capability grant.
///
/// Config names are the kebab-case variant names (`scripts`,
/// `same-origin`, ...); `token()` maps each grant to its sandbox
/// attribute token.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    Scripts,
    SameOrigin,
    Forms,
    Modals,
    Popups,
    Downloads,
}

impl Capability {
    pub const ALL: [Capability; 6] = [
        Capability::Scripts,
        Capability::SameOrigin,
        Capability::Forms,
        Capability::Modals,
        Capability::Popups,
        Capability::Downloads,
    ];

    /// The iframe `sandbox` attribute token for this grant.
    pub const fn token(self) -> &'static str {
        match self {
            Capability::Scripts => "allow-scripts",
            Capability::SameOrigin => "allow-same-origin",
            Capability::Forms => "allow-forms",
            Capability::Modals => "allow-modals",
            Capability::Popups => "allow-popups",
            Capability::Downloads => "allow-downloads",
        }
    }
}

/// The full set of grants for the preview iframe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SandboxPolicy {
    grants: BTreeSet<Capability>,
}

impl SandboxPolicy {
    /// No grants at all: a fully locked-down frame.
    pub fn empty() -> Self {
        Self {
            grants: BTreeSet::new(),
        }
    }

    /// The default policy: scripts plus same-origin.
    pub fn baseline() -> Self {
        let mut policy = Self::empty();
        policy.grant(Capability::Scripts);
        policy.grant(Capability::SameOrigin);
        policy
    }

    pub fn grant(&mut self, cap: Capability) {
        self.grants.insert(cap);
    }

    pub fn revoke(&mut self, cap: Capability) {
        self.grants.remove(&cap);
    }

    pub fn allows(&self, cap: Capability) -> bool {
        self.grants.contains(&cap)
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    /// Render the `sandbox` attribute value.
    ///
    /// Deterministic: grants always appear in declaration order, so the
    /// same policy always produces the same attribute string.
    pub fn attr_value(&self) -> String {
        self.grants
            .iter()
            .map(|cap| cap.token())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self::baseline()
    }
}

impl fmt::Display for SandboxPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("(none)")
        } else {
            f.write_str(&self.attr_value())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_attr_value() {
        assert_eq!(
            SandboxPolicy::baseline().attr_value(),
            "allow-scripts allow-same-origin"
        );
    }

    #[test]
    fn test_empty_policy() {
        let policy = SandboxPolicy::empty();
        assert!(policy.is_empty());
        assert_eq!(policy.attr_value(), "");
        assert!(!policy.allows(Capability::Scripts));
    }

    #[test]
    fn test_revoke_same_origin() {
        let mut policy = SandboxPolicy::baseline();
        policy.revoke(Capability::SameOrigin);
        assert_eq!(policy.attr_value(), "allow-scripts");
    }

    #[test]
    fn test_attr_value_order_is_stable() {
        // Grant in reverse order; rendering is still declaration order
        let mut policy = SandboxPolicy::empty();
        policy.grant(Capability::Popups);
        policy.grant(Capability::Forms);
        policy.grant(Capability::Scripts);
        assert_eq!(
            policy.attr_value(),
            "allow-scripts allow-forms allow-popups"
        );
    }

    #[test]
    fn test_deserialize_from_config_list() {
        #[derive(Deserialize)]
        struct Wrapper {
            sandbox: SandboxPolicy,
        }

        let w: Wrapper = toml::from_str(r#"sandbox = ["scripts", "forms"]"#).unwrap();
        assert!(w.sandbox.allows(Capability::Scripts));
        assert!(w.sandbox.allows(Capability::Forms));
        assert!(!w.sandbox.allows(Capability::SameOrigin));
    }

    #[test]
    fn test_deserialize_rejects_unknown_grant() {
        #[derive(Deserialize)]
        struct Wrapper {
            #[allow(dead_code)]
            sandbox: SandboxPolicy,
        }

        assert!(toml::from_str::<Wrapper>(r#"sandbox = ["allow-everything"]"#).is_err());
    }
}
