//! Print-policy resolution and per-identity memoization.
//!
//! Each statement identity gets a boolean decision: log the full
//! reconstructed SQL, or only a summary line. The decision is derived from
//! declared overrides (operation-level wins over group-level, both falling
//! back to the configured default) and memoized for the process lifetime.

use std::collections::HashMap;

use dashmap::DashMap;

use crate::error::TraceResult;

/// An explicit print override declared on an operation or its group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrintOverride {
    pub print: bool,
}

impl Default for PrintOverride {
    /// Declaring an override without a flag means "print".
    fn default() -> Self {
        Self { print: true }
    }
}

/// The overrides found for one statement identity.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyOverrides {
    pub operation: Option<PrintOverride>,
    pub group: Option<PrintOverride>,
}

impl PolicyOverrides {
    /// The override that decides, if any. Operation-level wins.
    pub fn effective(&self) -> Option<PrintOverride> {
        self.operation.or(self.group)
    }
}

/// Maps a statement identity to its declared print overrides.
///
/// Implementations may introspect attributes, read a table, or consult
/// whatever static configuration the host has. A lookup failure (the
/// identity names no known operation) propagates and leaves the decision
/// uncached, so it is retried on the next call.
pub trait PolicyResolver {
    fn lookup(&self, identity: &str) -> TraceResult<PolicyOverrides>;
}

/// Registry-backed resolver.
///
/// Operation overrides are keyed by the full dotted identity; group
/// overrides by the identity's namespace prefix (everything before the
/// last `.`).
#[derive(Debug, Default)]
pub struct StaticPolicyResolver {
    operations: HashMap<String, PrintOverride>,
    groups: HashMap<String, PrintOverride>,
}

impl StaticPolicyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an operation-level override.
    pub fn operation(mut self, identity: impl Into<String>, print: bool) -> Self {
        self.operations.insert(identity.into(), PrintOverride { print });
        self
    }

    /// Declare a group-level override for a namespace.
    pub fn group(mut self, namespace: impl Into<String>, print: bool) -> Self {
        self.groups.insert(namespace.into(), PrintOverride { print });
        self
    }
}

impl PolicyResolver for StaticPolicyResolver {
    fn lookup(&self, identity: &str) -> TraceResult<PolicyOverrides> {
        Ok(PolicyOverrides {
            operation: self.operations.get(identity).copied(),
            group: namespace(identity).and_then(|ns| self.groups.get(ns)).copied(),
        })
    }
}

/// The final segment of a dotted identity (the operation's method name).
pub fn method_name(identity: &str) -> &str {
    identity.rsplit('.').next().unwrap_or(identity)
}

/// The namespace prefix of a dotted identity, if it has one.
pub fn namespace(identity: &str) -> Option<&str> {
    identity.rfind('.').map(|dot| &identity[..dot])
}

/// Concurrent memoized print decisions, one per statement identity.
///
/// Read-mostly after warm-up; concurrent first-callers for the same
/// identity may both compute the decision, and last-write-wins is fine
/// because the resolver is pure. No eviction: the set of distinct
/// identities is bounded by the host codebase.
#[derive(Debug, Default)]
pub struct PrintPolicyCache {
    decisions: DashMap<String, bool>,
}

impl PrintPolicyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the statement's SQL should be logged in full.
    ///
    /// Resolver errors propagate without writing a cache entry.
    pub fn should_log<R>(&self, identity: &str, resolver: &R, default_print: bool) -> TraceResult<bool>
    where
        R: PolicyResolver + ?Sized,
    {
        if let Some(decision) = self.decisions.get(identity) {
            return Ok(*decision);
        }
        let overrides = resolver.lookup(identity)?;
        let decision = overrides
            .effective()
            .map(|o| o.print)
            .unwrap_or(default_print);
        self.decisions.insert(identity.to_string(), decision);
        tracing::debug!("print decision for {} = {}", identity, decision);
        Ok(decision)
    }

    /// Number of memoized identities.
    pub fn len(&self) -> usize {
        self.decisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decisions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TraceError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts lookups so memoization is observable.
    struct CountingResolver {
        inner: StaticPolicyResolver,
        lookups: AtomicUsize,
    }

    impl CountingResolver {
        fn new(inner: StaticPolicyResolver) -> Self {
            Self {
                inner,
                lookups: AtomicUsize::new(0),
            }
        }
    }

    impl PolicyResolver for CountingResolver {
        fn lookup(&self, identity: &str) -> TraceResult<PolicyOverrides> {
            self.lookups.fetch_add(1, Ordering::Relaxed);
            self.inner.lookup(identity)
        }
    }

    struct FailingResolver;

    impl PolicyResolver for FailingResolver {
        fn lookup(&self, identity: &str) -> TraceResult<PolicyOverrides> {
            Err(TraceError::policy(identity, "unknown operation"))
        }
    }

    #[test]
    fn test_operation_override_wins_over_group() {
        let resolver = StaticPolicyResolver::new()
            .group("user_dao", true)
            .operation("user_dao.find_all", false);
        let cache = PrintPolicyCache::new();
        assert!(!cache.should_log("user_dao.find_all", &resolver, true).unwrap());
        assert!(cache.should_log("user_dao.find_by_id", &resolver, false).unwrap());
    }

    #[test]
    fn test_default_applies_without_overrides() {
        let resolver = StaticPolicyResolver::new();
        let cache = PrintPolicyCache::new();
        assert!(cache.should_log("a.b", &resolver, true).unwrap());
        assert!(!cache.should_log("c.d", &resolver, false).unwrap());
    }

    #[test]
    fn test_decision_is_memoized() {
        let resolver = CountingResolver::new(StaticPolicyResolver::new());
        let cache = PrintPolicyCache::new();
        assert!(cache.should_log("a.b", &resolver, true).unwrap());
        assert!(cache.should_log("a.b", &resolver, true).unwrap());
        assert_eq!(resolver.lookups.load(Ordering::Relaxed), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_lookup_caches_nothing() {
        let cache = PrintPolicyCache::new();
        assert!(cache.should_log("a.b", &FailingResolver, true).is_err());
        assert!(cache.is_empty());
        // Retried on the next call.
        assert!(cache.should_log("a.b", &FailingResolver, true).is_err());
    }

    #[test]
    fn test_override_defaults_to_print() {
        assert!(PrintOverride::default().print);
    }

    #[test]
    fn test_identity_segments() {
        assert_eq!(method_name("user_dao.find_by_id"), "find_by_id");
        assert_eq!(method_name("bare"), "bare");
        assert_eq!(namespace("app.user_dao.find_by_id"), Some("app.user_dao"));
        assert_eq!(namespace("bare"), None);
    }
}
