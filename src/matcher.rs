//! Origin-name filtering capability.
//!
//! A capture decides whether to keep an event by asking a [`Matcher`]
//! whether the event's origin name is of interest. The capture treats the
//! matcher as an opaque predicate; the matching strategies live here.

use glob::{Pattern, PatternError};

/// A predicate over origin names.
///
/// Implementations must be immutable and side-effect free; they are
/// evaluated on whatever thread delivers the event, without locking.
pub trait Matcher: Send + Sync {
    /// Whether events from `origin` should be captured.
    fn matches(&self, origin: &str) -> bool;
}

/// Matches a single origin name exactly.
#[derive(Debug, Clone)]
pub struct ExactMatcher {
    name: String,
}

impl ExactMatcher {
    /// Create a matcher for exactly `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Matcher for ExactMatcher {
    fn matches(&self, origin: &str) -> bool {
        self.name == origin
    }
}

/// Matches origin names against a wildcard pattern such as `w*`.
#[derive(Debug, Clone)]
pub struct WildcardMatcher {
    pattern: Pattern,
}

impl WildcardMatcher {
    /// Create a matcher for the given wildcard pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern is malformed, for example an
    /// unclosed character class.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
        })
    }
}

impl Matcher for WildcardMatcher {
    fn matches(&self, origin: &str) -> bool {
        self.pattern.matches(origin)
    }
}

/// Any thread-safe closure over the origin name is a matcher.
impl<F> Matcher for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, origin: &str) -> bool {
        self(origin)
    }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::expect_used, reason = "simplify test setup")]

    use rstest::rstest;

    use super::{ExactMatcher, Matcher, WildcardMatcher};

    #[test]
    fn exact_matcher_requires_equality() {
        let matcher = ExactMatcher::new("goanna");
        assert!(matcher.matches("goanna"));
        assert!(!matcher.matches("goann"));
        assert!(!matcher.matches("goannas"));
    }

    #[rstest]
    #[case::prefix("wallaby", true)]
    #[case::other_prefix("wombat", true)]
    #[case::unmatched("echidna", false)]
    fn wildcard_matcher_follows_the_pattern(#[case] origin: &str, #[case] expected: bool) {
        let matcher = WildcardMatcher::new("w*").expect("valid pattern");
        assert_eq!(matcher.matches(origin), expected);
    }

    #[test]
    fn wildcard_matcher_rejects_malformed_patterns() {
        assert!(WildcardMatcher::new("w[").is_err());
    }

    #[test]
    fn closures_are_matchers() {
        let matcher = |origin: &str| origin.len() > 5;
        assert!(Matcher::matches(&matcher, "echidna"));
        assert!(!Matcher::matches(&matcher, "skink"));
    }
}
