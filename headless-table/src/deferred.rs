//! Two-tier values: an immediate value for echo, a committed value for work
//!
//! Typing into a search box should echo every keystroke at once while the
//! expensive projection only follows the latest committed query. The host
//! decides when to commit through a [`CommitPolicy`] and the `flush` calls.

use std::time::Duration;
use std::time::Instant;

/// When a [`Deferred`] value commits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommitPolicy {
    /// Every `set` commits.
    #[default]
    Immediate,
    /// Only [`Deferred::flush`] commits, typically from an idle callback.
    Manual,
    /// [`Deferred::flush_due`] commits once no `set` happened for the quiet
    /// period.
    Debounce(Duration),
}

#[derive(Debug, Clone)]
pub struct Deferred<T> {
    immediate: T,
    committed: T,
    policy: CommitPolicy,
    last_set: Option<Instant>,
}

impl<T: Clone + PartialEq> Deferred<T> {
    pub fn new(value: T, policy: CommitPolicy) -> Self {
        Self {
            immediate: value.clone(),
            committed: value,
            policy,
            last_set: None,
        }
    }

    /// Updates the immediate value. Returns `true` if the committed value
    /// changed as well.
    pub fn set(&mut self, value: T) -> bool {
        self.set_at(value, Instant::now())
    }

    /// [`set`](Self::set) with an explicit clock.
    pub fn set_at(&mut self, value: T, now: Instant) -> bool {
        self.immediate = value;
        self.last_set = Some(now);
        match self.policy {
            CommitPolicy::Immediate => self.flush(),
            CommitPolicy::Manual | CommitPolicy::Debounce(_) => false,
        }
    }

    /// Commits the latest immediate value. Superseded values are never
    /// committed. Returns `true` if the committed value changed.
    pub fn flush(&mut self) -> bool {
        self.last_set = None;
        if self.committed == self.immediate {
            return false;
        }
        self.committed = self.immediate.clone();
        true
    }

    /// Commits if the debounce quiet period has elapsed at `now`. With other
    /// policies this is the same as [`flush`](Self::flush).
    pub fn flush_due(&mut self, now: Instant) -> bool {
        match (self.policy, self.last_set) {
            (CommitPolicy::Debounce(quiet), Some(last)) if now.duration_since(last) < quiet => {
                false
            }
            _ => self.flush(),
        }
    }

    /// `true` while the committed value lags behind the immediate one.
    pub fn is_pending(&self) -> bool {
        self.committed != self.immediate
    }

    pub fn immediate(&self) -> &T {
        &self.immediate
    }

    pub fn committed(&self) -> &T {
        &self.committed
    }

    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CommitPolicy) {
        self.policy = policy;
        if policy == CommitPolicy::Immediate {
            self.flush();
        }
    }
}

impl<T: Clone + PartialEq + Default> Default for Deferred<T> {
    fn default() -> Self {
        Self::new(T::default(), CommitPolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_immediate_commits_on_set() {
        let mut value = Deferred::new(String::new(), CommitPolicy::Immediate);
        assert!(value.set("a".into()));
        assert_eq!(value.committed(), "a");
        assert!(!value.is_pending());
    }

    #[test]
    fn test_manual_converges_to_latest() {
        let mut value = Deferred::new(String::new(), CommitPolicy::Manual);
        value.set("u".into());
        value.set("us".into());
        value.set("use".into());
        assert_eq!(value.immediate(), "use");
        assert_eq!(value.committed(), "");
        assert!(value.is_pending());

        assert!(value.flush());
        assert_eq!(value.committed(), "use");
        assert!(!value.flush());
    }

    #[test]
    fn test_debounce() {
        let start = Instant::now();
        let quiet = Duration::from_millis(300);
        let mut value = Deferred::new(String::new(), CommitPolicy::Debounce(quiet));

        value.set_at("ab".into(), start);
        assert!(!value.flush_due(start + Duration::from_millis(100)));
        value.set_at("abc".into(), start + Duration::from_millis(200));
        assert!(!value.flush_due(start + Duration::from_millis(400)));
        assert!(value.flush_due(start + Duration::from_millis(500)));
        assert_eq!(value.committed(), "abc");
    }

    #[test]
    fn test_switching_to_immediate_flushes() {
        let mut value = Deferred::new(0, CommitPolicy::Manual);
        value.set(5);
        value.set_policy(CommitPolicy::Immediate);
        assert_eq!(*value.committed(), 5);
    }
}
