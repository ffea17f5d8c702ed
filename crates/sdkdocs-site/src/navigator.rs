//! Hash resolution, scroll-spy selection and scroll event coalescing.

use std::time::{Duration, Instant};

use percent_encoding::percent_decode_str;

use crate::topic::Topics;

/// Default proximity threshold, in pixels from the viewport top.
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 200.0;

/// Default minimum interval between scroll-spy evaluations.
pub const DEFAULT_SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Map a location hash to a known topic id.
///
/// Accepts the fragment with or without its leading `#` and percent-decodes
/// it. Returns `None` for an empty or unrecognised fragment.
#[must_use]
pub fn resolve_hash<'a>(topics: &'a Topics, hash: &str) -> Option<&'a str> {
    let fragment = hash.strip_prefix('#').unwrap_or(hash);
    if fragment.is_empty() {
        return None;
    }
    let decoded = percent_decode_str(fragment).decode_utf8_lossy();
    topics.get(&decoded).map(|topic| topic.id.as_str())
}

/// Pick the topic scroll-spy considers active.
///
/// Scans topics in declared order and keeps the **last** one whose anchor top
/// is strictly below `threshold`. Topics without an anchor are skipped. When
/// none qualify the first topic wins.
#[must_use]
pub fn active_section<'a, F>(topics: &'a Topics, threshold: f64, anchor_top: F) -> &'a str
where
    F: Fn(&str) -> Option<f64>,
{
    let mut current = topics.first().id.as_str();
    for topic in topics {
        if anchor_top(&topic.id).is_some_and(|top| top < threshold) {
            current = topic.id.as_str();
        }
    }
    current
}

/// Coalesces bursts of scroll events into evaluations at most once per interval.
///
/// The first event in a quiet period runs immediately. Events arriving inside
/// the interval are folded into one trailing evaluation, released by
/// [`poll`](Self::poll) once the interval has elapsed, so the final scroll
/// position is never dropped.
#[derive(Debug)]
pub struct ScrollThrottle {
    interval: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl ScrollThrottle {
    /// Create a throttle with the given minimum interval.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: false,
        }
    }

    /// Record a scroll event. Returns `true` if the handler should run now.
    pub fn record(&mut self, now: Instant) -> bool {
        if self.is_ready(now) {
            self.last_run = Some(now);
            self.pending = false;
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Release a deferred evaluation. Returns `true` if the handler should run now.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.pending && self.is_ready(now) {
            self.last_run = Some(now);
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Whether an evaluation is waiting for [`poll`](Self::poll).
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    fn is_ready(&self, now: Instant) -> bool {
        self.last_run
            .is_none_or(|last| now.saturating_duration_since(last) >= self.interval)
    }
}

impl Default for ScrollThrottle {
    fn default() -> Self {
        Self::new(DEFAULT_SCROLL_THROTTLE)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::topic::TopicEntry;

    fn topics() -> Topics {
        Topics::new(vec![
            TopicEntry::new("a", "A"),
            TopicEntry::new("b", "B"),
            TopicEntry::new("c", "C"),
        ])
        .unwrap()
    }

    fn offsets(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(id, top)| ((*id).to_owned(), *top)).collect()
    }

    #[test]
    fn test_resolve_hash() {
        let topics = topics();
        assert_eq!(resolve_hash(&topics, "#b"), Some("b"));
        assert_eq!(resolve_hash(&topics, "b"), Some("b"));
        assert_eq!(resolve_hash(&topics, "#zzz"), None);
        assert_eq!(resolve_hash(&topics, "#"), None);
        assert_eq!(resolve_hash(&topics, ""), None);
    }

    #[test]
    fn test_resolve_hash_percent_decodes() {
        let topics = Topics::new(vec![TopicEntry::new("q&a", "Q&A")]).unwrap();
        assert_eq!(resolve_hash(&topics, "#q%26a"), Some("q&a"));
    }

    #[test]
    fn test_active_section_last_qualifying_wins() {
        let topics = topics();
        let tops = offsets(&[("a", -500.0), ("b", 150.0), ("c", 199.0)]);
        assert_eq!(active_section(&topics, 200.0, |id| tops.get(id).copied()), "c");
    }

    #[test]
    fn test_active_section_threshold_is_strict() {
        let topics = topics();
        let tops = offsets(&[("a", 0.0), ("b", 200.0), ("c", 900.0)]);
        assert_eq!(active_section(&topics, 200.0, |id| tops.get(id).copied()), "a");
    }

    #[test]
    fn test_active_section_defaults_to_first() {
        let topics = topics();
        let tops = offsets(&[("a", 400.0), ("b", 800.0), ("c", 1200.0)]);
        assert_eq!(active_section(&topics, 200.0, |id| tops.get(id).copied()), "a");
        assert_eq!(active_section(&topics, 200.0, |_| None), "a");
    }

    #[test]
    fn test_active_section_skips_missing_anchors() {
        let topics = topics();
        let tops = offsets(&[("a", -50.0), ("c", 10.0)]);
        assert_eq!(active_section(&topics, 200.0, |id| tops.get(id).copied()), "c");
    }

    #[test]
    fn test_active_section_is_not_nearest_to_threshold() {
        // Out-of-order offsets: "b" is nearest to the threshold, but "c" is
        // the last qualifying topic in declared order.
        let topics = topics();
        let tops = offsets(&[("a", -10.0), ("b", 190.0), ("c", -300.0)]);
        assert_eq!(active_section(&topics, 200.0, |id| tops.get(id).copied()), "c");
    }

    #[test]
    fn test_throttle_runs_first_event_immediately() {
        let mut throttle = ScrollThrottle::new(Duration::from_millis(100));
        let start = Instant::now();
        assert!(throttle.record(start));
        assert!(!throttle.has_pending());
    }

    #[test]
    fn test_throttle_coalesces_burst_into_trailing_run() {
        let mut throttle = ScrollThrottle::new(Duration::from_millis(100));
        let start = Instant::now();

        assert!(throttle.record(start));
        assert!(!throttle.record(start + Duration::from_millis(10)));
        assert!(!throttle.record(start + Duration::from_millis(50)));
        assert!(throttle.has_pending());

        // Too early for the trailing evaluation
        assert!(!throttle.poll(start + Duration::from_millis(90)));
        assert!(throttle.poll(start + Duration::from_millis(100)));
        assert!(!throttle.has_pending());

        // Nothing left to release
        assert!(!throttle.poll(start + Duration::from_millis(500)));
    }

    #[test]
    fn test_throttle_runs_again_after_interval() {
        let mut throttle = ScrollThrottle::new(Duration::from_millis(100));
        let start = Instant::now();
        assert!(throttle.record(start));
        assert!(throttle.record(start + Duration::from_millis(150)));
    }

    #[test]
    fn test_zero_interval_never_defers() {
        let mut throttle = ScrollThrottle::new(Duration::ZERO);
        let start = Instant::now();
        assert!(throttle.record(start));
        assert!(throttle.record(start));
    }
}
