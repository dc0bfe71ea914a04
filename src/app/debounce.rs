//! Delay-and-coalesce handling for the search term.
//!
//! The query string updates on every keystroke so the selection stays
//! shareable, but re-filtering the catalog per keystroke is wasted work.
//! [`Debouncer`] coalesces rapid edits: each edit records the latest value
//! and arms one timer; only the timer belonging to the final edit in a
//! burst emits, carrying that final value downstream.
//!
//! The plugin's only timing facility is Zellij's anonymous
//! `set_timeout`/`Timer` events, so cancellation is modelled by counting
//! timers in flight: a timer that fires while newer edits are pending
//! observes a non-zero count and emits nothing. Teardown clears the pending
//! value, so a stale timer can never mutate state after disposal.

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Coalesces rapid value changes into a single delayed emission.
///
/// Owned by the application state and driven by the event handler:
/// [`schedule`](Self::schedule) on every edit (the caller arms one timer
/// with the returned delay), [`fire`](Self::fire) on every timer event.
#[derive(Debug, Clone)]
pub struct Debouncer {
    /// Delay between the last edit and the emission, in seconds.
    delay_secs: f64,

    /// Latest value awaiting emission, if any edit is outstanding.
    pending: Option<String>,

    /// Timers armed but not yet fired. Only the last one may emit.
    timers_in_flight: u32,

    /// Last emitted value.
    settled: String,
}

impl Debouncer {
    /// Creates a debouncer with the given delay.
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        let delay_secs = delay_ms as f64 / 1000.0;
        Self {
            delay_secs,
            pending: None,
            timers_in_flight: 0,
            settled: String::new(),
        }
    }

    /// Records an edit and returns the delay for the timer the caller must
    /// arm.
    ///
    /// Any previously armed timers are implicitly invalidated: they will
    /// fire, but [`fire`](Self::fire) will ignore them.
    #[must_use]
    pub fn schedule(&mut self, value: impl Into<String>) -> f64 {
        self.pending = Some(value.into());
        self.timers_in_flight = self.timers_in_flight.saturating_add(1);
        self.delay_secs
    }

    /// Handles one timer expiry.
    ///
    /// Returns the coalesced value when this was the last armed timer (the
    /// input has quiesced for a full delay), `None` for superseded or stale
    /// timers.
    pub fn fire(&mut self) -> Option<String> {
        self.timers_in_flight = self.timers_in_flight.saturating_sub(1);
        if self.timers_in_flight > 0 {
            return None;
        }

        let value = self.pending.take()?;
        self.settled = value.clone();
        Some(value)
    }

    /// Last emitted value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.settled
    }

    /// Adopts a value immediately, discarding any pending emission.
    ///
    /// Used when the search term changes through a non-typing path (exit
    /// search, reset) and the debounced consumer must not lag behind.
    pub fn settle(&mut self, value: impl Into<String>) {
        self.pending = None;
        self.settled = value.into();
    }

    /// Drops any pending emission without touching the settled value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_of_edits_emits_once_with_final_value() {
        let mut debouncer = Debouncer::new(DEFAULT_DEBOUNCE_MS);

        // Five keystrokes inside one debounce window arm five timers.
        for value in ["v", "ve", "veg", "vega", "vegan"] {
            let delay = debouncer.schedule(value);
            assert!((delay - 0.3).abs() < f64::EPSILON);
        }

        // The first four expiries are superseded; only the last emits.
        let mut emissions = vec![];
        for _ in 0..5 {
            if let Some(value) = debouncer.fire() {
                emissions.push(value);
            }
        }
        assert_eq!(emissions, vec!["vegan".to_string()]);
        assert_eq!(debouncer.value(), "vegan");
    }

    #[test]
    fn quiesced_input_emits_per_edit() {
        let mut debouncer = Debouncer::new(DEFAULT_DEBOUNCE_MS);

        let _ = debouncer.schedule("a");
        assert_eq!(debouncer.fire(), Some("a".to_string()));

        let _ = debouncer.schedule("ab");
        assert_eq!(debouncer.fire(), Some("ab".to_string()));
    }

    #[test]
    fn cancelled_pending_value_never_emits() {
        let mut debouncer = Debouncer::new(DEFAULT_DEBOUNCE_MS);
        let _ = debouncer.schedule("half-typed");
        debouncer.cancel();

        assert_eq!(debouncer.fire(), None);
        assert_eq!(debouncer.value(), "");
    }

    #[test]
    fn settle_overrides_pending_emission() {
        let mut debouncer = Debouncer::new(DEFAULT_DEBOUNCE_MS);
        let _ = debouncer.schedule("typed");
        debouncer.settle("");

        assert_eq!(debouncer.fire(), None);
        assert_eq!(debouncer.value(), "");
    }

    #[test]
    fn stale_timer_after_emission_is_ignored() {
        let mut debouncer = Debouncer::new(DEFAULT_DEBOUNCE_MS);
        let _ = debouncer.schedule("done");
        assert_eq!(debouncer.fire(), Some("done".to_string()));

        // A spurious extra expiry has nothing to emit.
        assert_eq!(debouncer.fire(), None);
    }
}
