//! Tap arbitration between markers and the map canvas underneath them.
//!
//! The map surface reports a background tap for every tap on its canvas,
//! including taps that landed on a marker overlay. Two guards tell those
//! apart: a latch that is held for a short window after each marker tap
//! (same-tick bubbling) and a timestamped lookback on the last marker tap
//! (surfaces that deliver the background tap on a later tick).

/// Timing windows for tap arbitration, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArbiterConfig {
    /// How long the marker latch stays set after a marker tap.
    pub latch_window_ms: u32,
    /// Background taps this soon after a marker tap are treated as bubbling.
    pub lookback_window_ms: i64,
}

impl Default for ArbiterConfig {
    fn default() -> Self {
        ArbiterConfig {
            latch_window_ms: 200,
            lookback_window_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapSource {
    Marker,
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastAction {
    pub source: TapSource,
    pub at_ms: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundTap {
    /// The tap belongs to a marker; ignore it.
    Suppressed,
    /// A genuine tap on empty map.
    Accepted,
}

/// Identifies the marker tap that set the latch. Only the latest one may release it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatchTicket(u64);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClickArbiter {
    config: ArbiterConfig,
    marker_latched: bool,
    latch_generation: u64,
    last_action: Option<LastAction>,
}

impl ClickArbiter {
    pub fn new(config: ArbiterConfig) -> Self {
        ClickArbiter {
            config,
            marker_latched: false,
            latch_generation: 0,
            last_action: None,
        }
    }

    pub fn config(&self) -> ArbiterConfig {
        self.config
    }

    pub fn is_latched(&self) -> bool {
        self.marker_latched
    }

    pub fn last_action(&self) -> Option<LastAction> {
        self.last_action
    }

    /// Ticket of the most recent marker tap.
    pub fn latch_ticket(&self) -> LatchTicket {
        LatchTicket(self.latch_generation)
    }

    /// Record a marker tap. The caller must schedule [`release_latch`] with the
    /// returned ticket after `latch_window_ms`.
    ///
    /// [`release_latch`]: ClickArbiter::release_latch
    pub fn marker_tapped(&mut self, now_ms: i64) -> LatchTicket {
        self.marker_latched = true;
        self.latch_generation = self.latch_generation.wrapping_add(1);
        self.last_action = Some(LastAction {
            source: TapSource::Marker,
            at_ms: now_ms,
        });
        self.latch_ticket()
    }

    /// Release the latch unless a newer marker tap has re-armed it.
    pub fn release_latch(&mut self, ticket: LatchTicket) -> bool {
        if ticket != self.latch_ticket() {
            tracing::debug!("stale latch release ignored");
            return false;
        }
        self.marker_latched = false;
        true
    }

    pub fn background_tapped(&mut self, now_ms: i64) -> BackgroundTap {
        if self.marker_latched {
            tracing::debug!(now_ms, "background tap suppressed by marker latch");
            return BackgroundTap::Suppressed;
        }
        if let Some(LastAction {
            source: TapSource::Marker,
            at_ms,
        }) = self.last_action
        {
            // Negative elapsed (clock stepped back) also lands inside the window.
            if now_ms - at_ms < self.config.lookback_window_ms {
                tracing::debug!(
                    elapsed_ms = now_ms - at_ms,
                    "background tap suppressed by marker lookback"
                );
                return BackgroundTap::Suppressed;
            }
        }
        self.last_action = Some(LastAction {
            source: TapSource::Background,
            at_ms: now_ms,
        });
        BackgroundTap::Accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_alone_is_accepted() {
        let mut a = ClickArbiter::default();
        assert_eq!(a.background_tapped(1_000), BackgroundTap::Accepted);
        assert_eq!(
            a.last_action(),
            Some(LastAction {
                source: TapSource::Background,
                at_ms: 1_000
            })
        );
    }

    #[test]
    fn test_latch_suppresses_same_tick_bubble() {
        let mut a = ClickArbiter::default();
        a.marker_tapped(1_000);
        assert!(a.is_latched());
        assert_eq!(a.background_tapped(1_000), BackgroundTap::Suppressed);
    }

    #[test]
    fn test_lookback_suppresses_late_bubble_after_latch_release() {
        let mut a = ClickArbiter::default();
        let ticket = a.marker_tapped(1_000);
        a.release_latch(ticket);
        assert_eq!(a.background_tapped(1_499), BackgroundTap::Suppressed);
    }

    #[test]
    fn test_background_after_lookback_is_accepted() {
        let mut a = ClickArbiter::default();
        let ticket = a.marker_tapped(1_000);
        a.release_latch(ticket);
        assert_eq!(a.background_tapped(1_501), BackgroundTap::Accepted);
    }

    #[test]
    fn test_lookback_boundary_is_accepted() {
        let mut a = ClickArbiter::default();
        let ticket = a.marker_tapped(1_000);
        a.release_latch(ticket);
        assert_eq!(a.background_tapped(1_500), BackgroundTap::Accepted);
    }

    #[test]
    fn test_held_latch_wins_over_elapsed_lookback() {
        let mut a = ClickArbiter::default();
        a.marker_tapped(1_000);
        assert_eq!(a.background_tapped(5_000), BackgroundTap::Suppressed);
    }

    #[test]
    fn test_suppressed_tap_does_not_overwrite_last_action() {
        let mut a = ClickArbiter::default();
        a.marker_tapped(1_000);
        a.background_tapped(1_010);
        assert_eq!(a.last_action().unwrap().source, TapSource::Marker);
    }

    #[test]
    fn test_clock_step_back_is_suppressed() {
        let mut a = ClickArbiter::default();
        let ticket = a.marker_tapped(1_000);
        a.release_latch(ticket);
        assert_eq!(a.background_tapped(900), BackgroundTap::Suppressed);
    }

    #[test]
    fn test_custom_windows() {
        let mut a = ClickArbiter::new(ArbiterConfig {
            latch_window_ms: 50,
            lookback_window_ms: 100,
        });
        let ticket = a.marker_tapped(0);
        a.release_latch(ticket);
        assert_eq!(a.background_tapped(99), BackgroundTap::Suppressed);
        assert_eq!(a.background_tapped(100), BackgroundTap::Accepted);
        assert_eq!(a.config().latch_window_ms, 50);
    }

    #[test]
    fn test_stale_release_keeps_newer_latch() {
        let mut a = ClickArbiter::default();
        let first = a.marker_tapped(1_000);
        let second = a.marker_tapped(1_150);
        // First tap's window ends 50ms into the second tap's window
        assert!(!a.release_latch(first));
        assert!(a.is_latched());
        assert_eq!(a.background_tapped(5_000), BackgroundTap::Suppressed);
        assert!(a.release_latch(second));
        assert!(!a.is_latched());
    }
}
