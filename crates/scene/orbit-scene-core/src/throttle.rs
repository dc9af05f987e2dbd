//! Leading-edge throttle over millisecond timestamps.

/// Accepts the first event, then drops everything until `cooldown_ms` has
/// elapsed since the last accepted event.
#[derive(Clone, Debug)]
pub struct LeadingThrottle {
    cooldown_ms: f64,
    last_accepted_ms: Option<f64>,
}

impl LeadingThrottle {
    pub fn new(cooldown_ms: f64) -> Self {
        Self {
            cooldown_ms: cooldown_ms.max(0.0),
            last_accepted_ms: None,
        }
    }

    pub fn cooldown_ms(&self) -> f64 {
        self.cooldown_ms
    }

    pub fn last_accepted_ms(&self) -> Option<f64> {
        self.last_accepted_ms
    }

    /// Milliseconds left in the current window at `now_ms`; zero when open.
    pub fn remaining_ms(&self, now_ms: f64) -> f64 {
        match self.last_accepted_ms {
            Some(last) => (self.cooldown_ms - (now_ms - last)).max(0.0),
            None => 0.0,
        }
    }

    /// Record an event at `now_ms`. Returns `true` when it is accepted.
    /// Non-finite timestamps are rejected and leave the window untouched.
    pub fn try_accept(&mut self, now_ms: f64) -> bool {
        if !now_ms.is_finite() {
            return false;
        }
        let open = match self.last_accepted_ms {
            Some(last) => now_ms - last >= self.cooldown_ms,
            None => true,
        };
        if open {
            self.last_accepted_ms = Some(now_ms);
        }
        open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_event_always_passes() {
        let mut throttle = LeadingThrottle::new(2000.0);
        assert!(throttle.try_accept(0.0));
        assert_eq!(throttle.last_accepted_ms(), Some(0.0));
    }

    #[test]
    fn drops_inside_window_and_reopens_at_boundary() {
        let mut throttle = LeadingThrottle::new(2000.0);
        assert!(throttle.try_accept(100.0));
        assert!(!throttle.try_accept(600.0));
        assert_eq!(throttle.remaining_ms(600.0), 1500.0);
        // dropped events do not extend the window
        assert!(throttle.try_accept(2100.0));
        assert!(!throttle.try_accept(4099.0));
        assert!(throttle.try_accept(4100.0));
    }

    #[test]
    fn non_finite_timestamps_are_not_recorded() {
        let mut throttle = LeadingThrottle::new(2000.0);
        assert!(!throttle.try_accept(f64::NAN));
        assert!(!throttle.try_accept(f64::INFINITY));
        assert_eq!(throttle.last_accepted_ms(), None);
        assert!(throttle.try_accept(1.0e9));
        assert!(!throttle.try_accept(f64::NAN));
        assert_eq!(throttle.last_accepted_ms(), Some(1.0e9));
    }

    #[test]
    fn clock_going_backwards_stays_closed() {
        let mut throttle = LeadingThrottle::new(2000.0);
        assert!(throttle.try_accept(5000.0));
        assert!(!throttle.try_accept(1000.0));
    }
}
