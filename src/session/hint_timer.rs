use std::time::{Duration, Instant};

/// Identifies one armed hint timer. A ticket from an earlier presentation
/// never matches a later one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HintTicket(u64);

#[derive(Clone, Debug)]
pub struct HintTimer {
    delay: Duration,
    generation: u64,
    deadline: Option<Instant>,
}

impl HintTimer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            generation: 0,
            deadline: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Arm for a new presentation, invalidating any earlier ticket.
    pub fn arm(&mut self, now: Instant) -> HintTicket {
        self.generation += 1;
        self.deadline = Some(now + self.delay);
        HintTicket(self.generation)
    }

    pub fn disarm(&mut self) {
        self.deadline = None;
    }

    pub fn ticket(&self) -> Option<HintTicket> {
        self.deadline.map(|_| HintTicket(self.generation))
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume `ticket` if it is the live one. Stale tickets return false.
    pub fn fire(&mut self, ticket: HintTicket) -> bool {
        if self.ticket() == Some(ticket) {
            self.deadline = None;
            true
        } else {
            false
        }
    }

    /// The live ticket, consumed, once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<HintTicket> {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                Some(HintTicket(self.generation))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(4000);

    #[test]
    fn test_poll_waits_for_deadline() {
        let start = Instant::now();
        let mut timer = HintTimer::new(DELAY);
        let ticket = timer.arm(start);
        assert_eq!(timer.poll(start + Duration::from_millis(3999)), None);
        assert_eq!(timer.poll(start + DELAY), Some(ticket));
        assert_eq!(timer.poll(start + DELAY * 2), None);
    }

    #[test]
    fn test_rearm_invalidates_old_ticket() {
        let start = Instant::now();
        let mut timer = HintTimer::new(DELAY);
        let old = timer.arm(start);
        let new = timer.arm(start);
        assert_ne!(old, new);
        assert!(!timer.fire(old));
        assert!(timer.fire(new));
        assert!(!timer.fire(new));
    }

    #[test]
    fn test_disarm_blocks_fire() {
        let mut timer = HintTimer::new(DELAY);
        let ticket = timer.arm(Instant::now());
        timer.disarm();
        assert!(!timer.fire(ticket));
        assert_eq!(timer.ticket(), None);
    }
}
