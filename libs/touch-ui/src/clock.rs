use std::time::{Duration, Instant};

/// Monotonic millisecond time source for the UI loop.
pub trait Clock {
    fn now_ms(&self) -> u64;

    /// Block for `ms` milliseconds. Input is not processed meanwhile.
    fn delay_ms(&mut self, ms: u64) {
        let until = self.now_ms().saturating_add(ms);
        while self.now_ms() < until {
            std::hint::spin_loop();
        }
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn delay_ms(&mut self, ms: u64) {
        (**self).delay_ms(ms);
    }
}

/// Wall clock measured from construction
pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        u64::try_from(self.start.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    fn delay_ms(&mut self, ms: u64) {
        std::thread::sleep(Duration::from_millis(ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }

    #[test]
    fn system_clock_delay_advances_time() {
        let mut clock = SystemClock::new();
        let before = clock.now_ms();
        clock.delay_ms(5);
        assert!(clock.now_ms() >= before + 5);
    }
}
