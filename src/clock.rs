use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// 计时来源
///
/// `now()` 返回相对某个固定起点的单调时间，两次读数之差即耗时。
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;

    /// 从 `start` 到现在经过的时间
    fn elapsed_since(&self, start: Duration) -> Duration {
        self.now().saturating_sub(start)
    }
}

/// 基于 `Instant` 的真实时钟
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// 每读一次前进固定步长的时钟，用于得到可预测的耗时
#[derive(Debug)]
pub struct StepClock {
    step_nanos: u64,
    ticks: AtomicU64,
}

impl StepClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step_nanos: u64::try_from(step.as_nanos()).unwrap_or(u64::MAX),
            ticks: AtomicU64::new(0),
        }
    }

    /// 已被读取的次数
    pub fn reads(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Clock for StepClock {
    fn now(&self) -> Duration {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        Duration::from_nanos(tick.saturating_mul(self.step_nanos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clock_advances_per_read() {
        let clock = StepClock::new(Duration::from_millis(10));
        let start = clock.now();
        assert_eq!(start, Duration::ZERO);
        assert_eq!(clock.elapsed_since(start), Duration::from_millis(10));
        assert_eq!(clock.reads(), 2);
    }

    #[test]
    fn test_step_clock_saturates_on_huge_step() {
        let clock = StepClock::new(Duration::MAX);
        assert_eq!(clock.now(), Duration::ZERO);
        assert_eq!(clock.now(), Duration::from_nanos(u64::MAX));
        assert_eq!(clock.now(), Duration::from_nanos(u64::MAX));
        assert_eq!(clock.reads(), 3);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
