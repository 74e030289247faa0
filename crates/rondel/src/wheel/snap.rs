use crate::wheel::{BASE_SNAP_INTERVAL, MAX_SNAP_STEPS, MIN_SNAP_STEPS};
use std::time::{Duration, Instant};

/// Number of animation steps for a snap covering `distance` (normalized).
///
/// Near items take fewer steps, so the angular speed stays roughly constant.
pub fn snap_step_count(distance: f64) -> usize {
    let (min, max) = (MIN_SNAP_STEPS as f64, MAX_SNAP_STEPS as f64);
    (max * distance).clamp(min, max).round_ties_even() as usize
}

pub fn snap_interval(snap_speed: f64) -> Duration {
    BASE_SNAP_INTERVAL.div_f64(snap_speed)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SnapPoll {
    /// Not due yet.
    Pending,
    /// Rotate every item by this many radians.
    Step(f64),
    /// All steps ran; the target index should now be selected.
    Done(usize),
}

/// An in-flight snap animation.
///
/// The task only plans motion; whoever owns it applies each step. Dropping the
/// task cancels the animation, leaving items where the last applied step put them.
#[derive(Debug, Clone)]
pub struct SnapTask {
    target: usize,
    step_delta: f64,
    steps: usize,
    remaining: usize,
    interval: Duration,
    resume_at: Instant,
}

impl SnapTask {
    /// Plans a snap of `offset` radians; the first step is due at `now`.
    pub fn plan(target: usize, offset: f64, distance: f64, interval: Duration, now: Instant) -> Self {
        let steps = snap_step_count(distance);
        Self {
            target,
            step_delta: offset / steps as f64,
            steps,
            remaining: steps,
            interval,
            resume_at: now,
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn step_delta(&self) -> f64 {
        self.step_delta
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn resume_at(&self) -> Instant {
        self.resume_at
    }

    /// Advances by at most one step. After the last step the task still waits
    /// one interval before reporting `Done`.
    pub fn poll(&mut self, now: Instant) -> SnapPoll {
        if now < self.resume_at {
            return SnapPoll::Pending;
        }
        if self.remaining == 0 {
            return SnapPoll::Done(self.target);
        }
        self.remaining -= 1;
        self.resume_at = now + self.interval;
        SnapPoll::Step(self.step_delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_step_count_is_clamped() {
        assert_eq!(snap_step_count(0.0), 3);
        assert_eq!(snap_step_count(0.25), 3);
        assert_eq!(snap_step_count(0.5), 5);
        assert_eq!(snap_step_count(0.625), 6);
        assert_eq!(snap_step_count(1.0), 10);
        // 7.5 rounds to even
        assert_eq!(snap_step_count(0.75), 8);
    }

    #[test]
    fn test_interval_scales_with_speed() {
        assert_eq!(snap_interval(1.0), Duration::from_millis(1));
        let slow = snap_interval(0.05);
        assert!(slow.abs_diff(Duration::from_millis(20)) < Duration::from_micros(1));
    }

    #[test]
    fn test_poll_walks_every_step_then_finishes() {
        let start = Instant::now();
        let interval = Duration::from_millis(2);
        let mut task = SnapTask::plan(4, -PI / 2.0, 0.5, interval, start);
        assert_eq!(task.steps(), 5);

        let mut t = start;
        let mut total = 0.0;
        let mut stepped = 0;
        loop {
            match task.poll(t) {
                SnapPoll::Step(d) => {
                    total += d;
                    stepped += 1;
                    assert_eq!(task.poll(t), SnapPoll::Pending);
                }
                SnapPoll::Done(target) => {
                    assert_eq!(target, 4);
                    break;
                }
                SnapPoll::Pending => unreachable!("polled at resume time"),
            }
            t += interval;
        }

        assert_eq!(stepped, 5);
        assert!((total + PI / 2.0).abs() < 1e-12);
    }
}
