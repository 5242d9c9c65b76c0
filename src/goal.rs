pub const MIN_DAILY_GOAL: usize = 100;
pub const MAX_DAILY_GOAL: usize = 5000;
pub const DEFAULT_DAILY_GOAL: usize = 500;
pub const DEFAULT_CHAPTER_TARGET: usize = 2000;
pub const DEFAULT_PROJECT_TARGET: usize = 50_000;

/// `current / target`, or 0 when there is no target to measure against.
pub fn progress(current: usize, target: usize) -> f64 {
    if target == 0 {
        return 0.0;
    }
    current as f64 / target as f64
}

/// Progress as a percentage, capped at 100 for display.
pub fn percent(current: usize, target: usize) -> f64 {
    (progress(current, target) * 100.0).min(100.0)
}

pub fn remaining(current: usize, target: usize) -> usize {
    target.saturating_sub(current)
}

/// Daily word goal. The target is the only stored value; everything else is
/// derived from the word count handed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalTracker {
    target: usize,
}

impl Default for GoalTracker {
    fn default() -> Self {
        Self {
            target: DEFAULT_DAILY_GOAL,
        }
    }
}

impl GoalTracker {
    pub fn new(target: usize) -> Self {
        let mut goal = Self::default();
        goal.set_goal(target);
        goal
    }

    pub fn set_goal(&mut self, target: usize) {
        self.target = target.clamp(MIN_DAILY_GOAL, MAX_DAILY_GOAL);
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn progress(&self, current: usize) -> f64 {
        progress(current, self.target)
    }

    pub fn percent(&self, current: usize) -> f64 {
        percent(current, self.target)
    }

    pub fn remaining(&self, current: usize) -> usize {
        remaining(current, self.target)
    }

    pub fn is_met(&self, current: usize) -> bool {
        current >= self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_goal() {
        assert_eq!(GoalTracker::default().target(), 500);
    }

    #[test]
    fn test_set_goal_clamps() {
        let mut goal = GoalTracker::default();

        goal.set_goal(50);
        assert_eq!(goal.target(), 100);

        goal.set_goal(9000);
        assert_eq!(goal.target(), 5000);

        goal.set_goal(0);
        assert_eq!(goal.target(), 100);

        goal.set_goal(usize::MAX);
        assert_eq!(goal.target(), 5000);

        goal.set_goal(1250);
        assert_eq!(goal.target(), 1250);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(GoalTracker::new(100).target(), 100);
        assert_eq!(GoalTracker::new(5000).target(), 5000);
    }

    #[test]
    fn test_quick_brown_fox_scenario() {
        let goal = GoalTracker::new(500);
        let words = crate::word_count::count_words("The quick brown fox");

        assert_eq!(words, 4);
        assert_eq!(goal.remaining(words), 496);
        assert!((goal.percent(words) - 0.8).abs() < 1e-9);
        assert!(!goal.is_met(words));
    }

    #[test]
    fn test_remaining_never_negative() {
        let goal = GoalTracker::new(100);

        assert_eq!(goal.remaining(150), 0);
        assert!(goal.is_met(150));
        assert!((goal.progress(150) - 1.5).abs() < 1e-9);
        assert_eq!(goal.percent(150), 100.0);
    }

    #[test]
    fn test_zero_target_progress() {
        assert_eq!(progress(10, 0), 0.0);
        assert_eq!(percent(10, 0), 0.0);
        assert_eq!(remaining(10, 0), 0);
    }

    #[test]
    fn test_chapter_and_project_targets() {
        assert!((percent(500, DEFAULT_CHAPTER_TARGET) - 25.0).abs() < 1e-9);
        assert!((percent(5000, DEFAULT_PROJECT_TARGET) - 10.0).abs() < 1e-9);
    }
}
