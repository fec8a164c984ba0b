/// Attempts are numbered from 1 per queue. Creating the queue is attempt 1;
/// every insertion then makes two, the node followed by its string copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePlan {
    #[default]
    Never,
    After(usize),
    Nth(usize),
    // Every(0) never fails.
    Every(usize),
}

impl FailurePlan {
    pub fn refuses(&self, attempt: usize) -> bool {
        match *self {
            FailurePlan::Never => false,
            FailurePlan::After(n) => attempt > n,
            FailurePlan::Nth(k) => attempt == k,
            FailurePlan::Every(0) => false,
            FailurePlan::Every(k) => attempt % k == 0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueConfig {
    pub failure_plan: FailurePlan,
}

impl QueueConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure_plan(mut self, plan: FailurePlan) -> Self {
        self.failure_plan = plan;
        self
    }
}
