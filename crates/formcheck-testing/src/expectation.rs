use super::matcher::CallMatcher;

/// An expectation on presenter calls
#[derive(Debug, Clone)]
pub struct Expectation {
    pub(crate) matcher: CallMatcher,
    pub(crate) times: Times,
}

impl Expectation {
    /// Create a new expectation
    pub fn new(matcher: CallMatcher) -> Self {
        Self {
            matcher,
            times: Times::Once,
        }
    }

    /// Expect exactly one matching call
    pub fn once(mut self) -> Self {
        self.times = Times::Once;
        self
    }

    /// Expect exactly n matching calls
    pub fn times(mut self, n: usize) -> Self {
        self.times = Times::Exactly(n);
        self
    }

    /// Expect at least one matching call
    pub fn at_least_once(mut self) -> Self {
        self.times = Times::AtLeast(1);
        self
    }

    /// Expect no matching call
    pub fn never(mut self) -> Self {
        self.times = Times::Exactly(0);
        self
    }
}

/// Define how many times an expectation should be matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Once,
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
    Any,
}

impl Times {
    /// Check an observed count, describing the mismatch on failure
    pub fn check(self, count: usize) -> Result<(), String> {
        let expected = match self {
            Times::Once if count != 1 => "1 call".to_string(),
            Times::Exactly(n) if count != n => format!("{n} calls"),
            Times::AtLeast(n) if count < n => format!("at least {n} calls"),
            Times::AtMost(n) if count > n => format!("at most {n} calls"),
            _ => return Ok(()),
        };
        Err(format!("expected {expected}, got {count}"))
    }
}
