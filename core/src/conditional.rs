use crate::label::Label;
use crate::timer::ScopeTimer;

/// A [`ScopeTimer`] that only exists when a condition holds.
///
/// With a false condition nothing is built: the label factory is not
/// called, no thread number is assigned and the drop does nothing. With a
/// true condition the inner timer lives exactly as long as this wrapper.
#[must_use = "the scope is timed until this value is dropped"]
#[derive(Debug)]
pub struct ConditionalScopeTimer<'a> {
    timer: Option<ScopeTimer<'a>>,
}

impl<'a> ConditionalScopeTimer<'a> {
    pub fn new<F>(condition: bool, location: &'a str, label: F) -> Self
    where
        F: FnOnce() -> Label<'a>,
    {
        Self {
            timer: condition.then(|| ScopeTimer::new(location, label())),
        }
    }

    /// True when an inner timer exists and is recording.
    pub fn is_active(&self) -> bool {
        self.timer.as_ref().is_some_and(ScopeTimer::is_active)
    }

    pub fn timer(&self) -> Option<&ScopeTimer<'a>> {
        self.timer.as_ref()
    }
}
