// Load-more trigger - edge detection for the "end of list is visible" signal
//
// The renderer reports sentinel visibility every frame. Only the transition
// from hidden to visible asks for another page; holding the sentinel on
// screen does not. Repeats while a fetch is in flight are absorbed by the
// controller's Loading guard.

#[derive(Debug, Default)]
pub struct LoadMoreTrigger {
    visible: bool,
}

impl LoadMoreTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report current visibility; true on a hidden → visible transition
    pub fn observe(&mut self, visible: bool) -> bool {
        let fired = visible && !self.visible;
        self.visible = visible;
        fired
    }

    /// Forget the last observation so the next visible report fires again
    ///
    /// Called when a page lands or the filter changes: the list grew or was
    /// replaced, and a sentinel that is still on screen should ask again.
    pub fn reset(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_per_transition() {
        let mut trigger = LoadMoreTrigger::new();
        assert!(!trigger.observe(false));
        assert!(trigger.observe(true));
        assert!(!trigger.observe(true));
        assert!(!trigger.observe(true));
        assert!(!trigger.observe(false));
        assert!(trigger.observe(true));
    }

    #[test]
    fn test_reset_rearms() {
        let mut trigger = LoadMoreTrigger::new();
        assert!(trigger.observe(true));
        trigger.reset();
        assert!(trigger.observe(true));
    }
}
