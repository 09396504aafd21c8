use avatar_session_types::scenario::ScenarioId;

/// Top-level screens. No history and no deep links; whatever screen the
/// router says is the one that exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Training,
    Review,
}

/// Switches between the three screens and carries the scenario selection.
/// Invalid transitions are rejected without state change.
#[derive(Debug)]
pub struct ViewRouter {
    view: View,
    scenario: ScenarioId,
}

impl ViewRouter {
    pub fn new() -> Self {
        Self {
            view: View::Landing,
            scenario: ScenarioId::default(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    /// landing → training, selecting the scenario to rehearse.
    pub fn start_training(&mut self, scenario: ScenarioId) -> bool {
        if self.view != View::Landing {
            tracing::warn!(view = ?self.view, "start_training outside landing");
            return false;
        }
        self.scenario = scenario;
        self.view = View::Training;
        true
    }

    /// training → review.
    pub fn end_training(&mut self) -> bool {
        if self.view != View::Training {
            tracing::warn!(view = ?self.view, "end_training outside training");
            return false;
        }
        self.view = View::Review;
        true
    }

    /// training → landing, dropping the selection back to the default.
    pub fn back_to_landing(&mut self) -> bool {
        if self.view != View::Training {
            tracing::warn!(view = ?self.view, "back_to_landing outside training");
            return false;
        }
        self.reset_to_landing();
        true
    }

    /// review → landing.
    pub fn return_home(&mut self) -> bool {
        if self.view != View::Review {
            tracing::warn!(view = ?self.view, "return_home outside review");
            return false;
        }
        self.reset_to_landing();
        true
    }

    fn reset_to_landing(&mut self) {
        self.view = View::Landing;
        self.scenario = ScenarioId::default();
    }
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_walkthrough_landing_training_review_landing() {
        let mut router = ViewRouter::new();
        assert_eq!(router.view(), View::Landing);

        assert!(router.start_training(ScenarioId::Dat));
        assert_eq!(router.view(), View::Training);
        assert_eq!(router.scenario(), ScenarioId::Dat);

        assert!(router.end_training());
        assert_eq!(router.view(), View::Review);

        assert!(router.return_home());
        assert_eq!(router.view(), View::Landing);
        assert_eq!(router.scenario(), ScenarioId::default());
    }

    #[test]
    fn back_to_landing_resets_selection() {
        let mut router = ViewRouter::new();
        router.start_training(ScenarioId::Ena);
        assert!(router.back_to_landing());
        assert_eq!(router.view(), View::Landing);
        assert_eq!(router.scenario(), ScenarioId::Alex);
    }

    #[test]
    fn invalid_transitions_leave_state_unchanged() {
        let mut router = ViewRouter::new();
        assert!(!router.end_training());
        assert!(!router.return_home());
        assert!(!router.back_to_landing());
        assert_eq!(router.view(), View::Landing);

        router.start_training(ScenarioId::Ena);
        assert!(!router.start_training(ScenarioId::Dat));
        assert_eq!(router.scenario(), ScenarioId::Ena);
    }
}
