pub const SKILL_BAR_THRESHOLD: f64 = 0.2;
pub const SKILL_BAR_DELAY_MS: u32 = 200;
pub const SCROLL_REVEAL_THRESHOLD: f64 = 0.15;
pub const COLLAPSED_WIDTH: &str = "0%";

/// Width a skill bar should grow to. An empty authored width collapses to
/// `0%`.
pub fn stored_target_width(authored: &str) -> String {
    let authored = authored.trim();
    if authored.is_empty() {
        COLLAPSED_WIDTH.to_string()
    } else {
        authored.to_string()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkillBarState {
    Collapsed,
    Revealed,
}

/// One skill bar: grows once, the first time it becomes visible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkillBar {
    target_width: String,
    state: SkillBarState,
}

impl SkillBar {
    pub fn new(authored_width: &str) -> Self {
        Self {
            target_width: stored_target_width(authored_width),
            state: SkillBarState::Collapsed,
        }
    }

    pub fn target_width(&self) -> &str {
        &self.target_width
    }

    pub fn state(&self) -> SkillBarState {
        self.state
    }

    /// Feeds an intersection sample. Returns the width to animate to the
    /// first time the bar is visible and `None` ever after.
    pub fn on_intersection(&mut self, is_intersecting: bool) -> Option<&str> {
        if !is_intersecting || self.state == SkillBarState::Revealed {
            return None;
        }

        self.state = SkillBarState::Revealed;
        Some(&self.target_width)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealAction {
    Show,
    Hide,
}

/// Scroll-reveal follows visibility both ways, unlike skill bars.
pub fn reveal_action(is_intersecting: bool) -> RevealAction {
    if is_intersecting {
        RevealAction::Show
    } else {
        RevealAction::Hide
    }
}
