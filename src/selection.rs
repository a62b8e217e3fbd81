use crate::catalog::HairOption;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    cut: Option<&'static HairOption>,
    color: Option<&'static HairOption>,
    detail: String,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cut(&self) -> Option<&'static HairOption> {
        self.cut
    }

    pub fn color(&self) -> Option<&'static HairOption> {
        self.color
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn toggle_cut(&mut self, option: &'static HairOption) {
        toggle(&mut self.cut, option);
    }

    pub fn toggle_color(&mut self, option: &'static HairOption) {
        toggle(&mut self.color, option);
    }

    pub fn set_detail(&mut self, detail: impl Into<String>) {
        self.detail = detail.into();
    }

    pub fn is_empty(&self) -> bool {
        self.cut.is_none() && self.color.is_none() && self.detail.trim().is_empty()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn toggle(slot: &mut Option<&'static HairOption>, option: &'static HairOption) {
    *slot = match *slot {
        Some(current) if current.id == option.id => None,
        _ => Some(option),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_color, find_cut};

    fn cut(id: &str) -> &'static HairOption {
        find_cut(id).unwrap()
    }

    fn color(id: &str) -> &'static HairOption {
        find_color(id).unwrap()
    }

    #[test]
    fn selecting_on_one_axis_keeps_the_other() {
        let mut state = SelectionState::new();
        state.toggle_cut(cut("bob"));
        state.toggle_color(color("jet-black"));
        assert_eq!(state.cut().map(|o| o.id), Some("bob"));
        assert_eq!(state.color().map(|o| o.id), Some("jet-black"));
    }

    #[test]
    fn new_option_replaces_previous_on_same_axis() {
        let mut state = SelectionState::new();
        state.toggle_cut(cut("bob"));
        state.toggle_cut(cut("pixie"));
        assert_eq!(state.cut().map(|o| o.id), Some("pixie"));
    }

    #[test]
    fn selecting_active_option_clears_axis() {
        let mut state = SelectionState::new();
        state.toggle_color(color("copper"));
        state.toggle_cut(cut("buzz-cut"));
        state.toggle_color(color("copper"));
        assert!(state.color().is_none());
        assert_eq!(state.cut().map(|o| o.id), Some("buzz-cut"));
    }

    #[test]
    fn reset_clears_everything() {
        let mut state = SelectionState::new();
        state.toggle_cut(cut("shag"));
        state.set_detail("more volume");
        assert!(!state.is_empty());
        state.reset();
        assert_eq!(state, SelectionState::new());
        assert!(state.is_empty());
    }

    #[test]
    fn whitespace_detail_counts_as_empty() {
        let mut state = SelectionState::new();
        state.set_detail("   ");
        assert!(state.is_empty());
    }
}
