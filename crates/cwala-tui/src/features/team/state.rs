//! Team feature state.

use cwala_core::api::types::User;

/// Member list and table selection for the team screen.
#[derive(Debug, Default)]
pub struct TeamState {
    pub members: Vec<User>,
    pub selected: usize,
    /// Set after the first successful fetch; an empty loaded list renders
    /// differently from a list that has not arrived yet.
    pub loaded: bool,
}

impl TeamState {
    pub fn selected_member(&self) -> Option<&User> {
        self.members.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.members.is_empty() {
            self.selected = (self.selected + 1).min(self.members.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn set_members(&mut self, members: Vec<User>) {
        self.members = members;
        self.loaded = true;
        self.clamp_selection();
    }

    pub fn push_member(&mut self, member: User) {
        self.members.push(member);
    }

    /// Removes a member by id, returning the removed record.
    pub fn remove_member(&mut self, id: &str) -> Option<User> {
        let idx = self.members.iter().position(|m| m.id == id)?;
        let removed = self.members.remove(idx);
        self.clamp_selection();
        Some(removed)
    }

    /// Count of members still awaiting approval (home summary line).
    pub fn pending_count(&self) -> usize {
        self.members
            .iter()
            .filter(|m| !m.registration_status.is_approved())
            .count()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn clamp_selection(&mut self) {
        if self.members.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.members.len() {
            self.selected = self.members.len() - 1;
        }
    }
}
