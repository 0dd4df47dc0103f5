//! Team feature reducer: table keys and member-call results.

use crossterm::event::{KeyCode, KeyEvent};
use cwala_core::api::ApiError;
use cwala_core::api::types::{MessageResponse, User};

use super::state::TeamState;
use crate::common::task::{TaskKind, Tasks};
use crate::effects::UiEffect;
use crate::mutations::{StateMutation, StatusMutation};
use crate::overlays::OverlayRequest;

pub fn handle_team_key(
    team: &mut TeamState,
    tasks: &Tasks,
    key: KeyEvent,
) -> (Vec<UiEffect>, Option<OverlayRequest>) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            team.select_next();
            (vec![], None)
        }
        KeyCode::Char('k') | KeyCode::Up => {
            team.select_prev();
            (vec![], None)
        }
        KeyCode::Char('a') => (vec![], Some(OverlayRequest::MemberForm)),
        KeyCode::Char('d') => match team.selected_member() {
            Some(member) => (
                vec![],
                Some(OverlayRequest::ConfirmRemoveMember {
                    id: member.id.clone(),
                    name: member.name.clone(),
                }),
            ),
            None => (vec![], None),
        },
        KeyCode::Char('r') if !tasks.state(TaskKind::TeamFetch).is_running() => {
            (vec![UiEffect::FetchTeam { task: None }], None)
        }
        _ => (vec![], None),
    }
}

pub fn handle_team_loaded(
    team: &mut TeamState,
    result: Result<Vec<User>, ApiError>,
) -> Vec<StateMutation> {
    match result {
        Ok(members) => {
            team.set_members(members);
            vec![]
        }
        Err(err) => vec![StateMutation::Status(StatusMutation::Error(
            err.display_message(),
        ))],
    }
}

pub fn handle_member_added(
    team: &mut TeamState,
    result: Result<User, ApiError>,
) -> Vec<StateMutation> {
    match result {
        Ok(member) => {
            let name = member.name.clone();
            team.push_member(member);
            vec![StateMutation::Status(StatusMutation::Info(format!(
                "Added {name} to the team."
            )))]
        }
        Err(err) => vec![StateMutation::Status(StatusMutation::Error(
            err.display_message(),
        ))],
    }
}

pub fn handle_member_removed(
    team: &mut TeamState,
    id: &str,
    result: Result<MessageResponse, ApiError>,
) -> Vec<StateMutation> {
    match result {
        Ok(_) => {
            let name = team
                .remove_member(id)
                .map(|m| m.name)
                .unwrap_or_else(|| "member".to_string());
            vec![StateMutation::Status(StatusMutation::Info(format!(
                "Removed {name}."
            )))]
        }
        Err(err) => vec![StateMutation::Status(StatusMutation::Error(
            err.display_message(),
        ))],
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use cwala_core::api::types::{RegistrationStatus, Role};

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn member(id: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("Member {id}"),
            email: format!("{id}@example.com"),
            phone_number: "9876543210".to_string(),
            role: Role::User,
            registration_status: RegistrationStatus::Approved,
        }
    }

    /// `d` asks for a remove confirmation of the selected member.
    #[test]
    fn test_remove_key_targets_selected_member() {
        let mut team = TeamState::default();
        team.set_members(vec![member("a"), member("b")]);
        team.selected = 1;
        let tasks = Tasks::default();

        let (_, request) = handle_team_key(&mut team, &tasks, key(KeyCode::Char('d')));
        assert!(matches!(
            request,
            Some(OverlayRequest::ConfirmRemoveMember { ref id, .. }) if id == "b"
        ));
    }

    /// `d` does nothing when the table is empty.
    #[test]
    fn test_remove_key_ignored_without_selection() {
        let mut team = TeamState::default();
        team.set_members(vec![]);
        let tasks = Tasks::default();

        let (effects, request) = handle_team_key(&mut team, &tasks, key(KeyCode::Char('d')));
        assert!(effects.is_empty());
        assert!(request.is_none());
    }

    /// `r` refreshes unless a fetch is already running.
    #[test]
    fn test_refresh_gated_by_running_fetch() {
        let mut team = TeamState::default();
        let mut tasks = Tasks::default();

        let (effects, _) = handle_team_key(&mut team, &tasks, key(KeyCode::Char('r')));
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::FetchTeam { .. }]
        ));

        tasks.team_fetch.active = Some(crate::common::task::TaskId(1));
        let (effects, _) = handle_team_key(&mut team, &tasks, key(KeyCode::Char('r')));
        assert!(effects.is_empty());
    }

    /// A successful removal drops the row and reports the member's name.
    #[test]
    fn test_member_removed_updates_list() {
        let mut team = TeamState::default();
        team.set_members(vec![member("a"), member("b")]);

        let mutations = handle_member_removed(
            &mut team,
            "a",
            Ok(MessageResponse {
                message: "removed".to_string(),
            }),
        );
        assert_eq!(team.members.len(), 1);
        assert!(matches!(
            mutations.as_slice(),
            [StateMutation::Status(StatusMutation::Info(msg))] if msg.contains("Member a")
        ));
    }

    /// A rejected removal leaves the list alone and surfaces the error.
    #[test]
    fn test_member_remove_failure_keeps_list() {
        let mut team = TeamState::default();
        team.set_members(vec![member("a")]);

        let mutations = handle_member_removed(
            &mut team,
            "a",
            Err(ApiError::rejected(403, r#"{"message":"Not allowed"}"#)),
        );
        assert_eq!(team.members.len(), 1);
        assert!(matches!(
            mutations.as_slice(),
            [StateMutation::Status(StatusMutation::Error(msg))] if msg == "Not allowed"
        ));
    }
}
