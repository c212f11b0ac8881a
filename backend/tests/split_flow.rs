use expense_split_backend::storage::{InMemoryRoster, InMemorySplitRecordStore, SplitRecordStore};
use expense_split_backend::{CommitSplitCommand, ExpenseSplitService, SessionState};
use shared::{CommitSplitRequest, Participant, SplitConfig, SplitMode};

fn create_service(
    config: &SplitConfig,
) -> ExpenseSplitService<InMemoryRoster, InMemorySplitRecordStore> {
    let roster = InMemoryRoster::new();
    roster
        .set_group(
            "flat",
            vec![
                Participant::new("a", "Ana", 0.0),
                Participant::new("b", "Ben", 20.0),
                Participant::new("c", "Chloe", -15.0),
            ],
        )
        .unwrap();
    ExpenseSplitService::new(roster, InMemorySplitRecordStore::new(), config)
}

#[test]
fn test_percentage_split_from_form_input_to_records() {
    let service = create_service(&SplitConfig::default());
    let sessions = service.sessions();

    let session = service.start_session("flat", SplitMode::Percentage).unwrap();
    let session = sessions.toggle_participant(&session, "a").unwrap();
    let session = sessions.toggle_participant(&session, "b").unwrap();
    let session = sessions.set_contribution_input(&session, "a", "60").unwrap();
    let session = sessions.set_contribution_input(&session, "b", "39").unwrap();
    assert!(!service.preview(&session, 80.0).can_confirm);

    let session = sessions.set_contribution_input(&session, "b", "40%").unwrap();
    let preview = service.preview(&session, 80.0);
    assert!(preview.can_confirm);
    assert_eq!(preview.shares[0].formatted_share, "$48.00");
    assert_eq!(preview.shares[1].formatted_share, "$32.00");

    let command = CommitSplitCommand {
        expense_id: "groceries".to_string(),
        total_amount: 80.0,
    };
    let (session, result) = service.commit(&session, command).unwrap();
    assert_eq!(session.state(), SessionState::Committed);
    assert!(result.unallocated.abs() < 1e-9);

    let stored = service.store().list_split_records("groceries").unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|r| r.mode == SplitMode::Percentage));
    assert!((stored[0].share - 48.0).abs() < 1e-9);
    assert!((stored[1].share - 32.0).abs() < 1e-9);
}

#[test]
fn test_switching_modes_restores_percentages() {
    let service = create_service(&SplitConfig::default());
    let sessions = service.sessions();

    let session = service.start_session("flat", SplitMode::Percentage).unwrap();
    let session = sessions.select_all(&session).unwrap();
    let session = sessions.set_contribution(&session, "a", 50.0).unwrap();
    let session = sessions.set_contribution(&session, "b", 25.0).unwrap();
    let session = sessions.set_contribution(&session, "c", 25.0).unwrap();
    assert!(sessions.can_confirm(&session));

    let session = sessions.set_mode(&session, SplitMode::FixedAmount).unwrap();
    assert!(sessions.can_confirm(&session));
    let session = sessions.set_contribution(&session, "c", 0.0).unwrap();
    assert!(!sessions.can_confirm(&session));

    let session = sessions.set_mode(&session, SplitMode::Percentage).unwrap();
    assert_eq!(session.contributions().get("a"), Some(50.0));
    assert_eq!(session.contributions().get("b"), Some(25.0));
    assert!(!sessions.can_confirm(&session));
}

#[test]
fn test_reopen_stored_split_for_editing() {
    let service = create_service(&SplitConfig::default());
    let sessions = service.sessions();

    let session = service.start_session("flat", SplitMode::FixedAmount).unwrap();
    let session = sessions.select_participant(&session, "a").unwrap();
    let session = sessions.select_participant(&session, "c").unwrap();
    let session = sessions.set_contribution_input(&session, "a", "$12.40").unwrap();
    let session = sessions.set_contribution_input(&session, "c", "$7.60").unwrap();

    let request = CommitSplitRequest {
        expense_id: Some("pizza".to_string()),
        total_amount: 20.0,
    };
    let (_, response) = service.commit_request(&session, request).unwrap();
    assert_eq!(response.expense_id, "pizza");
    assert!(response.unallocated.abs() < 1e-9);

    let reopened = service.edit_existing("flat", "pizza").unwrap();
    assert_eq!(reopened.state(), SessionState::Editing);
    assert_eq!(reopened.mode(), SplitMode::FixedAmount);
    assert!(reopened.is_selected("a"));
    assert!(!reopened.is_selected("b"));
    assert_eq!(reopened.contributions().get("c"), Some(7.6));
    assert!(sessions.can_confirm(&reopened));
}

#[test]
fn test_reopened_split_can_be_committed_again() {
    let service = create_service(&SplitConfig::default());
    let sessions = service.sessions();

    let session = service.start_session("flat", SplitMode::Equal).unwrap();
    let session = sessions.select_all(&session).unwrap();
    let request = CommitSplitRequest {
        expense_id: Some("pizza".to_string()),
        total_amount: 30.0,
    };
    service.commit_request(&session, request).unwrap();
    assert_eq!(service.store().list_split_records("pizza").unwrap().len(), 3);

    let reopened = service.edit_existing("flat", "pizza").unwrap();
    let edited = sessions.deselect_participant(&reopened, "b").unwrap();
    let request = CommitSplitRequest {
        expense_id: Some("pizza".to_string()),
        total_amount: 30.0,
    };
    let (closed, response) = service.commit_request(&edited, request).unwrap();
    assert_eq!(closed.state(), SessionState::Committed);
    assert_eq!(response.records.len(), 2);

    let stored = service.store().list_split_records("pizza").unwrap();
    let participants: Vec<&str> = stored.iter().map(|r| r.participant_id.as_str()).collect();
    assert_eq!(participants, vec!["a", "c"]);
    assert!(stored.iter().all(|r| (r.share - 15.0).abs() < 1e-9));

    let reopened = service.edit_existing("flat", "pizza").unwrap();
    assert!(!reopened.is_selected("b"));
    assert_eq!(reopened.selected().len(), 2);
}

#[test]
fn test_failed_commit_leaves_session_editable() {
    let service = create_service(&SplitConfig::default());
    let sessions = service.sessions();

    let session = service.start_session("flat", SplitMode::FixedAmount).unwrap();
    let session = sessions.select_participant(&session, "a").unwrap();
    let session = sessions.set_contribution_input(&session, "a", "$9").unwrap();

    assert!(sessions.set_contribution_input(&session, "a", "nine").is_err());
    let command = CommitSplitCommand {
        expense_id: "cinema".to_string(),
        total_amount: f64::INFINITY,
    };
    assert!(service.commit(&session, command).is_err());
    assert!(service.store().list_split_records("cinema").unwrap().is_empty());

    assert_eq!(session.state(), SessionState::Editing);
    assert_eq!(session.contributions().get("a"), Some(9.0));
    let command = CommitSplitCommand {
        expense_id: "cinema".to_string(),
        total_amount: 9.0,
    };
    let (closed, result) = service.commit(&session, command).unwrap();
    assert_eq!(closed.state(), SessionState::Committed);
    assert!(result.unallocated.abs() < 1e-9);
}

#[test]
fn test_injected_currency_flows_into_preview() {
    let config = SplitConfig {
        currency_symbol: "€".to_string(),
        ..SplitConfig::default()
    };
    let service = create_service(&config);
    let sessions = service.sessions();

    let session = service.start_session("flat", SplitMode::FixedAmount).unwrap();
    let session = sessions.select_participant(&session, "b").unwrap();
    let session = sessions
        .set_contribution_input(&session, "b", "€1,250.50")
        .unwrap();

    let preview = service.preview(&session, 2000.0);
    assert_eq!(preview.shares[0].formatted_share, "€1250.50");
    assert_eq!(preview.shares[0].formatted_balance, "-€1230.50");
    assert_eq!(preview.formatted_total, "€2000.00");
    assert_eq!(preview.formatted_unallocated, "+€749.50");
}
