//! Page controller behavior against a recording fake API.

mod common;

use common::{fields, form, record, Call, FakeApi, ScriptedPrompter};
use rollbook::app::{
    AppController, CONFIRM_DELETE_MESSAGE, DELETE_ERROR_MESSAGE, FETCH_ERROR_MESSAGE,
    SAVE_ERROR_MESSAGE,
};
use rollbook::ui::{FormMode, TableAction};
use rollbook::{AppState, DeleteOutcome, RecordId, SubmitOutcome};
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

fn controller(
    api: &FakeApi,
    prompter: &ScriptedPrompter,
) -> AppController<FakeApi, ScriptedPrompter> {
    AppController::new(api.clone(), prompter.clone(), form())
}

fn drain(rx: &mut UnboundedReceiver<AppState>) -> Vec<AppState> {
    let mut snapshots = Vec::new();
    while let Ok(snapshot) = rx.try_recv() {
        snapshots.push(snapshot);
    }
    snapshots
}

#[tokio::test]
async fn test_initial_load_shows_exactly_fetched_records() {
    let api = FakeApi::new();
    let fetched = vec![
        record(json!({"id": 1, "name": "A", "present": true})),
        record(json!({"id": 2, "name": "B", "present": false})),
    ];
    api.push_list(fetched.clone());
    let mut c = controller(&api, &ScriptedPrompter::default());

    assert!(c.state().loading);
    c.mount().await;

    assert_eq!(c.state().records, fetched);
    assert!(!c.state().loading);
    assert!(c.state().error.is_none());
    assert_eq!(api.calls(), vec![Call::GetAll]);
}

#[tokio::test]
async fn test_mount_fetches_only_once() {
    let api = FakeApi::new();
    let mut c = controller(&api, &ScriptedPrompter::default());

    c.mount().await;
    c.mount().await;

    assert_eq!(api.calls(), vec![Call::GetAll]);
}

#[tokio::test]
async fn test_failed_first_load_sets_banner_and_clears_loading() {
    let api = FakeApi::new();
    api.push_list_failure();
    let mut c = controller(&api, &ScriptedPrompter::default());

    c.mount().await;

    assert!(!c.state().loading);
    assert_eq!(c.state().error.as_deref(), Some(FETCH_ERROR_MESSAGE));
    assert!(c.state().records.is_empty());
    assert!(c.render().contains(FETCH_ERROR_MESSAGE));
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_records() {
    let api = FakeApi::new();
    let previous = vec![record(json!({"id": 1, "name": "A"}))];
    api.push_list(previous.clone());
    api.push_list_failure();
    let mut c = controller(&api, &ScriptedPrompter::default());

    c.mount().await;
    c.fetch_records().await;

    assert_eq!(c.state().records, previous);
    assert_eq!(c.state().error.as_deref(), Some(FETCH_ERROR_MESSAGE));
    assert!(!c.state().loading);
}

#[tokio::test]
async fn test_successful_refresh_clears_banner() {
    let api = FakeApi::new();
    api.push_list_failure();
    api.push_list(vec![record(json!({"id": 1}))]);
    let mut c = controller(&api, &ScriptedPrompter::default());

    c.mount().await;
    assert!(c.state().error.is_some());

    c.fetch_records().await;
    assert!(c.state().error.is_none());
    assert_eq!(c.state().records.len(), 1);
}

#[tokio::test]
async fn test_edit_then_cancel_makes_no_calls() {
    let api = FakeApi::new();
    let records = vec![record(json!({"id": 1, "name": "A", "present": true}))];
    api.push_list(records.clone());
    let mut c = controller(&api, &ScriptedPrompter::default());
    c.mount().await;

    c.handle_edit(records[0].clone());
    assert_eq!(c.state().editing.as_ref(), Some(&records[0]));
    assert_eq!(
        FormMode::from_editing(c.state().editing.as_ref()),
        FormMode::Edit
    );
    assert_eq!(c.form().values(), &records[0].fields);

    c.handle_cancel();

    assert!(c.state().editing.is_none());
    assert_eq!(c.state().records, records);
    assert_eq!(c.form().values().get("name"), Some(&json!("")));
    assert_eq!(api.calls(), vec![Call::GetAll]);
}

#[tokio::test]
async fn test_declined_delete_makes_no_calls() {
    let api = FakeApi::new();
    let records = vec![record(json!({"id": 1, "name": "A"}))];
    api.push_list(records.clone());
    let prompter = ScriptedPrompter::answering([false]);
    let mut c = controller(&api, &prompter);
    c.mount().await;
    let calls_before = api.calls().len();

    let outcome = c.handle_delete(&RecordId::Number(1)).await;

    assert_eq!(outcome, DeleteOutcome::Declined);
    assert_eq!(api.calls().len(), calls_before);
    assert_eq!(c.state().records, records);
    assert_eq!(prompter.questions(), vec![CONFIRM_DELETE_MESSAGE]);
}

#[tokio::test]
async fn test_confirmed_delete_calls_delete_then_get_all() {
    let api = FakeApi::new();
    let mut c = controller(&api, &ScriptedPrompter::answering([true]));

    let outcome = c.handle_delete(&RecordId::Number(3)).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(
        api.calls(),
        vec![Call::Delete(RecordId::Number(3)), Call::GetAll]
    );
}

#[tokio::test]
async fn test_failed_delete_alerts_and_keeps_state() {
    let api = FakeApi::new();
    let records = vec![record(json!({"id": 1, "name": "A"}))];
    api.push_list(records.clone());
    let prompter = ScriptedPrompter::answering([true]);
    let mut c = controller(&api, &prompter);
    c.mount().await;
    api.fail_writes();

    let outcome = c.handle_delete(&RecordId::Number(1)).await;

    assert_eq!(outcome, DeleteOutcome::Failed);
    assert_eq!(prompter.alerts(), vec![DELETE_ERROR_MESSAGE]);
    assert_eq!(c.state().records, records);
    assert!(c.state().error.is_none());
    assert_eq!(
        api.calls(),
        vec![Call::GetAll, Call::Delete(RecordId::Number(1))]
    );
}

#[tokio::test]
async fn test_submit_in_create_mode_calls_create() {
    let api = FakeApi::new();
    let mut c = controller(&api, &ScriptedPrompter::default());
    c.mount().await;

    c.form_mut().set_field("name", json!("Ada"));
    c.form_mut().set_field("present", json!(true));
    let outcome = c.submit_form().await;

    let expected = fields(json!({"name": "Ada", "date": "", "present": true}));
    assert!(matches!(outcome, SubmitOutcome::Saved(_)));
    assert_eq!(
        api.calls(),
        vec![Call::GetAll, Call::Create(expected), Call::GetAll]
    );
    assert_eq!(c.form().values().get("name"), Some(&json!("")));
}

#[tokio::test]
async fn test_submit_in_edit_mode_calls_update_with_target_id() {
    let api = FakeApi::new();
    let target = record(json!({"id": 7, "name": "A", "present": true}));
    api.push_list(vec![target.clone()]);
    let mut c = controller(&api, &ScriptedPrompter::default());
    c.mount().await;

    c.handle_edit(target);
    c.form_mut().set_field("present", json!(false));
    let outcome = c.submit_form().await;

    let expected = fields(json!({"name": "A", "present": false}));
    assert!(matches!(outcome, SubmitOutcome::Saved(ref r) if r.id == RecordId::Number(7)));
    assert_eq!(
        api.calls(),
        vec![
            Call::GetAll,
            Call::Update(RecordId::Number(7), expected),
            Call::GetAll
        ]
    );
    assert!(c.state().editing.is_none());
}

#[tokio::test]
async fn test_failed_submit_alerts_and_stays_in_edit_mode() {
    let api = FakeApi::new();
    let target = record(json!({"id": 7, "name": "A"}));
    api.push_list(vec![target.clone()]);
    let prompter = ScriptedPrompter::default();
    let mut c = controller(&api, &prompter);
    c.mount().await;
    api.fail_writes();

    c.handle_edit(target.clone());
    c.form_mut().set_field("name", json!("Z"));
    let outcome = c.submit_form().await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(prompter.alerts(), vec![SAVE_ERROR_MESSAGE]);
    assert_eq!(c.state().editing.as_ref(), Some(&target));
    assert_eq!(c.form().values().get("name"), Some(&json!("Z")));
    assert_eq!(
        api.calls().last(),
        Some(&Call::Update(
            RecordId::Number(7),
            fields(json!({"name": "Z"}))
        ))
    );
}

#[tokio::test]
async fn test_dispatch_table_actions() {
    let api = FakeApi::new();
    let target = record(json!({"id": "a1", "name": "A"}));
    api.push_list(vec![target.clone()]);
    let mut c = controller(&api, &ScriptedPrompter::answering([true]));
    c.mount().await;

    let edit = c.table().edit("a1").unwrap();
    assert_eq!(c.dispatch(edit).await, None);
    assert_eq!(c.state().editing.as_ref(), Some(&target));

    let outcome = c
        .dispatch(TableAction::Delete(RecordId::Text("a1".to_string())))
        .await;
    assert_eq!(outcome, Some(DeleteOutcome::Deleted));
}

#[tokio::test]
async fn test_delete_scenario_refreshes_to_empty_table() {
    let api = FakeApi::new();
    api.push_list(vec![record(json!({"id": 1, "name": "A", "present": true}))]);
    api.push_list(Vec::new());
    let mut c = controller(&api, &ScriptedPrompter::answering([true]));

    c.mount().await;
    assert_eq!(c.table().len(), 1);
    assert!(c.table().row("1").is_some());

    let mut rx = c.subscribe();
    let outcome = c.handle_delete(&RecordId::Number(1)).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert!(c.table().is_empty());
    assert!(c.render().contains("No attendance records found."));

    let mut loading: Vec<bool> = drain(&mut rx).iter().map(|s| s.loading).collect();
    loading.dedup();
    assert_eq!(loading, vec![true, false]);
    assert_eq!(
        api.calls(),
        vec![Call::GetAll, Call::Delete(RecordId::Number(1)), Call::GetAll]
    );
}

#[tokio::test]
async fn test_loading_hides_table_in_render() {
    let api = FakeApi::new();
    let c = controller(&api, &ScriptedPrompter::default());

    let page = c.render();
    assert!(page.contains("Loading attendance records..."));
    assert!(!page.contains("No attendance records found."));
}
