//! Shared test doubles for the controller tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use rollbook::api::{ApiResponse, AttendanceApi};
use rollbook::error::{Error, Result};
use rollbook::ui::AttendanceForm;
use rollbook::{AttendanceRecord, Prompter, RecordFields, RecordId};
use serde_json::Value;

/// A call the controller made against the API.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetAll,
    Get(RecordId),
    Create(RecordFields),
    Update(RecordId, RecordFields),
    Delete(RecordId),
}

#[derive(Debug, Default)]
struct FakeInner {
    calls: Vec<Call>,
    lists: VecDeque<Option<Vec<AttendanceRecord>>>,
    fail_writes: bool,
    next_id: i64,
}

/// In-memory API that records every call.
///
/// `get_all` answers from a queue of prepared lists (an empty queue yields an
/// empty list); writes succeed unless `fail_writes` was called.
#[derive(Debug, Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<FakeInner>>,
}

impl FakeApi {
    pub fn new() -> Self {
        let api = Self::default();
        api.inner.lock().unwrap().next_id = 100;
        api
    }

    pub fn push_list(&self, records: Vec<AttendanceRecord>) {
        self.inner.lock().unwrap().lists.push_back(Some(records));
    }

    pub fn push_list_failure(&self) {
        self.inner.lock().unwrap().lists.push_back(None);
    }

    pub fn fail_writes(&self) {
        self.inner.lock().unwrap().fail_writes = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn server_error(method: &'static str) -> Error {
        Error::Status {
            method,
            url: "http://fake/attendance".to_string(),
            status: 500,
        }
    }
}

#[async_trait::async_trait]
impl AttendanceApi for FakeApi {
    async fn get_all(&self) -> Result<ApiResponse<Vec<AttendanceRecord>>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::GetAll);
        match inner.lists.pop_front() {
            Some(Some(records)) => Ok(ApiResponse::new(200, records)),
            Some(None) => Err(Self::server_error("GET")),
            None => Ok(ApiResponse::new(200, Vec::new())),
        }
    }

    async fn get(&self, id: &RecordId) -> Result<ApiResponse<AttendanceRecord>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Get(id.clone()));
        Err(Error::record_not_found(id.to_string()))
    }

    async fn create(&self, fields: &RecordFields) -> Result<ApiResponse<AttendanceRecord>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create(fields.clone()));
        if inner.fail_writes {
            return Err(Self::server_error("POST"));
        }
        inner.next_id += 1;
        Ok(ApiResponse::new(
            201,
            AttendanceRecord::new(inner.next_id, fields.clone()),
        ))
    }

    async fn update(
        &self,
        id: &RecordId,
        fields: &RecordFields,
    ) -> Result<ApiResponse<AttendanceRecord>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Update(id.clone(), fields.clone()));
        if inner.fail_writes {
            return Err(Self::server_error("PUT"));
        }
        Ok(ApiResponse::new(
            200,
            AttendanceRecord::new(id.clone(), fields.clone()),
        ))
    }

    async fn delete(&self, id: &RecordId) -> Result<ApiResponse<()>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(id.clone()));
        if inner.fail_writes {
            return Err(Self::server_error("DELETE"));
        }
        Ok(ApiResponse::new(204, ()))
    }
}

#[derive(Debug, Default)]
struct PrompterInner {
    answers: VecDeque<bool>,
    questions: Vec<String>,
    alerts: Vec<String>,
}

/// Prompter that answers from a script and remembers what it was shown.
///
/// Once the script runs out every confirmation is declined.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    inner: Arc<Mutex<PrompterInner>>,
}

impl ScriptedPrompter {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        let prompter = Self::default();
        prompter.inner.lock().unwrap().answers = answers.into_iter().collect();
        prompter
    }

    pub fn questions(&self) -> Vec<String> {
        self.inner.lock().unwrap().questions.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.inner.lock().unwrap().alerts.clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> bool {
        let mut inner = self.inner.lock().unwrap();
        inner.questions.push(message.to_string());
        inner.answers.pop_front().unwrap_or(false)
    }

    fn alert(&self, message: &str) {
        self.inner.lock().unwrap().alerts.push(message.to_string());
    }
}

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> AttendanceRecord {
    serde_json::from_value(value).unwrap()
}

/// Create-mode form with the default fields.
pub fn form() -> AttendanceForm {
    AttendanceForm::new(vec![
        "name".to_string(),
        "date".to_string(),
        "present".to_string(),
    ])
}

/// Build a field map from a JSON object literal.
pub fn fields(value: Value) -> RecordFields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
