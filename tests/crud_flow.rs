//! End-to-end flows through `handle_event` against an in-memory backend.
//!
//! Requests are prepared by `ApiClient`, answered by `FakeBackend` with real
//! status codes and JSON bodies, and parsed back through
//! `ApiClient::parse_reply`, the same path the plugin shim takes.

use roster::api::{ApiClient, HttpCall, Method};
use roster::app::{FormField, FormMode};
use roster::domain::{Department, Employee, EmployeeId, EmployeePayload};
use roster::notifications::{ManualClock, NotificationQueue, Severity};
use roster::{handle_event, Action, AppState, Event, Theme, View};
use std::collections::VecDeque;
use std::time::Duration;

struct FakeBackend {
    records: Vec<Employee>,
    next_id: EmployeeId,
    calls: Vec<(Method, String)>,
}

impl FakeBackend {
    fn seeded(names: &[(&str, Department)]) -> Self {
        let mut backend = Self {
            records: vec![],
            next_id: 1,
            calls: vec![],
        };
        for (name, department) in names {
            backend.insert(EmployeePayload {
                name: (*name).to_string(),
                email: format!("{}@corp.test", name.to_lowercase()),
                department: *department,
            });
        }
        backend
    }

    fn insert(&mut self, payload: EmployeePayload) -> Employee {
        let mut employee = Employee::new(payload.name, payload.email, payload.department);
        employee.id = Some(self.next_id);
        employee.created_time = Some("2025-03-04T09:15:02".to_string());
        employee.updated_time = employee.created_time.clone();
        self.next_id += 1;
        self.records.push(employee.clone());
        employee
    }

    fn answer(&mut self, call: &HttpCall) -> (u16, Vec<u8>) {
        self.calls.push((call.method, call.url.clone()));
        let path = call
            .url
            .split("/employee/")
            .nth(1)
            .unwrap_or_default()
            .to_string();
        let id_of = |prefix: &str| path.strip_prefix(prefix).and_then(|s| s.parse::<EmployeeId>().ok());

        match call.method {
            Method::Get if path == "get-all" => ok(&self.records),
            Method::Get => match id_of("search/").and_then(|id| self.position(id)) {
                Some(i) => ok(&self.records[i]),
                None => not_found(),
            },
            Method::Post => {
                let payload: EmployeePayload = serde_json::from_slice(&call.body).unwrap();
                let created = self.insert(payload);
                ok(&created)
            }
            Method::Put => match id_of("update/").and_then(|id| self.position(id)) {
                Some(i) => {
                    let payload: EmployeePayload = serde_json::from_slice(&call.body).unwrap();
                    let record = &mut self.records[i];
                    record.name = payload.name;
                    record.email = payload.email;
                    record.department = payload.department;
                    record.updated_time = Some("2025-03-05T10:00:00".to_string());
                    ok(&self.records[i])
                }
                None => not_found(),
            },
            Method::Delete => match id_of("delete/").and_then(|id| self.position(id)) {
                Some(i) => {
                    self.records.remove(i);
                    (200, vec![])
                }
                None => not_found(),
            },
        }
    }

    fn position(&self, id: EmployeeId) -> Option<usize> {
        self.records.iter().position(|e| e.id == Some(id))
    }
}

fn ok<T: serde::Serialize>(value: &T) -> (u16, Vec<u8>) {
    (200, serde_json::to_vec(value).unwrap())
}

fn not_found() -> (u16, Vec<u8>) {
    (404, b"Employee not found".to_vec())
}

/// Runs events the way the plugin shim does, answering requests in place.
struct Harness {
    state: AppState,
    clock: ManualClock,
    client: ApiClient,
    backend: FakeBackend,
    timers: Vec<Duration>,
}

impl Harness {
    fn new(backend: FakeBackend) -> Self {
        let clock = ManualClock::default();
        let queue = NotificationQueue::new(Box::new(clock.clone()));
        let mut harness = Self {
            state: AppState::new(Theme::default(), queue),
            clock,
            client: ApiClient::new("http://backend.test/api"),
            backend,
            timers: vec![],
        };
        harness.send(Event::Ready);
        harness
    }

    fn send(&mut self, event: Event) -> bool {
        let mut render = false;
        let mut pending = VecDeque::from([event]);

        while let Some(event) = pending.pop_front() {
            let (should_render, actions) = handle_event(&mut self.state, &event).unwrap();
            render |= should_render;
            for action in actions {
                match action {
                    Action::SendRequest(request) => {
                        let call = self.client.prepare(&request).unwrap();
                        let (status, body) = self.backend.answer(&call);
                        let reply = ApiClient::parse_reply(status, &body, &call.context).unwrap();
                        pending.push_back(Event::ApiReply(reply));
                    }
                    Action::ScheduleTimer(after) => self.timers.push(after),
                    Action::CloseFocus => {}
                }
            }
        }
        render
    }

    fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send(Event::Char(c));
        }
    }

    fn messages(&self) -> Vec<(String, Severity)> {
        self.state
            .notifications
            .notifications()
            .iter()
            .map(|n| (n.message.clone(), n.severity))
            .collect()
    }
}

fn staff() -> FakeBackend {
    FakeBackend::seeded(&[
        ("Ann", Department::Hr),
        ("Bob", Department::It),
        ("Dana", Department::Finance),
    ])
}

#[test]
fn create_adds_record_and_returns_to_list() {
    let mut h = Harness::new(FakeBackend::seeded(&[]));
    assert!(h.state.filtered_employees.is_empty());

    h.send(Event::NewEmployee);
    assert_eq!(h.state.view, View::Form(FormMode::Create));

    h.type_text("Erin");
    h.send(Event::NextField);
    h.type_text("erin@corp.test");
    h.send(Event::NextField);
    h.send(Event::CycleDepartment { forward: true });
    h.send(Event::Submit);

    assert_eq!(h.state.view, View::List);
    assert_eq!(h.state.employees.len(), 1);
    assert_eq!(h.state.employees[0].department, Department::Hr);
    assert_eq!(
        h.messages(),
        vec![("Erin created successfully".to_string(), Severity::Success)]
    );
    assert_eq!(h.timers, vec![Duration::from_millis(3000)]);
}

#[test]
fn invalid_form_never_reaches_backend() {
    let mut h = Harness::new(staff());
    let calls_before = h.backend.calls.len();

    h.send(Event::NewEmployee);
    h.type_text("Erin");
    h.send(Event::NextField);
    h.type_text("not-an-email");
    h.send(Event::Submit);

    assert_eq!(h.backend.calls.len(), calls_before);
    let form = h.state.form.as_ref().unwrap();
    assert_eq!(form.visible_error(FormField::Name), None);
    assert_eq!(
        form.visible_error(FormField::Email).as_deref(),
        Some("Please enter a valid email address")
    );
    assert_eq!(
        form.visible_error(FormField::Department).as_deref(),
        Some("Department is required")
    );
}

#[test]
fn edit_keeps_identity_and_lands_on_detail() {
    let mut h = Harness::new(staff());

    h.send(Event::Select);
    assert_eq!(h.state.view, View::Detail(1));
    assert_eq!(h.state.detail.employee.as_ref().map(|e| e.name.as_str()), Some("Ann"));

    h.send(Event::EditSelected);
    assert_eq!(h.state.view, View::Form(FormMode::Edit(1)));
    assert_eq!(h.state.form.as_ref().map(|f| f.name.as_str()), Some("Ann"));

    h.type_text("a Lee");
    h.send(Event::Submit);

    assert_eq!(h.state.view, View::Detail(1));
    let shown = h.state.detail.employee.as_ref().unwrap();
    assert_eq!(shown.id, Some(1));
    assert_eq!(shown.name, "Anna Lee");
    assert_eq!(h.state.find_employee(1).map(|e| e.name.as_str()), Some("Anna Lee"));
    assert_eq!(h.messages()[0].0, "Anna Lee updated successfully");
}

#[test]
fn delete_waits_for_confirmation() {
    let mut h = Harness::new(staff());
    h.send(Event::KeyDown);

    h.send(Event::DeleteSelected);
    let dialog = h.state.dialog.as_ref().unwrap();
    assert!(dialog.message.contains("Bob"));

    // Keys other than confirm/cancel are swallowed by the dialog.
    assert!(!h.send(Event::KeyDown));
    h.send(Event::Cancel);
    assert!(h.state.dialog.is_none());
    assert_eq!(h.backend.records.len(), 3);

    h.send(Event::DeleteSelected);
    h.send(Event::Confirm);
    assert_eq!(h.backend.records.len(), 2);
    assert!(h.state.find_employee(2).is_none());
    assert_eq!(h.messages()[0].0, "Bob deleted successfully");
}

#[test]
fn missing_record_shows_not_found() {
    let mut h = Harness::new(staff());
    h.backend.records.retain(|e| e.id != Some(1));

    h.send(Event::Select);
    assert_eq!(h.state.view, View::Detail(1));
    assert!(h.state.detail.is_not_found());
    assert_eq!(
        h.messages(),
        vec![("Employee not found".to_string(), Severity::Error)]
    );

    h.send(Event::Back);
    assert_eq!(h.state.view, View::List);
    assert_eq!(h.state.employees.len(), 2);
}

#[test]
fn notifications_expire_in_deadline_order() {
    let mut h = Harness::new(staff());
    h.backend.records.clear();

    // Stale list: the delete fails with 404 and raises an error toast.
    h.send(Event::DeleteSelected);
    h.send(Event::Confirm);
    h.send(Event::Reload);
    h.send(Event::NewEmployee);
    h.type_text("Erin");
    h.send(Event::NextField);
    h.type_text("erin@corp.test");
    h.send(Event::NextField);
    h.send(Event::CycleDepartment { forward: false });
    h.send(Event::Submit);

    assert_eq!(h.state.notifications.len(), 2);
    assert_eq!(
        h.timers,
        vec![Duration::from_millis(5000), Duration::from_millis(3000)]
    );

    h.clock.advance(Duration::from_millis(3000));
    assert!(h.send(Event::Tick));
    assert_eq!(
        h.messages(),
        vec![("Failed to delete employee".to_string(), Severity::Error)]
    );

    h.clock.advance(Duration::from_millis(2000));
    assert!(h.send(Event::Tick));
    assert!(h.state.notifications.is_empty());
    assert!(!h.send(Event::Tick));
}

#[test]
fn search_and_department_narrow_the_list() {
    let mut h = Harness::new(FakeBackend::seeded(&[
        ("Ann", Department::Hr),
        ("Anton", Department::It),
        ("Bob", Department::It),
    ]));

    h.send(Event::SearchMode);
    h.type_text("AN");
    assert_eq!(h.state.filtered_employees.len(), 2);

    h.send(Event::CycleDepartment { forward: true });
    h.send(Event::CycleDepartment { forward: true });
    let names: Vec<&str> = h.state.filtered_employees.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Anton"]);

    let vm = h.state.compute_viewmodel(30, 100);
    assert_eq!(vm.header.title, " Employees (1 of 3) ");

    h.send(Event::ExitSearch);
    h.send(Event::ClearFilters);
    assert_eq!(h.state.filtered_employees.len(), 3);
}
