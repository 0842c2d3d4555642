//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place application state changes. It takes an
//! event from the plugin runtime (a key, a backend reply, a timer tick),
//! mutates [`AppState`] and returns whether to re-render plus the side
//! effects to run.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `Select`, `Back`
//! - **Input**: `Char`, `Backspace`, `NextField`, `PrevField`
//! - **Filtering**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`,
//!   `CycleDepartment`, `ClearFilters`
//! - **Records**: `NewEmployee`, `EditSelected`, `DeleteSelected`, `Submit`,
//!   `Confirm`, `Cancel`, `Reload`
//! - **System**: `Ready`, `Tick`, `ApiReply`
//!
//! # Example
//!
//! ```rust
//! use roster::api::ApiRequest;
//! use roster::app::{handle_event, Action, AppState, Event};
//! use roster::notifications::{NotificationQueue, SystemClock};
//! use roster::ui::Theme;
//!
//! let queue = NotificationQueue::new(Box::new(SystemClock));
//! let mut state = AppState::new(Theme::default(), queue);
//! let (render, actions) = handle_event(&mut state, &Event::Ready)?;
//! assert!(render);
//! assert_eq!(actions, vec![Action::SendRequest(ApiRequest::ListEmployees)]);
//! # Ok::<(), roster::domain::RosterError>(())
//! ```

use super::dialog::ConfirmDialog;
use super::form::EmployeeForm;
use super::modes::{FormMode, InputMode, SearchFocus, View};
use super::state::DetailState;
use crate::api::{ApiPayload, ApiReply, ApiRequest, RequestTag};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{ApiError, Department, Employee, EmployeeId};
use crate::notifications::{NotificationId, Severity};

/// Events triggered by user input, backend replies, or timers.
///
/// Key events are already translated by the plugin shim for the current view
/// and mode; the handler still checks that each one makes sense where it lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions granted; the first list load can start.
    Ready,

    /// Moves the list selection down by one row (wraps to top).
    KeyDown,
    /// Moves the list selection up by one row (wraps to bottom).
    KeyUp,
    /// Opens the selected employee's detail view.
    Select,
    /// Leaves the current view or search mode.
    Back,
    /// Hides the plugin pane.
    CloseFocus,

    /// Enters search mode with an empty term.
    SearchMode,
    /// Returns focus to the search input.
    FocusSearchBar,
    /// Moves focus from the search input to the results.
    FocusResults,
    /// Leaves search mode and clears the term.
    ExitSearch,
    /// Types into the search term or the focused form field.
    Char(char),
    /// Deletes from the search term or the focused form field.
    Backspace,
    /// Steps the department selector (list filter or form field).
    CycleDepartment { forward: bool },
    /// Clears the search term and department selector.
    ClearFilters,
    /// Reloads the list, or the detail record.
    Reload,

    /// Opens an empty create form.
    NewEmployee,
    /// Opens the edit form for the selected or displayed employee.
    EditSelected,
    /// Asks to delete the selected or displayed employee.
    DeleteSelected,

    /// Moves form focus to the next field.
    NextField,
    /// Moves form focus to the previous field.
    PrevField,
    /// Validates and submits the form.
    Submit,

    /// Accepts the open dialog.
    Confirm,
    /// Dismisses the open dialog.
    Cancel,

    /// Removes the oldest notification.
    DismissNotification,
    /// Removes one notification, e.g. the toast that was clicked.
    DismissToast(NotificationId),

    /// A host timer fired.
    Tick,

    /// A backend reply, matched to its request.
    ApiReply(ApiReply),
}

type Outcome = (bool, Vec<Action>);

/// Processes an event, mutates application state, and returns whether to
/// render plus the actions to execute.
///
/// # Errors
///
/// Currently infallible; the `Result` keeps the runtime loop uniform.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<Outcome> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    if state.dialog.is_some() {
        return Ok(handle_dialog_event(state, event));
    }

    let outcome = match event {
        Event::Ready => {
            state.enter_list();
            (true, vec![Action::SendRequest(ApiRequest::ListEmployees)])
        }
        Event::KeyDown if state.view == View::List => {
            state.move_selection_down();
            (true, vec![])
        }
        Event::KeyUp if state.view == View::List => {
            state.move_selection_up();
            (true, vec![])
        }
        Event::Select => open_selected(state),
        Event::Back => go_back(state),
        Event::CloseFocus => (false, vec![Action::CloseFocus]),

        Event::SearchMode if state.view == View::List => {
            tracing::debug!("entering search mode");
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.criteria.search_term.clear();
            state.apply_filter();
            (true, vec![])
        }
        Event::FocusSearchBar if state.input_mode.is_search() => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            (true, vec![])
        }
        Event::FocusResults if state.input_mode.is_search() => focus_results(state),
        Event::ExitSearch => exit_search(state),
        Event::Char(c) => input_char(state, *c),
        Event::Backspace => backspace(state),
        Event::CycleDepartment { forward } => cycle_department(state, *forward),
        Event::ClearFilters if state.view == View::List => {
            if state.criteria.is_empty() {
                (false, vec![])
            } else {
                state.criteria.clear();
                state.input_mode = InputMode::Normal;
                state.apply_filter();
                (true, vec![])
            }
        }
        Event::Reload => reload(state),

        Event::NewEmployee if state.view == View::List => {
            state.view = View::Form(FormMode::Create);
            state.form = Some(EmployeeForm::create());
            (true, vec![])
        }
        Event::EditSelected => edit_current(state),
        Event::DeleteSelected => delete_current(state),

        Event::NextField => with_form(state, EmployeeForm::focus_next),
        Event::PrevField => with_form(state, EmployeeForm::focus_prev),
        Event::Submit => submit_form(state),

        Event::DismissNotification | Event::DismissToast(_) => dismiss(state, event),
        Event::Tick => tick(state),
        Event::ApiReply(reply) => handle_reply(state, reply),

        _ => {
            tracing::trace!(view = ?state.view, mode = ?state.input_mode, "event ignored in this view");
            (false, vec![])
        }
    };

    Ok(outcome)
}

fn handle_dialog_event(state: &mut AppState, event: &Event) -> Outcome {
    match event {
        Event::Confirm => match state.dialog.take() {
            Some(dialog) => {
                tracing::debug!(request = ?dialog.on_confirm.tag(), "dialog confirmed");
                (true, vec![Action::SendRequest(dialog.on_confirm)])
            }
            None => (false, vec![]),
        },
        Event::Cancel | Event::Back => {
            state.dialog = None;
            (true, vec![])
        }
        // Replies, timers and toast dismissal keep flowing while the dialog is open.
        Event::DismissNotification | Event::DismissToast(_) => dismiss(state, event),
        Event::Tick => tick(state),
        Event::ApiReply(reply) => handle_reply(state, reply),
        Event::CloseFocus => (false, vec![Action::CloseFocus]),
        _ => (false, vec![]),
    }
}

/// Publishes a notification with its severity's default lifetime, arming a
/// timer when it has one.
fn notify(state: &mut AppState, severity: Severity, message: impl Into<String>) -> Vec<Action> {
    let id = match severity {
        Severity::Success => state.notifications.success(message),
        Severity::Error => state.notifications.error(message),
        Severity::Info => state.notifications.info(message),
        Severity::Warning => state.notifications.warning(message),
    };

    state
        .notifications
        .get(id)
        .and_then(|n| n.duration)
        .filter(|d| !d.is_zero())
        .map(Action::ScheduleTimer)
        .into_iter()
        .collect()
}

fn dismiss(state: &mut AppState, event: &Event) -> Outcome {
    let target = match event {
        Event::DismissToast(id) => Some(*id),
        _ => state.notifications.notifications().first().map(|n| n.id),
    };
    let dismissed = target.is_some_and(|id| state.notifications.dismiss(id));
    (dismissed, vec![])
}

fn tick(state: &mut AppState) -> Outcome {
    let removed = state.notifications.expire_due();
    // Host timers carry no identity, so re-arm for whatever is still pending.
    let actions = match state.notifications.next_deadline() {
        Some(remaining) if removed == 0 && !remaining.is_zero() => {
            vec![Action::ScheduleTimer(remaining)]
        }
        _ => vec![],
    };
    (removed > 0, actions)
}

fn list_session(state: &mut AppState) -> Vec<Action> {
    state.enter_list();
    vec![Action::SendRequest(ApiRequest::ListEmployees)]
}

fn open_detail(state: &mut AppState, id: EmployeeId) -> Vec<Action> {
    state.view = View::Detail(id);
    state.detail = DetailState::loading();
    state.form = None;
    vec![Action::SendRequest(ApiRequest::GetEmployee { id })]
}

fn open_selected(state: &mut AppState) -> Outcome {
    if state.view != View::List {
        return (false, vec![]);
    }

    if state.input_mode == InputMode::Search(SearchFocus::Typing) {
        return focus_results(state);
    }

    let Some(id) = state.selected_employee().and_then(|e| e.id) else {
        tracing::debug!("no employee selected");
        return (false, vec![]);
    };

    tracing::debug!(employee_id = id, "opening detail view");
    state.input_mode = InputMode::Normal;
    (true, open_detail(state, id))
}

fn focus_results(state: &mut AppState) -> Outcome {
    state.input_mode = if state.criteria.search_term.is_empty() {
        InputMode::Normal
    } else {
        InputMode::Search(SearchFocus::Navigating)
    };
    (true, vec![])
}

fn go_back(state: &mut AppState) -> Outcome {
    match state.view {
        View::List => exit_search(state),
        View::Detail(_) | View::Form(FormMode::Create) => (true, list_session(state)),
        View::Form(FormMode::Edit(id)) => (true, open_detail(state, id)),
    }
}

fn exit_search(state: &mut AppState) -> Outcome {
    if state.view != View::List || !state.input_mode.is_search() {
        return (false, vec![]);
    }
    tracing::debug!(query = %state.criteria.search_term, "exiting search mode");
    state.input_mode = InputMode::Normal;
    state.criteria.search_term.clear();
    state.apply_filter();
    (true, vec![])
}

fn input_char(state: &mut AppState, c: char) -> Outcome {
    match state.view {
        View::List if state.input_mode.is_search() => {
            state.criteria.search_term.push(c);
            tracing::trace!(query = %state.criteria.search_term, "search term updated");
            state.apply_filter();
            (true, vec![])
        }
        View::Form(_) => with_form(state, |form| {
            form.input_char(c);
        }),
        _ => (false, vec![]),
    }
}

fn backspace(state: &mut AppState) -> Outcome {
    match state.view {
        View::List if state.input_mode.is_search() => {
            state.criteria.search_term.pop();
            state.apply_filter();
            (true, vec![])
        }
        View::Form(_) => with_form(state, |form| {
            form.backspace();
        }),
        _ => (false, vec![]),
    }
}

fn cycle_department(state: &mut AppState, forward: bool) -> Outcome {
    match state.view {
        View::List => {
            state.criteria.department = Department::cycle(state.criteria.department, forward);
            tracing::debug!(department = ?state.criteria.department, "department filter changed");
            state.apply_filter();
            (true, vec![])
        }
        View::Form(_) => match state.form.as_mut() {
            Some(form) if !form.loading => (form.cycle_department(forward), vec![]),
            _ => (false, vec![]),
        },
        View::Detail(_) => (false, vec![]),
    }
}

fn with_form(state: &mut AppState, apply: impl FnOnce(&mut EmployeeForm)) -> Outcome {
    match state.form.as_mut() {
        Some(form) if !form.loading && !form.submitting => {
            apply(form);
            (true, vec![])
        }
        _ => (false, vec![]),
    }
}

fn reload(state: &mut AppState) -> Outcome {
    match state.view {
        View::List => {
            state.loading = true;
            (true, vec![Action::SendRequest(ApiRequest::ListEmployees)])
        }
        View::Detail(id) => (true, open_detail(state, id)),
        View::Form(_) => (false, vec![]),
    }
}

/// The record an edit or delete key applies to in the current view.
fn current_employee(state: &AppState) -> Option<&Employee> {
    match state.view {
        View::List if state.input_mode != InputMode::Search(SearchFocus::Typing) => {
            state.selected_employee()
        }
        View::Detail(_) => state.detail.employee.as_ref(),
        _ => None,
    }
}

fn edit_current(state: &mut AppState) -> Outcome {
    let Some(id) = current_employee(state).and_then(|e| e.id) else {
        return (false, vec![]);
    };

    tracing::debug!(employee_id = id, "opening edit form");
    state.input_mode = InputMode::Normal;
    state.view = View::Form(FormMode::Edit(id));
    state.form = Some(EmployeeForm::edit(id));
    (true, vec![Action::SendRequest(ApiRequest::GetEmployee { id })])
}

fn delete_current(state: &mut AppState) -> Outcome {
    let Some(dialog) = current_employee(state).and_then(ConfirmDialog::delete_employee) else {
        return (false, vec![]);
    };
    state.dialog = Some(dialog);
    (true, vec![])
}

fn submit_form(state: &mut AppState) -> Outcome {
    let Some(form) = state.form.as_mut() else {
        return (false, vec![]);
    };
    if form.loading || form.submitting {
        return (false, vec![]);
    }

    match form.validate() {
        Err(errors) => {
            tracing::debug!(invalid_fields = errors.len(), "form submit blocked by validation");
            form.mark_all_touched();
            (true, vec![])
        }
        Ok(payload) => {
            form.submitting = true;
            let request = match form.mode {
                FormMode::Create => ApiRequest::CreateEmployee { payload },
                FormMode::Edit(id) => ApiRequest::UpdateEmployee { id, payload },
            };
            (true, vec![Action::SendRequest(request)])
        }
    }
}

fn log_unexpected(tag: &RequestTag, outcome: &std::result::Result<ApiPayload, ApiError>) {
    match outcome {
        Ok(payload) => {
            tracing::error!(tag = ?tag, payload = ?payload, "reply payload does not match request");
        }
        Err(e) => tracing::debug!(tag = ?tag, error = %e, "request failed"),
    }
}

#[allow(clippy::too_many_lines)]
fn handle_reply(state: &mut AppState, reply: &ApiReply) -> Outcome {
    match &reply.tag {
        RequestTag::List => {
            state.loading = false;
            match &reply.outcome {
                Ok(ApiPayload::Employees(list)) => {
                    tracing::debug!(count = list.len(), "employees loaded");
                    state.employees.clone_from(list);
                    state.apply_filter();
                    (state.view == View::List, vec![])
                }
                other => {
                    log_unexpected(&reply.tag, other);
                    (true, notify(state, Severity::Error, "Failed to load employees"))
                }
            }
        }

        RequestTag::Get { id } => match state.view {
            View::Detail(current) if current == *id => {
                state.detail.loading = false;
                match &reply.outcome {
                    Ok(ApiPayload::Employee(employee)) => {
                        state.detail.employee = Some(employee.clone());
                        (true, vec![])
                    }
                    _ => {
                        state.detail.employee = None;
                        (true, notify(state, Severity::Error, "Employee not found"))
                    }
                }
            }
            View::Form(FormMode::Edit(current)) if current == *id => match &reply.outcome {
                Ok(ApiPayload::Employee(employee)) => {
                    if let Some(form) = state.form.as_mut() {
                        form.patch(employee);
                    }
                    (true, vec![])
                }
                _ => {
                    let mut actions = notify(state, Severity::Error, "Failed to load employee data");
                    actions.extend(list_session(state));
                    (true, actions)
                }
            },
            _ => {
                tracing::debug!(employee_id = id, view = ?state.view, "stale lookup reply ignored");
                (false, vec![])
            }
        },

        RequestTag::Create => match &reply.outcome {
            Ok(ApiPayload::Employee(created)) => {
                tracing::debug!(employee_id = ?created.id, "employee created");
                let mut actions =
                    notify(state, Severity::Success, format!("{} created successfully", created.name));
                if state.view == View::Form(FormMode::Create) {
                    actions.extend(list_session(state));
                } else if created.id.is_some_and(|id| state.find_employee(id).is_none()) {
                    // The form was left while the request was in flight.
                    state.employees.push(created.clone());
                    state.apply_filter();
                }
                (true, actions)
            }
            other => {
                log_unexpected(&reply.tag, other);
                if let Some(form) = state.form.as_mut() {
                    form.submitting = false;
                }
                (true, notify(state, Severity::Error, "Failed to create employee"))
            }
        },

        RequestTag::Update { id } => match &reply.outcome {
            Ok(ApiPayload::Employee(updated)) => {
                let mut updated = updated.clone();
                if updated.id != Some(*id) {
                    tracing::warn!(
                        requested = id,
                        returned = ?updated.id,
                        "update reply carried a different id, keeping the requested one"
                    );
                    updated.id = Some(*id);
                }

                let actions =
                    notify(state, Severity::Success, format!("{} updated successfully", updated.name));
                state.replace_employee(updated.clone());

                if state.view == View::Form(FormMode::Edit(*id)) {
                    state.form = None;
                    state.view = View::Detail(*id);
                }
                if state.view == View::Detail(*id) {
                    state.detail = DetailState {
                        employee: Some(updated),
                        loading: false,
                    };
                }
                (true, actions)
            }
            other => {
                log_unexpected(&reply.tag, other);
                if let Some(form) = state.form.as_mut() {
                    form.submitting = false;
                }
                (true, notify(state, Severity::Error, "Failed to update employee"))
            }
        },

        RequestTag::Delete { id, name } => match &reply.outcome {
            Ok(_) => {
                tracing::debug!(employee_id = id, "employee deleted");
                state.remove_employee(*id);
                let mut actions =
                    notify(state, Severity::Success, format!("{name} deleted successfully"));
                if state.view == View::Detail(*id) {
                    actions.extend(list_session(state));
                }
                (true, actions)
            }
            Err(_) => (true, notify(state, Severity::Error, "Failed to delete employee")),
        },
    }
}
