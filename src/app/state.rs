//! Application state management and view model computation.
//!
//! [`AppState`] is the single source of truth for the plugin: the loaded
//! employees, the filter, the current view with its form or detail record, the
//! open dialog, and the notification queue.
//!
//! # State Components
//!
//! - **Employees**: Last list returned by the backend
//! - **Filtered Employees**: Subset passing the current [`FilterCriteria`]
//! - **Selection**: Cursor position within the filtered list
//! - **View**: List, detail or form, see [`View`]
//! - **Notifications**: Toasts with their own expiry clock
//!
//! # View Model Computation
//!
//! `compute_viewmodel` turns a state snapshot into a
//! [`UIViewModel`], handling windowing, search highlighting and the per-view
//! header and footer.
//!
//! # Example
//!
//! ```rust
//! use roster::app::AppState;
//! use roster::notifications::{NotificationQueue, SystemClock};
//! use roster::ui::Theme;
//!
//! let queue = NotificationQueue::new(Box::new(SystemClock));
//! let state = AppState::new(Theme::default(), queue);
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert_eq!(viewmodel.header.title, " Employees (0) ");
//! ```

use super::dialog::ConfirmDialog;
use super::form::{EmployeeForm, FormField};
use super::modes::{FormMode, InputMode, SearchFocus, View};
use crate::domain::{format_timestamp, Employee, EmployeeId};
use crate::filter::{self, FilterCriteria};
use crate::notifications::NotificationQueue;
use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    Body, DetailInfo, DialogInfo, DisplayItem, EmptyState, FilterBarInfo, FooterInfo, FormFieldInfo,
    FormInfo, HeaderInfo, ListInfo, ToastInfo, UIViewModel, EMAIL_COLUMN_WIDTH, NAME_COLUMN_WIDTH,
};

/// Lines used by the list view around the table rows: blank line, header,
/// border, filter bar (3), column headers, border, footer.
const LIST_CHROME_ROWS: usize = 9;

/// The record shown by the detail view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailState {
    pub employee: Option<Employee>,
    pub loading: bool,
}

impl DetailState {
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            employee: None,
            loading: true,
        }
    }

    /// Loaded, but the backend had no such record.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        !self.loading && self.employee.is_none()
    }
}

/// Central application state container.
#[derive(Debug)]
pub struct AppState {
    /// Every employee from the last list load.
    pub employees: Vec<Employee>,

    /// Employees passing `criteria`, in load order.
    ///
    /// Recomputed by `apply_filter()`; used for rendering and selection bounds.
    pub filtered_employees: Vec<Employee>,

    /// Zero-based index of the selected row within `filtered_employees`.
    pub selected_index: usize,

    /// Whether list keys navigate or edit the search term.
    pub input_mode: InputMode,

    /// Search term and department selector.
    pub criteria: FilterCriteria,

    pub view: View,

    /// A list load is in flight.
    pub loading: bool,

    pub detail: DetailState,

    /// Present while `view` is a form.
    pub form: Option<EmployeeForm>,

    /// Open confirmation prompt; captures all input while present.
    pub dialog: Option<ConfirmDialog>,

    pub notifications: NotificationQueue,

    pub theme: Theme,
}

impl AppState {
    /// Creates an empty list-view state.
    #[must_use]
    pub fn new(theme: Theme, notifications: NotificationQueue) -> Self {
        Self {
            employees: vec![],
            filtered_employees: vec![],
            selected_index: 0,
            input_mode: InputMode::Normal,
            criteria: FilterCriteria::default(),
            view: View::List,
            loading: false,
            detail: DetailState::default(),
            form: None,
            dialog: None,
            notifications,
            theme,
        }
    }

    /// Moves selection down by one row, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.filtered_employees.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.filtered_employees.len();
    }

    /// Moves selection up by one row, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.filtered_employees.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.filtered_employees.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_employee(&self) -> Option<&Employee> {
        self.filtered_employees.get(self.selected_index)
    }

    #[must_use]
    pub fn find_employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == Some(id))
    }

    /// Recomputes `filtered_employees` and clamps the selection.
    pub fn apply_filter(&mut self) {
        self.filtered_employees = filter::apply(&self.employees, &self.criteria);

        if self.filtered_employees.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.filtered_employees.len() - 1);
        }
    }

    /// Switches to a fresh list session: filters and selection reset and a
    /// load is marked in flight. The caller issues the request.
    pub fn enter_list(&mut self) {
        self.view = View::List;
        self.input_mode = InputMode::Normal;
        self.criteria.clear();
        self.selected_index = 0;
        self.loading = true;
        self.detail = DetailState::default();
        self.form = None;
        self.apply_filter();
    }

    /// Replaces a record in the loaded list by id, returning whether it was found.
    pub fn replace_employee(&mut self, employee: Employee) -> bool {
        let Some(slot) = self
            .employees
            .iter_mut()
            .find(|e| e.id.is_some() && e.id == employee.id)
        else {
            return false;
        };
        *slot = employee;
        self.apply_filter();
        true
    }

    /// Drops a record from the loaded list and re-applies the filter.
    pub fn remove_employee(&mut self, id: EmployeeId) {
        self.employees.retain(|e| e.id != Some(id));
        self.apply_filter();
    }

    /// Computes a renderable view model for a terminal of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let body = match self.view {
            View::List => self.compute_list_body(rows, cols),
            View::Detail(_) => self.compute_detail_body(),
            View::Form(mode) => self.compute_form_body(mode),
        };

        UIViewModel {
            header: self.compute_header(),
            body,
            footer: self.compute_footer(),
            dialog: self.dialog.as_ref().map(|d| DialogInfo {
                title: d.title.clone(),
                message: d.message.clone(),
                confirm_text: d.confirm_text.clone(),
                cancel_text: d.cancel_text.clone(),
                destructive: d.destructive,
            }),
            toasts: self
                .notifications
                .notifications()
                .iter()
                .map(|n| ToastInfo {
                    id: n.id,
                    message: n.message.clone(),
                    severity: n.severity,
                })
                .collect(),
        }
    }

    fn compute_list_body(&self, rows: usize, cols: usize) -> Body {
        if self.loading && self.employees.is_empty() {
            return Body::Message(EmptyState {
                message: "Loading employees...".to_string(),
                subtitle: String::new(),
            });
        }

        let filter_bar = FilterBarInfo {
            query: self.criteria.search_term.clone(),
            department: self
                .criteria
                .department
                .map_or_else(|| "All Departments".to_string(), |d| d.to_string()),
            typing: self.input_mode == InputMode::Search(SearchFocus::Typing),
        };

        if self.filtered_employees.is_empty() {
            let empty_state = if self.criteria.is_empty() {
                EmptyState {
                    message: "No employees found. Add your first employee to get started."
                        .to_string(),
                    subtitle: "Press a to add an employee".to_string(),
                }
            } else {
                EmptyState {
                    message: "No employees found matching your filters.".to_string(),
                    subtitle: "Press c to clear filters".to_string(),
                }
            };
            return Body::List(ListInfo {
                filter_bar,
                display_items: vec![],
                selected_index: 0,
                empty_state: Some(empty_state),
            });
        }

        let available_rows = rows.saturating_sub(LIST_CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.filtered_employees.len());

        let actual_count = visible_end - visible_start;
        if actual_count < available_rows && self.filtered_employees.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let email_width = cols
            .saturating_sub(NAME_COLUMN_WIDTH)
            .min(EMAIL_COLUMN_WIDTH);

        let display_items = self.filtered_employees[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(relative_idx, employee)| {
                let absolute_idx = visible_start + relative_idx;
                self.compute_display_item(employee, absolute_idx, email_width)
            })
            .collect();

        Body::List(ListInfo {
            filter_bar,
            display_items,
            selected_index: self.selected_index.saturating_sub(visible_start),
            empty_state: None,
        })
    }

    fn compute_display_item(
        &self,
        employee: &Employee,
        absolute_idx: usize,
        email_width: usize,
    ) -> DisplayItem {
        let name = truncate(&employee.name, NAME_COLUMN_WIDTH - 2);
        let email = truncate(&employee.email, email_width.saturating_sub(2));
        let term = &self.criteria.search_term;

        DisplayItem {
            name_highlights: filter::match_ranges(&name, term),
            email_highlights: filter::match_ranges(&email, term),
            name,
            email,
            department: employee.department,
            is_selected: absolute_idx == self.selected_index,
        }
    }

    fn compute_detail_body(&self) -> Body {
        if self.detail.loading {
            return Body::Message(EmptyState {
                message: "Loading employee...".to_string(),
                subtitle: String::new(),
            });
        }

        let Some(employee) = &self.detail.employee else {
            return Body::Message(EmptyState {
                message: "Employee not found".to_string(),
                subtitle: "Press ESC to return to the list".to_string(),
            });
        };

        let timestamp = |raw: &Option<String>| {
            raw.as_deref()
                .map_or_else(|| "-".to_string(), format_timestamp)
        };

        Body::Detail(DetailInfo {
            name: employee.name.clone(),
            department: employee.department,
            fields: vec![
                (
                    "ID".to_string(),
                    employee.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                ),
                ("Name".to_string(), employee.name.clone()),
                ("Email".to_string(), employee.email.clone()),
                ("Department".to_string(), employee.department.to_string()),
                ("Created".to_string(), timestamp(&employee.created_time)),
                ("Last Updated".to_string(), timestamp(&employee.updated_time)),
            ],
        })
    }

    fn compute_form_body(&self, mode: FormMode) -> Body {
        let Some(form) = &self.form else {
            return Body::Message(EmptyState {
                message: "Form unavailable".to_string(),
                subtitle: "Press ESC to go back".to_string(),
            });
        };

        if form.loading {
            return Body::Message(EmptyState {
                message: "Loading employee data...".to_string(),
                subtitle: String::new(),
            });
        }

        let fields = FormField::ALL
            .iter()
            .map(|&field| {
                let (value, placeholder) = match field {
                    FormField::Name => (form.name.clone(), "Enter employee name"),
                    FormField::Email => (form.email.clone(), "Enter email address"),
                    FormField::Department => (
                        form.department.map(|d| d.to_string()).unwrap_or_default(),
                        "Select a department",
                    ),
                };
                FormFieldInfo {
                    label: field.label().to_string(),
                    value,
                    placeholder: placeholder.to_string(),
                    focused: form.focus == field,
                    is_select: field == FormField::Department,
                    error: form.visible_error(field),
                }
            })
            .collect();

        let submit_label = match (form.submitting, mode) {
            (true, _) => "Saving...",
            (false, FormMode::Create) => "Create Employee",
            (false, FormMode::Edit(_)) => "Update Employee",
        };

        Body::Form(FormInfo {
            fields,
            submit_label: submit_label.to_string(),
            can_submit: !form.submitting,
        })
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view {
            View::List => {
                let total = self.employees.len();
                let shown = self.filtered_employees.len();
                if self.criteria.is_empty() {
                    format!(" Employees ({total}) ")
                } else {
                    format!(" Employees ({shown} of {total}) ")
                }
            }
            View::Detail(_) => " Employee Details ".to_string(),
            View::Form(FormMode::Create) => " Add New Employee ".to_string(),
            View::Form(FormMode::Edit(_)) => " Edit Employee ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.dialog.is_some() {
            "y/Enter: confirm  n/ESC: cancel"
        } else {
            match (self.view, self.input_mode) {
                (View::List, InputMode::Search(SearchFocus::Typing)) => {
                    "ESC: exit search  Enter: results  Type to filter"
                }
                (View::List, InputMode::Search(SearchFocus::Navigating)) => {
                    "ESC: exit search  /: edit query  j/k: navigate  Enter: view"
                }
                (View::List, InputMode::Normal) => {
                    "j/k: navigate  Enter: view  /: search  f: department  c: clear  a: add  e: edit  d: delete  r: reload  q: quit"
                }
                (View::Detail(_), _) => "e: edit  d: delete  r: reload  ESC: back  x: dismiss  q: quit",
                (View::Form(_), _) => "Tab/↑↓: field  ←/→: department  Enter: save  ESC: cancel",
            }
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}
