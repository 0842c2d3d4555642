//! Create/edit form state and validation.
//!
//! Every field is required and the email must look like an address. Errors
//! are shown for a field only once it has been touched (edited or left), or
//! after a submit attempt marks every field touched.

use super::modes::FormMode;
use crate::domain::{Department, Employee, EmployeePayload};
use once_cell::sync::Lazy;
use regex::Regex;

/// A form input, in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Department,
}

impl FormField {
    pub const ALL: [Self; 3] = [Self::Name, Self::Email, Self::Department];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Department => "Department",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Name => 0,
            Self::Email => 1,
            Self::Department => 2,
        }
    }

    const fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    const fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Why a field is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
}

impl FieldError {
    /// User-facing message for `field`.
    #[must_use]
    pub fn message(self, field: FormField) -> String {
        match self {
            Self::Required => format!("{} is required", field.label()),
            Self::InvalidEmail => "Please enter a valid email address".to_string(),
        }
    }
}

/// Editable form state for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeForm {
    pub mode: FormMode,
    pub name: String,
    pub email: String,
    pub department: Option<Department>,
    pub focus: FormField,
    /// Waiting for the record to prefill an edit form.
    pub loading: bool,
    /// A create/update request is in flight.
    pub submitting: bool,
    touched: [bool; 3],
}

impl EmployeeForm {
    /// Empty form for a new employee.
    #[must_use]
    pub const fn create() -> Self {
        Self::blank(FormMode::Create, false)
    }

    /// Form for an existing employee, loading until [`patch`](Self::patch).
    #[must_use]
    pub const fn edit(id: crate::domain::EmployeeId) -> Self {
        Self::blank(FormMode::Edit(id), true)
    }

    const fn blank(mode: FormMode, loading: bool) -> Self {
        Self {
            mode,
            name: String::new(),
            email: String::new(),
            department: None,
            focus: FormField::Name,
            loading,
            submitting: false,
            touched: [false; 3],
        }
    }

    /// Fills the fields from a loaded record.
    pub fn patch(&mut self, employee: &Employee) {
        self.name.clone_from(&employee.name);
        self.email.clone_from(&employee.email);
        self.department = Some(employee.department);
        self.loading = false;
    }

    pub fn focus_next(&mut self) {
        self.touch(self.focus);
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.touch(self.focus);
        self.focus = self.focus.prev();
    }

    /// Types a character into the focused text field.
    ///
    /// Returns `false` when the focused field does not take text.
    pub fn input_char(&mut self, c: char) -> bool {
        let Some(value) = self.focused_text_mut() else {
            return false;
        };
        value.push(c);
        self.touch(self.focus);
        true
    }

    /// Deletes the last character of the focused text field.
    pub fn backspace(&mut self) -> bool {
        let Some(value) = self.focused_text_mut() else {
            return false;
        };
        value.pop();
        self.touch(self.focus);
        true
    }

    /// Steps the department selector; only acts while it has focus.
    pub fn cycle_department(&mut self, forward: bool) -> bool {
        if self.focus != FormField::Department {
            return false;
        }
        self.department = Department::cycle(self.department, forward);
        self.touch(FormField::Department);
        true
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Name => Some(&mut self.name),
            FormField::Email => Some(&mut self.email),
            FormField::Department => None,
        }
    }

    fn touch(&mut self, field: FormField) {
        self.touched[field.index()] = true;
    }

    #[must_use]
    pub const fn is_touched(&self, field: FormField) -> bool {
        self.touched[field.index()]
    }

    /// Marks every field touched so all errors become visible.
    pub fn mark_all_touched(&mut self) {
        self.touched = [true; 3];
    }

    /// Validation result for `field`, regardless of touched state.
    #[must_use]
    pub fn field_error(&self, field: FormField) -> Option<FieldError> {
        match field {
            FormField::Name => self.name.trim().is_empty().then_some(FieldError::Required),
            FormField::Email => {
                let email = self.email.trim();
                if email.is_empty() {
                    Some(FieldError::Required)
                } else if is_valid_email(email) {
                    None
                } else {
                    Some(FieldError::InvalidEmail)
                }
            }
            FormField::Department => self.department.is_none().then_some(FieldError::Required),
        }
    }

    /// Error to display for `field`: only once it has been touched.
    #[must_use]
    pub fn visible_error(&self, field: FormField) -> Option<String> {
        if !self.is_touched(field) {
            return None;
        }
        self.field_error(field).map(|e| e.message(field))
    }

    /// Builds the request payload, or lists every invalid field.
    ///
    /// # Errors
    ///
    /// Returns the failing fields with their errors in focus order.
    pub fn validate(&self) -> Result<EmployeePayload, Vec<(FormField, FieldError)>> {
        let errors: Vec<(FormField, FieldError)> = FormField::ALL
            .iter()
            .filter_map(|&f| self.field_error(f).map(|e| (f, e)))
            .collect();

        match (errors.is_empty(), self.department) {
            (true, Some(department)) => Ok(EmployeePayload {
                name: self.name.trim().to_string(),
                email: self.email.trim().to_string(),
                department,
            }),
            _ => Err(errors),
        }
    }
}

/// Dot-atom local part, then hostname labels of at most 63 characters.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("email regex")
});

/// Address check: a dot-atom local part of up to 64 characters, and a domain
/// of hostname labels, at most 254 characters overall. A single-label domain
/// such as `localhost` is accepted.
#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    let local_len = value.find('@').unwrap_or(value.len());
    value.len() <= 254 && local_len <= 64 && EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> EmployeeForm {
        let mut form = EmployeeForm::create();
        form.name = "Ann".to_string();
        form.email = "ann@example.com".to_string();
        form.department = Some(Department::Hr);
        form
    }

    #[test]
    fn valid_form_produces_payload() {
        let payload = filled().validate().unwrap();
        assert_eq!(payload.name, "Ann");
        assert_eq!(payload.email, "ann@example.com");
        assert_eq!(payload.department, Department::Hr);
    }

    #[test]
    fn payload_is_trimmed() {
        let mut form = filled();
        form.name = "  Ann  ".to_string();
        form.email = " ann@example.com ".to_string();
        let payload = form.validate().unwrap();
        assert_eq!(payload.name, "Ann");
        assert_eq!(payload.email, "ann@example.com");
    }

    #[test]
    fn empty_form_lists_every_field() {
        let errors = EmployeeForm::create().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                (FormField::Name, FieldError::Required),
                (FormField::Email, FieldError::Required),
                (FormField::Department, FieldError::Required),
            ]
        );
    }

    #[test]
    fn malformed_email_is_rejected() {
        let mut form = filled();
        form.email = "not-an-email".to_string();
        assert_eq!(form.field_error(FormField::Email), Some(FieldError::InvalidEmail));
        assert_eq!(
            FieldError::InvalidEmail.message(FormField::Email),
            "Please enter a valid email address"
        );
        assert!(form.validate().is_err());
    }

    #[test]
    fn errors_hidden_until_touched() {
        let mut form = EmployeeForm::create();
        assert_eq!(form.visible_error(FormField::Name), None);

        form.focus_next();
        assert_eq!(form.visible_error(FormField::Name), Some("Name is required".to_string()));
        assert_eq!(form.visible_error(FormField::Email), None);

        form.mark_all_touched();
        assert!(form.visible_error(FormField::Department).is_some());
    }

    #[test]
    fn typing_goes_to_focused_text_field() {
        let mut form = EmployeeForm::create();
        assert!(form.input_char('A'));
        form.focus_next();
        assert!(form.input_char('a'));
        assert!(form.input_char('@'));
        assert!(form.backspace());
        form.focus_next();
        assert!(!form.input_char('x'));

        assert_eq!(form.name, "A");
        assert_eq!(form.email, "a");
        assert_eq!(form.focus, FormField::Department);
    }

    #[test]
    fn department_selector_cycles_only_when_focused() {
        let mut form = EmployeeForm::create();
        assert!(!form.cycle_department(true));
        form.focus_prev();
        assert_eq!(form.focus, FormField::Department);
        assert!(form.cycle_department(true));
        assert_eq!(form.department, Some(Department::Hr));
        assert!(form.cycle_department(false));
        assert_eq!(form.department, None);
    }

    #[test]
    fn edit_form_waits_for_patch() {
        let mut form = EmployeeForm::edit(3);
        assert!(form.loading);
        assert_eq!(form.mode, FormMode::Edit(3));

        let record = Employee::new("Bob", "bob@x.io", Department::It);
        form.patch(&record);
        assert!(!form.loading);
        assert_eq!(form.name, "Bob");
        assert_eq!(form.department, Some(Department::It));
        assert!(form.validate().is_ok());
    }

    #[test]
    fn email_check_accepts_common_addresses() {
        for ok in ["a@b", "first.last@example.co.uk", "x+tag@sub-domain.io", "o'neil@x.org"] {
            assert!(is_valid_email(ok), "{ok} should be accepted");
        }
    }

    #[test]
    fn email_check_rejects_malformed_addresses() {
        for bad in [
            "",
            "plain",
            "@example.com",
            "a@",
            "a@@b.com",
            "a..b@x.com",
            ".a@x.com",
            "a@-x.com",
            "a@x-.com",
            "a@x..com",
            "a b@x.com",
        ] {
            assert!(!is_valid_email(bad), "{bad} should be rejected");
        }
        let long_local = format!("{}@x.com", "a".repeat(65));
        assert!(!is_valid_email(&long_local));
    }

    #[test]
    fn email_check_enforces_length_limits() {
        assert!(is_valid_email(&format!("{}@x.com", "a".repeat(64))));

        let label = "b".repeat(63);
        assert!(is_valid_email(&format!("a@{label}.com")));
        assert!(!is_valid_email(&format!("a@{label}b.com")));

        // Four 63-character labels push the address past 254.
        let domain = [label.as_str(); 4].join(".");
        let address = format!("a@{domain}");
        assert_eq!(address.len(), 257);
        assert!(!is_valid_email(&address));
        assert!(is_valid_email(&format!("a@{}", [label.as_str(); 3].join("."))));
    }
}
