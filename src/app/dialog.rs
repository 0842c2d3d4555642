//! Modal confirmation dialog.

use crate::api::ApiRequest;
use crate::domain::Employee;

/// A yes/no prompt guarding an irreversible request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub message: String,
    pub confirm_text: String,
    pub cancel_text: String,
    /// Styles the confirm button as dangerous.
    pub destructive: bool,
    /// Sent when the user confirms.
    pub on_confirm: ApiRequest,
}

impl ConfirmDialog {
    /// Delete confirmation for `employee`; `None` for a record without id.
    #[must_use]
    pub fn delete_employee(employee: &Employee) -> Option<Self> {
        let id = employee.id?;
        Some(Self {
            title: "Delete Employee".to_string(),
            message: format!(
                "Are you sure you want to delete {}? This action cannot be undone.",
                employee.name
            ),
            confirm_text: "Delete".to_string(),
            cancel_text: "Cancel".to_string(),
            destructive: true,
            on_confirm: ApiRequest::DeleteEmployee {
                id,
                name: employee.name.clone(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Department;

    #[test]
    fn delete_prompt_names_the_employee() {
        let mut ann = Employee::new("Ann", "a@x.com", Department::Hr);
        ann.id = Some(4);

        let dialog = ConfirmDialog::delete_employee(&ann).unwrap();
        assert_eq!(
            dialog.message,
            "Are you sure you want to delete Ann? This action cannot be undone."
        );
        assert!(dialog.destructive);
        assert_eq!(
            dialog.on_confirm,
            ApiRequest::DeleteEmployee { id: 4, name: "Ann".to_string() }
        );
    }

    #[test]
    fn unsaved_record_cannot_be_deleted() {
        let draft = Employee::new("Ann", "a@x.com", Department::Hr);
        assert!(ConfirmDialog::delete_employee(&draft).is_none());
    }
}
