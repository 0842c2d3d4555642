//! Employee domain model.
//!
//! Employees are owned by the backend. The plugin holds working copies that
//! are fetched, edited through explicit save calls, and dropped when the user
//! navigates away. The JSON shape mirrors the REST API (camelCase keys,
//! uppercase department names).

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Backend-assigned employee identity.
pub type EmployeeId = i64;

/// Department an employee belongs to.
///
/// The set is closed; the backend rejects anything else, and so does
/// deserialization here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Department {
    Hr,
    It,
    Finance,
    Operations,
}

impl Department {
    /// All departments in display order.
    pub const ALL: [Self; 4] = [Self::Hr, Self::It, Self::Finance, Self::Operations];

    /// Wire and display name (`HR`, `IT`, `FINANCE`, `OPERATIONS`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hr => "HR",
            Self::It => "IT",
            Self::Finance => "FINANCE",
            Self::Operations => "OPERATIONS",
        }
    }

    /// Badge color used wherever the department is shown.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Hr => "#4CAF50",
            Self::It => "#3366FF",
            Self::Finance => "#FF9800",
            Self::Operations => "#673AB7",
        }
    }

    /// Steps through `None` (all departments) and then each department in order.
    ///
    /// Used by the list view's department selector and the form's department
    /// field. Wraps around in both directions.
    ///
    /// # Examples
    ///
    /// ```
    /// use roster::domain::Department;
    ///
    /// assert_eq!(Department::cycle(None, true), Some(Department::Hr));
    /// assert_eq!(Department::cycle(Some(Department::Operations), true), None);
    /// assert_eq!(Department::cycle(None, false), Some(Department::Operations));
    /// ```
    #[must_use]
    pub fn cycle(current: Option<Self>, forward: bool) -> Option<Self> {
        let position = current.and_then(|d| Self::ALL.iter().position(|&x| x == d));
        let slots = Self::ALL.len() + 1;
        // slot 0 is "all", slot i + 1 is ALL[i]
        let slot = position.map_or(0, |p| p + 1);
        let next = if forward {
            (slot + 1) % slots
        } else {
            (slot + slots - 1) % slots
        };
        next.checked_sub(1).map(|i| Self::ALL[i])
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Department {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| format!("unknown department: {s}"))
    }
}

/// An employee record as returned by the backend.
///
/// # Fields
///
/// - `id`: `None` until the backend persists the record
/// - `created_time` / `updated_time`: server-assigned, passed through verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub department: Department,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_time: Option<String>,
}

impl Employee {
    /// Creates an unsaved employee with no identity or timestamps.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, department: Department) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            department,
            created_time: None,
            updated_time: None,
        }
    }

    /// Returns the editable fields as a create/update payload.
    #[must_use]
    pub fn payload(&self) -> EmployeePayload {
        EmployeePayload {
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department,
        }
    }
}

/// Request body for create and update calls.
///
/// Carries no identity: creation lets the server assign one, and updates
/// address the record through the URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub name: String,
    pub email: String,
    pub department: Department,
}

/// Formats a server timestamp for display, e.g. `Mar 4, 2025, 9:15:02 AM`.
///
/// The backend may send RFC 3339 or a zone-less ISO local date-time (with or
/// without fractional seconds). Anything else is returned unchanged.
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%b %-d, %Y, %-I:%M:%S %p";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map_or_else(|| raw.to_string(), |dt| dt.format(DISPLAY).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_json() {
        let json = r#"{
            "id": 7,
            "name": "Ann",
            "email": "ann@example.com",
            "department": "FINANCE",
            "createdTime": "2025-03-04T09:15:02",
            "updatedTime": null
        }"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, Some(7));
        assert_eq!(employee.department, Department::Finance);
        assert_eq!(employee.created_time.as_deref(), Some("2025-03-04T09:15:02"));
        assert!(employee.updated_time.is_none());
    }

    #[test]
    fn rejects_unknown_department() {
        let json = r#"{"name":"Ann","email":"a@x.com","department":"SALES"}"#;
        assert!(serde_json::from_str::<Employee>(json).is_err());
    }

    #[test]
    fn payload_serializes_without_identity() {
        let mut employee = Employee::new("Bob", "b@x.com", Department::It);
        employee.id = Some(3);
        let json = serde_json::to_value(employee.payload()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "Bob", "email": "b@x.com", "department": "IT"})
        );
    }

    #[test]
    fn department_round_trips_through_str() {
        for department in Department::ALL {
            assert_eq!(department.as_str().parse::<Department>(), Ok(department));
        }
        assert!("hr".parse::<Department>().is_err());
    }

    #[test]
    fn cycle_visits_every_option_and_wraps() {
        let mut current = None;
        let mut seen = vec![];
        for _ in 0..5 {
            current = Department::cycle(current, true);
            seen.push(current);
        }
        assert_eq!(
            seen,
            vec![
                Some(Department::Hr),
                Some(Department::It),
                Some(Department::Finance),
                Some(Department::Operations),
                None,
            ]
        );
        assert_eq!(Department::cycle(Some(Department::Hr), false), None);
    }

    #[test]
    fn formats_local_iso_timestamp() {
        assert_eq!(format_timestamp("2025-03-04T09:15:02"), "Mar 4, 2025, 9:15:02 AM");
        assert_eq!(format_timestamp("2025-03-04T21:15:02.123456"), "Mar 4, 2025, 9:15:02 PM");
    }

    #[test]
    fn leaves_unparseable_timestamp_alone() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
