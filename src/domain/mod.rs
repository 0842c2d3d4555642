//! Domain layer for the Roster plugin.
//!
//! Core types independent of Zellij APIs: the employee model, its department
//! enumeration, and the error types shared by every other layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`employee`]: Employee record, department and request payload
//!
//! # Examples
//!
//! ```
//! use roster::domain::{Department, Employee};
//!
//! let employee = Employee::new("Ann", "ann@example.com", Department::Hr);
//! assert!(employee.id.is_none());
//! ```

pub mod employee;
pub mod error;

pub use employee::{format_timestamp, Department, Employee, EmployeeId, EmployeePayload};
pub use error::{ApiError, Result, RosterError};
