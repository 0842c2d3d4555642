//! Request and reply types exchanged with the REST backend.
//!
//! A request travels through Zellij's `web_request` host call, and its reply
//! comes back as a separate `WebRequestResult` event. The [`RequestTag`] is
//! serialized into the request's context map so the reply can be matched to
//! what was asked.

use crate::domain::{ApiError, Employee, EmployeeId, EmployeePayload};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A call the application wants made against the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Fetch every employee.
    ListEmployees,

    /// Fetch one employee by identity.
    GetEmployee { id: EmployeeId },

    /// Create an employee; the server assigns identity and timestamps.
    CreateEmployee { payload: EmployeePayload },

    /// Replace an employee's editable fields.
    UpdateEmployee {
        id: EmployeeId,
        payload: EmployeePayload,
    },

    /// Delete an employee.
    DeleteEmployee {
        id: EmployeeId,
        /// Display name, echoed back for the confirmation toast.
        name: String,
    },
}

impl ApiRequest {
    /// The correlation tag carried alongside this request.
    #[must_use]
    pub fn tag(&self) -> RequestTag {
        match self {
            Self::ListEmployees => RequestTag::List,
            Self::GetEmployee { id } => RequestTag::Get { id: *id },
            Self::CreateEmployee { .. } => RequestTag::Create,
            Self::UpdateEmployee { id, .. } => RequestTag::Update { id: *id },
            Self::DeleteEmployee { id, name } => RequestTag::Delete {
                id: *id,
                name: name.clone(),
            },
        }
    }
}

/// Identifies which request a reply belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RequestTag {
    List,
    Get { id: EmployeeId },
    Create,
    Update { id: EmployeeId },
    Delete { id: EmployeeId, name: String },
}

/// HTTP verb, independent of the Zellij type so it can be tested natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Fully prepared web request, ready to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpCall {
    pub method: Method,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: BTreeMap<String, String>,
}

/// Successful reply body, decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiPayload {
    Employees(Vec<Employee>),
    Employee(Employee),
    Deleted,
}

/// A reply matched to its request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiReply {
    pub tag: RequestTag,
    pub outcome: Result<ApiPayload, ApiError>,
}
