//! Mapping between [`ApiRequest`]s and HTTP calls, and back from replies.
//!
//! The client performs no I/O itself. `prepare` produces an [`HttpCall`] the
//! plugin shim hands to Zellij's `web_request`; `parse_reply` turns the
//! resulting status, body and context back into an [`ApiReply`].

use super::messages::{ApiPayload, ApiReply, ApiRequest, HttpCall, Method, RequestTag};
use crate::domain::error::{ApiError, Result, RosterError};
use crate::domain::Employee;
use std::collections::BTreeMap;

/// Context key holding the serialized [`RequestTag`].
pub const CONTEXT_KEY: &str = "roster_request";

/// Builds requests for, and decodes replies from, the employee endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Creates a client rooted at `base_url` (trailing slashes are ignored).
    ///
    /// # Example
    ///
    /// ```rust
    /// use roster::api::ApiClient;
    ///
    /// let client = ApiClient::new("http://localhost:8080/api/");
    /// assert_eq!(client.base_url(), "http://localhost:8080/api");
    /// ```
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Prepares the HTTP call for `request`.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Serialization`] if the payload or tag cannot be
    /// encoded as JSON.
    pub fn prepare(&self, request: &ApiRequest) -> Result<HttpCall> {
        let _span = tracing::debug_span!("api_prepare", request = ?request.tag()).entered();

        let root = format!("{}/employee", self.base_url);
        let (method, url, body) = match request {
            ApiRequest::ListEmployees => (Method::Get, format!("{root}/get-all"), Vec::new()),
            ApiRequest::GetEmployee { id } => (Method::Get, format!("{root}/search/{id}"), Vec::new()),
            ApiRequest::CreateEmployee { payload } => {
                (Method::Post, format!("{root}/add"), serde_json::to_vec(payload)?)
            }
            ApiRequest::UpdateEmployee { id, payload } => {
                (Method::Put, format!("{root}/update/{id}"), serde_json::to_vec(payload)?)
            }
            ApiRequest::DeleteEmployee { id, .. } => {
                (Method::Delete, format!("{root}/delete/{id}"), Vec::new())
            }
        };

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if !body.is_empty() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }

        let mut context = BTreeMap::new();
        context.insert(CONTEXT_KEY.to_string(), serde_json::to_string(&request.tag())?);

        tracing::debug!(method = ?method, url = %url, body_len = body.len(), "prepared request");

        Ok(HttpCall {
            method,
            url,
            headers,
            body,
            context,
        })
    }

    /// Matches a host reply to its request and decodes the outcome.
    ///
    /// Status 404 maps to [`ApiError::NotFound`], any other non-2xx status to
    /// [`ApiError::Status`], and an unexpected body to [`ApiError::Decode`].
    ///
    /// # Errors
    ///
    /// Returns an error only when the reply carries no recognizable tag,
    /// meaning it was not issued by this client.
    pub fn parse_reply(
        status: u16,
        body: &[u8],
        context: &BTreeMap<String, String>,
    ) -> Result<ApiReply> {
        let raw_tag = context.get(CONTEXT_KEY).ok_or_else(|| {
            RosterError::Config(format!("reply is missing the {CONTEXT_KEY} context"))
        })?;
        let tag: RequestTag = serde_json::from_str(raw_tag)?;

        let outcome = Self::decode_outcome(&tag, status, body);
        match &outcome {
            Ok(_) => tracing::debug!(tag = ?tag, status, "request succeeded"),
            Err(e) => tracing::warn!(tag = ?tag, status, error = %e, "request failed"),
        }

        Ok(ApiReply { tag, outcome })
    }

    fn decode_outcome(
        tag: &RequestTag,
        status: u16,
        body: &[u8],
    ) -> std::result::Result<ApiPayload, ApiError> {
        match status {
            200..=299 => {}
            404 => return Err(ApiError::NotFound),
            _ => {
                return Err(ApiError::Status {
                    status,
                    message: String::from_utf8_lossy(body).trim().to_string(),
                })
            }
        }

        let decode_err = |e: serde_json::Error| ApiError::Decode(e.to_string());
        match tag {
            RequestTag::List => serde_json::from_slice::<Vec<Employee>>(body)
                .map(ApiPayload::Employees)
                .map_err(decode_err),
            RequestTag::Get { .. } | RequestTag::Create | RequestTag::Update { .. } => {
                serde_json::from_slice::<Employee>(body)
                    .map(ApiPayload::Employee)
                    .map_err(decode_err)
            }
            RequestTag::Delete { .. } => Ok(ApiPayload::Deleted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, EmployeePayload};

    fn client() -> ApiClient {
        ApiClient::new("http://api.test/api/")
    }

    fn payload() -> EmployeePayload {
        EmployeePayload {
            name: "Ann".to_string(),
            email: "ann@x.com".to_string(),
            department: Department::Hr,
        }
    }

    #[test]
    fn prepares_every_endpoint() {
        let cases = [
            (ApiRequest::ListEmployees, Method::Get, "http://api.test/api/employee/get-all"),
            (ApiRequest::GetEmployee { id: 4 }, Method::Get, "http://api.test/api/employee/search/4"),
            (
                ApiRequest::CreateEmployee { payload: payload() },
                Method::Post,
                "http://api.test/api/employee/add",
            ),
            (
                ApiRequest::UpdateEmployee { id: 4, payload: payload() },
                Method::Put,
                "http://api.test/api/employee/update/4",
            ),
            (
                ApiRequest::DeleteEmployee { id: 4, name: "Ann".to_string() },
                Method::Delete,
                "http://api.test/api/employee/delete/4",
            ),
        ];

        for (request, method, url) in cases {
            let call = client().prepare(&request).unwrap();
            assert_eq!(call.method, method);
            assert_eq!(call.url, url);
        }
    }

    #[test]
    fn write_requests_carry_json_body() {
        let call = client()
            .prepare(&ApiRequest::UpdateEmployee { id: 9, payload: payload() })
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&call.body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name": "Ann", "email": "ann@x.com", "department": "HR"})
        );
        assert_eq!(call.headers.get("Content-Type").map(String::as_str), Some("application/json"));

        let call = client().prepare(&ApiRequest::ListEmployees).unwrap();
        assert!(call.body.is_empty());
        assert!(!call.headers.contains_key("Content-Type"));
    }

    #[test]
    fn reply_is_matched_through_context() {
        let request = ApiRequest::DeleteEmployee { id: 2, name: "Bob".to_string() };
        let call = client().prepare(&request).unwrap();

        let reply = ApiClient::parse_reply(204, b"", &call.context).unwrap();
        assert_eq!(reply.tag, request.tag());
        assert_eq!(reply.outcome, Ok(ApiPayload::Deleted));
    }

    #[test]
    fn decodes_employee_list() {
        let call = client().prepare(&ApiRequest::ListEmployees).unwrap();
        let body = br#"[{"id":1,"name":"Ann","email":"a@x.com","department":"HR"}]"#;
        let reply = ApiClient::parse_reply(200, body, &call.context).unwrap();
        match reply.outcome {
            Ok(ApiPayload::Employees(list)) => {
                assert_eq!(list.len(), 1);
                assert_eq!(list[0].id, Some(1));
            }
            other => panic!("expected employees, got {other:?}"),
        }
    }

    #[test]
    fn not_found_is_distinguishable() {
        let call = client().prepare(&ApiRequest::GetEmployee { id: 99 }).unwrap();
        let reply = ApiClient::parse_reply(404, b"", &call.context).unwrap();
        assert_eq!(reply.outcome, Err(ApiError::NotFound));
    }

    #[test]
    fn server_error_and_bad_body_are_failures() {
        let call = client().prepare(&ApiRequest::GetEmployee { id: 1 }).unwrap();

        let reply = ApiClient::parse_reply(500, b" oops ", &call.context).unwrap();
        assert_eq!(
            reply.outcome,
            Err(ApiError::Status { status: 500, message: "oops".to_string() })
        );

        let reply = ApiClient::parse_reply(200, b"not json", &call.context).unwrap();
        assert!(matches!(reply.outcome, Err(ApiError::Decode(_))));
    }

    #[test]
    fn foreign_reply_is_rejected() {
        assert!(ApiClient::parse_reply(200, b"[]", &BTreeMap::new()).is_err());
    }
}
