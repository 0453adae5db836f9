//! Chapter 4: API Documentation.

use crate::builder::DocumentBuilder;
use crate::config::ManualConfig;

/// How request and response bodies are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyLayout {
    /// `Request Body: {...}` on one line.
    Inline,
    /// A `Request Body:` label followed by the body as its own paragraph.
    Block,
}

/// One documented endpoint.
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    route: &'static str,
    description: &'static str,
    auth: Option<&'static str>,
    params: Option<&'static str>,
    request: Option<&'static str>,
    response: &'static str,
}

impl Endpoint {
    const fn new(route: &'static str, description: &'static str, response: &'static str) -> Self {
        Self {
            route,
            description,
            auth: None,
            params: None,
            request: None,
            response,
        }
    }

    const fn auth(mut self, auth: &'static str) -> Self {
        self.auth = Some(auth);
        self
    }

    const fn params(mut self, params: &'static str) -> Self {
        self.params = Some(params);
        self
    }

    const fn request(mut self, request: &'static str) -> Self {
        self.request = Some(request);
        self
    }
}

/// A titled group of endpoints.
struct EndpointGroup {
    heading: &'static str,
    layout: BodyLayout,
    endpoints: &'static [Endpoint],
}

const GROUPS: &[EndpointGroup] = &[
    EndpointGroup {
        heading: "4.1 Authentication APIs",
        layout: BodyLayout::Inline,
        endpoints: &[
            Endpoint::new(
                "POST /api/admin/login",
                "Admin login endpoint",
                r#"{"success": true, "user": {"username": "string", "role": "string"}}"#,
            )
            .auth("None required")
            .request(r#"{"username": "string", "password": "string"}"#),
            Endpoint::new(
                "POST /api/admin/logout",
                "Admin logout endpoint",
                r#"{"success": true}"#,
            )
            .auth("Admin cookie required")
            .request("None"),
        ],
    },
    EndpointGroup {
        heading: "4.2 Schedule APIs",
        layout: BodyLayout::Inline,
        endpoints: &[
            Endpoint::new(
                "GET /api/my-schedule/[employeeId]",
                "Get employee schedule",
                r#"{"employee": {...}, "headers": [...], "schedule": [...]}"#,
            )
            .params("employeeId - Employee ID (e.g., SLL-88717)"),
            Endpoint::new(
                "GET /api/admin/get-display-data",
                "Get merged display roster data",
                r#"{"teams": {...}, "headers": [...], "allEmployees": [...]}"#,
            ),
            Endpoint::new(
                "GET /api/admin/get-admin-data",
                "Get admin-modified roster data",
                r#"{"teams": {...}, "headers": [...], "allEmployees": [...]}"#,
            ),
            Endpoint::new(
                "GET /api/admin/get-google-data",
                "Get original Google Sheets roster data",
                r#"{"teams": {...}, "headers": [...], "allEmployees": [...]}"#,
            ),
        ],
    },
    EndpointGroup {
        heading: "4.3 Request APIs",
        layout: BodyLayout::Block,
        endpoints: &[
            Endpoint::new(
                "POST /api/schedule-requests/submit-shift-change",
                "Submit a shift change request",
                r#"{"success": true, "message": "Request submitted"}"#,
            )
            .request(
                r#"{
  "employee_id": "string",
  "employee_name": "string",
  "team": "string",
  "date": "string",
  "current_shift": "string",
  "requested_shift": "string",
  "reason": "string"
}"#,
            ),
            Endpoint::new(
                "POST /api/schedule-requests/submit-swap-request",
                "Submit a shift swap request",
                r#"{"success": true, "message": "Swap request submitted"}"#,
            )
            .request(
                r#"{
  "requester_id": "string",
  "requester_name": "string",
  "swap_with_id": "string",
  "swap_with_name": "string",
  "team": "string",
  "date": "string",
  "reason": "string"
}"#,
            ),
            Endpoint::new(
                "GET /api/schedule-requests/get-all",
                "Get all schedule requests",
                r#"[{"id": "string", "type": "string", "status": "string", ...}]"#,
            ),
            Endpoint::new(
                "POST /api/schedule-requests/update-status",
                "Approve or reject a request (admin only)",
                r#"{"success": true}"#,
            )
            .request(r#"{"id": "string", "status": "approved|rejected", "admin_username": "string"}"#),
        ],
    },
    EndpointGroup {
        heading: "4.4 Admin APIs",
        layout: BodyLayout::Block,
        endpoints: &[
            Endpoint::new(
                "POST /api/admin/update-shift",
                "Update employee shift for a specific date",
                r#"{"success": true}"#,
            )
            .request(
                r#"{
  "employee_id": "string",
  "date": "string",
  "shift_code": "string",
  "admin_username": "string"
}"#,
            ),
            Endpoint::new(
                "POST /api/admin/upload-csv",
                "Upload roster CSV file",
                r#"{"success": true, "message": "CSV imported"}"#,
            )
            .request("multipart/form-data with file and month"),
            Endpoint::new(
                "POST /api/admin/export-csv",
                "Export roster data as CSV",
                "CSV file download",
            )
            .request(r#"{"months": ["string"]}"#),
            Endpoint::new(
                "POST /api/admin/save-team",
                "Create or update a team",
                r#"{"success": true}"#,
            )
            .request(r#"{"name": "string", "description": "string"}"#),
            Endpoint::new(
                "POST /api/admin/save-employee",
                "Create or update an employee",
                r#"{"success": true}"#,
            )
            .request(r#"{"id": "string", "name": "string", "team": "string"}"#),
        ],
    },
    EndpointGroup {
        heading: "4.5 Data Sync APIs",
        layout: BodyLayout::Block,
        endpoints: &[
            Endpoint::new(
                "POST /api/admin/sync-google-sheets",
                "Manually trigger Google Sheets sync",
                r#"{"success": true, "employees": number, "sheets": number}"#,
            ),
            Endpoint::new(
                "POST /api/admin/set-auto-sync",
                "Enable or disable automatic sync",
                r#"{"success": true}"#,
            )
            .request(r#"{"enabled": boolean}"#),
            Endpoint::new(
                "POST /api/admin/reset-to-google",
                "Reset admin data to Google Sheets data",
                r#"{"success": true, "message": "Data reset"}"#,
            ),
            Endpoint::new(
                "GET /api/admin/get-modified-shifts",
                "Get list of all modified shifts",
                r#"[{"employee_id": "string", "date": "string", "old_shift": "string", "new_shift": "string", ...}]"#,
            ),
        ],
    },
];

pub(super) fn add_api_documentation(b: &mut DocumentBuilder, config: &ManualConfig) {
    super::chapter(b, "4. API Documentation");
    b.add_paragraph(format!(
        "This section documents all API endpoints available in the {}. All APIs use JSON for \
         request and response bodies.",
        config.product_name
    ));

    for group in GROUPS {
        b.add_heading(group.heading, 2);
        for endpoint in group.endpoints {
            add_endpoint(b, endpoint, group.layout);
        }
    }
}

fn add_endpoint(b: &mut DocumentBuilder, endpoint: &Endpoint, layout: BodyLayout) {
    b.add_bold_paragraph(endpoint.route)
        .add_paragraph(format!("Description: {}", endpoint.description));
    if let Some(auth) = endpoint.auth {
        b.add_paragraph(format!("Authentication: {}", auth));
    }
    if let Some(params) = endpoint.params {
        b.add_paragraph(format!("Parameters: {}", params));
    }

    match layout {
        BodyLayout::Inline => {
            if let Some(request) = endpoint.request {
                b.add_paragraph(format!("Request Body: {}", request));
            }
            b.add_paragraph(format!("Response: {}", endpoint.response));
        }
        BodyLayout::Block => {
            if let Some(request) = endpoint.request {
                b.add_paragraph("Request Body:").add_paragraph(request);
            }
            b.add_paragraph("Response:").add_paragraph(endpoint.response);
        }
    }
    b.add_empty_paragraph();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Paragraph};

    fn paragraphs() -> Vec<Paragraph> {
        let mut b = DocumentBuilder::new();
        add_api_documentation(&mut b, &ManualConfig::default());
        b.build()
            .blocks()
            .filter_map(|block| match block {
                Block::Paragraph(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_endpoint_count() {
        let total: usize = GROUPS.iter().map(|g| g.endpoints.len()).sum();
        assert_eq!(total, 19);
        let routes = paragraphs()
            .iter()
            .filter(|p| p.runs.first().is_some_and(|r| r.style.bold))
            .count();
        assert_eq!(routes, 19);
    }

    #[test]
    fn test_inline_layout() {
        let texts: Vec<String> = paragraphs().iter().map(|p| p.plain_text()).collect();
        let start = texts
            .iter()
            .position(|t| t == "POST /api/admin/login")
            .expect("login endpoint");
        assert_eq!(
            &texts[start + 1..start + 6],
            &[
                "Description: Admin login endpoint",
                "Authentication: None required",
                r#"Request Body: {"username": "string", "password": "string"}"#,
                r#"Response: {"success": true, "user": {"username": "string", "role": "string"}}"#,
                "",
            ]
        );
    }

    #[test]
    fn test_block_layout_keeps_multiline_bodies() {
        let texts: Vec<String> = paragraphs().iter().map(|p| p.plain_text()).collect();
        let start = texts
            .iter()
            .position(|t| t == "POST /api/admin/update-shift")
            .expect("update-shift endpoint");
        assert_eq!(texts[start + 2], "Request Body:");
        assert!(texts[start + 3].starts_with("{\n  \"employee_id\""));
        assert_eq!(texts[start + 4], "Response:");
        assert_eq!(texts[start + 5], r#"{"success": true}"#);
    }

    #[test]
    fn test_block_layout_without_request() {
        let texts: Vec<String> = paragraphs().iter().map(|p| p.plain_text()).collect();
        let start = texts
            .iter()
            .position(|t| t == "GET /api/schedule-requests/get-all")
            .expect("get-all endpoint");
        assert_eq!(texts[start + 2], "Response:");
    }
}
