//! Console rendering for probe results. Each function returns the lines the
//! binaries print to stdout, so formatting stays testable.

use std::io::{self, Write};

use serde_json::Value;

use crate::error::ProbeResult;
use crate::probe::ProbeOutcome;
use crate::session::{InventoryListing, LoginOutcome, RawResponse};

/// `Status:`/`Body:` on success, one error line otherwise.
pub fn outcome_lines(result: &ProbeResult<ProbeOutcome>) -> Vec<String> {
    match result {
        Ok(outcome) => vec![
            format!("Status: {}", outcome.status),
            format!("Body: {}", outcome.body),
        ],
        Err(e) => vec![e.describe()],
    }
}

pub fn register_lines(result: &ProbeResult<RawResponse>) -> Vec<String> {
    let response = match result {
        Ok(r) => r,
        Err(e) => return vec![e.describe()],
    };

    let parsed = serde_json::from_str::<Value>(&response.body).ok();
    let body = parsed
        .as_ref()
        .and_then(|v| serde_json::to_string_pretty(v).ok())
        .unwrap_or_else(|| response.body.clone());

    let verdict = if response.status == 201 {
        "Registration succeeded".to_string()
    } else {
        let reason = parsed
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(Value::as_str)
            .unwrap_or("unknown error");
        format!("Registration failed: {}", reason)
    };

    vec![
        format!("Status: {}", response.status),
        format!("Body: {}", body),
        verdict,
    ]
}

pub fn login_lines(outcome: &LoginOutcome) -> Vec<String> {
    match outcome {
        LoginOutcome::Accepted { status, session } => {
            let user = &session.profile.user;
            let tenant = session
                .profile
                .tenants
                .first()
                .and_then(|t| t.name.as_deref())
                .unwrap_or("(none)");
            vec![
                format!("Login status: {}", status),
                format!("User: {}", user.name.as_deref().unwrap_or(&user.username)),
                format!("Tenant: {}", tenant),
            ]
        }
        LoginOutcome::Rejected { status, message } => vec![
            format!("Login status: {}", status),
            format!("Login failed: {}", message),
        ],
    }
}

pub fn listing_lines(result: &ProbeResult<InventoryListing>) -> Vec<String> {
    match result {
        Ok(InventoryListing::Listed { status, count }) => vec![
            format!("Inventory status: {}", status),
            format!("Items: {}", count),
        ],
        Ok(InventoryListing::Refused { status, body }) => vec![
            format!("Inventory status: {}", status),
            format!("Body: {}", body),
        ],
        Err(e) => vec![e.describe()],
    }
}

pub fn write_lines(out: &mut impl Write, lines: &[String]) -> io::Result<()> {
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
