//! Contact form endpoint.
//!
//! `POST /api/contact` accepts the page's contact form as JSON and appends
//! accepted submissions to `submissions.jsonl` under the site root. There
//! is no mail delivery; the file is the inbox.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{Read, Write};
use tiny_http::Request;

use super::response::send_body;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::mime::types::{JSON, PLAIN};

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// One contact form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Check required fields. Returns the first problem found.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("name is required");
        }
        if !is_plausible_email(&self.email) {
            return Err("a valid email is required");
        }
        if self.subject.trim().is_empty() {
            return Err("subject is required");
        }
        if self.message.trim().is_empty() {
            return Err("message is required");
        }
        Ok(())
    }
}

/// Minimal sanity check, not RFC validation: something@something.something
fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Handle `POST /api/contact`.
pub fn respond_contact(mut request: Request, config: &SiteConfig) -> Result<()> {
    // Bounded read; a huge body is a client bug, not a server problem
    let mut body = String::new();
    let read_ok = {
        let mut limited = request.as_reader().take(MAX_BODY_BYTES as u64);
        limited.read_to_string(&mut body).is_ok()
    };
    if !read_ok {
        return send_body(request, 400, PLAIN, b"invalid body".to_vec());
    }

    let submission: ContactSubmission = match serde_json::from_str(&body) {
        Ok(s) => s,
        Err(_) => return send_body(request, 400, PLAIN, b"invalid json".to_vec()),
    };

    if let Err(problem) = submission.validate() {
        let payload = format!("{{\"error\":\"{problem}\"}}");
        return send_body(request, 422, JSON, payload.into_bytes());
    }

    if let Err(e) = append_submission(config, &submission) {
        log!("serve"; "failed to store contact submission: {e:#}");
        return send_body(request, 500, PLAIN, b"storage failed".to_vec());
    }

    log!("serve"; "contact submission from {} <{}>", submission.name, submission.email);
    send_body(request, 204, JSON, Vec::new())
}

/// Append one submission as a JSON line under the site root.
fn append_submission(config: &SiteConfig, submission: &ContactSubmission) -> Result<()> {
    let path = config.root_join("submissions.jsonl");
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", serde_json::to_string(submission)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, subject: &str, message: &str) -> ContactSubmission {
        ContactSubmission {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_valid_submission() {
        assert!(
            submission("Jo", "jo@example.com", "Hi", "A question.")
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn test_missing_fields_rejected() {
        assert!(submission("", "jo@example.com", "Hi", "Q").validate().is_err());
        assert!(submission("Jo", "jo@example.com", "", "Q").validate().is_err());
        assert!(submission("Jo", "jo@example.com", "Hi", " ").validate().is_err());
    }

    #[test]
    fn test_email_plausibility() {
        assert!(is_plausible_email("jo@example.com"));
        assert!(!is_plausible_email("jo@example"));
        assert!(!is_plausible_email("jo.example.com"));
        assert!(!is_plausible_email("@example.com"));
        assert!(!is_plausible_email("jo@.com"));
    }

    #[test]
    fn test_append_submission_jsonl() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = SiteConfig::default();
        config.set_root(dir.path());

        let sub = submission("Jo", "jo@example.com", "Hi", "First");
        append_submission(&config, &sub).unwrap();
        append_submission(&config, &sub).unwrap();

        let stored = std::fs::read_to_string(dir.path().join("submissions.jsonl")).unwrap();
        assert_eq!(stored.lines().count(), 2);
        let parsed: ContactSubmission = serde_json::from_str(stored.lines().next().unwrap()).unwrap();
        assert_eq!(parsed.name, "Jo");
    }
}
