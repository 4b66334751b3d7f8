//! Plain-text ticket documents.
//!
//! A ticket is stored as YAML frontmatter followed by a markdown body:
//!
//! ```text
//! ---
//! id: tkt-3fa9c1
//! status: open
//! priority: high
//! created_at: 2024-01-01T09:00:00Z
//! sla_deadline: 2024-01-02T09:00:00Z
//! is_sla_breached: false
//! created_by: alice
//! ---
//! # Printer on fire
//!
//! The description is everything after the title heading.
//! ```

use jiff::Timestamp;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{HelpdeskError, Result};
use crate::types::{Ticket, TicketId, TicketPriority, TicketStatus, UserId};

static FRONTMATTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^---\r?\n(.*?)\r?\n---\r?\n?(.*)$").expect("frontmatter regex is valid")
});

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#[ \t]+(.*?)[ \t]*$").expect("title regex is valid"));

/// Everything about a ticket except title and description.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct TicketFrontmatter {
    id: TicketId,
    status: TicketStatus,
    priority: TicketPriority,
    created_at: Timestamp,
    sla_deadline: Timestamp,
    #[serde(default)]
    is_sla_breached: bool,
    created_by: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    assigned_to: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resolved_at: Option<Timestamp>,
}

/// Parse a ticket document.
pub fn parse_ticket(content: &str) -> Result<Ticket> {
    let captures = FRONTMATTER_RE
        .captures(content)
        .ok_or_else(|| HelpdeskError::InvalidFormat("missing YAML frontmatter".to_string()))?;

    let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or("");
    let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");

    let front: TicketFrontmatter = serde_yaml_ng::from_str(yaml)?;

    let title_match = TITLE_RE.captures(body).and_then(|c| c.get(0).zip(c.get(1)));
    let (title, description) = match title_match {
        Some((whole, title)) => (
            title.as_str().to_string(),
            body[whole.end()..].trim().to_string(),
        ),
        None => {
            return Err(HelpdeskError::InvalidFormat(format!(
                "ticket '{}' has no title heading",
                front.id
            )));
        }
    };

    Ok(Ticket {
        id: front.id,
        title,
        description,
        status: front.status,
        priority: front.priority,
        created_at: front.created_at,
        sla_deadline: front.sla_deadline,
        is_sla_breached: front.is_sla_breached,
        created_by: front.created_by,
        assigned_to: front.assigned_to,
        resolved_at: front.resolved_at,
    })
}

/// Render a ticket as a document that [`parse_ticket`] reads back.
pub fn render_ticket(ticket: &Ticket) -> Result<String> {
    let front = TicketFrontmatter {
        id: ticket.id.clone(),
        status: ticket.status,
        priority: ticket.priority,
        created_at: ticket.created_at,
        sla_deadline: ticket.sla_deadline,
        is_sla_breached: ticket.is_sla_breached,
        created_by: ticket.created_by.clone(),
        assigned_to: ticket.assigned_to.clone(),
        resolved_at: ticket.resolved_at,
    };
    let title = ticket.title.trim();
    if title.contains(['\n', '\r']) {
        return Err(HelpdeskError::InvalidFormat(format!(
            "ticket '{}' has a multi-line title",
            ticket.id
        )));
    }
    let yaml = serde_yaml_ng::to_string(&front)?;

    let mut doc = format!("---\n{}---\n# {}\n", yaml, title);
    let description = ticket.description.trim();
    if !description.is_empty() {
        doc.push('\n');
        doc.push_str(description);
        doc.push('\n');
    }
    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"---
id: tkt-a1b2c3
status: in_progress
priority: urgent
created_at: 2024-01-01T09:00:00Z
sla_deadline: 2024-01-02T09:00:00Z
is_sla_breached: true
created_by: alice
assigned_to: bob
---
# Printer on fire

Smoke everywhere.

# Not a title
Still description.
"#;

    #[test]
    fn test_parse_basic_ticket() {
        let ticket = parse_ticket(SAMPLE).unwrap();
        assert_eq!(ticket.id.as_str(), "tkt-a1b2c3");
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.priority, TicketPriority::Urgent);
        assert_eq!(ticket.title, "Printer on fire");
        assert_eq!(
            ticket.description,
            "Smoke everywhere.\n\n# Not a title\nStill description."
        );
        assert!(ticket.is_sla_breached);
        assert_eq!(ticket.assigned_to.as_deref(), Some("bob"));
        assert_eq!(ticket.resolved_at, None);
    }

    #[test]
    fn test_parse_missing_frontmatter() {
        let result = parse_ticket("# No frontmatter\n\nJust content.");
        assert!(matches!(result, Err(HelpdeskError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_missing_title() {
        let content = SAMPLE.replace("# Printer on fire", "Printer on fire");
        let content = content.replace("# Not a title", "Not a title");
        assert!(matches!(
            parse_ticket(&content),
            Err(HelpdeskError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_bad_status_is_a_yaml_error() {
        let content = SAMPLE.replace("status: in_progress", "status: pending");
        assert!(matches!(
            parse_ticket(&content),
            Err(HelpdeskError::YamlParse(_))
        ));
    }

    #[test]
    fn test_render_then_parse_preserves_ticket() {
        let mut ticket = parse_ticket(SAMPLE).unwrap();
        ticket.resolved_at = Some("2024-01-01T11:30:00Z".parse().unwrap());
        ticket.status = TicketStatus::Resolved;

        let rendered = render_ticket(&ticket).unwrap();
        assert!(rendered.starts_with("---\nid: tkt-a1b2c3\n"));
        assert_eq!(parse_ticket(&rendered).unwrap(), ticket);
    }

    #[test]
    fn test_render_rejects_multiline_title() {
        let mut ticket = parse_ticket(SAMPLE).unwrap();
        ticket.title = "Printer\nFloor 2".to_string();
        assert!(matches!(
            render_ticket(&ticket),
            Err(HelpdeskError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_render_empty_description() {
        let mut ticket = parse_ticket(SAMPLE).unwrap();
        ticket.description = "   ".to_string();
        let rendered = render_ticket(&ticket).unwrap();
        assert!(rendered.ends_with("# Printer on fire\n"));
        assert_eq!(parse_ticket(&rendered).unwrap().description, "");
    }
}
