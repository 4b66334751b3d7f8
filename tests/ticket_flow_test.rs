mod common;

use common::HelpdeskTest;

#[test]
fn test_create_writes_ticket_document() {
    let desk = HelpdeskTest::new();
    let id = desk.create_ticket_as("uma", "Printer jammed", "high");

    assert!(id.starts_with("tkt-"));
    let content = desk.read_ticket(&id);
    assert!(content.starts_with("---\n"));
    assert!(content.contains("status: open"));
    assert!(content.contains("priority: high"));
    assert!(content.contains("created_by: uma"));
    assert!(content.contains("# Printer jammed"));
    assert!(content.contains("Printer jammed details"));
}

#[test]
fn test_create_defaults_to_medium_and_reports_sla() {
    let desk = HelpdeskTest::new();
    desk.login("uma");
    let json = desk.run_json(&["create", "Slow laptop", "-d", "Takes ages to boot"]);

    assert_eq!(json["priority"], "medium");
    assert_eq!(json["status"], "open");
    assert_eq!(json["is_sla_breached"], false);
    assert_eq!(json["sla"]["tier"], "normal");
    assert_eq!(json["sla"]["percentage"], 0);
}

#[test]
fn test_create_requires_description() {
    let desk = HelpdeskTest::new();
    desk.login("uma");
    let stderr = desk.run_failure(&["create", "No details"]);
    assert!(stderr.contains("description cannot be empty"), "{stderr}");
}

#[test]
fn test_create_rejects_unknown_priority() {
    let desk = HelpdeskTest::new();
    desk.login("uma");
    let stderr = desk.run_failure(&["create", "X", "-d", "y", "-p", "p0"]);
    assert!(stderr.contains("Invalid priority"), "{stderr}");
}

#[test]
fn test_comments_show_author_names_in_order() {
    let desk = HelpdeskTest::new();
    desk.setup_staff();
    let id = desk.create_ticket_as("uma", "VPN drops", "urgent");
    desk.run_success(&["login", "uma", "--name", "Uma User"]);
    desk.run_success(&["comment", &id, "It", "drops", "hourly"]);

    desk.run_success(&["login", "agent", "--name", "Al Agent"]);
    desk.run_success(&["comment", &id, "Looking into it"]);

    let detail = desk.run_json(&["show", &id]);
    let comments = detail["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["author_name"], "Uma User");
    assert_eq!(comments[0]["content"], "It drops hourly");
    assert_eq!(comments[1]["author_name"], "Al Agent");
    assert!(detail["resolution_time"].is_null());
}

#[test]
fn test_plain_login_keeps_display_name() {
    let desk = HelpdeskTest::new();
    desk.run_success(&["login", "uma", "--name", "Uma User"]);
    let id = desk.run_json(&["create", "Scanner", "-d", "Offline"])["id"]
        .as_str()
        .unwrap()
        .to_string();
    desk.run_success(&["comment", &id, "Any news?"]);

    desk.run_success(&["logout"]);
    desk.login("uma");
    let detail = desk.run_json(&["show", &id]);
    assert_eq!(detail["comments"][0]["author_name"], "Uma User");
}

#[test]
fn test_create_rejects_multiline_title() {
    let desk = HelpdeskTest::new();
    desk.login("uma");
    let stderr = desk.run_failure(&["create", "Printer\nFloor 2", "-d", "jammed"]);
    assert!(stderr.contains("title must be a single line"), "{stderr}");
    assert_eq!(desk.run_json(&["ls"])["total_items"], 0);
}

#[test]
fn test_comment_from_author_without_profile_shows_placeholder() {
    let desk = HelpdeskTest::new();
    let id = desk.create_ticket_as("uma", "Monitor flicker", "low");
    desk.run_success(&["comment", &id, "Still flickering"]);

    // Author names come from profiles.yaml.
    std::fs::remove_file(desk.root().join("profiles.yaml")).unwrap();

    let detail = desk.run_json(&["show", &id]);
    assert_eq!(detail["comments"][0]["author_name"], "Unknown User");
    assert_eq!(detail["comments"][0]["content"], "Still flickering");
}

#[test]
fn test_empty_comment_rejected() {
    let desk = HelpdeskTest::new();
    let id = desk.create_ticket_as("uma", "Keyboard", "low");
    let stderr = desk.run_failure(&["comment", &id, "   "]);
    assert!(stderr.contains("comment cannot be empty"), "{stderr}");
}

#[test]
fn test_status_lifecycle_stamps_and_clears_resolution() {
    let desk = HelpdeskTest::new();
    desk.setup_staff();
    let id = desk.create_ticket_as("uma", "Email bounce", "medium");

    desk.login("agent");
    let json = desk.run_json(&["status", &id, "in_progress"]);
    assert_eq!(json["changed"], true);
    assert!(json["resolved_at"].is_null());

    let json = desk.run_json(&["status", &id, "resolved"]);
    assert_eq!(json["status"], "resolved");
    assert!(json["resolved_at"].is_string());
    assert!(json["sla"].is_null());
    assert!(desk.read_ticket(&id).contains("resolved_at:"));

    let detail = desk.run_json(&["show", &id]);
    assert!(detail["resolution_time"].as_str().unwrap().ends_with('m'));

    let json = desk.run_json(&["status", &id, "resolved"]);
    assert_eq!(json["changed"], false);

    let json = desk.run_json(&["status", &id, "open"]);
    assert!(json["resolved_at"].is_null());
    assert!(!desk.read_ticket(&id).contains("resolved_at:"));
}

#[test]
fn test_show_unknown_ticket() {
    let desk = HelpdeskTest::new();
    desk.login("uma");
    let stderr = desk.run_failure(&["show", "tkt-000000"]);
    assert!(stderr.contains("ticket 'tkt-000000' not found"), "{stderr}");
}

#[test]
fn test_breached_ticket_reports_breach() {
    let desk = HelpdeskTest::new();
    desk.setup_staff();
    desk.write_ticket(
        "tkt-b0b0b0",
        r#"---
id: tkt-b0b0b0
status: open
priority: urgent
created_at: 2024-01-01T09:00:00Z
sla_deadline: 2024-01-02T09:00:00Z
is_sla_breached: true
created_by: uma
---
# Server down

Nothing responds.
"#,
    );

    let json = desk.run_json(&["show", "tkt-b0b0b0"]);
    assert_eq!(json["sla"]["tier"], "breached");
    assert_eq!(json["sla"]["percentage"], 100);

    let stats = desk.run_json(&["stats"]);
    assert_eq!(stats["sla_breached"], 1);
    assert_eq!(stats["sla_compliance"], 0);
}

#[test]
fn test_assistant_actions() {
    let desk = HelpdeskTest::new();
    desk.setup_staff();
    let id = desk.create_ticket_as("uma", "VPN drops", "high");
    desk.run_success(&["comment", &id, "Again today"]);

    let stderr = desk.run_failure(&["summarize", &id]);
    assert!(stderr.contains("not allowed to use AI actions"), "{stderr}");

    desk.login("agent");
    let summary = desk.run_json(&["summarize", &id]);
    assert_eq!(
        summary["summary"],
        "Summary: VPN drops - VPN drops details... 1 comment(s) received. Status requires attention."
    );

    let reply = desk.run_success(&["suggest-reply", &id]);
    assert!(reply.starts_with("Thank you for contacting us regarding \"VPN drops\"."));
}
