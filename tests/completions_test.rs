mod common;

use common::HelpdeskTest;

#[test]
fn test_completions_bash() {
    let desk = HelpdeskTest::new();
    let output = desk.run_success(&["completions", "bash"]);
    assert!(output.contains("helpdesk"));
    assert!(output.contains("suggest-reply"));
}

#[test]
fn test_completions_zsh() {
    let desk = HelpdeskTest::new();
    let output = desk.run_success(&["completions", "zsh"]);
    assert!(output.contains("#compdef helpdesk"));
}

#[test]
fn test_completions_invalid_shell() {
    let desk = HelpdeskTest::new();
    desk.run_failure(&["completions", "tcsh"]);
}
