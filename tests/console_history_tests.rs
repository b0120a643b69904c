//! History buffer tests

use acm_console::console::history::History;

#[test]
fn test_history_empty() {
    let mut history: History<4, 64> = History::new();
    assert!(history.is_empty());
    assert!(history.older().is_none());
    assert!(history.newer().is_none());
}

#[test]
fn test_history_push_and_recall() {
    let mut history: History<4, 64> = History::new();

    history.push("help");
    history.push("echo 5");

    // Navigate back
    assert_eq!(history.older(), Some("echo 5"));
    assert_eq!(history.older(), Some("help"));
    assert_eq!(history.older(), None); // stays at oldest
    assert_eq!(history.nav_pos(), Some(1));

    // Navigate forward
    assert_eq!(history.newer(), Some("echo 5"));
    assert_eq!(history.newer(), Some("")); // back to the fresh line
    assert_eq!(history.newer(), None);
    assert_eq!(history.nav_pos(), None);
}

#[test]
fn test_history_overflow() {
    let mut history: History<4, 64> = History::new();

    history.push("cmd1");
    history.push("cmd2");
    history.push("cmd3");
    history.push("cmd4");
    history.push("cmd5"); // overflow, drops cmd1

    assert_eq!(history.len(), 4);
    let stored: Vec<&str> = history.iter().collect();
    assert_eq!(stored, ["cmd5", "cmd4", "cmd3", "cmd2"]);

    assert_eq!(history.older(), Some("cmd5"));
    assert_eq!(history.older(), Some("cmd4"));
    assert_eq!(history.older(), Some("cmd3"));
    assert_eq!(history.older(), Some("cmd2"));
    assert_eq!(history.older(), None);
}

#[test]
fn test_history_skips_immediate_repeat() {
    let mut history: History<4, 64> = History::new();

    history.push("a");
    history.push("a");
    history.push("b");

    let stored: Vec<&str> = history.iter().collect();
    assert_eq!(stored, ["b", "a"]);
}

#[test]
fn test_history_keeps_non_adjacent_repeat() {
    let mut history: History<4, 64> = History::new();

    history.push("a");
    history.push("b");
    history.push("a");

    let stored: Vec<&str> = history.iter().collect();
    assert_eq!(stored, ["a", "b", "a"]);
}

#[test]
fn test_history_push_resets_navigation() {
    let mut history: History<4, 64> = History::new();

    history.push("one");
    history.push("two");
    assert_eq!(history.older(), Some("two"));
    assert_eq!(history.older(), Some("one"));

    history.push("three");
    assert_eq!(history.nav_pos(), None);
    assert_eq!(history.older(), Some("three"));
}

#[test]
fn test_history_reset_nav() {
    let mut history: History<4, 64> = History::new();

    history.push("one");
    assert_eq!(history.older(), Some("one"));
    history.reset_nav();
    assert_eq!(history.newer(), None);
    assert_eq!(history.older(), Some("one"));
}

#[test]
fn test_history_disabled() {
    let mut history: History<0, 64> = History::new();

    history.push("one");
    assert!(history.is_empty());
    assert!(history.newest().is_none());
    assert!(history.older().is_none());
}

#[test]
fn test_history_get_by_age() {
    let mut history: History<3, 16> = History::new();

    history.push("x");
    history.push("y");

    assert_eq!(history.get(0), Some("y"));
    assert_eq!(history.get(1), Some("x"));
    assert_eq!(history.get(2), None);
    assert_eq!(history.newest(), Some("y"));
}
