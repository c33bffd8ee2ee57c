//! Steps for driving the terminal and checking what it printed

use crate::common::world::{parse_key, parse_style, TermfolioWorld};
use cucumber::{given, then, when};
use termfolio::models::Focus;
use tracing::debug;

#[given("a fresh terminal")]
async fn given_fresh_terminal(world: &mut TermfolioWorld) {
    world.start().expect("Failed to start terminal");
}

#[given(expr = "a terminal {int} columns wide and {int} rows high")]
async fn given_sized_terminal(world: &mut TermfolioWorld, width: u16, height: u16) {
    world.terminal_size = (width, height);
    world.start().expect("Failed to start terminal");
}

#[when("I restart the terminal")]
async fn when_restart(world: &mut TermfolioWorld) {
    world.start().expect("Failed to restart terminal");
}

#[when(expr = "I submit {string}")]
async fn when_submit(world: &mut TermfolioWorld, line: String) {
    debug!("Submitting {line:?}");
    world.submit(&line).await;
}

#[when(expr = "I submit {string} {int} times")]
async fn when_submit_repeatedly(world: &mut TermfolioWorld, line: String, times: usize) {
    for _ in 0..times {
        world.submit(&line).await;
    }
}

#[when(expr = "I submit {int} numbered lines starting with {string}")]
async fn when_submit_numbered(world: &mut TermfolioWorld, count: usize, prefix: String) {
    for i in 1..=count {
        world.submit(&format!("{prefix}{i}")).await;
    }
}

#[when(expr = "I type {string}")]
async fn when_type(world: &mut TermfolioWorld, text: String) {
    for ch in text.chars() {
        world
            .press(crossterm::event::KeyCode::Char(ch), crossterm::event::KeyModifiers::NONE)
            .await;
    }
}

#[when(expr = "I press {word}")]
async fn when_press(world: &mut TermfolioWorld, key: String) {
    let (code, modifiers) = parse_key(&key);
    world.press(code, modifiers).await;
}

#[then(expr = "the output should contain {string}")]
async fn then_output_contains(world: &mut TermfolioWorld, text: String) {
    let lines = world.output_lines();
    assert!(
        lines.iter().any(|line| line.contains(&text)),
        "'{text}' not found in output: {lines:#?}"
    );
}

#[then(expr = "the output should not contain {string}")]
async fn then_output_not_contains(world: &mut TermfolioWorld, text: String) {
    let lines = world.output_lines();
    assert!(
        !lines.iter().any(|line| line.contains(&text)),
        "'{text}' unexpectedly found in output"
    );
}

#[then(expr = "the output should have {int} entries")]
async fn then_output_count(world: &mut TermfolioWorld, count: usize) {
    assert_eq!(world.output_lines().len(), count);
}

#[then(expr = "line {int} of the output should be {string}")]
async fn then_nth_line(world: &mut TermfolioWorld, n: usize, text: String) {
    let lines = world.output_lines();
    assert_eq!(lines.get(n - 1), Some(&text), "output was {lines:#?}");
}

#[then(expr = "the last output line should be {string} styled {word}")]
async fn then_last_line_styled(world: &mut TermfolioWorld, text: String, style: String) {
    let (actual_style, actual) = world.last_entry();
    assert_eq!(actual, text);
    assert_eq!(actual_style, parse_style(&style));
}

#[then(expr = "the last output line should contain {string}")]
async fn then_last_line_contains(world: &mut TermfolioWorld, text: String) {
    let (_, actual) = world.last_entry();
    assert!(actual.contains(&text), "last line was '{actual}'");
}

#[then(expr = "the output should have at most {int} entries")]
async fn then_output_bounded(world: &mut TermfolioWorld, bound: usize) {
    let len = world.output_lines().len();
    assert!(len <= bound, "output has {len} entries");
}

#[then(expr = "the first output line should be {string}")]
async fn then_first_line(world: &mut TermfolioWorld, text: String) {
    let lines = world.output_lines();
    assert_eq!(lines.first(), Some(&text));
}

#[then("the output should be empty")]
async fn then_output_empty(world: &mut TermfolioWorld) {
    assert!(world.output_lines().is_empty());
}

#[then(expr = "the input line should be {string}")]
async fn then_input_line(world: &mut TermfolioWorld, text: String) {
    assert_eq!(world.controller().input().text(), text);
}

#[then(expr = "the screen should show {string}")]
async fn then_screen_shows(world: &mut TermfolioWorld, text: String) {
    assert!(
        world.screen_contains(&text),
        "'{text}' not on screen: {:?}",
        world.screen.get_buffer_string()
    );
}

#[then("the output should be pinned to the bottom")]
async fn then_pinned(world: &mut TermfolioWorld) {
    assert!(world.session().log.viewport().pinned);
}

#[then("the output should not be pinned")]
async fn then_not_pinned(world: &mut TermfolioWorld) {
    assert!(!world.session().log.viewport().pinned);
}

#[then(expr = "the {word} pane should have focus")]
async fn then_focus(world: &mut TermfolioWorld, pane: String) {
    let expected = match pane.as_str() {
        "input" => Focus::Input,
        "output" => Focus::Output,
        other => panic!("Unknown pane '{other}'"),
    };
    assert_eq!(world.controller().focus(), expected);
}

#[then(expr = "the viewport should start at the {string} section")]
async fn then_viewport_at_anchor(world: &mut TermfolioWorld, anchor: String) {
    let session = world.session();
    let mut row = 0;
    let mut anchor_row = None;
    for entry in session.log.entries() {
        if entry.anchor.as_deref() == Some(anchor.as_str()) {
            anchor_row = Some(row);
        }
        row += entry.content.row_count();
    }
    assert_eq!(Some(session.log.viewport().top), anchor_row);
}

#[then("the terminal should quit")]
async fn then_quit(world: &mut TermfolioWorld) {
    assert!(world.controller().should_quit());
}

#[then("the terminal should not quit")]
async fn then_not_quit(world: &mut TermfolioWorld) {
    assert!(!world.controller().should_quit());
}
