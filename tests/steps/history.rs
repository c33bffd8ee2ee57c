//! Steps for command history

use crate::common::world::TermfolioWorld;
use cucumber::{given, then};
use termfolio::config::HISTORY_KEY;

#[given(expr = "the store already holds the history {string}")]
async fn given_stored_history(world: &mut TermfolioWorld, json: String) {
    let mut body = serde_json::Map::new();
    body.insert(HISTORY_KEY.to_string(), serde_json::Value::String(json));
    std::fs::write(world.store_path(), serde_json::Value::Object(body).to_string())
        .expect("Failed to seed store");
    world.start().expect("Failed to start terminal");
}

#[given("the store file is corrupt")]
async fn given_corrupt_store(world: &mut TermfolioWorld) {
    std::fs::write(world.store_path(), "{ not json").expect("Failed to seed store");
    world.start().expect("Failed to start terminal");
}

#[then(expr = "the history should have {int} entries")]
async fn then_history_len(world: &mut TermfolioWorld, len: usize) {
    assert_eq!(world.session().history.len(), len);
}

#[then(expr = "the oldest history entry should be {string}")]
async fn then_oldest(world: &mut TermfolioWorld, line: String) {
    assert_eq!(world.session().history.entries().next(), Some(line.as_str()));
}

#[then(expr = "the newest history entry should be {string}")]
async fn then_newest(world: &mut TermfolioWorld, line: String) {
    assert_eq!(world.session().history.entries().last(), Some(line.as_str()));
}

#[then("the history cursor should be past the end")]
async fn then_cursor_at_end(world: &mut TermfolioWorld) {
    let history = &world.session().history;
    assert_eq!(history.cursor(), history.len());
}

#[then(expr = "the store file should hold {int} history entries")]
async fn then_store_history(world: &mut TermfolioWorld, len: usize) {
    let text = std::fs::read_to_string(world.store_path()).expect("store file missing");
    let map: serde_json::Value = serde_json::from_str(&text).expect("store is not JSON");
    let history: Vec<String> = serde_json::from_str(
        map[HISTORY_KEY].as_str().expect("history key missing"),
    )
    .expect("history is not a JSON list");
    assert_eq!(history.len(), len);
}
