//! Steps for theme and sound preferences

use crate::common::world::TermfolioWorld;
use cucumber::then;
use termfolio::config::THEME_KEY;
use termfolio::models::{Theme, ThemePreference};

fn stored_value(world: &TermfolioWorld, key: &str) -> Option<String> {
    let text = std::fs::read_to_string(world.store_path()).ok()?;
    let map: serde_json::Value = serde_json::from_str(&text).ok()?;
    map.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

#[then(expr = "the stored theme should be {string}")]
async fn then_stored_theme(world: &mut TermfolioWorld, theme: String) {
    assert_eq!(stored_value(world, THEME_KEY), Some(theme));
}

#[then("no theme should be stored")]
async fn then_no_theme(world: &mut TermfolioWorld) {
    assert_eq!(stored_value(world, THEME_KEY), None);
}

#[then(expr = "the theme preference should be {word}")]
async fn then_preference(world: &mut TermfolioWorld, preference: String) {
    let expected: ThemePreference = preference.parse().expect("bad preference");
    assert_eq!(world.session().theme.preference(), expected);
}

#[then(expr = "the resolved theme should be {word}")]
async fn then_resolved(world: &mut TermfolioWorld, theme: String) {
    let expected = match theme.as_str() {
        "light" => Theme::Light,
        "dark" => Theme::Dark,
        other => panic!("Unknown theme '{other}'"),
    };
    assert_eq!(world.session().theme.resolved(), expected);
}

#[then(expr = "sound should be {word}")]
async fn then_sound(world: &mut TermfolioWorld, state: String) {
    let muted = world.session().sound.is_muted();
    match state.as_str() {
        "muted" => assert!(muted),
        "on" => assert!(!muted),
        other => panic!("Unknown sound state '{other}'"),
    }
}
