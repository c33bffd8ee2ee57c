//! Steps for the boot sequence

use crate::common::world::{parse_key, TermfolioWorld};
use cucumber::{then, when};

#[when("the boot sequence runs")]
async fn when_boot(world: &mut TermfolioWorld) {
    world.boot().await;
}

#[when(expr = "the boot sequence runs while I press {word}")]
async fn when_boot_interrupted(world: &mut TermfolioWorld, key: String) {
    let (code, modifiers) = parse_key(&key);
    world.controller().event_stream_mut().push_key(code, modifiers);
    world.boot().await;
}

#[then("every boot line should be printed in full")]
async fn then_all_boot_lines(world: &mut TermfolioWorld) {
    let expected = world.session().portfolio.boot_lines.clone();
    assert_eq!(world.output_lines(), expected);
}

#[then(expr = "only the first {int} boot line(s) should be printed in full")]
async fn then_some_boot_lines(world: &mut TermfolioWorld, count: usize) {
    let expected: Vec<String> = world
        .session()
        .portfolio
        .boot_lines
        .iter()
        .take(count)
        .cloned()
        .collect();
    assert_eq!(world.output_lines(), expected);
}
