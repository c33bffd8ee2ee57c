//! The `fetch` command. Validation happens here, before any network
//! attempt; the GET itself runs in the controller.

use anyhow::Result;

use super::{Command, CommandContext, CommandEvent};
use crate::repl::models::StyleClass;

pub struct FetchCommand;

impl Command for FetchCommand {
    fn name(&self) -> &'static str {
        "fetch"
    }

    fn description(&self) -> &'static str {
        "GET a JSON API (same origin or GitHub)"
    }

    fn usage(&self) -> &'static str {
        "fetch <url>"
    }

    fn execute(&self, arg: &str, ctx: &mut CommandContext<'_>) -> Result<Vec<CommandEvent>> {
        let target = arg.trim();
        if target.is_empty() {
            ctx.session
                .log
                .print_text("usage: fetch <url>", StyleClass::Err);
            return Ok(vec![]);
        }

        match ctx.fetch_policy.check(target) {
            Ok(url) => {
                ctx.session
                    .log
                    .print_text(format!("fetching {url} ..."), StyleClass::Info);
                Ok(vec![CommandEvent::FetchRequested { url }])
            }
            Err(e) => {
                tracing::info!("fetch rejected: {e}");
                ctx.session
                    .log
                    .print_text(format!("fetch: {e}"), StyleClass::Err);
                Ok(vec![])
            }
        }
    }
}
