use log::warn;

use crate::purge::types::{PurgeCriteria, UserId};

const WIPE_COMMAND: &str = "wipe";

/// Parsed `wipe` command, e.g. `.wipe bot commands user <@123>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WipeCommand {
    pub criteria: PurgeCriteria,
}

impl WipeCommand {
    /// Returns `None` when `text` is not a wipe command.
    ///
    /// Arguments are case-insensitive and unknown ones are skipped. `user`
    /// consumes the next token; if that is not a valid mention the command
    /// is kept without an author filter.
    pub fn parse(text: &str, prefix: &str) -> Option<WipeCommand> {
        let body = text.trim().strip_prefix(prefix)?;
        // The command name must follow the prefix directly
        if body.starts_with(char::is_whitespace) {
            return None;
        }
        let mut args = body.split_whitespace();

        let command = args.next()?;
        if !command.eq_ignore_ascii_case(WIPE_COMMAND) {
            return None;
        }

        let mut criteria = PurgeCriteria::default();
        while let Some(arg) = args.next() {
            match arg.to_lowercase().as_str() {
                "all" => criteria.include_all = true,
                "bot" => criteria.include_bot_authored = true,
                "commands" => criteria.include_command_prefixed = true,
                "user" => {
                    if let Some(mention) = args.next() {
                        match parse_mention(mention) {
                            Some(user) => criteria.target_author_id = Some(user),
                            None => warn!("Ignoring unparsable user mention: {}", mention),
                        }
                    }
                }
                _ => {}
            }
        }

        Some(WipeCommand { criteria })
    }
}

/// Extracts the user id from `<@id>` or `<@!id>`.
pub fn parse_mention(mention: &str) -> Option<UserId> {
    let inner = mention.strip_prefix("<@")?.strip_suffix('>')?;
    let id = inner.strip_prefix('!').unwrap_or(inner);
    id.parse().ok()
}
