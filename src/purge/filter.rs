use crate::purge::types::{Message, PurgeCriteria};

pub const DEFAULT_TRIGGER_PREFIX: &str = ".";

/// Decides which fetched messages a purge removes.
///
/// Checks run in a fixed order:
/// 1. a targeted author that does not match excludes the message;
/// 2. `include_bot_authored` excludes messages not written by a bot;
/// 3. `include_command_prefixed` includes messages starting with the
///    trigger prefix, whatever `include_all` says;
/// 4. otherwise the message is included only with `include_all`.
#[derive(Debug, Clone)]
pub struct MessageFilter {
    trigger_prefix: String,
}

impl Default for MessageFilter {
    fn default() -> Self {
        Self::new(DEFAULT_TRIGGER_PREFIX)
    }
}

impl MessageFilter {
    pub fn new(trigger_prefix: impl Into<String>) -> Self {
        Self {
            trigger_prefix: trigger_prefix.into(),
        }
    }

    pub fn matches(&self, message: &Message, criteria: &PurgeCriteria) -> bool {
        if let Some(author) = criteria.target_author_id {
            if message.author_id != author {
                return false;
            }
        }

        if criteria.include_bot_authored && !message.is_bot_author {
            return false;
        }

        if criteria.include_command_prefixed && message.text_content.starts_with(&self.trigger_prefix) {
            return true;
        }

        criteria.include_all
    }

    /// Keeps the messages matching `criteria`, in their original order.
    pub fn filter(&self, messages: Vec<Message>, criteria: &PurgeCriteria) -> Vec<Message> {
        messages
            .into_iter()
            .filter(|message| self.matches(message, criteria))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::purge::types::UserId;

    fn history() -> Vec<Message> {
        vec![
            Message::new(1, 10, true, "hi"),
            Message::new(2, 20, false, ".wipe all"),
            Message::new(3, 10, true, ".ping"),
            Message::new(4, 20, false, "hello"),
        ]
    }

    fn ids(messages: &[Message]) -> Vec<u64> {
        messages.iter().map(|m| m.id.get()).collect()
    }

    #[test]
    fn command_prefixed_ignores_bot_and_all_flags() {
        let filter = MessageFilter::default();
        let kept = filter.filter(history(), &PurgeCriteria::default().command_prefixed());

        assert_eq!(ids(&kept), vec![2, 3]);
    }

    #[test]
    fn author_mismatch_wins_over_command_prefix() {
        let filter = MessageFilter::default();
        let criteria = PurgeCriteria::all().command_prefixed().by_author(UserId(10));

        assert_eq!(ids(&filter.filter(history(), &criteria)), vec![1, 3]);
    }

    #[test]
    fn bot_gate_excludes_human_commands() {
        let filter = MessageFilter::default();
        let criteria = PurgeCriteria::default().bot_authored().command_prefixed();

        assert_eq!(ids(&filter.filter(history(), &criteria)), vec![3]);
    }

    #[test]
    fn author_alone_selects_nothing() {
        let filter = MessageFilter::default();
        let criteria = PurgeCriteria::default().by_author(UserId(20));

        assert!(filter.filter(history(), &criteria).is_empty());
        assert_eq!(ids(&filter.filter(history(), &criteria.command_prefixed())), vec![2]);
    }

    #[test]
    fn empty_criteria_selects_nothing() {
        assert!(MessageFilter::default().filter(history(), &PurgeCriteria::default()).is_empty());
    }

    #[test]
    fn custom_prefix() {
        let filter = MessageFilter::new("!");
        let mut messages = history();
        messages.push(Message::new(5, 20, false, "!ban"));

        let kept = filter.filter(messages, &PurgeCriteria::default().command_prefixed());
        assert_eq!(ids(&kept), vec![5]);
    }
}
