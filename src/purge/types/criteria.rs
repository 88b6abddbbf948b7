use super::ids::UserId;

/// Selects which messages of a channel a purge removes.
///
/// Built once from the user's command and passed by value through the
/// pipeline. See [`MessageFilter`](crate::purge::filter::MessageFilter)
/// for how the flags combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgeCriteria {
    pub include_all: bool,
    pub include_bot_authored: bool,
    pub include_command_prefixed: bool,
    pub target_author_id: Option<UserId>,
}

impl PurgeCriteria {
    pub fn all() -> Self {
        Self {
            include_all: true,
            ..Self::default()
        }
    }

    pub fn bot_authored(mut self) -> Self {
        self.include_bot_authored = true;
        self
    }

    pub fn command_prefixed(mut self) -> Self {
        self.include_command_prefixed = true;
        self
    }

    pub fn by_author(mut self, author: UserId) -> Self {
        self.target_author_id = Some(author);
        self
    }

    /// No flag set and no author targeted
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
