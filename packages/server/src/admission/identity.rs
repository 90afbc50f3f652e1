use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Capability snapshot taken when the requester authenticated.
///
/// Issued by the login service and carried in the bearer token, so it can be
/// older than the database state; admission treats it as read-only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct SessionCapabilities {
    /// Site administrator.
    pub admin: bool,
    /// Problem set editor; may submit to hidden problems.
    pub editor: bool,
    /// Site-wide contest manager.
    pub contest_manager: bool,
    /// Problems this user authored.
    pub problem_maker: BTreeSet<i32>,
    /// Contests this user authored.
    pub contest_maker: BTreeSet<i32>,
    /// Contests this user was granted management of.
    pub contest_managed: BTreeSet<i32>,
    /// Topics this user authored.
    pub topic_maker: BTreeSet<i32>,
    /// Topics this user was granted management of.
    pub topic_managed: BTreeSet<i32>,
}

impl SessionCapabilities {
    /// Whether a hidden problem is still open to this requester.
    pub fn can_submit_private_problem(&self, problem_id: u32) -> bool {
        self.admin || self.editor || contains(&self.problem_maker, problem_id)
    }

    /// Whether the contest visibility checks can be skipped entirely.
    pub fn bypasses_contest(&self, contest_id: u32) -> bool {
        self.admin
            || self.contest_manager
            || contains(&self.contest_maker, contest_id)
            || contains(&self.contest_managed, contest_id)
    }

    /// Whether the topic visibility checks can be skipped entirely.
    ///
    /// Only site administrators qualify. Topic makers and managers go through
    /// the same visibility checks as visitors.
    pub fn bypasses_topic(&self, _topic_id: u32) -> bool {
        self.admin
    }
}

fn contains(set: &BTreeSet<i32>, id: u32) -> bool {
    i32::try_from(id).is_ok_and(|id| set.contains(&id))
}
