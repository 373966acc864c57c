//! Fixed member directory.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::ports::{MemberRepository, MemberRepositoryError};
use crate::domain::{Member, MemberId};

/// In-memory implementation of the `MemberRepository` port.
#[derive(Debug, Default, Clone)]
pub struct InMemoryMemberRepository {
    members: HashMap<MemberId, Member>,
}

impl InMemoryMemberRepository {
    /// Directory holding `members`; later duplicates replace earlier ones.
    pub fn new(members: impl IntoIterator<Item = Member>) -> Self {
        Self {
            members: members.into_iter().map(|m| (m.id(), m)).collect(),
        }
    }
}

#[async_trait]
impl MemberRepository for InMemoryMemberRepository {
    async fn find_by_id(&self, id: MemberId) -> Result<Option<Member>, MemberRepositoryError> {
        Ok(self.members.get(&id).cloned())
    }
}
