//! Shared HTTP adapter state.
//!
//! Handlers receive this via `web::Data` so they depend only on driving
//! ports and stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{DiaryCommand, DiaryQuery, MemberAuthenticator};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub diaries: Arc<dyn DiaryCommand>,
    pub diaries_query: Arc<dyn DiaryQuery>,
    pub authenticator: Arc<dyn MemberAuthenticator>,
}

impl HttpState {
    pub fn new(
        diaries: Arc<dyn DiaryCommand>,
        diaries_query: Arc<dyn DiaryQuery>,
        authenticator: Arc<dyn MemberAuthenticator>,
    ) -> Self {
        Self {
            diaries,
            diaries_query,
            authenticator,
        }
    }
}
