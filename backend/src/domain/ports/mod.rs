//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports ([`DiaryCommand`], [`DiaryQuery`], [`MemberAuthenticator`])
//! are called by inbound adapters. Driven ports ([`DiaryRepository`],
//! [`MemberRepository`], [`MemberTokenCodec`]) are implemented by outbound
//! adapters and report strongly typed errors.

mod macros;
pub(crate) use macros::define_port_error;

mod diary_command;
mod diary_query;
mod diary_repository;
mod member_authenticator;
mod member_repository;
mod member_token_codec;

#[cfg(test)]
pub use diary_command::MockDiaryCommand;
pub use diary_command::{DiaryCommand, UpdateDiaryCommand, WriteDiaryCommand};
#[cfg(test)]
pub use diary_query::MockDiaryQuery;
pub use diary_query::{DiaryPeriod, DiaryQuery, MAX_PERIOD_DAYS};
#[cfg(test)]
pub use diary_repository::MockDiaryRepository;
pub use diary_repository::{DiaryRepository, DiaryRepositoryError};
#[cfg(test)]
pub use member_authenticator::MockMemberAuthenticator;
pub use member_authenticator::MemberAuthenticator;
#[cfg(test)]
pub use member_repository::MockMemberRepository;
pub use member_repository::{MemberRepository, MemberRepositoryError};
#[cfg(test)]
pub use member_token_codec::MockMemberTokenCodec;
pub use member_token_codec::{MemberTokenCodec, TokenClaims, TokenError};
