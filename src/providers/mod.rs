//! Source provider implementations.
//!
//! Each module provides one provider family implementing
//! [`crate::provider::SourceProvider`]. The registry decides which of
//! these apply to a given query type.

pub mod breach;
pub mod court;
pub mod github;
pub mod gravatar;
pub mod manual;
pub mod people_data;
pub mod phone_api;
pub mod phone_parse;
pub mod scanner;
pub mod social;

pub use breach::BreachProbe;
pub use court::CourtRecordProbe;
pub use github::GithubProbe;
pub use gravatar::GravatarProbe;
pub use manual::ManualLinksProbe;
pub use people_data::PeopleDataProbe;
pub use phone_api::{NumverifyProbe, VeriphoneProbe};
pub use phone_parse::PhoneStructureProbe;
pub use scanner::ScannerProbe;
pub use social::{Platform, SocialProbe};
