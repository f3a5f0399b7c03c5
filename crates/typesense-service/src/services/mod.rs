//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod auth;
pub mod context;
pub mod error;
pub mod feed;
pub mod post;
pub mod profile;
pub mod reaction;
pub mod typography;
mod users;

// Re-export all services for convenience
pub use auth::AuthService;
pub use context::{KeyLock, ServiceContext, ServiceContextBuilder, ServiceSettings};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use post::PostService;
pub use profile::ProfileService;
pub use reaction::ReactionService;
pub use typography::TypographyService;
