//! # typesense-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, FeedService, PostService, ProfileService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, ServiceSettings, TypographyService,
};
