pub mod adaptors;
pub mod auth;
pub mod jobs;
pub mod policy;
pub mod responses;
