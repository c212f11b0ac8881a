//! # IO Module
//!
//! Translation between the domain types and the `shared` DTOs that the UI and
//! persistence collaborators exchange with this crate.

pub mod mappers;
