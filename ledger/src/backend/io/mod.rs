//! # IO Module
//!
//! Translates domain models into the plain DTOs of the `shared` crate that a
//! user interface binds to. No rendering happens here.

pub mod mappers;
