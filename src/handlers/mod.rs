//! Request Handlers

pub mod docs;
pub mod home;
