//! SkillTree daemon library - exposes modules for testing.

pub mod catalog;
pub mod config;
pub mod routes;
pub mod server;
