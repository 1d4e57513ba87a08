//! Bundled schema and seed script

/// Idempotent schema plus demo fleet, executed by the bootstrap service.
pub const INIT_SCRIPT: &str = include_str!("../../sql/script.sql");
