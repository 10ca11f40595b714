//! SkillFit — compares the skills in a resume against a job description,
//! reports the gap and builds a learning roadmap for each missing skill.
//!
//! The analysis core (`skills`, `analysis`) is plain library code behind the
//! `TextGenerator` seam; `routes` is the thin HTTP layer the binary serves.

pub mod analysis;
pub mod config;
pub mod document;
pub mod errors;
pub mod llm_client;
pub mod report;
pub mod routes;
pub mod skills;
pub mod state;
