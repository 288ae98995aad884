//! Tournament standings for single-elimination brackets
//!
//! This crate wraps the bracket core with the pieces around it:
//! - Loading and saving standings through a [`StandingsStore`]
//! - Edit sessions that validate before building and before saving
//! - Drawing seeds for a fresh field
//! - TOML configuration for the CLI
//!
//! # Usage
//!
//! ```bash
//! # Show the bracket of tournament 1
//! cargo run -p tournament -- show 1
//!
//! # H3 (id 3) wins the first-round match in the upper quarter
//! cargo run -p tournament -- decide 1 UL 3
//! ```

mod config;
mod error;
mod seeding;
mod session;
mod store;

pub use config::*;
pub use error::*;
pub use seeding::*;
pub use session::*;
pub use store::*;
