//! # Domain Module
//!
//! Business logic for splitting group expenses.
//!
//! ## Module Organization
//!
//! - **split_calculator**: split validation and per-participant share computation
//! - **contribution_input**: parsing of the per-participant form fields
//! - **balance_formatter**: signed balance and share formatting
//! - **split_session**: the editing-session state machine behind the split form
//! - **expense_split_service**: sessions wired to the roster and record store
//! - **commands**: command and result types used by the services
//! - **models**: contribution map, split results and domain errors
//!
//! ## Business Rules
//!
//! - Equal splits are always valid; the form still needs one selected participant
//! - Percentages of the selected participants must add up to 100 (±0.01)
//! - Fixed amounts must be greater than 0 for every selected participant
//! - Fixed amounts are not forced to add up to the expense total
//! - Contributions survive mode switches and deselection
//! - Committing an expense again replaces its stored split

pub mod balance_formatter;
pub mod commands;
pub mod contribution_input;
pub mod expense_split_service;
pub mod models;
pub mod split_calculator;
pub mod split_session;

pub use balance_formatter::*;
pub use commands::*;
pub use contribution_input::*;
pub use expense_split_service::*;
pub use split_calculator::*;
pub use split_session::*;
