//! Terminal showcase.
//!
//! Organized along FP/Unix boundaries:
//! - `state`, `layout`: pure data types and page geometry
//! - `update`: pure transitions
//! - `view`: pure rendering
//! - `stage`: hosts the engines on a manual clock
//! - `run`: terminal effects and the event loop

pub mod layout;
pub mod run;
pub mod stage;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
