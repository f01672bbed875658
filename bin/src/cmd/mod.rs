//! CLI subcommand modules.
//!
//! This module contains the implementations for all ronda CLI subcommands.

pub(crate) mod overview;
pub(crate) mod ratios;
pub(crate) mod report;
pub(crate) mod scenarios;
pub(crate) mod statements;
pub(crate) mod value;
