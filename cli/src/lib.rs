// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban CLI - headless text front end for the rules engine

pub mod config;
pub mod render;
pub mod session;
