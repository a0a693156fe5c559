//! This module acts as a central hub for all database-related logic.
//! It declares the specialized submodules so they can be accessed from
//! elsewhere in the application via their full path, e.g.
//! `database::dreams::get_dreams`.

pub mod achievements;
pub mod dreams;
pub mod init;
pub mod lessons;
pub mod models;
pub mod profile;
