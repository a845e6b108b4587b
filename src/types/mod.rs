//! Tipos compartilhados do numflags.

pub mod config;
pub mod errors;
pub mod number;
pub mod requests;
pub mod responses;
