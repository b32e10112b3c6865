//! CLI functionality for the tessera tool
//!
//! This module contains all CLI-related functionality including:
//! - Column type sniffing
//! - Value comparison
//! - Type tag metadata
//! - Output formatting

pub mod compare;
pub mod info;
pub mod output;
pub mod sniff;
