//! Turns the raw strings scraped from an online bookstore's product page into
//! a normalized book record and the deterministic file names used to archive
//! the book and its cover.

pub mod assembler;
pub mod cli;
pub mod error;
pub mod json_output;
pub mod ordinal;
pub mod parser;
pub mod publisher;
pub mod publisher_block;
pub mod record;
pub mod scanner;
pub mod scraped;
pub mod storage;
