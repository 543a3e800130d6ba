//! Main module for classification marking functionality

pub mod access;
pub mod compare;
pub mod definition;
pub mod error;
pub mod formatting;
pub mod lexing;
pub mod loader;
pub mod merge;
pub mod parsing;
pub mod parts;
pub mod resolver;
pub mod rules;
pub mod testing;
