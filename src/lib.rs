#![forbid(unsafe_code)]

#[macro_use]
extern crate bitflags;

#[macro_use]
extern crate log;

extern crate simplelog;

//Application Imports/Exports
pub mod config;
pub mod constants;
pub mod engine;
pub mod harness;
pub mod sqleval;
