pub mod common;
pub mod counter;
pub mod input;
pub mod tables;

pub mod report;

pub mod classify;
