//! Domain layer: aligner and schedule value types, calendar arithmetic and
//! the ports the application layer talks to.

pub mod aligner;
pub mod calendar;
pub mod ports;
pub mod schedule;
