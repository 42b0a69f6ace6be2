//! Session credential lifecycle: who may renew, when, and what happens when
//! renewal fails.

pub mod gate;
pub mod policy;
pub mod ports;
pub mod renewal;
