//! Command and event dispatch core.

pub mod action;
pub mod args;
pub mod descriptor;
pub mod dispatcher;
pub mod event;
pub mod permission;
pub mod policy;
pub mod registry;
pub mod reply;
pub mod suggest;
pub mod throttle;

#[cfg(test)]
mod test;
