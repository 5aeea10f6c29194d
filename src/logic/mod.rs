pub mod pinger;
pub mod trigger;

#[cfg(test)]
mod pinger_tests;

pub use pinger::checker_task;
pub use trigger::CheckTrigger;
