// ABOUTME: Registers every primitive and IO primitive into a fresh environment

use crate::env::Environment;
use std::rc::Rc;

pub mod arithmetic;
pub mod coerce;
pub mod comparison;
pub mod equality;
pub mod io;
pub mod pairs;
pub mod types;

/// Populates `env` with the full primitive library — arithmetic, comparison,
/// pair surgery, type predicates, equality, and the IO primitives.
pub fn register_builtins(env: &Rc<Environment>) {
    arithmetic::register(env);
    comparison::register(env);
    pairs::register(env);
    types::register(env);
    equality::register(env);
    io::register(env);
}
