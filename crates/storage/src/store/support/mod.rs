#![forbid(unsafe_code)]

mod counters;
mod events;
mod kinds;
mod rows;
mod schema;
mod scope;
mod time;

pub(super) use counters::*;
pub(super) use events::*;
pub(super) use kinds::*;
pub(super) use rows::*;
pub(super) use schema::install_schema;
pub(super) use scope::*;
pub(super) use time::now_ms;
