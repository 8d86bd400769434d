//! Scheelite Calendar — schedule storage and range-query aggregation over
//! an embedded ordered key-value store.
//!
//! Three event categories live in three stores:
//! - [`SingleEventDb`]: one-off events keyed by their start instant, with
//!   same-minute collisions disambiguated one millisecond at a time
//! - [`RecurringEventDb`]: weekly-recurring, date-range-bounded
//!   definitions keyed by the definition's start instant
//! - [`UnboundedEventDb`]: weekly-recurring-forever and all-day
//!   definitions keyed by opaque UUIDs
//!
//! [`Schedules`] fans a query window out to all three concurrently,
//! expands recurring/unbounded definitions into concrete occurrences
//! ([`expand`]), and unions everything into one deduplicated set of
//! [`MappedSchedule`]s.
//!
//! The stores are generic over any
//! [`AsyncStore`](scheelite_core::AsyncStore); use
//! `scheelite_core::MemoryStore` for tests and `scheelite_rocks` for a
//! persistent backend.

mod codec;
pub mod error;
pub mod event;
pub mod expand;
pub mod mask;
mod recurring;
mod schedules;
mod single;
mod unbounded;

pub use error::{Result, ScheduleError};
pub use event::{
    AllDayEvent, MappedSchedule, RecurringEvent, SingleEvent, Source, SystemEvent, UnboundedEvent,
};
pub use expand::{expand_all_day, expand_recurring, expand_system};
pub use mask::WeekdayMask;
pub use recurring::RecurringEventDb;
pub use schedules::Schedules;
pub use single::SingleEventDb;
pub use unbounded::UnboundedEventDb;
