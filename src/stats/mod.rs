//! KPI counters and chart aggregations over a filtered region set.

mod aggregate;
mod kpi;

pub use aggregate::*;
pub use kpi::*;
