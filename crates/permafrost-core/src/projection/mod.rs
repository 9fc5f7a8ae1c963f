//! Projections from (dataset, selection) to declarative figure specs.
//!
//! Every projection is recomputed from the full dataset on each call and
//! holds no state, so calling one twice with the same inputs yields the same
//! spec.

pub mod chart;
pub mod map;
pub mod table;

pub use chart::{project_hazard_chart, ChartPoint, ChartSeries, ChartSpec, ChartVariant, PointText};
pub use map::{project_map, MapMarker, MapSpec};
pub use table::{project_table, TableColumn, TableRow, TableSpec};
