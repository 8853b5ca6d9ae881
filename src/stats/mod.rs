//! Basketball metrics explorer
//!
//! Loads a season of box-score stats, derives efficiency ratios and prepares
//! filtered tables and scatter series for display.

pub mod dataset;
pub mod derive;
pub mod labels;
pub mod present;

pub use dataset::{load_csv, PlayerStatRow};
pub use labels::{team_display_name, Metric};
pub use present::{ranked_table, scatter_points, Selection};
