pub mod icons;
pub mod output;
pub mod table;

pub use icons::Icons;
pub use output::{error, header, info, paint, section, success, summary_row, warn, Tone};
pub use table::{records_table, stats_table, TableBuilder};
