pub mod chart;
pub mod report;
pub mod table;

pub use chart::LineChart;
pub use report::user_details;
pub use table::{TableSummary, TweetRow, TweetTable};
