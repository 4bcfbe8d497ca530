mod cli;
mod report;

pub use cli::{print_summary, vulnerability_table};
pub use report::{render_report, report_path, write_report};
