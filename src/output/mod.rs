pub mod formatter;

pub use formatter::{
    format_json, format_result_detail, format_results_table, format_score, format_tsv,
    format_verdict, should_use_colors, CheckedSprint,
};
