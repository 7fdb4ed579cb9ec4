pub mod formatter;

pub use formatter::{
    format_feature_table, format_result, format_score_summary, should_use_colors,
};
