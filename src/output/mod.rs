pub mod formatter;

pub use formatter::{
    format_edit_outcome, format_score_card, format_score_json, format_score_tsv,
    format_timing_table, score_bar, should_use_colors,
};
