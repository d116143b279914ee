pub mod formatter;

pub use formatter::{
    format_amount, format_breakdown, format_history, format_record_header, format_tsv,
    friendly_message, month_name, should_use_colors, short_month_name,
};
