pub mod assembler;
pub mod formatter;

pub use assembler::{assemble_report, GeneratedReport};
pub use formatter::format_summary_header;
