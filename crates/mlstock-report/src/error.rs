use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read workbook {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: calamine::XlsxError,
    },

    #[error("failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("invalid report period {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("day {day} is outside a {days_in_month}-day month")]
    InvalidDay { day: u32, days_in_month: u32 },

    #[error("sheet {sheet} in {path} is malformed: {reason}")]
    MalformedSheet {
        path: String,
        sheet: String,
        reason: String,
    },
}
