use thiserror::Error;

/// Fatal load errors. Any of these aborts the run.
///
/// Resolution misses are never errors; they surface as `None` fields.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive unreadable: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Required archive member missing: {0}")]
    MissingMember(String),

    #[error("Malformed CSV in {member}: {source}")]
    Csv {
        member: String,
        #[source]
        source: csv::Error,
    },
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
