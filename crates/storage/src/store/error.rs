#![forbid(unsafe_code)]

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Sql(rusqlite::Error),
    InvalidInput(&'static str),
    InvalidScope {
        scope_kind: &'static str,
        scope_id: String,
    },
    NotFound {
        id: String,
    },
    OrderConflict {
        kind: &'static str,
        scope_id: String,
    },
    TransactionFailure {
        attempts: u32,
    },
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io: {err}"),
            Self::Sql(err) => write!(f, "sqlite: {err}"),
            Self::InvalidInput(message) => write!(f, "invalid input: {message}"),
            Self::InvalidScope {
                scope_kind,
                scope_id,
            } => write!(f, "unknown {scope_kind} scope: {scope_id}"),
            Self::NotFound { id } => write!(f, "unknown id: {id}"),
            Self::OrderConflict { kind, scope_id } => write!(
                f,
                "ordinal uniqueness violated (kind={kind}, scope={scope_id})"
            ),
            Self::TransactionFailure { attempts } => {
                write!(f, "transaction failed after {attempts} attempts")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sql(value)
    }
}

impl StoreError {
    /// Transient store-level failures are worth retrying; everything else is
    /// surfaced immediately.
    pub(crate) fn is_transient(&self) -> bool {
        match self {
            Self::Sql(rusqlite::Error::SqliteFailure(failure, _)) => matches!(
                failure.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            ),
            _ => false,
        }
    }
}
