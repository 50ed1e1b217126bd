/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 * - NotFound は「対象レコードが存在しない」という store 側の構造化シグナル
 */
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("record does not exist")]
    NotFound,
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("db error")]
    Db(#[source] sqlx::Error),
}

impl RepoError {
    pub fn from_sqlx(e: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = e {
            return RepoError::NotFound;
        }
        // 23502: not_null_violation, 22003: numeric_value_out_of_range
        if let sqlx::Error::Database(dbe) = &e
            && matches!(dbe.code().as_deref(), Some("23502") | Some("22003"))
        {
            return RepoError::InvalidData(dbe.message().to_string());
        }
        RepoError::Db(e)
    }
}

impl From<sqlx::Error> for RepoError {
    fn from(e: sqlx::Error) -> Self {
        RepoError::from_sqlx(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_a_not_found_signal() {
        assert!(matches!(
            RepoError::from(sqlx::Error::RowNotFound),
            RepoError::NotFound
        ));
    }

    #[test]
    fn other_sqlx_errors_stay_opaque() {
        assert!(matches!(
            RepoError::from(sqlx::Error::PoolTimedOut),
            RepoError::Db(_)
        ));
    }
}
