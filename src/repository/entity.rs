use chrono::{DateTime, Utc};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::sqlite::{Sqlite, SqliteArguments, SqliteRow};
use sqlx::FromRow;

/// A table-backed record with an integer identity and a soft-delete tombstone.
pub trait Entity: for<'r> FromRow<'r, SqliteRow> + Send + Unpin + 'static {
    /// Table name.
    const TABLE: &'static str;
    /// Human-readable name used in error messages.
    const NAME: &'static str;

    fn id(&self) -> i64;
    fn is_deleted(&self) -> bool;
}

/// Whether deletes leave a tombstone or remove the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteMode {
    Soft,
    Hard,
}

impl DeleteMode {
    /// Soft deletes are used only while the recycle bin is enabled.
    #[must_use]
    pub const fn for_recycle_bin(enabled: bool) -> Self {
        if enabled {
            Self::Soft
        } else {
            Self::Hard
        }
    }
}

/// A dynamically typed bind parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlArg {
    Int(i64),
    Real(f64),
    Text(String),
    Bool(bool),
    Time(DateTime<Utc>),
    Null,
}

impl From<i64> for SqlArg {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for SqlArg {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<bool> for SqlArg {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for SqlArg {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for SqlArg {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<DateTime<Utc>> for SqlArg {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Time(v)
    }
}

impl<T: Into<SqlArg>> From<Option<T>> for SqlArg {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Bind a list of [`SqlArg`]s onto any sqlx query builder, in order.
pub trait BindArgs: Sized {
    #[must_use]
    fn bind_arg(self, arg: &SqlArg) -> Self;

    #[must_use]
    fn bind_args(self, args: &[SqlArg]) -> Self {
        args.iter().fold(self, Self::bind_arg)
    }
}

macro_rules! bind_one {
    ($query:expr, $arg:expr) => {
        match $arg {
            SqlArg::Int(v) => $query.bind(*v),
            SqlArg::Real(v) => $query.bind(*v),
            SqlArg::Text(v) => $query.bind(v.clone()),
            SqlArg::Bool(v) => $query.bind(*v),
            SqlArg::Time(v) => $query.bind(*v),
            SqlArg::Null => $query.bind(Option::<i64>::None),
        }
    };
}

impl<'q> BindArgs for Query<'q, Sqlite, SqliteArguments<'q>> {
    fn bind_arg(self, arg: &SqlArg) -> Self {
        bind_one!(self, arg)
    }
}

impl<'q, O> BindArgs for QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    fn bind_arg(self, arg: &SqlArg) -> Self {
        bind_one!(self, arg)
    }
}

impl<'q, O> BindArgs for QueryScalar<'q, Sqlite, O, SqliteArguments<'q>> {
    fn bind_arg(self, arg: &SqlArg) -> Self {
        bind_one!(self, arg)
    }
}
