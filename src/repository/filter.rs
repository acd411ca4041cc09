use super::SqlArg;

/// A WHERE fragment with its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub clause: String,
    pub args: Vec<SqlArg>,
}

impl Filter {
    pub fn raw(clause: impl Into<String>, args: Vec<SqlArg>) -> Self {
        Self {
            clause: clause.into(),
            args,
        }
    }

    pub fn eq(column: &str, value: impl Into<SqlArg>) -> Self {
        Self::raw(format!("{column} = ?"), vec![value.into()])
    }

    pub fn ne(column: &str, value: impl Into<SqlArg>) -> Self {
        Self::raw(format!("{column} <> ?"), vec![value.into()])
    }

    /// Substring match: binds `%needle%`.
    pub fn like(column: &str, needle: &str) -> Self {
        Self::raw(format!("{column} LIKE ?"), vec![format!("%{needle}%").into()])
    }

    /// `column IN (...)`. An empty list renders a predicate that matches nothing.
    pub fn in_list<I, V>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<SqlArg>,
    {
        let args: Vec<SqlArg> = values.into_iter().map(Into::into).collect();
        if args.is_empty() {
            return Self::raw("1 = 0", Vec::new());
        }
        let placeholders = vec!["?"; args.len()].join(", ");
        Self::raw(format!("{column} IN ({placeholders})"), args)
    }

    pub fn is_null(column: &str) -> Self {
        Self::raw(format!("{column} IS NULL"), Vec::new())
    }

    pub fn is_not_null(column: &str) -> Self {
        Self::raw(format!("{column} IS NOT NULL"), Vec::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    And,
    Or,
}

impl Op {
    const fn keyword(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

/// Join fragments with `op` and wrap the result in parentheses.
pub fn merge_wheres(op: Op, filters: Vec<Filter>) -> Filter {
    let mut clauses = Vec::with_capacity(filters.len());
    let mut args = Vec::new();
    for filter in filters {
        clauses.push(filter.clause);
        args.extend(filter.args);
    }
    Filter::raw(format!("({})", clauses.join(op.keyword())), args)
}

/// Which rows a query may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only rows without a tombstone.
    Active,
    /// Every row, tombstoned or not.
    Unscoped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Join {
    pub table: &'static str,
    pub on: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub desc: bool,
}

impl OrderBy {
    #[must_use]
    pub const fn asc(column: &'static str) -> Self {
        Self {
            column,
            desc: false,
        }
    }

    #[must_use]
    pub const fn desc(column: &'static str) -> Self {
        Self { column, desc: true }
    }
}

/// Render ` WHERE a AND b ...` (or nothing) and collect the arguments.
pub fn render_where(table: &str, scope: Scope, filters: &[Filter]) -> (String, Vec<SqlArg>) {
    let mut clauses: Vec<String> = Vec::with_capacity(filters.len().saturating_add(1));
    if scope == Scope::Active {
        clauses.push(format!("{table}.deleted_at IS NULL"));
    }
    let mut args = Vec::new();
    for filter in filters {
        clauses.push(filter.clause.clone());
        args.extend(filter.args.iter().cloned());
    }
    if clauses.is_empty() {
        return (String::new(), args);
    }
    (format!(" WHERE {}", clauses.join(" AND ")), args)
}

/// Render ` ORDER BY ...` (or nothing).
pub fn render_order(order: &[OrderBy]) -> String {
    if order.is_empty() {
        return String::new();
    }
    let terms: Vec<String> = order
        .iter()
        .map(|o| format!("{} {}", o.column, if o.desc { "DESC" } else { "ASC" }))
        .collect();
    format!(" ORDER BY {}", terms.join(", "))
}

/// `table.id IN (SELECT DISTINCT table.id ...)` over active rows of `table`
/// that satisfy `filters` across `joins` (rendered as LEFT JOINs). The match
/// set stays inside the database, so join multiplicity never duplicates an
/// id and its size never reaches the bind-parameter limit.
pub fn matching_ids(table: &str, joins: &[Join], filters: &[Filter]) -> Filter {
    let (where_sql, args) = render_where(table, Scope::Active, filters);
    let join_sql: String = joins
        .iter()
        .map(|j| format!(" LEFT JOIN {} ON {}", j.table, j.on))
        .collect();
    Filter::raw(
        format!("{table}.id IN (SELECT DISTINCT {table}.id FROM {table}{join_sql}{where_sql})"),
        args,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_list_expands_placeholders() {
        let f = Filter::in_list("tags.id", [1_i64, 2, 3]);
        assert_eq!(f.clause, "tags.id IN (?, ?, ?)");
        assert_eq!(f.args, vec![SqlArg::Int(1), SqlArg::Int(2), SqlArg::Int(3)]);
    }

    #[test]
    fn test_in_list_empty_matches_nothing() {
        let f = Filter::in_list("id", Vec::<i64>::new());
        assert_eq!(f.clause, "1 = 0");
        assert!(f.args.is_empty());
    }

    #[test]
    fn test_like_wraps_needle() {
        let f = Filter::like("title", "dune");
        assert_eq!(f.clause, "title LIKE ?");
        assert_eq!(f.args, vec![SqlArg::Text("%dune%".to_string())]);
    }

    #[test]
    fn test_merge_wheres_wraps_in_parentheses() {
        let merged = merge_wheres(
            Op::Or,
            vec![Filter::eq("a", 1_i64), Filter::eq("b", "x")],
        );
        assert_eq!(merged.clause, "(a = ? OR b = ?)");
        assert_eq!(merged.args, vec![SqlArg::Int(1), SqlArg::Text("x".into())]);
    }

    #[test]
    fn test_render_where_adds_tombstone_guard() {
        let (sql, args) = render_where("items", Scope::Active, &[Filter::eq("id", 4_i64)]);
        assert_eq!(sql, " WHERE items.deleted_at IS NULL AND id = ?");
        assert_eq!(args, vec![SqlArg::Int(4)]);

        let (sql, args) = render_where("items", Scope::Unscoped, &[]);
        assert!(sql.is_empty());
        assert!(args.is_empty());
    }

    #[test]
    fn test_matching_ids_renders_subquery() {
        let joins = [Join {
            table: "item_tags",
            on: "item_tags.item_id = items.id",
        }];
        let f = matching_ids("items", &joins, &[Filter::in_list("item_tags.tag_id", [3_i64])]);
        assert_eq!(
            f.clause,
            "items.id IN (SELECT DISTINCT items.id FROM items \
             LEFT JOIN item_tags ON item_tags.item_id = items.id \
             WHERE items.deleted_at IS NULL AND item_tags.tag_id IN (?))"
        );
        assert_eq!(f.args, vec![SqlArg::Int(3)]);
    }

    #[test]
    fn test_render_order() {
        assert_eq!(render_order(&[]), "");
        assert_eq!(
            render_order(&[OrderBy::desc("updated_at"), OrderBy::asc("id")]),
            " ORDER BY updated_at DESC, id ASC"
        );
    }
}
