use sea_orm::sea_query::{Expr, Func, IntoColumnRef, LikeExpr, SimpleExpr};

pub mod category_service;
pub mod sku_service;
pub mod spu_service;
pub mod stock_service;
pub mod sync_service;

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Case-insensitive substring match of `term` against `column`; LIKE
/// wildcards in the term match literally.
///
/// Folding follows the database's `lower()`. Postgres folds Unicode;
/// SQLite folds ASCII only, so there non-ASCII letters match case-sensitively.
pub(crate) fn contains_ci<C: IntoColumnRef>(column: C, term: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(column))).like(LikeExpr::new(pattern).escape('\\'))
}

#[cfg(test)]
mod tests {
    use super::escape_like;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(escape_like("10%_off"), "10\\%\\_off");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
        assert_eq!(escape_like("戒指"), "戒指");
    }
}
