use super::*;

#[test]
fn test_strip_leading_comments_plain() {
    assert_eq!(strip_leading_comments("select 1"), "select 1");
    assert_eq!(strip_leading_comments("   \n\tselect 1"), "select 1");
}

#[test]
fn test_strip_leading_comments_line() {
    assert_eq!(strip_leading_comments("-- note\nselect 1"), "select 1");
    assert_eq!(
        strip_leading_comments("-- one\n-- two\n  select 1"),
        "select 1"
    );
}

#[test]
fn test_strip_leading_comments_block() {
    assert_eq!(strip_leading_comments("/* note */ select 1"), "select 1");
    assert_eq!(
        strip_leading_comments("/* a */ -- b\n/* c */select 1"),
        "select 1"
    );
}

#[test]
fn test_strip_leading_comments_unterminated() {
    assert_eq!(strip_leading_comments("-- no newline"), "");
    assert_eq!(strip_leading_comments("/* never closed select 1"), "");
}

#[test]
fn test_leading_keyword() {
    assert_eq!(
        leading_keyword("-- x\n  select * from t"),
        Some("SELECT".to_string())
    );
    assert_eq!(leading_keyword("   "), None);
    assert_eq!(leading_keyword("/* only a comment */"), None);
}

#[test]
fn test_classify_query() {
    assert_eq!(classify_statement("select 1 from rdb$database"), StatementKind::Query);
    assert_eq!(
        classify_statement("WITH t AS (select 1) select * from t"),
        StatementKind::Query
    );
    assert!(is_query_statement("/* hint */ select id from item"));
    assert!(!is_query_statement("delete from item"));
}

#[test]
fn test_classify_dml() {
    assert_eq!(classify_statement("insert into t values (1)"), StatementKind::Dml);
    assert_eq!(classify_statement("UPDATE t SET a = 1"), StatementKind::Dml);
    assert_eq!(classify_statement("merge into t using s on 1=1"), StatementKind::Dml);
}

#[test]
fn test_classify_ddl() {
    assert_eq!(classify_statement("create table t (a integer)"), StatementKind::Ddl);
    assert_eq!(classify_statement("recreate view v as select 1"), StatementKind::Ddl);
    assert_eq!(classify_statement("drop index idx_t"), StatementKind::Ddl);
    assert_eq!(
        classify_statement("declare external function lower_fn"),
        StatementKind::Ddl
    );
}

#[test]
fn test_classify_transaction() {
    assert_eq!(classify_statement("commit"), StatementKind::Transaction);
    assert_eq!(classify_statement("ROLLBACK WORK"), StatementKind::Transaction);
    assert_eq!(classify_statement("release savepoint sp1"), StatementKind::Transaction);
}

#[test]
fn test_classify_set_routes_on_second_token() {
    assert_eq!(
        classify_statement("set transaction read committed"),
        StatementKind::Transaction
    );
    assert_eq!(
        classify_statement("SET TRANSACTION"),
        StatementKind::Transaction
    );
    assert_eq!(
        classify_statement("set generator seq_item to 100"),
        StatementKind::Ddl
    );
    assert_eq!(
        classify_statement("set statistics index idx_t"),
        StatementKind::Ddl
    );
    assert_eq!(classify_statement("set"), StatementKind::Ddl);
}

#[test]
fn test_classify_execute_block() {
    assert_eq!(
        classify_statement("execute block as begin end"),
        StatementKind::ExecuteBlock
    );
    assert_eq!(
        classify_statement("EXECUTE BLOCK RETURNS (n integer) AS BEGIN END"),
        StatementKind::ExecuteBlock
    );
    // The parenthesis may be glued to the keyword.
    assert_eq!(
        classify_statement("execute block(x int = ?) as begin end"),
        StatementKind::ExecuteBlock
    );
}

#[test]
fn test_classify_execute_procedure() {
    assert_eq!(
        classify_statement("execute procedure sync_items"),
        StatementKind::ExecuteProcedure
    );
    assert_eq!(classify_statement("execute"), StatementKind::ExecuteProcedure);
}

#[test]
fn test_classify_unknown() {
    assert_eq!(classify_statement(""), StatementKind::Unknown);
    assert_eq!(classify_statement("-- nothing here"), StatementKind::Unknown);
    assert_eq!(classify_statement("suspend"), StatementKind::Unknown);
}

#[test]
fn test_kind_display_matches_as_str() {
    for kind in [
        StatementKind::Query,
        StatementKind::Dml,
        StatementKind::Ddl,
        StatementKind::Transaction,
        StatementKind::ExecuteBlock,
        StatementKind::ExecuteProcedure,
        StatementKind::Unknown,
    ] {
        assert_eq!(kind.to_string(), kind.as_str());
    }
}
