mod common;

use common::PgDriver;
use fluentq::{ProcessorConfig, Query, QueryError, Token, UnknownDirectivePolicy, Value};

#[test]
fn builds_from_tokens() {
    let driver = PgDriver;
    let mut q = Query::new(&driver);
    q.push_token("select", vec![Value::symbol("id"), Value::symbol("name")])
        .push_token("from", vec![Value::symbol("users")])
        .push_token("where", vec!["[active] IS %%b AND [id] IN %%l".into(), true.into(), vec![1, 2].into()])
        .push_token("order_by", vec!["[name]".into()]);

    assert_eq!(q.query_type(), Some("select"));
    assert_eq!(
        q.build().unwrap(),
        "SELECT \"id\" \"name\" FROM \"users\" WHERE \"active\" IS TRUE AND \"id\" IN (1, 2) ORDER BY \"name\""
    );
}

#[test]
fn compiled_query_binds_per_call() {
    let driver = PgDriver;
    let mut q = Query::new(&driver);
    q.push_token("select", vec!["*".into()])
        .push_token("from", vec![Value::symbol("users")])
        .push_token("where", vec!["[email] = %%s".into()])
        .query(vec!["LIMIT 1".into()]);

    let compiled = q.compile().unwrap();
    assert_eq!(compiled.template().directive_count(), 1);
    assert_eq!(
        compiled.build(&["a@x.io".into()]).unwrap(),
        "SELECT * FROM \"users\" WHERE \"email\" = 'a@x.io' LIMIT 1"
    );
    assert!(compiled.build(&[]).unwrap_err().is_missing_argument());
}

#[test]
fn aliased_tokens_render_under_the_alias() {
    let driver = PgDriver;
    let mut q = Query::new(&driver);
    q.push(Token::new("select", vec!["1".into()]).with_alias("select_distinct"));
    assert_eq!(q.query_type(), Some("select_distinct"));
    assert_eq!(q.build().unwrap(), "SELECT DISTINCT 1");
}

#[test]
fn update_with_assignment_map() {
    let driver = PgDriver;
    let mut q = Query::new(&driver);
    q.push_token("update", vec![Value::symbol("users")])
        .push_token("set", vec![Value::map([("name", Value::from("bob")), ("active", Value::Null)])])
        .push_token("where", vec!["[id] = %%i".into(), 3.into()]);
    assert_eq!(
        q.build().unwrap(),
        "UPDATE \"users\" SET \"name\" = 'bob' , \"active\" = NULL WHERE \"id\" = 3"
    );
}

#[test]
fn configured_query_builds_and_compiles_alike() {
    let driver = PgDriver;
    let config = ProcessorConfig::from_toml_str(
        r#"
unknown_directive = "preserve"
raw_fallback = true
"#,
    )
    .unwrap();
    assert_eq!(config.unknown_directive, UnknownDirectivePolicy::Preserve);

    let filter = "[label] LIKE \"100%%zzz\" AND [id] = %%i";

    let mut built = Query::with_config(&driver, config.clone());
    built
        .push_token("select", vec![Value::opaque("now()"), "AS [ts]".into()])
        .push_token("where", vec![filter.into(), 4.into()]);
    let built = built.build().unwrap();
    assert_eq!(
        built,
        "SELECT now() AS \"ts\" WHERE \"label\" LIKE '100%%zzz' AND \"id\" = 4"
    );

    let mut prepared = Query::with_config(&driver, config);
    prepared
        .push_token("select", vec![Value::opaque("now()"), "AS [ts]".into()])
        .push_token("where", vec![filter.into()]);
    let compiled = prepared.compile().unwrap();
    assert_eq!(compiled.build(&[4.into()]).unwrap(), built);
}

#[test]
fn default_query_rejects_what_a_preserving_one_keeps() {
    let driver = PgDriver;
    let mut q = Query::new(&driver);
    q.push_token("select", vec!["%%zzz".into()]);
    assert!(matches!(
        q.build().unwrap_err(),
        QueryError::UnknownDirective { ref name, .. } if name == "zzz"
    ));
    assert!(q.compile().unwrap_err().is_unknown_directive());
}
