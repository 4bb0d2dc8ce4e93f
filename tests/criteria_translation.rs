use criteria_orm::{
    search_criteria, CompiledCriteria, Criterion, CriteriaError, FilterValue, Operator, Translator,
};
use serde_json::json;

fn compile(criteria: &[Criterion]) -> CompiledCriteria {
    Translator::new("u").compile(criteria).unwrap()
}

fn compile_err(criteria: &[Criterion]) -> CriteriaError {
    Translator::new("u").compile(criteria).unwrap_err()
}

#[test]
fn equality_qualifies_unqualified_fields() {
    let compiled = compile(&[Criterion::eq("id", 42)]);
    assert_eq!(compiled.sql, "u.id = $1");
    assert_eq!(compiled.params, vec![FilterValue::Int(42)]);
}

#[test]
fn qualified_fields_pass_through() {
    let compiled = compile(&[Criterion::eq("p.city", "Cardiff")]);
    assert_eq!(compiled.sql, "p.city = $1");
    assert_eq!(
        compiled.params,
        vec![FilterValue::Text("Cardiff".to_string())]
    );
}

#[test]
fn clauses_conjoin_at_the_root() {
    let compiled = compile(&[Criterion::eq("id", 1), Criterion::gt("age", 18)]);
    assert_eq!(compiled.sql, "u.id = $1 AND u.age > $2");
    assert_eq!(
        compiled.params,
        vec![FilterValue::Int(1), FilterValue::Int(18)]
    );
}

#[test]
fn nested_or_group_parenthesizes() {
    let compiled = compile(&[
        Criterion::eq("status", "active"),
        Criterion::any(vec![
            Criterion::eq("role", "admin"),
            Criterion::eq("role", "owner"),
        ]),
    ]);
    assert_eq!(
        compiled.sql,
        "u.status = $1 AND (u.role = $2 OR u.role = $3)"
    );
}

#[test]
fn groups_nest_recursively() {
    let compiled = compile(&[Criterion::any(vec![
        Criterion::eq("plan", "free"),
        Criterion::all(vec![
            Criterion::eq("plan", "paid"),
            Criterion::not_null("paid_until"),
        ]),
    ])]);
    assert_eq!(
        compiled.sql,
        "(u.plan = $1 OR (u.plan = $2 AND u.paid_until IS NOT NULL))"
    );
}

#[test]
fn comparison_with_null_degrades_to_is_null() {
    let compiled = compile(&[Criterion::eq("deleted_at", FilterValue::Null)]);
    assert_eq!(compiled.sql, "u.deleted_at IS NULL");
    assert!(compiled.params.is_empty());
}

#[test]
fn null_checks_invert_on_false() {
    let compiled = compile(&[Criterion::clause("archived_at", Operator::IsNull, false)]);
    assert_eq!(compiled.sql, "u.archived_at IS NOT NULL");

    let compiled = compile(&[Criterion::clause("archived_at", Operator::NotNull, false)]);
    assert_eq!(compiled.sql, "u.archived_at IS NULL");
}

#[test]
fn like_binds_the_pattern() {
    let compiled = compile(&[Criterion::like("email", "%@example.com")]);
    assert_eq!(compiled.sql, "u.email LIKE $1");
    assert_eq!(
        compiled.params,
        vec![FilterValue::Text("%@example.com".to_string())]
    );
}

#[test]
fn in_expands_each_value() {
    let compiled = compile(&[Criterion::is_in("id", vec![1, 2, 3])]);
    assert_eq!(compiled.sql, "u.id IN ($1, $2, $3)");
    assert_eq!(
        compiled.params,
        vec![
            FilterValue::Int(1),
            FilterValue::Int(2),
            FilterValue::Int(3),
        ]
    );
}

#[test]
fn not_in_expands_null_safe() {
    let compiled = compile(&[Criterion::not_in("id", vec![1, 2])]);
    assert_eq!(
        compiled.sql,
        "((u.id != $1 OR u.id IS NULL) AND (u.id != $2 OR u.id IS NULL))"
    );
    assert_eq!(
        compiled.params,
        vec![FilterValue::Int(1), FilterValue::Int(2)]
    );
}

#[test]
fn not_in_null_value_degrades_to_not_null_check() {
    let compiled = compile(&[Criterion::not_in(
        "id",
        vec![FilterValue::Int(1), FilterValue::Null],
    )]);
    assert_eq!(
        compiled.sql,
        "((u.id != $1 OR u.id IS NULL) AND (u.id IS NOT NULL))"
    );
    assert_eq!(compiled.params, vec![FilterValue::Int(1)]);
}

#[test]
fn not_in_empty_list_adds_nothing() {
    let compiled = compile(&[
        Criterion::eq("id", 1),
        Criterion::not_in("tag", Vec::<FilterValue>::new()),
    ]);
    assert_eq!(compiled.sql, "u.id = $1");
    assert_eq!(compiled.params, vec![FilterValue::Int(1)]);
}

#[test]
fn datetime_binds_canonical_text() {
    let dt = chrono::NaiveDate::from_ymd_opt(2026, 8, 26)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    let compiled = compile(&[Criterion::gte("created_at", dt)]);
    assert_eq!(compiled.sql, "u.created_at >= $1");
    assert_eq!(
        compiled.params,
        vec![FilterValue::Text("2026-08-26 10:30:00".to_string())]
    );
}

#[test]
fn list_value_rejected_for_comparison_operators() {
    let err = compile_err(&[Criterion::clause(
        "id",
        Operator::Eq,
        FilterValue::List(vec![FilterValue::Int(1)]),
    )]);
    assert_eq!(err, CriteriaError::UnexpectedList(Operator::Eq));
}

#[test]
fn scalar_rejected_for_membership_operators() {
    let err = compile_err(&[Criterion::clause("id", Operator::In, 5)]);
    assert_eq!(err, CriteriaError::ExpectedList(Operator::In));

    let err = compile_err(&[Criterion::clause("id", Operator::NotIn, 5)]);
    assert_eq!(err, CriteriaError::ExpectedList(Operator::NotIn));
}

#[test]
fn empty_in_list_rejected() {
    let err = compile_err(&[Criterion::is_in("id", Vec::<FilterValue>::new())]);
    assert_eq!(err, CriteriaError::ExpectedList(Operator::In));
}

#[test]
fn empty_criteria_rejected() {
    let err = compile_err(&[]);
    assert_eq!(err, CriteriaError::EmptyCriteria);
}

// JSON (associative) form

#[test]
fn json_positional_triples() {
    let criteria = Criterion::from_json(&json!([
        ["id", "eq", 42],
        ["name", "like", "%bob%"],
    ]))
    .unwrap();
    let compiled = compile(&criteria);
    assert_eq!(compiled.sql, "u.id = $1 AND u.name LIKE $2");
}

#[test]
fn json_two_element_form_defaults_value_to_true() {
    let criteria = Criterion::from_json(&json!([["archived_at", "is_null"]])).unwrap();
    let compiled = compile(&criteria);
    assert_eq!(compiled.sql, "u.archived_at IS NULL");
}

#[test]
fn json_keyed_pairs_mean_equality_or_null_check() {
    let criteria = Criterion::from_json(&json!({"id": 7, "deleted_at": null})).unwrap();
    let compiled = compile(&criteria);
    // serde_json object keys iterate in sorted order
    assert_eq!(compiled.sql, "(u.deleted_at IS NULL AND u.id = $1)");
    assert_eq!(compiled.params, vec![FilterValue::Int(7)]);
}

#[test]
fn json_or_group() {
    let criteria = Criterion::from_json(&json!([
        ["or", [["role", "eq", "admin"], ["role", "eq", "owner"]]],
    ]))
    .unwrap();
    let compiled = compile(&criteria);
    assert_eq!(compiled.sql, "(u.role = $1 OR u.role = $2)");
}

#[test]
fn json_keyed_array_value_rejected() {
    let err = Criterion::from_json(&json!({"id": [1, 2]})).unwrap_err();
    assert!(matches!(err, CriteriaError::Malformed(_)));
}

#[test]
fn json_scalar_item_rejected() {
    let err = Criterion::from_json(&json!([42])).unwrap_err();
    assert!(matches!(err, CriteriaError::Malformed(_)));
}

#[test]
fn json_unsupported_operator_rejected() {
    let err = Criterion::from_json(&json!([["id", "regexp", "x"]])).unwrap_err();
    assert_eq!(err, CriteriaError::UnsupportedOperator("regexp".to_string()));
}

// Keyword search generation

#[test]
fn search_builds_or_groups_per_keyword() {
    let criteria = search_criteria("foo bar", &["name", "email"]).unwrap();
    let compiled = Translator::new("u")
        .compile(std::slice::from_ref(&criteria))
        .unwrap();
    assert_eq!(
        compiled.sql,
        "((u.name LIKE $1 OR u.email LIKE $2) AND (u.name LIKE $3 OR u.email LIKE $4))"
    );
    assert_eq!(
        compiled.params,
        vec![
            FilterValue::Text("%foo%".to_string()),
            FilterValue::Text("%foo%".to_string()),
            FilterValue::Text("%bar%".to_string()),
            FilterValue::Text("%bar%".to_string()),
        ]
    );
}

#[test]
fn search_requires_columns() {
    let err = search_criteria("foo", &[]).unwrap_err();
    assert_eq!(err, CriteriaError::NoSearchableColumns);
}

#[test]
fn search_with_no_keywords_fails_at_translation() {
    let criteria = search_criteria("   ", &["name"]).unwrap();
    let err = Translator::new("u")
        .compile(std::slice::from_ref(&criteria))
        .unwrap_err();
    assert_eq!(err, CriteriaError::EmptyCriteria);
}
