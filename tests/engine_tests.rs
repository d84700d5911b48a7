// tests/engine_tests.rs

use std::collections::HashMap;

use quill_sql::ast::{CompareOp, Condition, FieldList, FieldRef, Join, Operand, Query};
use quill_sql::executor::{self, Engine, ExecError};
use quill_sql::parser::{ParseError, QueryParser};
use quill_sql::store::Database;
use quill_sql::value::{Row, Table, Value};

fn row(pairs: Vec<(&str, Value)>) -> Row {
    Row::from_pairs(pairs)
}

fn s(v: &str) -> Value {
    Value::String(v.to_string())
}

fn n(v: f64) -> Value {
    Value::Number(v)
}

fn movie(id: f64, name: &str, director: f64) -> Row {
    row(vec![("id", n(id)), ("name", s(name)), ("directorID", n(director))])
}

fn named(id: f64, name: &str) -> Row {
    row(vec![("id", n(id)), ("name", s(name))])
}

fn link(movie: f64, actor: f64) -> Row {
    row(vec![("movieID", n(movie)), ("actorID", n(actor))])
}

fn movie_db() -> Database {
    let mut db = Database::new();
    db.insert(
        "movie",
        vec![
            movie(1.0, "Avatar", 1.0),
            movie(2.0, "Titanic", 1.0),
            movie(3.0, "Infamous", 2.0),
            movie(4.0, "Skyfall", 3.0),
            movie(5.0, "Aliens", 1.0),
        ],
    );
    db.insert(
        "actor",
        vec![
            named(1.0, "Leonardo DiCaprio"),
            named(2.0, "Sigourney Weaver"),
            named(3.0, "Daniel Craig"),
        ],
    );
    db.insert(
        "director",
        vec![
            named(1.0, "James Cameron"),
            named(2.0, "Douglas McGrath"),
            named(3.0, "Sam Mendes"),
        ],
    );
    db.insert(
        "actor_to_movie",
        vec![
            link(1.0, 2.0),
            link(2.0, 1.0),
            link(3.0, 2.0),
            link(3.0, 3.0),
            link(4.0, 3.0),
            link(5.0, 2.0),
        ],
    );
    db
}

fn projected_movies() -> Table {
    vec![
        row(vec![("movie.id", n(1.0)), ("movie.name", s("Avatar")), ("movie.directorID", n(1.0))]),
        row(vec![("movie.id", n(2.0)), ("movie.name", s("Titanic")), ("movie.directorID", n(1.0))]),
        row(vec![("movie.id", n(3.0)), ("movie.name", s("Infamous")), ("movie.directorID", n(2.0))]),
        row(vec![("movie.id", n(4.0)), ("movie.name", s("Skyfall")), ("movie.directorID", n(3.0))]),
        row(vec![("movie.id", n(5.0)), ("movie.name", s("Aliens")), ("movie.directorID", n(1.0))]),
    ]
}

fn pairs(rows: &[Row], a: &str, b: &str) -> Vec<(String, String)> {
    rows.iter()
        .map(|r| (r.get(a).unwrap().to_string(), r.get(b).unwrap().to_string()))
        .collect()
}

fn sorted(mut v: Vec<(String, String)>) -> Vec<(String, String)> {
    v.sort();
    v
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn test_projection_qualifies_columns() {
    let engine = Engine::new(movie_db());
    assert_eq!(engine.project("movie").unwrap(), projected_movies());
}

#[test]
fn test_projection_preserves_column_order() {
    let engine = Engine::new(movie_db());
    let projected = engine.project("movie").unwrap();
    assert_eq!(
        projected[0].keys().collect::<Vec<_>>(),
        vec!["movie.id", "movie.name", "movie.directorID"]
    );
}

#[test]
fn test_projection_missing_table() {
    let engine = Engine::new(movie_db());
    assert_eq!(
        engine.project("studio"),
        Err(ExecError::TableNotFound("studio".into()))
    );
}

#[test]
fn test_projection_does_not_touch_store() {
    let db = movie_db();
    let engine = Engine::new(&db);
    let _ = engine.project("movie").unwrap();
    assert_eq!(db, movie_db());
    assert!(db.iter().all(|(_, t)| t.iter().all(|r| r.keys().all(|k| !k.contains('.')))));
}

// ============================================================================
// Filter
// ============================================================================

#[test]
fn test_filter_projection() {
    let condition = Condition {
        left: Operand::Field(FieldRef::new("movie", "directorID")),
        right: Operand::Literal(n(1.0)),
        operator: CompareOp::Equal,
    };

    let filtered = executor::filter(projected_movies(), Some(&condition));
    let names: Vec<_> = filtered.iter().map(|r| r.get("movie.name").unwrap().clone()).collect();
    assert_eq!(names, vec![s("Avatar"), s("Titanic"), s("Aliens")]);
}

#[test]
fn test_filter_without_condition() {
    assert_eq!(executor::filter(projected_movies(), None), projected_movies());
}

#[test]
fn test_filter_ordering_operators() {
    let cases = vec![
        (CompareOp::LessThan, vec!["Avatar", "Titanic"]),
        (CompareOp::LessEqual, vec!["Avatar", "Titanic", "Infamous"]),
        (CompareOp::GreaterThan, vec!["Skyfall", "Aliens"]),
        (CompareOp::GreaterEqual, vec!["Infamous", "Skyfall", "Aliens"]),
        (CompareOp::NotEqual, vec!["Avatar", "Titanic", "Skyfall", "Aliens"]),
    ];

    for (operator, expected) in cases {
        let condition = Condition {
            left: Operand::Field(FieldRef::new("movie", "id")),
            right: Operand::Literal(n(3.0)),
            operator,
        };
        let filtered = executor::filter(projected_movies(), Some(&condition));
        let names: Vec<_> = filtered
            .iter()
            .map(|r| r.get("movie.name").unwrap().to_string())
            .collect();
        assert_eq!(names, expected, "Failed for operator: {}", operator);
    }
}

#[test]
fn test_equality_is_type_exact() {
    let r = row(vec![("t.n", n(1.0)), ("t.s", s("1")), ("t.b", Value::Boolean(true))]);
    let eq = |column: &str, literal: Value| Condition {
        left: Operand::Field(FieldRef::new("t", column)),
        right: Operand::Literal(literal),
        operator: CompareOp::Equal,
    };

    assert!(executor::evaluate(&eq("n", n(1.0)), &r));
    assert!(!executor::evaluate(&eq("n", s("1")), &r));
    assert!(!executor::evaluate(&eq("s", n(1.0)), &r));
    assert!(!executor::evaluate(&eq("b", n(1.0)), &r));
    assert!(executor::evaluate(&eq("b", Value::Boolean(true)), &r));
}

#[test]
fn test_missing_column_comparisons() {
    let r = row(vec![("t.a", n(1.0))]);
    let cond = |left: Operand, right: Operand, operator| Condition { left, right, operator };
    let missing = || Operand::Field(FieldRef::new("t", "missing"));

    assert!(!executor::evaluate(&cond(missing(), Operand::Literal(Value::Null), CompareOp::Equal), &r));
    assert!(executor::evaluate(&cond(missing(), missing(), CompareOp::Equal), &r));
    assert!(!executor::evaluate(&cond(missing(), Operand::Literal(n(0.0)), CompareOp::LessThan), &r));
    assert!(!executor::evaluate(&cond(missing(), Operand::Literal(n(0.0)), CompareOp::GreaterEqual), &r));
}

#[test]
fn test_string_ordering() {
    let r = row(vec![("t.name", s("Bob"))]);
    let cond = |literal: &str, operator| Condition {
        left: Operand::Field(FieldRef::new("t", "name")),
        right: Operand::Literal(s(literal)),
        operator,
    };
    assert!(executor::evaluate(&cond("Carol", CompareOp::LessThan), &r));
    assert!(executor::evaluate(&cond("Alice", CompareOp::GreaterThan), &r));
    assert!(executor::evaluate(&cond("Bob", CompareOp::LessEqual), &r));
}

#[test]
fn test_ordering_across_types() {
    let r = row(vec![
        ("t.z", Value::Null),
        ("t.b", Value::Boolean(true)),
        ("t.n", n(100.0)),
        ("t.s", s("1")),
    ]);
    let cond = |left: &str, operator, right: &str| Condition {
        left: Operand::Field(FieldRef::new("t", left)),
        right: Operand::Field(FieldRef::new("t", right)),
        operator,
    };

    // null < boolean < number < string, whatever the payloads
    assert!(executor::evaluate(&cond("z", CompareOp::LessThan, "b"), &r));
    assert!(executor::evaluate(&cond("b", CompareOp::LessThan, "n"), &r));
    assert!(executor::evaluate(&cond("n", CompareOp::LessThan, "s"), &r));
    assert!(executor::evaluate(&cond("s", CompareOp::GreaterEqual, "z"), &r));
    assert!(!executor::evaluate(&cond("s", CompareOp::LessEqual, "n"), &r));
    // Equality stays exact across types
    assert!(executor::evaluate(&cond("n", CompareOp::NotEqual, "s"), &r));
}

#[test]
fn test_value_type_names() {
    assert_eq!(Value::Null.type_name(), "null");
    assert_eq!(Value::Boolean(false).type_name(), "boolean");
    assert_eq!(n(1.0).type_name(), "number");
    assert_eq!(s("x").type_name(), "string");

    assert!(n(1.0).same_type(&n(f64::NAN)));
    assert!(!n(1.0).same_type(&s("1")));
}

#[test]
fn test_operator_holds_for_ordering() {
    use std::cmp::Ordering::{Equal, Greater, Less};

    let cases = vec![
        (CompareOp::Equal, [false, true, false]),
        (CompareOp::NotEqual, [true, false, true]),
        (CompareOp::LessThan, [true, false, false]),
        (CompareOp::GreaterThan, [false, false, true]),
        (CompareOp::LessEqual, [true, true, false]),
        (CompareOp::GreaterEqual, [false, true, true]),
    ];

    for (operator, expected) in cases {
        let actual = [Less, Equal, Greater].map(|ord| operator.holds_for(ord));
        assert_eq!(actual, expected, "Failed for operator: {}", operator);
    }
}

#[test]
fn test_nan_never_orders() {
    let r = row(vec![("t.x", n(f64::NAN))]);
    for operator in [
        CompareOp::LessThan,
        CompareOp::GreaterThan,
        CompareOp::LessEqual,
        CompareOp::GreaterEqual,
        CompareOp::Equal,
    ] {
        let condition = Condition {
            left: Operand::Field(FieldRef::new("t", "x")),
            right: Operand::Literal(n(f64::NAN)),
            operator,
        };
        assert!(!executor::evaluate(&condition, &r), "Failed for operator: {}", operator);
    }
}

// ============================================================================
// Join
// ============================================================================

fn director_join() -> Join {
    Join {
        table: "director".into(),
        fields: (FieldRef::new("director", "id"), FieldRef::new("movie", "directorID")),
    }
}

#[test]
fn test_join_two_tables() {
    let engine = Engine::new(movie_db());
    let joined = engine.join(projected_movies(), &director_join()).unwrap();

    let with = |m: Row, id: f64, name: &str| {
        let mut m = m;
        m.insert("director.id", n(id));
        m.insert("director.name", s(name));
        m
    };
    let movies = projected_movies();
    assert_eq!(
        joined,
        vec![
            with(movies[0].clone(), 1.0, "James Cameron"),
            with(movies[1].clone(), 1.0, "James Cameron"),
            with(movies[2].clone(), 2.0, "Douglas McGrath"),
            with(movies[3].clone(), 3.0, "Sam Mendes"),
            with(movies[4].clone(), 1.0, "James Cameron"),
        ]
    );
}

#[test]
fn test_join_field_order_does_not_matter() {
    let engine = Engine::new(movie_db());
    let reversed = Join {
        table: "director".into(),
        fields: (FieldRef::new("movie", "directorID"), FieldRef::new("director", "id")),
    };
    assert_eq!(
        engine.join(projected_movies(), &reversed).unwrap(),
        engine.join(projected_movies(), &director_join()).unwrap()
    );
}

#[test]
fn test_join_drops_unmatched_rows() {
    let mut db = movie_db();
    db.insert("director", vec![named(1.0, "James Cameron")]);
    let engine = Engine::new(db);

    let joined = engine.join(projected_movies(), &director_join()).unwrap();
    let names: Vec<_> = joined.iter().map(|r| r.get("movie.name").unwrap().to_string()).collect();
    assert_eq!(names, vec!["Avatar", "Titanic", "Aliens"]);
}

#[test]
fn test_join_left_values_win() {
    let mut db = Database::new();
    db.insert("b", vec![row(vec![("id", n(1.0)), ("v", s("right"))])]);
    let engine = Engine::new(db);

    let left = vec![row(vec![("a.id", n(1.0)), ("b.v", s("left"))])];
    let join = Join {
        table: "b".into(),
        fields: (FieldRef::new("b", "id"), FieldRef::new("a", "id")),
    };

    let joined = engine.join(left, &join).unwrap();
    assert_eq!(
        joined,
        vec![row(vec![("a.id", n(1.0)), ("b.v", s("left")), ("b.id", n(1.0))])]
    );
}

#[test]
fn test_join_missing_table() {
    let engine = Engine::new(movie_db());
    let join = Join {
        table: "studio".into(),
        fields: (FieldRef::new("studio", "id"), FieldRef::new("movie", "studioID")),
    };
    assert_eq!(
        engine.join(projected_movies(), &join),
        Err(ExecError::TableNotFound("studio".into()))
    );
}

// ============================================================================
// Select
// ============================================================================

#[test]
fn test_select_stage_orders_fields() {
    let fields = FieldList::Fields(vec![
        FieldRef::new("movie", "name"),
        FieldRef::new("movie", "id"),
    ]);
    let selected = executor::select(projected_movies(), &fields);
    assert_eq!(selected[0], row(vec![("movie.name", s("Avatar")), ("movie.id", n(1.0))]));
    assert_eq!(
        selected[0].keys().collect::<Vec<_>>(),
        vec!["movie.name", "movie.id"]
    );
}

#[test]
fn test_select_stage_missing_field_is_null() {
    let fields = FieldList::Fields(vec![FieldRef::new("movie", "rating")]);
    let selected = executor::select(projected_movies(), &fields);
    assert_eq!(selected.len(), 5);
    assert!(selected.iter().all(|r| r == &row(vec![("movie.rating", Value::Null)])));
}

#[test]
fn test_select_stage_wildcard_keeps_row() {
    assert_eq!(
        executor::select(projected_movies(), &FieldList::Wildcard),
        projected_movies()
    );
}

// ============================================================================
// Execute
// ============================================================================

#[test]
fn test_select_columns() {
    let engine = Engine::new(movie_db());
    let actual = engine.execute("SELECT movie.name FROM movie").unwrap();
    assert_eq!(
        actual,
        vec![
            row(vec![("movie.name", s("Avatar"))]),
            row(vec![("movie.name", s("Titanic"))]),
            row(vec![("movie.name", s("Infamous"))]),
            row(vec![("movie.name", s("Skyfall"))]),
            row(vec![("movie.name", s("Aliens"))]),
        ]
    );
}

#[test]
fn test_apply_where() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute("SELECT movie.name FROM movie WHERE movie.directorID = 1")
        .unwrap();
    assert_eq!(
        actual,
        vec![
            row(vec![("movie.name", s("Avatar"))]),
            row(vec![("movie.name", s("Titanic"))]),
            row(vec![("movie.name", s("Aliens"))]),
        ]
    );
}

#[test]
fn test_parent_child_join() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute(
            "SELECT movie.name, director.name \
             FROM movie \
             JOIN director ON director.id = movie.directorID",
        )
        .unwrap();

    // Movie order is preserved
    assert_eq!(
        pairs(&actual, "movie.name", "director.name"),
        vec![
            ("Avatar".into(), "James Cameron".into()),
            ("Titanic".into(), "James Cameron".into()),
            ("Infamous".into(), "Douglas McGrath".into()),
            ("Skyfall".into(), "Sam Mendes".into()),
            ("Aliens".into(), "James Cameron".into()),
        ]
    );
}

#[test]
fn test_child_parent_join() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute(
            "SELECT movie.name, director.name \
             FROM director \
             JOIN movie ON director.id = movie.directorID",
        )
        .unwrap();

    // Director order first, then movie order within each director
    assert_eq!(
        pairs(&actual, "movie.name", "director.name"),
        vec![
            ("Avatar".into(), "James Cameron".into()),
            ("Titanic".into(), "James Cameron".into()),
            ("Aliens".into(), "James Cameron".into()),
            ("Infamous".into(), "Douglas McGrath".into()),
            ("Skyfall".into(), "Sam Mendes".into()),
        ]
    );
}

#[test]
fn test_many_to_many_join_with_where() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute(
            "SELECT movie.name, actor.name \
             FROM movie \
             JOIN actor_to_movie ON actor_to_movie.movieID = movie.id \
             JOIN actor ON actor_to_movie.actorID = actor.id \
             WHERE actor.name <> 'Daniel Craig'",
        )
        .unwrap();

    assert_eq!(
        sorted(pairs(&actual, "movie.name", "actor.name")),
        vec![
            ("Aliens".into(), "Sigourney Weaver".into()),
            ("Avatar".into(), "Sigourney Weaver".into()),
            ("Infamous".into(), "Sigourney Weaver".into()),
            ("Titanic".into(), "Leonardo DiCaprio".into()),
        ]
    );
}

#[test]
fn test_many_to_many_join_without_where() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute(
            "SELECT movie.name, actor.name FROM movie \
             JOIN actor_to_movie ON actor_to_movie.movieID = movie.id \
             JOIN actor ON actor_to_movie.actorID = actor.id",
        )
        .unwrap();

    assert_eq!(actual.len(), 6);
    assert_eq!(
        pairs(&actual, "movie.name", "actor.name")
            .iter()
            .filter(|(_, actor)| actor == "Daniel Craig")
            .count(),
        2
    );
}

#[test]
fn test_where_on_joined_column() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute(
            "SELECT movie.name FROM movie \
             JOIN director ON director.id = movie.directorID \
             WHERE director.name = 'Sam Mendes'",
        )
        .unwrap();
    assert_eq!(actual, vec![row(vec![("movie.name", s("Skyfall"))])]);
}

#[test]
fn test_where_null_literal() {
    let mut db = Database::new();
    db.insert(
        "users",
        vec![
            row(vec![("id", n(1.0)), ("name", s("Alice"))]),
            row(vec![("id", n(2.0)), ("name", Value::Null)]),
            row(vec![("id", n(3.0)), ("name", s("Carol"))]),
        ],
    );
    let engine = Engine::new(db);

    let actual = engine
        .execute("SELECT users.id FROM users WHERE null = users.name")
        .unwrap();
    assert_eq!(actual, vec![row(vec![("users.id", n(2.0))])]);
}

#[test]
fn test_where_escaped_quote() {
    let mut db = Database::new();
    db.insert(
        "people",
        vec![
            row(vec![("id", n(1.0)), ("name", s("O'Brien"))]),
            row(vec![("id", n(2.0)), ("name", s("OBrien"))]),
        ],
    );
    let engine = Engine::new(db);

    let escaped = engine
        .execute(r"SELECT people.id FROM people WHERE people.name = 'O\'Brien'")
        .unwrap();
    assert_eq!(escaped, vec![row(vec![("people.id", n(1.0))])]);

    let double_quoted = engine
        .execute(r#"SELECT people.id FROM people WHERE people.name = "O'Brien""#)
        .unwrap();
    assert_eq!(double_quoted, escaped);
}

#[test]
fn test_where_boolean_literal() {
    let mut db = Database::new();
    db.insert(
        "flags",
        vec![
            row(vec![("id", n(1.0)), ("on", Value::Boolean(true))]),
            row(vec![("id", n(2.0)), ("on", Value::Boolean(false))]),
        ],
    );
    let engine = Engine::new(db);

    let on = engine.execute("SELECT flags.id FROM flags WHERE flags.on = TRUE").unwrap();
    assert_eq!(on, vec![row(vec![("flags.id", n(1.0))])]);

    let off = engine.execute("SELECT flags.id FROM flags WHERE flags.on = false").unwrap();
    assert_eq!(off, vec![row(vec![("flags.id", n(2.0))])]);
}

#[test]
fn test_where_between_columns() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute("SELECT movie.name FROM movie WHERE movie.id = movie.directorID")
        .unwrap();
    assert_eq!(actual, vec![row(vec![("movie.name", s("Avatar"))])]);
}

#[test]
fn test_wildcard_expands_all_columns() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute("SELECT * FROM movie JOIN director ON director.id = movie.directorID WHERE movie.id = 4")
        .unwrap();

    assert_eq!(actual.len(), 1);
    assert_eq!(
        actual[0].keys().collect::<Vec<_>>(),
        vec![
            "movie.id",
            "movie.name",
            "movie.directorID",
            "director.id",
            "director.name"
        ]
    );
}

#[test]
fn test_empty_result() {
    let engine = Engine::new(movie_db());
    let actual = engine
        .execute("SELECT movie.name FROM movie WHERE movie.id > 100")
        .unwrap();
    assert!(actual.is_empty());
}

#[test]
fn test_invalid_query() {
    let engine = Engine::new(movie_db());
    let err = engine.execute("DELETE FROM movie").unwrap_err();
    assert_eq!(err, ExecError::InvalidQuery(ParseError::InvalidQuery));
    assert_eq!(err.to_string(), "Invalid query");
}

#[test]
fn test_table_not_found() {
    let engine = Engine::new(movie_db());
    let err = engine.execute("SELECT studio.name FROM studio").unwrap_err();
    assert_eq!(err, ExecError::TableNotFound("studio".into()));
    assert_eq!(err.to_string(), "Table studio does not exist");
}

#[test]
fn test_missing_join_table_aborts() {
    let engine = Engine::new(movie_db());
    let err = engine
        .execute("SELECT movie.name FROM movie JOIN studio ON studio.id = movie.studioID")
        .unwrap_err();
    assert_eq!(err, ExecError::TableNotFound("studio".into()));
}

#[test]
fn test_execute_is_idempotent() {
    let engine = Engine::new(movie_db());
    let query = "SELECT movie.name, actor.name FROM movie \
                 JOIN actor_to_movie ON actor_to_movie.movieID = movie.id \
                 JOIN actor ON actor_to_movie.actorID = actor.id";
    let first = engine.execute(query).unwrap();
    let second = engine.execute(query).unwrap();
    assert_eq!(first, second);
    assert_eq!(engine.store(), &movie_db());
}

// ============================================================================
// Tables and stores
// ============================================================================

#[test]
fn test_get_table_returns_copy() {
    let engine = Engine::new(movie_db());
    let mut table = engine.get_table("director").unwrap();
    table[0].insert("name", s("Someone Else"));
    table.clear();

    assert_eq!(
        engine.get_table("director").unwrap()[0].get("name"),
        Some(&s("James Cameron"))
    );
}

#[test]
fn test_get_table_unknown() {
    let engine = Engine::new(movie_db());
    assert_eq!(engine.get_table("studio"), None);
}

#[test]
fn test_get_table_empty_is_not_unknown() {
    let mut db = Database::new();
    db.insert("empty", vec![]);
    let engine = Engine::new(db);
    assert_eq!(engine.get_table("empty"), Some(vec![]));
}

#[test]
fn test_set_store() {
    let mut engine = Engine::new(movie_db());
    let mut other = Database::new();
    other.insert("movie", vec![movie(9.0, "Heat", 4.0)]);
    engine.set_store(other);

    let actual = engine.execute("SELECT movie.name FROM movie").unwrap();
    assert_eq!(actual, vec![row(vec![("movie.name", s("Heat"))])]);
}

#[test]
fn test_hash_map_store() {
    let mut store: HashMap<String, Table> = HashMap::new();
    store.insert("director".into(), vec![named(1.0, "Sam Mendes")]);
    let engine = Engine::new(store);

    let actual = engine.execute("SELECT director.name FROM director").unwrap();
    assert_eq!(actual, vec![row(vec![("director.name", s("Sam Mendes"))])]);
}

struct FixedParser(Query);

impl QueryParser for FixedParser {
    fn parse_query(&self, _text: &str) -> Result<Query, ParseError> {
        Ok(self.0.clone())
    }
}

#[test]
fn test_custom_parser() {
    let query = quill_sql::Parser::new()
        .parse("SELECT director.name FROM director WHERE director.id = 2")
        .unwrap();
    let engine = Engine::with_parser(movie_db(), FixedParser(query));

    let actual = engine.execute("anything at all").unwrap();
    assert_eq!(actual, vec![row(vec![("director.name", s("Douglas McGrath"))])]);
}

#[test]
fn test_engine_shared_across_threads() {
    let engine = std::sync::Arc::new(Engine::new(movie_db()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = engine.clone();
            std::thread::spawn(move || engine.execute("SELECT movie.name FROM movie WHERE movie.directorID = 1"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap().len(), 3);
    }
}
