//! End-to-end resolution of the demo command set.

#![allow(clippy::unwrap_used, clippy::panic)]

use shorthand_core::{
    Args, Choice, Chooser, CommandTable, CommandTemplate, Error, Flow, Interpreter, Manifest,
    OptionSpec, Outcome, ParamType, ParserConfig, RefuseAmbiguity, Result, ScalarType,
};

#[derive(Debug, Default)]
struct Seen {
    users: Vec<(String, i32)>,
    products: Vec<(Vec<i32>, Vec<f64>)>,
    uploads: Vec<String>,
}

fn user_find(seen: &mut Seen, args: &Args) -> anyhow::Result<Flow> {
    seen.users.push((args.get("user_name")?, args.get("age")?));
    Ok(Flow::Continue)
}

fn product_counts(seen: &mut Seen, args: &Args) -> anyhow::Result<Flow> {
    seen.products.push((args.at(0)?, args.at(1)?));
    Ok(Flow::Continue)
}

fn interpreter() -> Interpreter<Seen> {
    let mut table = CommandTable::new();
    table
        .register(
            CommandTemplate::builder("user find {name} {age}")
                .help("Command to search for a user by name and age")
                .param("user_name", ParamType::STRING)
                .param("age", ScalarType::I32)
                .option(
                    OptionSpec::new("user_name")
                        .name("name")
                        .help("User name. Case sensitive."),
                )
                .option(
                    OptionSpec::new("age")
                        .default("24")
                        .help("User age. The maximum value is 90 years."),
                )
                .build()
                .unwrap(),
            user_find,
        )
        .unwrap();
    table
        .register(
            CommandTemplate::builder("product counts {counts} {prices}")
                .param("counts", ParamType::Array(ScalarType::I32))
                .param("prices", ParamType::Array(ScalarType::F64))
                .build()
                .unwrap(),
            product_counts,
        )
        .unwrap();
    Interpreter::new(table, ParserConfig::default())
}

fn run_user(line: &str) -> (String, i32) {
    let interpreter = interpreter();
    let mut seen = Seen::default();
    let outcomes = interpreter.run_line(&mut seen, line, &mut RefuseAmbiguity);
    assert!(
        matches!(outcomes[..], [Outcome::Dispatched(Flow::Continue)]),
        "{line}: {outcomes:?}"
    );
    seen.users.pop().unwrap()
}

#[test]
fn test_user_lines_from_the_self_test() {
    let cases = [
        ("user find Alice 24", "Alice", 24),
        ("    user     find   Alice    24   ", "Alice", 24),
        ("user find name=Bob", "Bob", 24),
        ("u f na=Martin a=30", "Martin", 30),
        ("user name=Jeny age=35 find", "Jeny", 35),
        ("u n='Elon Musk' a=47 find", "Elon Musk", 47),
        (
            r#"us na="Edward\'s Snowden"" 123" age=35 find"#,
            "Edward's Snowden 123",
            35,
        ),
        (r#"user find Ali\"ce 24"#, "Ali\"ce", 24),
    ];

    for (line, name, age) in cases {
        assert_eq!(run_user(line), (name.to_string(), age), "{line}");
    }
}

#[test]
fn test_product_counts_arrays() {
    let interpreter = interpreter();
    let mut seen = Seen::default();

    interpreter.run_line(
        &mut seen,
        "product counts 10,20,30,40 20.123,40.456,60.789",
        &mut RefuseAmbiguity,
    );

    assert_eq!(
        seen.products,
        [(vec![10, 20, 30, 40], vec![20.123, 40.456, 60.789])]
    );
}

#[test]
fn test_word_reordering_is_not_supported_positionally() {
    let interpreter = interpreter();
    let outcomes = interpreter.run_line(
        &mut Seen::default(),
        "user Alice find 24",
        &mut RefuseAmbiguity,
    );

    assert!(matches!(
        outcomes[..],
        [Outcome::Failed(Error::CommandNotFound(_))]
    ));
}

#[test]
fn test_help_flag_lists_everything() {
    let interpreter = interpreter();
    let outcomes = interpreter.run_line(&mut Seen::default(), "/?", &mut RefuseAmbiguity);

    match &outcomes[..] {
        [Outcome::Help(ids)] => assert_eq!(ids.len(), 2),
        other => panic!("unexpected outcomes: {other:?}"),
    }
}

struct PickFirst(Vec<Vec<Choice>>);

impl Chooser for PickFirst {
    fn choose(&mut self, choices: &[Choice]) -> Result<Option<usize>> {
        self.0.push(choices.to_vec());
        Ok(Some(0))
    }
}

#[test]
fn test_two_u_templates_prompt_for_choice() {
    // Given: a second template starting with `u` with the same shape
    let interpreter = {
        let mut table = CommandTable::new();
        table
            .register(
                CommandTemplate::builder("user find {name} {age}")
                    .param("user_name", ParamType::STRING)
                    .param("age", ScalarType::I32)
                    .option(OptionSpec::new("user_name").name("name"))
                    .build()
                    .unwrap(),
                user_find,
            )
            .unwrap();
        table
            .register(
                CommandTemplate::builder("upload file {path} {retries}")
                    .param("path", ParamType::STRING)
                    .param("retries", ScalarType::U8)
                    .build()
                    .unwrap(),
                |seen: &mut Seen, args| {
                    seen.uploads.push(args.get("path")?);
                    Ok(Flow::Continue)
                },
            )
            .unwrap();
        Interpreter::new(table, ParserConfig::default())
    };

    // When: the abbreviated line fits both
    let mut chooser = PickFirst(Vec::new());
    let mut seen = Seen::default();
    interpreter.run_line(&mut seen, "u f Alice 3", &mut chooser);

    // Then: the user was offered 1 and 2, and the first was run
    let numbers: Vec<_> = chooser.0[0].iter().map(|choice| choice.number).collect();
    assert_eq!(numbers, [1, 2]);
    assert_eq!(seen.users, [("Alice".to_string(), 3)]);
    assert!(seen.uploads.is_empty());
}

#[test]
fn test_manifest_commands_resolve_like_code_commands() {
    let manifest = Manifest::parse(
        r#"
[[command]]
path = "user find {name} {age}"

  [[command.param]]
  name = "user_name"

  [[command.param]]
  name = "age"
  type = "int"

  [[command.option]]
  param = "user_name"
  name = "name"

  [[command.option]]
  param = "age"
  default = "24"
"#,
    )
    .unwrap();

    let mut table = CommandTable::new();
    for template in manifest.templates(',').unwrap() {
        table.register(template, user_find).unwrap();
    }
    let interpreter = Interpreter::new(table, ParserConfig::default());

    let mut seen = Seen::default();
    interpreter.run_line(&mut seen, "u f name=Bob", &mut RefuseAmbiguity);
    assert_eq!(seen.users, [("Bob".to_string(), 24)]);
}
