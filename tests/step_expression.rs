use std::sync::Arc;

use cucumber_types::{
    Argument, DataTable, DataTableType, DocString, DocStringType, Expression,
    TypeRegistry,
};

#[derive(Debug, PartialEq)]
struct Ingredient {
    name: String,
    amount: u32,
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::default();
    registry
        .define_data_table_type(DataTableType::new(
            "ingredients",
            |table: &DataTable| {
                table
                    .hashes()
                    .into_iter()
                    .map(|row| -> anyhow::Result<_> {
                        Ok(Ingredient {
                            name: row.get("name").cloned().unwrap_or_default(),
                            amount: row
                                .get("amount")
                                .map_or(Ok(0), |a| a.parse::<u32>())?,
                        })
                    })
                    .collect::<anyhow::Result<Vec<_>>>()
            },
        ))
        .unwrap();
    registry
}

#[test]
fn appends_table_to_empty_match() {
    let step = registry().step_expression("I have cucumbers").unwrap();

    let args = step
        .match_with_table("I have cucumbers", vec![vec!["a", "b"], vec!["1", "2"]])
        .unwrap();

    assert_eq!(args.len(), 1);
    let Argument::DataTable(table) = &args[0] else {
        panic!("expected data table argument, got: {:?}", args[0]);
    };
    assert_eq!(table.table().raw(), [["a", "b"], ["1", "2"]]);
    assert_eq!(
        args[0].transform_into::<DataTable>().unwrap().into_rows(),
        [["a", "b"], ["1", "2"]],
    );

    assert!(step.match_with_table("nope", vec![vec!["a"]]).is_none());
}

#[test]
fn appends_doc_string_to_empty_match() {
    let step = registry().step_expression("I have cucumbers").unwrap();

    let args = step
        .match_with_doc_string(
            "I have cucumbers",
            DocString::new("some\ntext").with_content_type("text/plain"),
        )
        .unwrap();

    assert_eq!(args.len(), 1);
    let doc = args[0].as_doc_string().unwrap().doc_string();
    assert_eq!(doc.content, "some\ntext");
    assert_eq!(doc.content_type.as_deref(), Some("text/plain"));

    assert!(step.match_with_doc_string("nope", "text").is_none());
}

#[test]
fn trails_captured_arguments() {
    let registry = registry();
    let table_type = registry.lookup_table_type_by_name("ingredients").unwrap();
    let step = registry
        .step_expression("I bake {int} pies with")
        .unwrap()
        .with_table_type(table_type);

    let args = step
        .match_with_table(
            "I bake 2 pies with",
            vec![
                vec!["name", "amount"],
                vec!["apple", "3"],
                vec!["sugar", "1"],
            ],
        )
        .unwrap();

    assert_eq!(args.len(), 2);
    assert_eq!(args[0].transform_into::<i32>().unwrap(), 2);
    assert_eq!(
        args[1].transform_into::<Vec<Ingredient>>().unwrap(),
        [
            Ingredient { name: "apple".into(), amount: 3 },
            Ingredient { name: "sugar".into(), amount: 1 },
        ],
    );
}

#[test]
fn doc_string_type_transforms_content() {
    let step = registry()
        .step_expression(r"^the (\w+) reads$")
        .unwrap()
        .with_doc_string_type(Arc::new(DocStringType::new(
            Some("json"),
            |doc: &DocString| Ok(doc.content.lines().count()),
        )));

    let args = step
        .match_with_doc_string("the file reads", "{\n}\n")
        .unwrap();

    assert_eq!(args.len(), 2);
    assert_eq!(args[0].transform_into::<String>().unwrap(), "file");
    assert_eq!(args[1].transform_into::<usize>().unwrap(), 2);
    assert_eq!(step.doc_string_type().content_type(), Some("json"));
}

#[test]
fn transformer_errors_surface_on_transform_only() {
    let registry = registry();
    let step = registry
        .step_expression("recipe")
        .unwrap()
        .with_table_type(registry.lookup_table_type_by_name("ingredients").unwrap());

    let args = step
        .match_with_table("recipe", vec![vec!["name", "amount"], vec!["x", "lots"]])
        .unwrap();

    let err = args[0].transform().unwrap_err();
    assert!(err.downcast_ref::<std::num::ParseIntError>().is_some());
    assert_eq!(step.source(), "recipe");
}
