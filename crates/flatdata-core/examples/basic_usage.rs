//! Basic usage example for flatdata-core
//!
//! Run with: cargo run --example basic_usage

use flatdata_core::{
    contains_relation_declaration, strip_relation_declarations, FilterOperator,
    RelationDeclaration, Value,
};

fn main() -> anyhow::Result<()> {
    println!("=== flatdata-core Basic Usage Example ===\n");

    // Example 1: Values from YAML
    println!("1. Parsing a record:");
    let record = Value::from_yaml(serde_yaml::from_str(
        r#"
name: real project 1!
some_value: "90"
manager:
  repository: user
  foreign_alias: managed_projects
  type: one
  values: [mr_admin]
"#,
    )?)?;
    println!("   Record: {:?}\n", record);

    // Example 2: Relation detection
    println!("2. Relation declarations:");
    println!(
        "   Contains a declaration: {}",
        contains_relation_declaration(&record)
    );
    if let Some(manager) = record.get("manager") {
        if let Some(declaration) = RelationDeclaration::parse(manager)? {
            println!(
                "   manager -> {} {:?} ({})",
                declaration.repository,
                declaration.values,
                declaration.relation_type
            );
        }
    }
    println!(
        "   Without declarations: {:?}\n",
        strip_relation_declarations(&record)
    );

    // Example 3: Loose vs strict comparison
    println!("3. Filter operators:");
    let some_value = record.get("some_value").cloned().unwrap_or(Value::Null);
    for op in ["==", "===", "<", ">="] {
        let operator: FilterOperator = op.parse()?;
        println!(
            "   \"90\" {} 90 -> {}",
            operator,
            operator.evaluate(&some_value, &Value::from(90))
        );
    }

    Ok(())
}
