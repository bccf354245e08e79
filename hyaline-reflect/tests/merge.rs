mod fixtures;

use fixtures::{Address, Person, TestFieldAnnotation, Unsigned, john};
use hyaline_core::{MemberValue, Record, Reflect, Value, ValueType};
use hyaline_reflect::{
    FieldOrigin, MergePlan, MergePlanner, MetadataConverter, ReflectError, ScalarPolicy,
    ShapeTemplate, TemplateField,
};
use hyaline_testhelpers::setup;

fn field_names(plan: &MergePlan) -> Vec<&str> {
    plan.fields.iter().map(|f| f.name.as_str()).collect()
}

#[test]
fn template_fields_come_first() -> eyre::Result<()> {
    setup();

    let template = ShapeTemplate::<Person>::new()
        .field(TemplateField::new("name").derive(|p: &Person| p.first_name.clone()))
        .field(TemplateField::<_, String>::new("last_name"));
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    assert_eq!(
        field_names(&plan),
        ["name", "last_name", "first_name", "address", "colors"]
    );
    assert_eq!(plan.fields[0].origin, FieldOrigin::Template);
    assert_eq!(plan.fields[1].origin, FieldOrigin::Template);
    assert!(plan.fields[2..].iter().all(|f| f.origin == FieldOrigin::Source));
    Ok(())
}

#[test]
fn source_metadata_is_not_carried_over() -> eyre::Result<()> {
    setup();

    let shape = Person::record_shape();
    assert_eq!(shape.field("address").map(|f| f.metadata.len()), Some(1));

    let plan = MergePlanner::default().merge(&john(), &ShapeTemplate::new(), None)?;
    let address = plan.field("address").expect("address is carried over");
    assert!(address.annotations.is_empty());
    assert_eq!(address.ty, Address::value_type());
    assert_eq!(address.initial_value, john().address.to_value());
    Ok(())
}

#[test]
fn template_metadata_replaces_source_metadata() -> eyre::Result<()> {
    setup();

    let template = ShapeTemplate::<Person>::new().field(
        TemplateField::<_, Address>::new("address").meta(TestFieldAnnotation {
            int_value: 9,
            name: "shipping",
        }),
    );
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    let address = plan.field("address").expect("address is declared");
    assert_eq!(address.origin, FieldOrigin::Template);
    assert_eq!(address.annotations.len(), 1);
    assert_eq!(
        address.annotations[0].member("name"),
        Some(&MemberValue::String("shipping".into()))
    );
    Ok(())
}

#[test]
fn override_initializer_wins_over_source_value() -> eyre::Result<()> {
    setup();

    let template = ShapeTemplate::<Person>::new()
        .field(TemplateField::new("first_name").init("Ringo".to_string()));
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    assert_eq!(
        plan.field("first_name").map(|f| &f.initial_value),
        Some(&Value::String("Ringo".into()))
    );
    Ok(())
}

#[test]
fn override_without_initializer_inherits_source_value() -> eyre::Result<()> {
    setup();

    let template = ShapeTemplate::<Person>::new()
        .field(TemplateField::<_, String>::new("last_name").meta(TestFieldAnnotation::default()));
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    let last_name = plan.field("last_name").expect("last_name is declared");
    assert_eq!(last_name.initial_value, Value::String("Lennon".into()));
    assert_eq!(last_name.annotations.len(), 1);
    Ok(())
}

#[test]
fn override_may_change_the_declared_type() -> eyre::Result<()> {
    setup();

    let template =
        ShapeTemplate::<Person>::new().field(TemplateField::<_, i64>::new("first_name").init(7));
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    let first_name = plan.field("first_name").expect("first_name is declared");
    assert_eq!(first_name.ty, ValueType::I64);
    assert_eq!(first_name.initial_value, Value::I64(7));
    Ok(())
}

#[test]
fn override_with_another_type_and_no_initializer_starts_at_default() -> eyre::Result<()> {
    setup();

    let template =
        ShapeTemplate::<Person>::new().field(TemplateField::<_, i64>::new("first_name"));
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    let first_name = plan.field("first_name").expect("first_name is declared");
    assert_eq!(first_name.ty, ValueType::I64);
    assert_eq!(first_name.initial_value, Value::I64(0));
    Ok(())
}

fn plan_for<S: Record>(
    source: &S,
    template: &ShapeTemplate<S>,
) -> Result<MergePlan, ReflectError> {
    MergePlanner::default().merge(source, template, None)
}

#[test]
fn merge_is_callable_from_generic_code() -> eyre::Result<()> {
    setup();

    let template = ShapeTemplate::<Address>::new().field(TemplateField::<_, i32>::new("floor"));
    let address = john().address;
    let plan = plan_for(&address, &template)?;

    assert_eq!(plan.source_type, Address::record_shape().type_name);
    assert_eq!(plan.fields[0].name, "floor");
    assert_eq!(
        plan.field("street").map(|f| &f.initial_value),
        Some(&Value::from("Abbey Road"))
    );
    Ok(())
}

#[test]
fn synthetic_fields_without_initializer_start_at_default() -> eyre::Result<()> {
    setup();

    let template = ShapeTemplate::<Person>::new()
        .field(TemplateField::<_, i32>::new("age"))
        .field(TemplateField::<_, bool>::new("active"))
        .field(TemplateField::<_, String>::new("nickname"));
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    assert_eq!(
        plan.initial_values()[..3],
        [Value::I32(0), Value::Bool(false), Value::Null]
    );
    Ok(())
}

#[test]
fn plan_is_a_snapshot_of_the_source() -> eyre::Result<()> {
    setup();

    let mut person = john();
    let template = ShapeTemplate::<Person>::new()
        .field(TemplateField::new("name").derive(|p: &Person| p.first_name.clone()));
    let plan = MergePlanner::default().merge(&person, &template, None)?;

    person.first_name = "Paul".into();
    person.colors.push("Red".into());

    assert_eq!(
        plan.field("name").map(|f| &f.initial_value),
        Some(&Value::String("John".into()))
    );
    assert_eq!(
        plan.field("first_name").map(|f| &f.initial_value),
        Some(&Value::String("John".into()))
    );
    assert_eq!(
        plan.field("colors").map(|f| &f.initial_value),
        Some(&Value::List(vec![]))
    );
    Ok(())
}

#[test]
fn explicit_type_name_is_used_verbatim() -> eyre::Result<()> {
    setup();

    let plan = MergePlanner::default().merge(
        &john(),
        &ShapeTemplate::new(),
        Some("com.example.PersonDto"),
    )?;
    assert_eq!(plan.type_name, "com.example.PersonDto");
    assert_eq!(plan.source_type, Person::record_shape().type_name);
    Ok(())
}

#[test]
fn generated_type_names_are_unique() -> eyre::Result<()> {
    setup();

    let planner = MergePlanner::default();
    let template = ShapeTemplate::<Person>::new();
    let a = planner.merge(&john(), &template, None)?;
    let b = planner.merge(&john(), &template, None)?;

    let prefix = format!("{}$Hyaline$", Person::record_shape().type_name);
    assert!(a.type_name.starts_with(&prefix), "{}", a.type_name);
    assert!(b.type_name.starts_with(&prefix), "{}", b.type_name);
    assert_ne!(a.type_name, b.type_name);
    Ok(())
}

#[test]
fn type_level_metadata_is_converted() -> eyre::Result<()> {
    setup();

    let template = ShapeTemplate::<Person>::new().meta(TestFieldAnnotation {
        int_value: 1,
        name: "entity",
    });
    let plan = MergePlanner::default().merge(&john(), &template, None)?;

    assert_eq!(plan.metadata.len(), 1);
    assert_eq!(plan.metadata[0].kind, TestFieldAnnotation::KIND);
    Ok(())
}

#[test]
fn unconvertible_template_metadata_fails_the_merge() {
    setup();

    let template = ShapeTemplate::<Person>::new()
        .field(TemplateField::<_, i32>::new("age").meta(Unsigned::default()));

    let err = MergePlanner::default()
        .merge(&john(), &template, None)
        .unwrap_err();
    assert!(matches!(err, ReflectError::UnrecognizedScalarKind { .. }));

    let lenient = MergePlanner::new(MetadataConverter::new(ScalarPolicy::Permissive));
    let plan = lenient
        .merge(&john(), &template, None)
        .expect("permissive conversion drops the member");
    assert_eq!(plan.field("age").map(|f| f.annotations[0].len()), Some(1));
}
