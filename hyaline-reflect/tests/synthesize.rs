mod fixtures;

use std::sync::{Arc, Barrier};

use fixtures::{Address, Person, TestFieldAnnotation, john};
use hyaline_core::{MemberValue, Value, ValueType};
use hyaline_reflect::{
    DynamicAttributes, FieldBagBuilder, FieldFlags, MergePlanner, ReflectError, ShapeTemplate,
    Synthesized, TemplateField, TypeBuilder, TypeRegistry,
};
use hyaline_testhelpers::setup;

fn person_template() -> ShapeTemplate<Person> {
    ShapeTemplate::new()
        .field(
            TemplateField::new("name")
                .meta(TestFieldAnnotation {
                    int_value: 5,
                    name: "display",
                })
                .derive(|p: &Person| p.first_name.clone()),
        )
        .field(TemplateField::new("first_name").init("Ringo".to_string()))
}

fn synthesize(
    registry: &TypeRegistry,
    template: &ShapeTemplate<Person>,
    type_name: Option<&str>,
) -> Result<Synthesized<Person>, ReflectError> {
    let plan = MergePlanner::default().merge(&john(), template, type_name)?;
    FieldBagBuilder::new(registry).define_type(plan)
}

#[test]
fn slots_are_flagged_by_reachability() -> eyre::Result<()> {
    setup();

    let registry = TypeRegistry::new();
    let dto = synthesize(&registry, &person_template(), None)?;

    let flags: Vec<_> = dto.fields().iter().map(|f| (f.name.as_str(), f.flags)).collect();
    assert_eq!(
        flags,
        [
            ("name", FieldFlags::SYNTHETIC),
            ("first_name", FieldFlags::ACCESSOR | FieldFlags::OVERRIDDEN),
            ("last_name", FieldFlags::ACCESSOR),
            ("address", FieldFlags::ACCESSOR),
            ("colors", FieldFlags::ACCESSOR),
        ]
    );
    assert!(registry.contains(dto.type_name()));
    Ok(())
}

#[test]
fn typed_accessors_read_initial_values() -> eyre::Result<()> {
    setup();

    let dto = synthesize(&TypeRegistry::new(), &person_template(), None)?;

    assert_eq!(dto.get::<String>("first_name")?, "Ringo");
    assert_eq!(dto.get::<String>("last_name")?, "Lennon");
    assert_eq!(dto.get::<Address>("address")?.city, "London");
    assert!(dto.get::<Vec<String>>("colors")?.is_empty());
    Ok(())
}

#[test]
fn synthetic_fields_are_dynamic_only() -> eyre::Result<()> {
    setup();

    let mut dto = synthesize(&TypeRegistry::new(), &person_template(), None)?;

    assert_eq!(dto.get_attribute("name")?, Value::String("John".into()));
    assert!(matches!(
        dto.get::<String>("name"),
        Err(ReflectError::NoTypedAccessor { ref field, .. }) if field == "name"
    ));
    assert!(matches!(
        dto.set("name", "Paul".to_string()),
        Err(ReflectError::NoTypedAccessor { .. })
    ));
    Ok(())
}

#[test]
fn typed_access_checks_the_declared_type() -> eyre::Result<()> {
    setup();

    let mut dto = synthesize(&TypeRegistry::new(), &ShapeTemplate::new(), None)?;

    assert_eq!(
        dto.get::<i32>("first_name"),
        Err(ReflectError::WrongType {
            field: "first_name".into(),
            expected: ValueType::String,
            actual: ValueType::I32,
        })
    );
    assert!(matches!(
        dto.set("last_name", 3_i64),
        Err(ReflectError::WrongType { .. })
    ));
    assert_eq!(dto.get::<String>("last_name")?, "Lennon");
    Ok(())
}

#[test]
fn dynamic_reads_follow_typed_writes_until_first_dynamic_write() -> eyre::Result<()> {
    setup();

    let mut dto = synthesize(&TypeRegistry::new(), &ShapeTemplate::new(), None)?;

    dto.set("first_name", "Paul".to_string())?;
    assert_eq!(dto.get_attribute("first_name")?, Value::String("Paul".into()));

    dto.set_attribute("first_name", Value::from("George"))?;
    assert_eq!(dto.get_attribute("first_name")?, Value::String("George".into()));
    assert_eq!(dto.get::<String>("first_name")?, "Paul");

    dto.set("first_name", "Ringo".to_string())?;
    assert_eq!(dto.get_attribute("first_name")?, Value::String("George".into()));
    assert_eq!(dto.get::<String>("first_name")?, "Ringo");

    let overridden: Vec<_> = dto.overridden_attributes().map(|(name, _)| name).collect();
    assert_eq!(overridden, ["first_name"]);
    Ok(())
}

#[test]
fn unknown_attributes_are_rejected() -> eyre::Result<()> {
    setup();

    let mut dto = synthesize(&TypeRegistry::new(), &person_template(), None)?;

    assert!(matches!(
        dto.get_attribute("age"),
        Err(ReflectError::UnknownAttribute { ref name, .. }) if name == "age"
    ));
    assert!(matches!(
        dto.set_attribute("age", Value::I32(30)),
        Err(ReflectError::UnknownAttribute { .. })
    ));
    assert!(!dto.has_attribute("age"));
    assert!(!dto.has_attribute("First_Name"));
    assert!(dto.has_attribute("name"));

    dto.set_attribute("name", Value::from("Johnny"))?;
    assert_eq!(dto.get_attribute("name")?, Value::String("Johnny".into()));
    assert_eq!(
        dto.attribute_names(),
        ["name", "first_name", "last_name", "address", "colors"]
    );
    Ok(())
}

#[test]
fn field_metadata_is_visible_at_runtime() -> eyre::Result<()> {
    setup();

    let template = person_template().meta(TestFieldAnnotation::default());
    let dto = synthesize(&TypeRegistry::new(), &template, None)?;

    let name = dto.field_metadata("name").expect("name is a field");
    assert_eq!(name.len(), 1);
    assert_eq!(name[0].member("int_value"), Some(&MemberValue::Int(5)));

    assert_eq!(dto.field_metadata("address"), Some(&[][..]));
    assert_eq!(dto.field_metadata("missing"), None);
    assert_eq!(dto.metadata().len(), 1);

    let slot = dto
        .synthesized_type()
        .field("name")
        .expect("name is a field");
    assert!(slot.metadata_of(TestFieldAnnotation::KIND).is_some());
    Ok(())
}

#[test]
fn to_source_rebuilds_from_typed_slots() -> eyre::Result<()> {
    setup();

    let mut dto = synthesize(&TypeRegistry::new(), &person_template(), None)?;
    dto.set("colors", vec!["Black".to_string(), "White".to_string()])?;
    dto.set_attribute("last_name", Value::from("Starr"))?;

    let rebuilt = dto.to_source()?;
    assert_eq!(
        rebuilt,
        Person {
            first_name: "Ringo".into(),
            colors: vec!["Black".into(), "White".into()],
            ..john()
        }
    );
    Ok(())
}

#[test]
fn to_source_fails_when_an_override_changed_the_type() -> eyre::Result<()> {
    setup();

    let template =
        ShapeTemplate::<Person>::new().field(TemplateField::<_, i32>::new("first_name").init(1));
    let dto = synthesize(&TypeRegistry::new(), &template, None)?;

    assert_eq!(dto.get::<i32>("first_name")?, 1);
    assert!(matches!(dto.to_source(), Err(ReflectError::Value { .. })));
    Ok(())
}

#[test]
fn retyped_override_is_readable_with_its_new_type() -> eyre::Result<()> {
    setup();

    let template =
        ShapeTemplate::<Person>::new().field(TemplateField::<_, i64>::new("first_name"));
    let mut dto = synthesize(&TypeRegistry::new(), &template, None)?;

    assert_eq!(dto.get::<i64>("first_name")?, 0);
    dto.set("first_name", 42_i64)?;
    assert_eq!(dto.get_attribute("first_name")?, Value::I64(42));
    Ok(())
}

#[test]
fn duplicate_type_names_are_rejected() -> eyre::Result<()> {
    setup();

    let registry = TypeRegistry::new();
    let template = ShapeTemplate::new();
    synthesize(&registry, &template, Some("PersonDto"))?;

    let err = synthesize(&registry, &template, Some("PersonDto")).unwrap_err();
    assert_eq!(
        err,
        ReflectError::DuplicateTypeName {
            name: "PersonDto".into()
        }
    );
    assert_eq!(registry.len(), 1);

    synthesize(&TypeRegistry::new(), &template, Some("PersonDto"))?;
    Ok(())
}

#[test]
fn concurrent_definitions_of_one_name_admit_exactly_one() {
    setup();

    const THREADS: usize = 8;
    let registry = TypeRegistry::new();
    let barrier = Arc::new(Barrier::new(THREADS));

    let successes = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let barrier = Arc::clone(&barrier);
                let registry = &registry;
                scope.spawn(move || {
                    let plan = MergePlanner::default()
                        .merge(&john(), &ShapeTemplate::new(), Some("Contested"))
                        .expect("merging needs no registry");
                    barrier.wait();
                    FieldBagBuilder::new(registry)
                        .define_type::<Person>(plan)
                        .is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("definer thread panicked"))
            .filter(|ok| *ok)
            .count()
    });

    assert_eq!(successes, 1);
    assert!(registry.contains("Contested"));
}

#[test]
fn debug_output_names_the_type_and_fields() -> eyre::Result<()> {
    setup();

    let dto = synthesize(&TypeRegistry::new(), &ShapeTemplate::new(), Some("DebugDto"))?;
    let debug = format!("{dto:?}");
    assert!(debug.starts_with("DebugDto {"), "{debug}");
    assert!(debug.contains(r#"last_name: String("Lennon")"#), "{debug}");
    Ok(())
}
