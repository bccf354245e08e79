#![allow(dead_code)]

use hyaline_core::{TypeRef, constants, metadata, record};

constants! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Low,
        High,
    }
}

metadata! {
    #[derive(Debug, Clone)]
    pub struct TestFieldAnnotation {
        pub int_value: i32 = 0,
        pub name: &'static str = "",
    }
}

metadata! {
    #[derive(Debug, Clone)]
    pub struct TestFieldAnnotationWithAnnotationMember {
        pub test_annotation: TestFieldAnnotation = TestFieldAnnotation::default(),
    }
}

metadata! {
    /// Exercises every member kind at once
    #[derive(Debug, Clone)]
    pub struct Kitchen {
        pub enabled: bool = true,
        pub tiny: i8 = 1,
        pub small: i16 = 2,
        pub regular: i32 = 3,
        pub big: i64 = 4,
        pub ratio: f32 = 0.5,
        pub precise: f64 = 0.25,
        pub initial: char = 'k',
        pub label: String = String::from("sink"),
        pub target: TypeRef = TypeRef::of::<Address>(),
        pub level: Level = Level::High,
        pub tags: Vec<&'static str> = vec!["a", "b", "c"],
        pub levels: Vec<Level> = vec![Level::Low, Level::High],
        pub nested: TestFieldAnnotation = TestFieldAnnotation { int_value: 7, name: "inner" },
        pub nested_list: Vec<TestFieldAnnotation> = vec![TestFieldAnnotation::default()],
    }
}

metadata! {
    #[derive(Debug, Clone)]
    pub struct Unsigned {
        pub count: u32 = 3,
        pub label: &'static str = "counted",
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct Address {
        pub street: String,
        pub number: i32,
        pub zipcode: String,
        pub city: String,
        pub country: String,
    }
}

record! {
    #[derive(Debug, Clone, PartialEq, Default)]
    pub struct Person {
        pub first_name: String,
        pub last_name: String,
        #[meta(TestFieldAnnotation { int_value: 1, name: "home" })]
        pub address: Address,
        pub colors: Vec<String>,
    }
}

pub fn john() -> Person {
    Person {
        first_name: "John".into(),
        last_name: "Lennon".into(),
        address: Address {
            street: "Abbey Road".into(),
            number: 123,
            zipcode: "NW8 9AX".into(),
            city: "London".into(),
            country: "UK".into(),
        },
        colors: vec![],
    }
}
