use fxgen_config::FxConfig;
use fxgen_hir::{
    Annotation, CompilationUnit, FieldDecl, ImportDecl, MethodDecl, ParamDecl, TypeDecl, Visibility,
};
use fxgen_setter::diagnostics::{FXSETTER_METHOD_EXISTS, FXSETTER_UNSUPPORTED_AT_TYPE};
use fxgen_setter::{
    AccessLevel, ConflictReason, FieldSetterGenerator, GenerationOutcome, SetterOccurrence,
};
use fxgen_types::{Severity, Type};
use pretty_assertions::assert_eq;

fn model(fields: Vec<FieldDecl>) -> CompilationUnit {
    let mut unit = CompilationUnit::new(Some("com.acme.model".into()));
    unit.imports.push(ImportDecl::TypeStar {
        package: "javafx.beans.property".into(),
    });
    unit.imports.push(ImportDecl::TypeSingle {
        ty: "javafx.scene.paint.Color".into(),
    });
    let mut owner = TypeDecl::new("Person");
    owner.fields = fields;
    unit.types.push(owner);
    unit
}

fn property(name: &str, ty: &str) -> FieldDecl {
    let mut field = FieldDecl::new(name, Type::parse(ty).expect("test type should parse"));
    field.is_final = true;
    field
}

fn person(unit: &CompilationUnit) -> &TypeDecl {
    unit.type_decl("Person").expect("Person should exist")
}

#[test]
fn second_run_leaves_a_single_setter() {
    let mut unit = model(vec![property("age", "IntegerProperty")]);
    let config = FxConfig::default();
    let generator = FieldSetterGenerator::new(&config);
    let occurrence = SetterOccurrence::on_field("Person", "age");

    generator.run(&mut unit, &occurrence);
    let second = generator.run(&mut unit, &occurrence);

    assert!(second.diagnostics.is_empty());
    assert_eq!(second.generated().count(), 0);
    assert!(matches!(
        second.outcomes[0].outcome,
        GenerationOutcome::SkippedConflict(ConflictReason::AlreadyGenerated { .. })
    ));
    let setters: Vec<_> = person(&unit).methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(setters, ["setAge"]);
}

#[test]
fn parameter_types_are_unwrapped() {
    let table = [
        ("BooleanProperty", Type::boolean()),
        ("IntegerProperty", Type::int()),
        ("StringProperty", Type::named("java.lang.String")),
        (
            "ListProperty<Color>",
            Type::generic(
                Type::named("javafx.collections.ObservableList"),
                vec![Type::named("Color")],
            ),
        ),
        ("ObjectProperty<Color>", Type::named("Color")),
        ("ReadOnlyStringWrapper", Type::named("ReadOnlyStringWrapper")),
    ];
    let config = FxConfig::default();

    for (declared, expected) in table {
        let unit = model(vec![property("value", declared)]);
        let report = FieldSetterGenerator::new(&config)
            .generate(&unit, &SetterOccurrence::on_field("Person", "value"));
        let method = report.generated().next().expect("setter should be generated");
        assert_eq!(method.params[0].ty, expected, "declared as {declared}");
    }
}

#[test]
fn access_level_and_static_flag_propagate() {
    let mut counter = property("instances", "LongProperty");
    counter.is_static = true;
    let unit = model(vec![property("name", "StringProperty"), counter]);
    let config = FxConfig::default();
    let generator = FieldSetterGenerator::new(&config);

    for (field, expect_static) in [("name", false), ("instances", true)] {
        let report = generator.generate(
            &unit,
            &SetterOccurrence::on_field("Person", field).with_level(AccessLevel::Protected),
        );
        let method = report.generated().next().expect("setter should be generated");
        assert_eq!(method.visibility, Visibility::Protected);
        assert!(method.is_final);
        assert_eq!(method.is_static, expect_static, "{field}");
    }
}

#[test]
fn level_none_generates_nothing() {
    let mut unit = model(vec![
        property("name", "StringProperty"),
        property("age", "IntegerProperty"),
    ]);
    let config = FxConfig::default();
    let generator = FieldSetterGenerator::new(&config);

    let reports = generator.process_unit(
        &mut unit,
        &[
            SetterOccurrence::on_field("Person", "name").with_level(AccessLevel::None),
            SetterOccurrence::on_type("Person").with_level(AccessLevel::None),
        ],
    );

    for report in &reports {
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.generated().count(), 0);
        assert!(report
            .outcomes
            .iter()
            .all(|o| o.outcome == GenerationOutcome::SkippedExplicitNone));
    }
    assert!(person(&unit).methods.is_empty());
}

#[test]
fn user_setter_wins_with_one_warning_on_fields_and_none_on_types() {
    let mut unit = model(vec![property("name", "StringProperty")]);
    unit.types[0].methods.push(
        MethodDecl::new("setName")
            .with_params(vec![ParamDecl::new("name", Type::named("String"))]),
    );
    let config = FxConfig::default();
    let generator = FieldSetterGenerator::new(&config);

    let report = generator.generate(&unit, &SetterOccurrence::on_field("Person", "name"));
    assert_eq!(report.generated().count(), 0);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, FXSETTER_METHOD_EXISTS);
    assert_eq!(report.diagnostics[0].severity, Severity::Warning);
    assert!(report.diagnostics[0].message.contains("setName"));

    let report = generator.generate(&unit, &SetterOccurrence::on_type("Person"));
    assert_eq!(report.generated().count(), 0);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn deprecation_is_added_to_requested_annotations() {
    let mut field = property("nickname", "StringProperty");
    field.javadoc = Some("Old alias.\n@deprecated use name".into());
    let unit = model(vec![field]);
    let config = FxConfig::default();
    let mut occurrence = SetterOccurrence::on_field("Person", "nickname");
    occurrence.on_method.push(Annotation::new("Override"));

    let report = FieldSetterGenerator::new(&config).generate(&unit, &occurrence);
    let method = report.generated().next().expect("setter should be generated");
    let names: Vec<_> = method.annotations.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["java.lang.Deprecated", "Override"]);
}

#[test]
fn deprecation_from_another_package_is_not_copied() {
    let mut field = property("nickname", "StringProperty");
    field.annotations.push(Annotation::new("com.acme.Deprecated"));
    let unit = model(vec![field]);
    let config = FxConfig::default();

    let report = FieldSetterGenerator::new(&config)
        .generate(&unit, &SetterOccurrence::on_field("Person", "nickname"));
    let method = report.generated().next().expect("setter should be generated");
    assert!(method.annotations.is_empty());
}

#[test]
fn tolerate_from_another_package_does_not_hide_a_user_setter() {
    let mut unit = model(vec![property("name", "StringProperty")]);
    let mut existing = MethodDecl::new("setName")
        .with_params(vec![ParamDecl::new("name", Type::named("String"))]);
    existing.annotations.push(Annotation::new("com.other.Tolerate"));
    unit.types[0].methods.push(existing);
    let config = FxConfig::default();

    let report = FieldSetterGenerator::new(&config)
        .run(&mut unit, &SetterOccurrence::on_field("Person", "name"));
    assert_eq!(report.generated().count(), 0);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, FXSETTER_METHOD_EXISTS);
    let setters: Vec<_> = person(&unit).methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(setters, ["setName"]);
}

#[test]
fn type_level_on_param_is_an_error_but_fields_are_still_processed() {
    let unit = model(vec![
        property("name", "StringProperty"),
        property("age", "IntegerProperty"),
    ]);
    let config = FxConfig::default();
    let mut occurrence = SetterOccurrence::on_type("Person");
    occurrence.on_param.push(Annotation::new("NonNull"));

    let report = FieldSetterGenerator::new(&config).generate(&unit, &occurrence);
    assert!(report.has_errors());
    assert!(report
        .diagnostics
        .iter()
        .any(|d| d.code == FXSETTER_UNSUPPORTED_AT_TYPE && d.severity == Severity::Error));
    let names: Vec<_> = report.generated().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["setName", "setAge"]);
}

#[test]
fn prefixed_fields_use_the_configured_naming_policy() {
    let unit = model(vec![
        property("mTitle", "StringProperty"),
        property("_visible", "BooleanProperty"),
    ]);
    let config = FxConfig::load_from_str("[accessors]\nprefix = [\"m\", \"_\"]\n")
        .expect("config should parse");

    let report =
        FieldSetterGenerator::new(&config).generate(&unit, &SetterOccurrence::on_type("Person"));
    let signatures: Vec<_> = report
        .generated()
        .map(|m| format!("{}({} {})", m.name, m.params[0].ty, m.params[0].name))
        .collect();
    assert_eq!(
        signatures,
        ["setTitle(java.lang.String mTitle)", "setVisible(boolean _visible)"]
    );
}

#[test]
fn fluent_setters_use_the_property_name() {
    let unit = model(vec![property("title", "StringProperty")]);
    let config =
        FxConfig::load_from_str("[accessors]\nfluent = true\n").expect("config should parse");

    let report = FieldSetterGenerator::new(&config)
        .generate(&unit, &SetterOccurrence::on_field("Person", "title"));
    let names: Vec<_> = report.generated().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["title"]);
}
