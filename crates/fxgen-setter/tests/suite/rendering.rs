use fxgen_config::FxConfig;
use fxgen_hir::printer::{print_method, print_type};
use fxgen_hir::CompilationUnit;
use fxgen_setter::{AccessLevel, FieldSetterGenerator, Placement, SetterOccurrence};
use pretty_assertions::assert_eq;

const UNIT: &str = r#"{
  "package": "com.acme.model",
  "imports": [
    { "kind": "type_star", "package": "javafx.beans.property" },
    { "kind": "type_single", "ty": "javafx.collections.ObservableList" }
  ],
  "types": [
    {
      "name": "Person",
      "fields": [
        {
          "name": "age",
          "ty": { "named": "IntegerProperty" },
          "visibility": "private",
          "is_final": true,
          "javadoc": "The age.\n@param value in years\n@return the age"
        },
        {
          "name": "tags",
          "ty": { "generic": { "base": { "named": "ListProperty" }, "args": [{ "named": "String" }] } },
          "is_final": true
        }
      ]
    }
  ]
}"#;

fn unit() -> CompilationUnit {
    serde_json::from_str(UNIT).expect("unit fixture should deserialize")
}

#[test]
fn occurrences_deserialize_from_json() {
    let occurrences: Vec<SetterOccurrence> = serde_json::from_str(
        r#"[
          { "owner": "Person", "placement": { "kind": "field", "name": "age" }, "level": "PROTECTED" },
          { "owner": "Person", "placement": { "kind": "type" } }
        ]"#,
    )
    .expect("occurrences should deserialize");

    assert_eq!(occurrences[0].placement, Placement::Field("age".into()));
    assert_eq!(occurrences[0].level, AccessLevel::Protected);
    assert_eq!(occurrences[1].placement, Placement::Type);
    assert_eq!(occurrences[1].level, AccessLevel::Public);
    assert!(occurrences[1].on_method.is_empty());
}

#[test]
fn generated_setters_render_as_java() {
    let mut unit = unit();
    let config = FxConfig::default();
    let reports = FieldSetterGenerator::new(&config)
        .process_unit(&mut unit, &[SetterOccurrence::on_type("Person")]);
    assert!(reports[0].diagnostics.is_empty());

    let rendered: Vec<String> = reports[0].generated().map(print_method).collect();
    assert_eq!(
        rendered,
        vec![
            "/**\n * The age.\n * @param age in years\n */\npublic final void setAge(int age) {\n}\n"
                .to_string(),
            "public final void setTags(javafx.collections.ObservableList<String> tags) {\n}\n"
                .to_string(),
        ]
    );
    assert_eq!(unit.types[0].methods.len(), 2);
}

#[test]
fn configured_markers_appear_in_rendered_setter() {
    let unit = unit();
    let config = FxConfig::load_from_str(
        "[setter]\nfinal_parameters = true\n\n[generated]\nlombok_generated = true\njavax_generated = true\n",
    )
    .expect("config should parse");

    let occurrence = SetterOccurrence::on_field("Person", "tags").with_level(AccessLevel::Package);
    let report = FieldSetterGenerator::new(&config).generate(&unit, &occurrence);
    let method = report.generated().next().expect("setter should be generated");
    assert_eq!(
        print_method(method),
        "@javax.annotation.Generated(\"lombok\")\n@lombok.Generated\nfinal void setTags(final javafx.collections.ObservableList<String> tags) {\n}\n"
    );
}

#[test]
fn report_serializes_outcomes_and_diagnostics() {
    let unit = unit();
    let config = FxConfig::default();
    let mut occurrence = SetterOccurrence::on_type("Person");
    occurrence.placement = Placement::Other("local_variable".into());

    let report = FieldSetterGenerator::new(&config).generate(&unit, &occurrence);
    let json = serde_json::to_value(&report).expect("report should serialize");
    assert_eq!(json["owner"], "Person");
    assert_eq!(json["outcomes"], serde_json::json!([]));
    assert_eq!(json["diagnostics"][0]["severity"], "error");
    assert_eq!(json["diagnostics"][0]["code"], "FXSETTER_UNSUPPORTED_PLACEMENT");
}

#[test]
fn nested_owner_renders_with_its_injected_setter() {
    let mut unit = unit();
    let mut settings: fxgen_hir::TypeDecl = serde_json::from_str(
        r#"{
          "name": "Settings",
          "fields": [{ "name": "zoom", "ty": { "named": "DoubleProperty" }, "is_final": true }],
          "methods": [
            {
              "name": "reset",
              "body": { "stmts": [{ "raw": "zoom.set(1);" }, { "block": { "stmts": [] } }] }
            }
          ]
        }"#,
    )
    .expect("nested type should deserialize");
    settings.fields[0].javadoc = Some("Zoom factor.".into());
    unit.types[0].nested_types.push(settings);

    let config = FxConfig::default();
    let reports = FieldSetterGenerator::new(&config).process_unit(
        &mut unit,
        &[SetterOccurrence::on_field("Person.Settings", "zoom").with_level(AccessLevel::Private)],
    );
    assert!(reports[0].diagnostics.is_empty());

    let settings = unit.type_decl("Person.Settings").expect("nested type should exist");
    assert_eq!(
        print_type(settings),
        "class Settings {\n    /**\n     * Zoom factor.\n     */\n    final DoubleProperty zoom;\n\n    void reset() {\n        zoom.set(1);\n        {\n        }\n    }\n\n    /**\n     * Zoom factor.\n     */\n    private final void setZoom(double zoom) {\n    }\n}\n"
    );
}
