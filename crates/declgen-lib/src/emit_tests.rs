use indoc::indoc;

use crate::ast::{DeclKind, Declaration, Modifier, TypeRef};
use crate::config::GeneratorConfig;
use crate::diagnostics::Diagnostics;
use crate::emit::Emitter;
use crate::registry::TypeRegistry;

fn decl(kind: DeclKind, identifier: &str) -> Declaration {
    Declaration {
        kind,
        identifier: identifier.into(),
        modifiers: Vec::new(),
        attributes: Vec::new(),
        type_parameters: Vec::new(),
        base_types: Vec::new(),
        members: Vec::new(),
        ty: None,
        value: None,
    }
}

fn namespace(name: &str, members: Vec<Declaration>) -> Declaration {
    Declaration {
        members,
        ..decl(DeclKind::Namespace, name)
    }
}

fn class(name: &str, members: Vec<Declaration>) -> Declaration {
    Declaration {
        members,
        ..decl(DeclKind::Class, name)
    }
}

fn prop(name: &str, ty: TypeRef, modifiers: Vec<Modifier>) -> Declaration {
    Declaration {
        modifiers,
        ty: Some(ty),
        ..decl(DeclKind::Property, name)
    }
}

fn public_prop(name: &str, ty: TypeRef) -> Declaration {
    prop(name, ty, vec![Modifier::Public])
}

fn enum_member(name: &str, value: Option<&str>) -> Declaration {
    Declaration {
        value: value.map(str::to_string),
        ..decl(DeclKind::EnumMember, name)
    }
}

fn prim(keyword: &str) -> TypeRef {
    TypeRef::Primitive {
        keyword: keyword.into(),
    }
}

fn ident(name: &str) -> TypeRef {
    TypeRef::Identifier { name: name.into() }
}

/// Run both passes over the given files and return the concatenated
/// emission output plus the diagnostics.
fn generate(config: GeneratorConfig, files: &[Vec<Declaration>]) -> (String, Diagnostics) {
    let mut registry = TypeRegistry::new(&config);
    let mut diagnostics = Diagnostics::new();

    for file in files {
        let mut pass1 = Emitter::discovery(&mut registry, &mut diagnostics);
        pass1.process_all(file);
    }

    let mut output = String::new();
    for file in files {
        let mut pass2 = Emitter::emission(&mut registry, &mut diagnostics, false);
        pass2.process_all(file);
        output.push_str(&pass2.into_output());
    }

    (output, diagnostics)
}

#[test]
fn end_to_end_class_in_namespace() {
    let file = vec![namespace(
        "App",
        vec![class(
            "Foo",
            vec![
                public_prop("A", prim("int")),
                public_prop("B", prim("string")),
                prop("C", prim("bool"), vec![Modifier::Private]),
            ],
        )],
    )];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert_eq!(
        output,
        indoc! {"
            declare module App {
               export interface Foo {
                  a : number;
                  b : string;
               }

            }

        "}
    );
    assert!(diags.is_empty());
}

#[test]
fn enum_auto_increment_resumes_from_explicit_value() {
    let file = vec![namespace(
        "App",
        vec![Declaration {
            members: vec![
                enum_member("A", None),
                enum_member("B", None),
                enum_member("C", Some("10")),
                enum_member("D", None),
            ],
            ..decl(DeclKind::Enum, "Color")
        }],
    )];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert_eq!(
        output,
        indoc! {"
            declare module App {
               export enum Color {
                  A = 0,
                  B = 1,
                  C = 10,
                  D = 11
               }

            }

        "}
    );
    assert!(diags.is_empty());
}

#[test]
fn enum_value_at_integer_maximum_saturates() {
    let max = i64::MAX.to_string();
    let file = vec![namespace(
        "App",
        vec![Declaration {
            members: vec![enum_member("Top", Some(&max)), enum_member("Past", None)],
            ..decl(DeclKind::Enum, "Limit")
        }],
    )];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.contains(&format!("Top = {max},")));
    // The counter pins at the maximum instead of wrapping.
    assert!(output.contains(&format!("Past = {max}\n")));
    assert!(diags.is_empty());
}

#[test]
fn empty_type_is_suppressed_and_unresolvable() {
    let empty = class(
        "Ghost",
        vec![
            prop("Hidden", prim("int"), vec![Modifier::Private]),
            decl(DeclKind::Method, "DoWork"),
        ],
    );
    let user = class("User", vec![public_prop("Ghost", ident("Ghost"))]);
    let file = vec![namespace("App", vec![empty, user])];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert!(!output.contains("interface Ghost"));
    // The reference falls back to the unknown marker with a warning.
    assert!(output.contains("ghost : any;"));
    assert_eq!(diags.warning_count(), 1);
}

#[test]
fn class_requires_explicitly_public_properties() {
    let file = vec![namespace(
        "App",
        vec![class(
            "Foo",
            vec![
                public_prop("Shown", prim("int")),
                prop("Implicit", prim("int"), Vec::new()),
                prop("Inner", prim("int"), vec![Modifier::Internal]),
            ],
        )],
    )];

    let (output, _) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.contains("shown : number;"));
    assert!(!output.contains("implicit"));
    assert!(!output.contains("inner"));
}

#[test]
fn interfaces_and_structs_accept_implicit_visibility() {
    for kind in [DeclKind::Interface, DeclKind::Struct] {
        let file = vec![namespace(
            "App",
            vec![Declaration {
                members: vec![
                    prop("Implicit", prim("int"), Vec::new()),
                    prop("Hidden", prim("int"), vec![Modifier::Private]),
                ],
                ..decl(kind, "Shape")
            }],
        )];

        let (output, _) = generate(GeneratorConfig::default(), &[file]);
        assert!(output.contains("implicit : number;"), "kind {kind:?}");
        assert!(!output.contains("hidden"), "kind {kind:?}");
    }
}

#[test]
fn nullable_property_gets_optional_marker() {
    let file = vec![namespace(
        "App",
        vec![class(
            "Foo",
            vec![public_prop(
                "Age",
                TypeRef::Nullable {
                    inner: Box::new(prim("int")),
                },
            )],
        )],
    )];

    let (output, _) = generate(GeneratorConfig::default(), &[file]);
    assert!(output.contains("age? : number;"));
}

#[test]
fn extends_clause_drops_unknown_bases() {
    let base = class("Base", vec![public_prop("Id", prim("int"))]);
    let derived = Declaration {
        base_types: vec![ident("Base"), ident("Vanished")],
        ..class("Derived", vec![public_prop("Name", prim("string"))])
    };
    let file = vec![namespace("App", vec![base, derived])];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.contains("export interface Derived extends App.Base {"));
    // One warning for the dropped unresolvable base.
    assert_eq!(diags.warning_count(), 1);
}

#[test]
fn all_unknown_bases_omit_extends_entirely() {
    let derived = Declaration {
        base_types: vec![ident("Vanished")],
        ..class("Derived", vec![public_prop("Name", prim("string"))])
    };
    let file = vec![namespace("App", vec![derived])];

    let (output, _) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.contains("export interface Derived {"));
    assert!(!output.contains("extends"));
}

#[test]
fn forward_references_resolve_across_files() {
    let first = vec![namespace(
        "App",
        vec![class("Uses", vec![public_prop("Later", ident("Later"))])],
    )];
    let second = vec![namespace(
        "Lib",
        vec![class("Later", vec![public_prop("Id", prim("int"))])],
    )];

    let (output, diags) = generate(GeneratorConfig::default(), &[first, second]);

    assert!(output.contains("later : Lib.Later;"));
    assert!(diags.is_empty());
}

#[test]
fn namespace_override_renders_all_modules_under_one_name() {
    let config = GeneratorConfig {
        default_namespace: Some("O".into()),
        ..GeneratorConfig::default()
    };
    let first = vec![namespace(
        "A",
        vec![class("Foo", vec![public_prop("Id", prim("int"))])],
    )];
    let second = vec![namespace(
        "B",
        vec![class("Bar", vec![public_prop("Id", prim("int"))])],
    )];

    let (output, diags) = generate(config, &[first, second]);

    assert_eq!(output.matches("declare module O {").count(), 2);
    assert!(output.contains("export interface Foo {"));
    assert!(output.contains("export interface Bar {"));
    assert!(diags.is_empty());
}

#[test]
fn excluded_type_emits_nothing_and_references_fall_back() {
    let config = GeneratorConfig {
        excluded: vec!["Secret".into()],
        ..GeneratorConfig::default()
    };
    let secret = class("Secret", vec![public_prop("Key", prim("string"))]);
    let user = class("User", vec![public_prop("Secret", ident("Secret"))]);
    let file = vec![namespace("App", vec![secret, user])];

    let (output, diags) = generate(config, &[file]);

    assert!(!output.contains("interface Secret"));
    assert!(output.contains("secret : any;"));
    assert!(diags.is_empty());
}

#[test]
fn exclusion_dominates_known_types() {
    let config = GeneratorConfig {
        excluded: vec!["Shared".into()],
        known_types: vec!["Shared".into()],
        ..GeneratorConfig::default()
    };
    let shared = class("Shared", vec![public_prop("Id", prim("int"))]);
    let user = class("User", vec![public_prop("Shared", ident("Shared"))]);
    let file = vec![namespace("App", vec![shared, user])];

    let (output, diags) = generate(config, &[file]);

    // A name listed as both known and excluded is never emitted.
    assert!(!output.contains("interface Shared"));
    assert!(output.contains("shared : any;"));
    assert!(diags.is_empty());
}

#[test]
fn excluded_attribute_suppresses_type_and_property() {
    let config = GeneratorConfig {
        excluded_attributes: vec!["JsonIgnore".into()],
        ..GeneratorConfig::default()
    };
    let skipped = Declaration {
        attributes: vec!["JsonIgnore".into()],
        ..class("Skipped", vec![public_prop("Id", prim("int"))])
    };
    let partial = class(
        "Partial",
        vec![
            public_prop("Kept", prim("int")),
            Declaration {
                attributes: vec!["JsonIgnore".into()],
                ..public_prop("Dropped", prim("int"))
            },
        ],
    );
    let file = vec![namespace("App", vec![skipped, partial])];

    let (output, _) = generate(config, &[file]);

    assert!(!output.contains("interface Skipped"));
    assert!(output.contains("kept : number;"));
    assert!(!output.contains("dropped"));
}

#[test]
fn nested_classes_are_walked() {
    let inner = class("Inner", vec![public_prop("Id", prim("int"))]);
    let outer = class("Outer", vec![public_prop("Name", prim("string")), inner]);
    let file = vec![namespace("App", vec![outer])];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.contains("export interface Outer {"));
    assert!(output.contains("export interface Inner {"));
    assert!(diags.is_empty());
}

#[test]
fn unknown_kinds_log_and_skip() {
    let file = vec![decl(DeclKind::Unknown, "Mystery")];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.is_empty());
    // Once per pass over the same node.
    assert_eq!(diags.warning_count(), 2);
}

#[test]
fn empty_namespace_is_skipped_entirely() {
    let file = vec![namespace("App", Vec::new())];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.is_empty());
    assert!(diags.is_empty());
}

#[test]
fn generic_type_headers_carry_parameters() {
    let file = vec![namespace(
        "App",
        vec![Declaration {
            type_parameters: vec!["T".into()],
            ..class("Box", vec![public_prop("Value", ident("T"))])
        }],
    )];

    let (output, diags) = generate(GeneratorConfig::default(), &[file]);

    assert!(output.contains("export interface Box<T> {"));
    assert!(output.contains("value : T;"));
    assert!(diags.is_empty());
}
