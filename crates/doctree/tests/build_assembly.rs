//! End-to-end model construction over metadata records and dumps.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use doctree::{
    AssemblyModel, AssemblyModelBuilder, BuildError, BuildOptions, LibraryInfo, MemberKind,
    MetadataDocument, NamespacePolicy, TreeError, TypeCategory, TypeModel, TypeRecord,
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{}.json", name))
}

fn library() -> LibraryInfo {
    LibraryInfo {
        name: "Sample".to_string(),
        version: "1.0.0".to_string(),
        description: None,
        distribution: false,
    }
}

fn scenario() -> Vec<TypeRecord> {
    vec![
        TypeRecord::new("Widget", Some("A.B"), TypeCategory::Class),
        TypeRecord::new("Gadget", Some("A.B.C"), TypeCategory::Struct),
        TypeRecord::new("Loose", None, TypeCategory::Interface),
    ]
}

fn build(types: &[TypeRecord]) -> AssemblyModel {
    let report = AssemblyModelBuilder::default()
        .build(&library(), types)
        .unwrap();
    assert!(report.is_complete(), "unexpected failures: {:?}", report.failures);
    report.assembly
}

/// Order-insensitive view of the tree: pattern -> (child patterns, type names).
fn shape(assembly: &AssemblyModel) -> BTreeMap<String, (BTreeSet<String>, BTreeSet<String>)> {
    assembly
        .walk()
        .into_iter()
        .map(|(_, node)| {
            let children = assembly
                .children(node)
                .map(|child| child.pattern.clone())
                .collect();
            let types = node
                .classes
                .iter()
                .map(|t| &t.header)
                .chain(node.interfaces.iter().map(|t| &t.header))
                .chain(node.structs.iter().map(|t| &t.header))
                .chain(node.enums.iter().map(|t| &t.header))
                .map(|h| h.full_name.clone())
                .collect();
            (node.pattern.clone(), (children, types))
        })
        .collect()
}

#[test]
fn test_scenario_tree_shape() {
    let assembly = build(&scenario());

    let roots: Vec<_> = assembly.namespaces().map(|n| n.pattern.as_str()).collect();
    assert_eq!(roots, vec!["A", ""]);

    let a = assembly.find("A").unwrap();
    assert_eq!(a.type_count(), 0);
    let ab = assembly.children(a).next().unwrap();
    assert_eq!(ab.pattern, "A.B");
    assert_eq!(ab.classes[0].header.name, "Widget");

    let abc = assembly.children(ab).next().unwrap();
    assert_eq!(abc.pattern, "A.B.C");
    assert_eq!(abc.structs[0].header.name, "Gadget");

    let global = assembly.global().unwrap();
    assert_eq!(global.interfaces[0].header.name, "Loose");
    assert_eq!(assembly.namespace_count(), 4);
}

#[test]
fn test_reverse_order_is_isomorphic() {
    let forward = build(&scenario());
    let mut reversed = scenario();
    reversed.reverse();
    let backward = build(&reversed);

    assert_eq!(shape(&forward), shape(&backward));
    assert_eq!(forward.namespace_count(), backward.namespace_count());
}

#[test]
fn test_permutations_give_same_shape() {
    let mut types = scenario();
    types.extend([
        TypeRecord::new("Other", Some("A.D"), TypeCategory::Class),
        TypeRecord::new("Core", Some("X.Core"), TypeCategory::Class),
        TypeRecord::new("Core", Some("Y.Core"), TypeCategory::Struct),
        TypeRecord::new("Color", Some("A"), TypeCategory::Enum).value("Red", 0),
    ]);
    let expected = shape(&build(&types));

    for _ in 0..types.len() {
        types.rotate_left(3);
        assert_eq!(shape(&build(&types)), expected);
    }
}

#[test]
fn test_single_global_namespace() {
    let types: Vec<_> = (0..5)
        .map(|i| TypeRecord::new(format!("Loose{i}"), None, TypeCategory::Class))
        .chain([TypeRecord::new("Blank", Some(""), TypeCategory::Interface)])
        .collect();
    let assembly = build(&types);

    let globals: Vec<_> = assembly.namespaces().filter(|n| n.is_global()).collect();
    assert_eq!(globals.len(), 1);
    assert_eq!(globals[0].classes.len(), 5);
    assert_eq!(globals[0].interfaces.len(), 1);
}

#[test]
fn test_fixture_failures_are_isolated() {
    let document = MetadataDocument::load(&fixture("sample")).unwrap();
    let report = AssemblyModelBuilder::default()
        .build_document(&document)
        .unwrap();

    assert_eq!(report.failures.len(), 2);
    let failure = &report.failures[0];
    assert_eq!(failure.type_name, "A.B.Broken");
    assert!(matches!(failure.error, BuildError::MetadataUnavailable { .. }));
    let failure = &report.failures[1];
    assert_eq!(failure.type_name, "A.BrokenFlags");
    assert!(matches!(
        &failure.error,
        BuildError::MetadataUnavailable { type_name, .. } if type_name == "A.BrokenFlags"
    ));

    let assembly = &report.assembly;
    assert_eq!(assembly.name, "Sample");
    assert_eq!(assembly.description.as_deref(), Some("Widgets and gadgets"));
    assert!(assembly.distribution);
    assert_eq!(assembly.type_count(), 4);

    let widget = &assembly.find("A.B").unwrap().classes;
    assert_eq!(widget.len(), 1);
    let methods: Vec<_> = widget[0].methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["Spin"]);
    assert_eq!(widget[0].fields[0].name, "count");

    let gadget = &assembly.find("A.B.C").unwrap().structs[0];
    assert!(gadget.fields[0].is_static);
    assert!(gadget.methods.is_empty());

    let color = &assembly.find("A").unwrap().enums[0];
    assert_eq!(color.values.len(), 3);
    assert_eq!(color.values[&2], "Blue");
}

#[test]
fn test_fail_fast_returns_first_failure() {
    let document = MetadataDocument::load(&fixture("sample")).unwrap();
    let builder = AssemblyModelBuilder::new(BuildOptions {
        fail_fast: true,
        ..BuildOptions::default()
    });

    let err = builder.build_document(&document).unwrap_err();
    match err {
        BuildError::MetadataUnavailable { type_name, .. } => assert_eq!(type_name, "A.B.Broken"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unfiltered_build_keeps_base_members() {
    let document = MetadataDocument::load(&fixture("sample")).unwrap();
    let builder = AssemblyModelBuilder::new(BuildOptions {
        filter_base_members: false,
        ..BuildOptions::default()
    });
    let report = builder.build_document(&document).unwrap();

    let widget = &report.assembly.find("A.B").unwrap().classes[0];
    let methods: Vec<_> = widget.methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(methods, vec!["Spin", "ToString", "GetType"]);
}

#[test]
fn test_duplicate_type_is_reported() {
    let types = vec![
        TypeRecord::new("Widget", Some("A.B"), TypeCategory::Class),
        TypeRecord::new("Widget", Some("A.B"), TypeCategory::Class)
            .member(MemberKind::Method, "Spin"),
    ];
    let report = AssemblyModelBuilder::default()
        .build(&library(), &types)
        .unwrap();

    assert_eq!(report.assembly.type_count(), 1);
    assert!(report.assembly.find("A.B").unwrap().classes[0].methods.is_empty());
    assert!(matches!(
        report.failures[0].error,
        BuildError::Tree(TreeError::DuplicateAttachment { .. })
    ));
}

#[test]
fn test_malformed_namespace_policy() {
    let types = vec![
        TypeRecord::new("Widget", Some("Foo..Bar"), TypeCategory::Class),
        TypeRecord::new("Gadget", Some("Foo.Bar"), TypeCategory::Struct),
    ];

    let rejected = AssemblyModelBuilder::default()
        .build(&library(), &types)
        .unwrap();
    assert_eq!(rejected.failures.len(), 1);
    assert_eq!(rejected.failures[0].type_name, "Foo..Bar.Widget");
    assert!(matches!(
        rejected.failures[0].error,
        BuildError::Tree(TreeError::MalformedNamespace { .. })
    ));

    let collapsed = AssemblyModelBuilder::new(BuildOptions {
        namespace_policy: NamespacePolicy::Collapse,
        ..BuildOptions::default()
    })
    .build(&library(), &types)
    .unwrap();
    assert!(collapsed.is_complete());
    let node = collapsed.assembly.find("Foo.Bar").unwrap();
    assert_eq!(node.classes.len(), 1);
    assert_eq!(node.structs.len(), 1);
    assert_eq!(node.classes[0].header.namespace, "Foo.Bar");
    assert_eq!(node.classes[0].header.full_name, "Foo.Bar.Widget");
}

#[test]
fn test_document_parsed_with_serde_builds() {
    let input = r#"{
        "library": { "name": "Plain", "version": "2.0.0" },
        "types": [
            { "name": "Widget", "namespace": "A", "category": "class",
              "members": [{ "kind": "method", "name": "Spin" }] },
            { "name": "Gadget", "namespace": "A.B", "category": "struct" }
        ]
    }"#;
    let document: MetadataDocument = serde_json::from_str(input).unwrap();
    let report = AssemblyModelBuilder::default()
        .build_document(&document)
        .unwrap();

    assert!(report.is_complete());
    let widget = &report.assembly.find("A").unwrap().classes[0];
    assert_eq!(widget.header.full_name, "A.Widget");
    assert_eq!(widget.methods[0].name, "Spin");
    let gadget = &report.assembly.find("A.B").unwrap().structs[0];
    assert_eq!(gadget.header.full_name, "A.B.Gadget");
}

#[test]
fn test_enum_model_round_trip() {
    let types = vec![
        TypeRecord::new("Color", Some("Paint"), TypeCategory::Enum)
            .value("Red", 0)
            .value("Green", 1)
            .value("Blue", 2),
    ];
    let report = AssemblyModelBuilder::default()
        .build(&library(), &types)
        .unwrap();

    let color = &report.assembly.find("Paint").unwrap().enums[0];
    let values: Vec<_> = color.values.iter().map(|(k, v)| (*k, v.as_str())).collect();
    assert_eq!(values, vec![(0, "Red"), (1, "Green"), (2, "Blue")]);

    let model = TypeModel::Enum(color.clone());
    assert_eq!(model.member_count(), 3);
}
