use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use doctree::{
    AssemblyModelBuilder, BuildOptions, LibraryInfo, MemberKind, NamespaceTree, TypeCategory,
    TypeRecord, get_renderer,
};

fn library() -> LibraryInfo {
    LibraryInfo {
        name: "Synthetic".to_string(),
        version: "1.0.0".to_string(),
        description: None,
        distribution: false,
    }
}

/// `count` types spread over a three-level namespace hierarchy.
fn synthetic_types(count: usize) -> Vec<TypeRecord> {
    (0..count)
        .map(|i| {
            let namespace = format!("Root.Area{}.Feature{}", i % 8, i % 64);
            let category = match i % 4 {
                0 => TypeCategory::Interface,
                1 => TypeCategory::Struct,
                _ => TypeCategory::Class,
            };
            let mut record = TypeRecord::new(format!("Type{i}"), Some(namespace.as_str()), category)
                .member(MemberKind::Constructor, ".ctor")
                .inherited(MemberKind::Method, "ToString", "System.Object")
                .inherited(MemberKind::Method, "GetHashCode", "System.Object");
            for m in 0..8 {
                record = record
                    .member(MemberKind::Property, format!("Prop{m}"))
                    .member(MemberKind::Method, format!("Method{m}"));
            }
            record
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly_build");
    for count in [100, 1_000, 10_000] {
        let types = synthetic_types(count);
        for parallel in [false, true] {
            let builder = AssemblyModelBuilder::new(BuildOptions {
                parallel,
                ..BuildOptions::default()
            });
            let label = if parallel { "parallel" } else { "sequential" };
            group.bench_with_input(BenchmarkId::new(label, count), &types, |b, types| {
                b.iter(|| {
                    let report = builder.build(&library(), black_box(types)).unwrap();
                    black_box(report);
                })
            });
        }
    }
    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let namespaces: Vec<String> = (0..1_000)
        .map(|i| format!("Root.Area{}.Feature{}.Part{}", i % 8, i % 64, i % 5))
        .collect();

    c.bench_function("namespace_resolve", |b| {
        b.iter(|| {
            let mut tree = NamespaceTree::new();
            for namespace in &namespaces {
                black_box(tree.resolve(namespace).unwrap());
            }
            black_box(tree.len());
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let report = AssemblyModelBuilder::default()
        .build(&library(), &synthetic_types(1_000))
        .unwrap();
    let markdown = get_renderer("markdown").unwrap();

    c.bench_function("render_markdown", |b| {
        b.iter(|| black_box(markdown.render(&report.assembly).unwrap()))
    });
}

criterion_group!(benches, bench_build, bench_resolve, bench_render);
criterion_main!(benches);
