//! End-to-end generation against the real filesystem.

use std::path::Path;
use std::sync::Arc;

use opsample_adapters::{
    BuiltinScaffolder, LocalFilesystem, ProcessRunner, SampleCatalog, scaffold::BUILTIN_PROGRAM,
};
use opsample_core::{
    application::{
        AnchorInserter, ApplicationError, GenerateOptions, GenerationService, ScaffoldInvoker,
        StepPipeline, WorkspacePreparer, ports::Filesystem,
    },
    domain::{AnchorInsertion, GenerationStep, StepPlan},
    error::SampleError,
};
use tempfile::TempDir;

fn service() -> GenerationService {
    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    GenerationService::new(
        fs.clone(),
        Arc::new(BuiltinScaffolder::new(fs)),
        Arc::new(ProcessRunner::new()),
    )
    .with_program(BUILTIN_PROGRAM)
}

fn skip_verify() -> GenerateOptions {
    GenerateOptions {
        skip_verify: true,
        ..Default::default()
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn memcached_sample_generates_end_to_end() {
    let out = TempDir::new().unwrap();
    let catalog = SampleCatalog::builtin().unwrap();
    let sample = catalog.find("memcached").unwrap();

    let report = service()
        .generate(sample, out.path(), &skip_verify())
        .unwrap();

    let ws = out
        .path()
        .join("quarkus")
        .join("quarkus-memcached-operator");
    assert_eq!(report.workspace, ws);
    assert_eq!(report.steps.len(), 9);
    assert!(!report.verified);

    let java = ws.join("src/main/java/com/example");
    let reconciler = read(&java.join("MemcachedReconciler.java"));
    let spec = read(&java.join("MemcachedSpec.java"));
    let status = read(&java.join("MemcachedStatus.java"));
    let pom = read(&ws.join("pom.xml"));

    // Each payload lands exactly once.
    for (text, needle) in [
        (&reconciler, "private Deployment createMemcachedDeployment(Memcached m)"),
        (&reconciler, "int requiredReplicas = resource.getSpec().getSize();"),
        (&reconciler, "import org.apache.commons.collections.CollectionUtils;"),
        (&spec, "private Integer size;"),
        (&status, "private List<String> nodes;"),
        (&status, "import java.util.ArrayList;"),
        (&pom, "<artifactId>commons-collections</artifactId>"),
    ] {
        assert_eq!(text.matches(needle).count(), 1, "expected one `{needle}`");
    }

    // Imports follow the anchor line; helpers precede reconcile().
    let anchor_line = "import io.javaoperatorsdk.operator.api.reconciler.UpdateControl;";
    let anchor = reconciler.find(anchor_line).unwrap();
    let imports = reconciler
        .find("import io.fabric8.kubernetes.api.model.ContainerBuilder;")
        .unwrap();
    let helpers = reconciler.find("labelsForMemcached(Memcached m)").unwrap();
    let reconcile = reconciler
        .find("public UpdateControl<Memcached> reconcile(")
        .unwrap();
    assert!(anchor < imports && imports < helpers && helpers < reconcile);

    let status_head = "package com.example;\n\nimport java.util.ArrayList;";
    assert!(status.starts_with(status_head));

    let micrometer = pom.find("quarkus-micrometer-registry-prometheus").unwrap();
    let collections = pom.find("commons-collections").unwrap();
    assert!(micrometer < collections);
}

#[test]
fn regenerating_replaces_previous_output() {
    let out = TempDir::new().unwrap();
    let catalog = SampleCatalog::builtin().unwrap();
    let sample = catalog.find("memcached").unwrap();

    service()
        .generate(sample, out.path(), &skip_verify())
        .unwrap();
    let ws = out.path().join("quarkus/quarkus-memcached-operator");
    std::fs::write(ws.join("stray.txt"), "left over").unwrap();

    service()
        .generate(sample, out.path(), &skip_verify())
        .unwrap();

    assert!(!ws.join("stray.txt").exists());
    let spec = read(&ws.join("src/main/java/com/example/MemcachedSpec.java"));
    assert_eq!(spec.matches("private Integer size;").count(), 1);
}

#[cfg(unix)]
#[test]
fn failed_verification_keeps_previous_workspace_on_request() {
    use opsample_core::domain::CommandSpec;

    let out = TempDir::new().unwrap();
    let catalog = SampleCatalog::builtin().unwrap();
    let sample = catalog.find("memcached").unwrap();
    let ws = out.path().join("quarkus/quarkus-memcached-operator");
    std::fs::create_dir_all(&ws).unwrap();
    std::fs::write(ws.join("previous.txt"), "good run").unwrap();

    let options = GenerateOptions {
        keep_previous_on_failure: true,
        build: Some(CommandSpec::new("sh", ["-c", "echo compile error; exit 1"])),
        ..Default::default()
    };
    let err = service()
        .generate(sample, out.path(), &options)
        .unwrap_err();

    match &err {
        SampleError::Application(ApplicationError::Build { output, .. }) => {
            assert!(output.contains("compile error"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(read(&ws.join("previous.txt")), "good run");
    assert!(!ws.join("pom.xml").exists());
}

#[test]
fn insert_after_unique_anchor_preserves_other_bytes() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Reconciler.txt");
    std::fs::write(&path, "before\n// TODO fill\nafter\n").unwrap();

    AnchorInserter::new(Arc::new(LocalFilesystem::new()))
        .insert_after_anchor(&path, "// TODO fill", "\nINSERTED\n")
        .unwrap();

    assert_eq!(read(&path), "before\n// TODO fill\nINSERTED\n\nafter\n");
}

#[test]
fn missing_anchor_leaves_file_byte_identical() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Spec.java");
    let original = "class Spec {\n    // add spec information here\n}\n";
    std::fs::write(&path, original).unwrap();

    let err = AnchorInserter::new(Arc::new(LocalFilesystem::new()))
        .insert_after_anchor(&path, "// Add Spec information here", "\nint x;")
        .unwrap_err();

    match err {
        SampleError::Application(ApplicationError::AnchorNotFound {
            near_miss_line, ..
        }) => assert_eq!(near_miss_line, Some(2)),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(read(&path), original);
}

#[test]
fn prepare_twice_leaves_empty_directory() {
    let out = TempDir::new().unwrap();
    let ws = out.path().join("a/b/ws");
    let preparer = WorkspacePreparer::new(Arc::new(LocalFilesystem::new()));

    preparer.prepare(&ws).unwrap();
    std::fs::write(ws.join("f"), "x").unwrap();
    preparer.prepare(&ws).unwrap();
    preparer.prepare(&ws).unwrap();

    assert!(ws.is_dir());
    assert_eq!(std::fs::read_dir(&ws).unwrap().count(), 0);
}

#[test]
fn prepare_over_regular_file_fails() {
    let out = TempDir::new().unwrap();
    let clash = out.path().join("ws");
    std::fs::write(&clash, "not a dir").unwrap();

    let preparer = WorkspacePreparer::new(Arc::new(LocalFilesystem::new()));
    assert!(preparer.prepare(&clash).is_err());
}

#[test]
fn second_step_failure_stops_pipeline() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("one.txt"), "// one\n").unwrap();
    std::fs::write(dir.path().join("three.txt"), "// three\n").unwrap();

    let fs: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let step = |name: &str, file: &str, anchor: &str| {
        GenerationStep::insert(
            name,
            name,
            AnchorInsertion::new(file, anchor, "\nadded").unwrap(),
        )
    };
    let plan = StepPlan::new(vec![
        step("first", "one.txt", "// one"),
        step("second", "one.txt", "// absent"),
        step("third", "three.txt", "// three"),
    ])
    .unwrap();

    let pipeline = StepPipeline::new(
        AnchorInserter::new(fs.clone()),
        ScaffoldInvoker::new(Arc::new(BuiltinScaffolder::new(fs))),
    );
    let err = pipeline.run(dir.path(), &plan).unwrap_err();

    assert_eq!(err.failed_step(), Some("second"));
    assert!(err.to_string().contains("step 2"));
    assert_eq!(read(&dir.path().join("one.txt")), "// one\nadded\n");
    assert_eq!(read(&dir.path().join("three.txt")), "// three\n");
}
