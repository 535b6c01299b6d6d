//! Self-contained Quarkus operator skeleton producer.
//!
//! Understands the same command line as the operator-sdk Quarkus plugin
//! (`init` and `create api`) and writes the project through the
//! `Filesystem` port.

use std::path::Path;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info, instrument};

use opsample_core::{
    application::{ApplicationError, ExecutionContext, ports::Filesystem, ports::ScaffoldEngine},
    domain::GroupVersionKind,
    error::{SampleError, SampleResult},
};

use super::quarkus_templates as tpl;

/// Program name the builtin engine expects as argv[0].
pub const PROGRAM: &str = "java-sample-cli";

const PROJECT_FILE: &str = "PROJECT";
const PLUGIN_KEY: &str = "quarkus.javaoperatorsdk.io";

#[derive(Debug, Parser)]
#[command(name = PROGRAM, disable_help_subcommand = true)]
struct ScaffoldCli {
    #[command(subcommand)]
    command: ScaffoldCommand,
}

#[derive(Debug, Subcommand)]
enum ScaffoldCommand {
    /// Initialize a new project
    Init(InitArgs),
    /// Scaffold a Kubernetes resource
    Create {
        #[command(subcommand)]
        what: CreateCommand,
    },
}

#[derive(Debug, Subcommand)]
enum CreateCommand {
    /// Scaffold a Kubernetes API
    Api(ApiArgs),
}

#[derive(Debug, Args)]
struct InitArgs {
    #[arg(long)]
    plugins: String,
    #[arg(long)]
    domain: String,
    #[arg(long = "project-name")]
    project_name: String,
}

#[derive(Debug, Args)]
struct ApiArgs {
    #[arg(long)]
    plugins: String,
    #[arg(long)]
    group: String,
    #[arg(long)]
    version: String,
    #[arg(long)]
    kind: String,
}

/// Values read back from a `PROJECT` descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectDescriptor {
    domain: String,
    project_name: String,
}

impl ProjectDescriptor {
    fn parse(text: &str) -> Option<Self> {
        let value = |key: &str| {
            text.lines()
                .filter(|l| !l.starts_with(' ') && !l.starts_with('-'))
                .find_map(|l| l.strip_prefix(key)?.strip_prefix(':'))
                .map(|v| v.trim().trim_matches('"').to_string())
                .filter(|v| !v.is_empty())
        };
        Some(Self {
            domain: value("domain")?,
            project_name: value("projectName")?,
        })
    }
}

/// Scaffold engine backed by templates compiled into the binary.
pub struct BuiltinScaffolder {
    fs: Arc<dyn Filesystem>,
}

impl BuiltinScaffolder {
    pub fn new(fs: Arc<dyn Filesystem>) -> Self {
        Self { fs }
    }

    /// Parse `args` (program name first) and scaffold under `root`.
    #[instrument(skip_all, fields(root = %root.display()))]
    pub fn run_args(&self, root: &Path, args: &[String]) -> SampleResult<()> {
        let cli = ScaffoldCli::try_parse_from(args)
            .map_err(|e| failure(&subcommand_of(args), e.to_string().trim_end()))?;

        match cli.command {
            ScaffoldCommand::Init(init) => self.init(root, &init),
            ScaffoldCommand::Create {
                what: CreateCommand::Api(api),
            } => self.create_api(root, &api),
        }
    }

    fn init(&self, root: &Path, args: &InitArgs) -> SampleResult<()> {
        check_plugin("init", &args.plugins)?;

        let descriptor = root.join(PROJECT_FILE);
        if self.fs.exists(&descriptor) {
            return Err(failure("init", "a PROJECT file already exists in this directory"));
        }

        let package = tpl::package_for_domain(&args.domain);
        let vars = [
            ("domain", args.domain.as_str()),
            ("project_name", args.project_name.as_str()),
            ("package", package.as_str()),
        ];

        let files = [
            (PROJECT_FILE, tpl::PROJECT),
            ("pom.xml", tpl::POM),
            ("Makefile", tpl::MAKEFILE),
            (".gitignore", tpl::GITIGNORE),
            (
                "src/main/resources/application.properties",
                tpl::APPLICATION_PROPERTIES,
            ),
        ];
        for (rel, template) in files {
            self.write(root, rel, &tpl::render(template, &vars))?;
        }

        info!(project = %args.project_name, "Project initialized");
        Ok(())
    }

    fn create_api(&self, root: &Path, args: &ApiArgs) -> SampleResult<()> {
        check_plugin("create api", &args.plugins)?;
        let gvk = GroupVersionKind::new(&args.group, &args.version, &args.kind)?;

        let descriptor_path = root.join(PROJECT_FILE);
        if !self.fs.exists(&descriptor_path) {
            return Err(failure("create api", "no PROJECT file found; run `init` first"));
        }
        let descriptor_text = self.fs.read_to_string(&descriptor_path)?;
        let project = ProjectDescriptor::parse(&descriptor_text)
            .ok_or_else(|| failure("create api", "PROJECT lacks domain or projectName"))?;

        if descriptor_text.contains(&format!("  kind: {}\n", gvk.kind())) {
            return Err(failure("create api", &format!("resource {} already exists", gvk)));
        }

        let package = tpl::package_for_domain(&project.domain);
        let vars = [
            ("domain", project.domain.as_str()),
            ("project_name", project.project_name.as_str()),
            ("package", package.as_str()),
            ("group", gvk.group()),
            ("version", gvk.version()),
            ("kind", gvk.kind()),
        ];

        let mut updated = descriptor_text.clone();
        let header = tpl::RESOURCES_HEADER.trim_end();
        if !updated.lines().any(|l| l == header) {
            updated.push_str(tpl::RESOURCES_HEADER);
        }
        updated.push_str(&tpl::render(tpl::PROJECT_RESOURCE, &vars));
        self.fs.write_file(&descriptor_path, &updated)?;

        let java_dir = format!("src/main/java/{}", package.replace('.', "/"));
        let sources = [
            ("", tpl::RESOURCE),
            ("Spec", tpl::SPEC),
            ("Status", tpl::STATUS),
            ("Reconciler", tpl::RECONCILER),
        ];
        for (suffix, template) in sources {
            let rel = format!("{}/{}{}.java", java_dir, gvk.kind(), suffix);
            self.write(root, &rel, &tpl::render(template, &vars))?;
        }

        info!(resource = %gvk, "API scaffolded");
        Ok(())
    }

    fn write(&self, root: &Path, rel: &str, content: &str) -> SampleResult<()> {
        let path = rel
            .split('/')
            .fold(root.to_path_buf(), |acc, seg| acc.join(seg));
        if let Some(parent) = path.parent() {
            self.fs.create_dir_all(parent)?;
        }
        self.fs.write_file(&path, content)?;
        debug!(file = rel, "Scaffolded file");
        Ok(())
    }
}

impl ScaffoldEngine for BuiltinScaffolder {
    fn run(&self, ctx: &ExecutionContext) -> SampleResult<()> {
        self.run_args(ctx.working_dir(), ctx.args())
    }
}

fn check_plugin(subcommand: &str, plugins: &str) -> SampleResult<()> {
    let supported = plugins.split(',').map(str::trim).any(|p| {
        p == "quarkus" || p == PLUGIN_KEY || p.starts_with(&format!("{}/", PLUGIN_KEY))
    });
    if supported {
        Ok(())
    } else {
        Err(failure(
            subcommand,
            &format!(
                "unsupported plugin '{}' (expected `quarkus` or `{}`)",
                plugins, PLUGIN_KEY
            ),
        ))
    }
}

fn subcommand_of(args: &[String]) -> String {
    match args.get(1).map(String::as_str) {
        Some("create") => "create api".to_string(),
        Some(other) => other.to_string(),
        None => "<none>".to_string(),
    }
}

fn failure(subcommand: &str, reason: &str) -> SampleError {
    ApplicationError::Scaffold {
        subcommand: subcommand.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::MemoryFilesystem;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn init_args() -> Vec<String> {
        argv(&[
            PROGRAM,
            "init",
            "--plugins",
            "quarkus",
            "--domain",
            "example.com",
            "--project-name",
            "memcached-quarkus-operator",
        ])
    }

    fn api_args() -> Vec<String> {
        argv(&[
            PROGRAM, "create", "api", "--plugins", "quarkus", "--group", "cache", "--version",
            "v1", "--kind", "Memcached",
        ])
    }

    fn setup() -> (MemoryFilesystem, BuiltinScaffolder) {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/ws")).unwrap();
        let engine = BuiltinScaffolder::new(Arc::new(fs.clone()));
        (fs, engine)
    }

    #[test]
    fn init_writes_project_skeleton() {
        let (fs, engine) = setup();
        engine.run_args(Path::new("/ws"), &init_args()).unwrap();

        let project = fs.read_file(Path::new("/ws/PROJECT")).unwrap();
        assert!(project.contains("domain: example.com"));
        assert!(project.contains("projectName: memcached-quarkus-operator"));

        let pom = fs.read_file(Path::new("/ws/pom.xml")).unwrap();
        assert!(pom.contains(
            "    <dependency>\n      <groupId>io.quarkus</groupId>\n      <artifactId>quarkus-micrometer-registry-prometheus</artifactId>"
        ));
        assert!(pom.contains("<groupId>com.example</groupId>"));
        assert!(
            fs.read_file(Path::new("/ws/src/main/resources/application.properties"))
                .is_some()
        );
    }

    #[test]
    fn create_api_writes_sources_with_anchors() {
        let (fs, engine) = setup();
        engine.run_args(Path::new("/ws"), &init_args()).unwrap();
        engine.run_args(Path::new("/ws"), &api_args()).unwrap();

        let dir = Path::new("/ws/src/main/java/com/example");
        let reconciler = fs.read_file(&dir.join("MemcachedReconciler.java")).unwrap();
        let anchors = [
            "// TODO Fill in the rest of the reconciler",
            "// TODO: fill in logic",
            "import io.javaoperatorsdk.operator.api.reconciler.UpdateControl;",
        ];
        for anchor in anchors {
            assert!(reconciler.contains(anchor), "missing anchor {anchor:?}");
        }

        let status = fs.read_file(&dir.join("MemcachedStatus.java")).unwrap();
        assert!(status.starts_with("package com.example;"));
        assert!(status.contains("// Add Status information here"));

        let resource = fs.read_file(&dir.join("Memcached.java")).unwrap();
        assert!(resource.contains("@Group(\"cache.example.com\")"));

        let project = fs.read_file(Path::new("/ws/PROJECT")).unwrap();
        assert!(project.contains("resources:\n- api:"));
        assert!(project.contains("  kind: Memcached\n"));
    }

    #[test]
    fn create_api_requires_init() {
        let (_fs, engine) = setup();
        let err = engine.run_args(Path::new("/ws"), &api_args()).unwrap_err();
        assert!(err.to_string().contains("run `init` first"));
    }

    #[test]
    fn init_twice_fails() {
        let (_fs, engine) = setup();
        engine.run_args(Path::new("/ws"), &init_args()).unwrap();
        let err = engine.run_args(Path::new("/ws"), &init_args()).unwrap_err();
        assert!(matches!(
            err,
            SampleError::Application(ApplicationError::Scaffold { ref subcommand, .. })
                if subcommand == "init"
        ));
    }

    #[test]
    fn duplicate_resource_fails() {
        let (_fs, engine) = setup();
        engine.run_args(Path::new("/ws"), &init_args()).unwrap();
        engine.run_args(Path::new("/ws"), &api_args()).unwrap();
        let err = engine.run_args(Path::new("/ws"), &api_args()).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn unsupported_plugin_rejected() {
        let (_fs, engine) = setup();
        let mut args = init_args();
        args[3] = "go.kubebuilder.io/v3".into();
        let err = engine.run_args(Path::new("/ws"), &args).unwrap_err();
        assert!(err.to_string().contains("unsupported plugin"));
    }

    #[test]
    fn unknown_flag_is_scaffold_error() {
        let (_fs, engine) = setup();
        let err = engine
            .run_args(Path::new("/ws"), &argv(&[PROGRAM, "init", "--bogus"]))
            .unwrap_err();
        assert!(matches!(
            err,
            SampleError::Application(ApplicationError::Scaffold { .. })
        ));
    }

    #[test]
    fn descriptor_parse() {
        let parsed = ProjectDescriptor::parse(
            "domain: example.com\nlayout:\n- quarkus.javaoperatorsdk.io/v1-alpha\nprojectName: demo\nversion: \"3\"\n",
        )
        .unwrap();
        assert_eq!(parsed.domain, "example.com");
        assert_eq!(parsed.project_name, "demo");
        assert!(ProjectDescriptor::parse("version: \"3\"\n").is_none());
    }
}
