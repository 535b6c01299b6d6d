//! The memcached Quarkus operator sample.
//!
//! Scaffolds a `cache/v1, Kind=Memcached` project, then fills in a reconciler
//! that keeps a memcached `Deployment` sized to `spec.size` and reports the
//! pod names in `status.nodes`.
//!
//! Anchors are matched byte for byte against the scaffold output, so they
//! must track the Quarkus plugin templates exactly (indentation included).

use opsample_core::domain::{
    AnchorInsertion, CommandSpec, CreateApiConfig, DomainError, GroupVersionKind, InitConfig,
    InsertionEntry, RelativePath, SampleDefinition,
};

pub const NAME: &str = "memcached";

const WORKSPACE_DIR: &str = "quarkus/quarkus-memcached-operator";
const JAVA_DIR: &str = "src/main/java/com/example";
const PLUGIN: &str = "quarkus";

// Builds the Deployment owned by a Memcached resource.
const RECONCILE_HELPERS_ANCHOR: &str = "// TODO Fill in the rest of the reconciler";
const RECONCILE_HELPERS: &str = r#"
	private Map<String, String> labelsForMemcached(Memcached m) {
		Map<String, String> labels = new HashMap<>();
		labels.put("app", "memcached");
		labels.put("memcached_cr", m.getMetadata().getName());
		return labels;
	}
	
	private Deployment createMemcachedDeployment(Memcached m) {
		return new DeploymentBuilder()
			.withMetadata(
				new ObjectMetaBuilder()
					.withName(m.getMetadata().getName())
					.withNamespace(m.getMetadata().getNamespace())
					.withOwnerReferences(
						new OwnerReferenceBuilder()
							.withApiVersion("v1")
							.withKind("Memcached")
							.withName(m.getMetadata().getName())
							.withUid(m.getMetadata().getUid())
							.build())
					.build())
			.withSpec(
				new DeploymentSpecBuilder()
					.withReplicas(m.getSpec().getSize())
					.withSelector(
						new LabelSelectorBuilder().withMatchLabels(labelsForMemcached(m)).build())
					.withTemplate(
						new PodTemplateSpecBuilder()
							.withMetadata(
								new ObjectMetaBuilder().withLabels(labelsForMemcached(m)).build())
							.withSpec(
								new PodSpecBuilder()
									.withContainers(
										new ContainerBuilder()
											.withImage("memcached:1.4.36-alpine")
											.withName("memcached")
											.withCommand("memcached", "-m=64", "-o", "modern", "-v")
											.withPorts(
												new ContainerPortBuilder()
													.withContainerPort(11211)
													.withName("memcached")
													.build())
											.build())
									.build())
							.build())
					.build())
			.build();
	}
	"#;

// Converges the Deployment to spec.size and publishes pod names.
const RECONCILE_BODY_ANCHOR: &str = "// TODO: fill in logic";
const RECONCILE_BODY: &str = r#"
		Deployment deployment = client.apps()
			.deployments()
			.inNamespace(resource.getMetadata().getNamespace())
			.withName(resource.getMetadata().getName())
			.get();

		if (deployment == null) {
			Deployment newDeployment = createMemcachedDeployment(resource);
			client.apps().deployments().create(newDeployment);
			return UpdateControl.noUpdate();
		}

		int currentReplicas = deployment.getSpec().getReplicas();
		int requiredReplicas = resource.getSpec().getSize();

		if (currentReplicas != requiredReplicas) {
			deployment.getSpec().setReplicas(requiredReplicas);
			client.apps().deployments().createOrReplace(deployment);
			return UpdateControl.noUpdate();
		}

		List<Pod> pods = client.pods()
		.inNamespace(resource.getMetadata().getNamespace())
		.withLabels(labelsForMemcached(resource))
		.list()
		.getItems();

		List<String> podNames =
		pods.stream().map(p -> p.getMetadata().getName()).collect(Collectors.toList());


		if (resource.getStatus() == null
			|| !CollectionUtils.isEqualCollection(podNames, resource.getStatus().getNodes())) {
			if (resource.getStatus() == null) resource.setStatus(new MemcachedStatus());
			resource.getStatus().setNodes(podNames);
			return UpdateControl.updateResource(resource);
		}"#;

const SPEC_FIELDS_ANCHOR: &str = "// Add Spec information here";
const SPEC_FIELDS: &str = r#"
	// Size is the size of the memcached deployment
    private Integer size;

    public Integer getSize() {
        return size;
    }

    public void setSize(Integer size) {
        this.size = size;
    }
	"#;

const STATUS_FIELDS_ANCHOR: &str = "// Add Status information here";
const STATUS_FIELDS: &str = r#"
	// Nodes are the names of the memcached pods
    private List<String> nodes;

    public List<String> getNodes() {
        if (nodes == null) {
            nodes = new ArrayList<>();
        }
        return nodes;
    }

    public void setNodes(List<String> nodes) {
        this.nodes = nodes;
    }
	"#;

const RECONCILE_IMPORTS_ANCHOR: &str =
    "import io.javaoperatorsdk.operator.api.reconciler.UpdateControl;";
const RECONCILE_IMPORTS: &str = r#"

import io.fabric8.kubernetes.api.model.ContainerBuilder;
import io.fabric8.kubernetes.api.model.ContainerPortBuilder;
import io.fabric8.kubernetes.api.model.LabelSelectorBuilder;
import io.fabric8.kubernetes.api.model.ObjectMetaBuilder;
import io.fabric8.kubernetes.api.model.OwnerReferenceBuilder;
import io.fabric8.kubernetes.api.model.Pod;
import io.fabric8.kubernetes.api.model.PodSpecBuilder;
import io.fabric8.kubernetes.api.model.PodTemplateSpecBuilder;
import io.fabric8.kubernetes.api.model.apps.Deployment;
import io.fabric8.kubernetes.api.model.apps.DeploymentBuilder;
import io.fabric8.kubernetes.api.model.apps.DeploymentSpecBuilder;
import org.apache.commons.collections.CollectionUtils;
import java.util.HashMap;
import java.util.List;
import java.util.Map;
import java.util.stream.Collectors;
"#;

const STATUS_IMPORTS_ANCHOR: &str = "package com.example;";
const STATUS_IMPORTS: &str = r#"

import java.util.ArrayList;
import java.util.List;
"#;

// Needed by `CollectionUtils` in the reconcile body.
const POM_DEPENDENCY_ANCHOR: &str = r#"    <dependency>
      <groupId>io.quarkus</groupId>
      <artifactId>quarkus-micrometer-registry-prometheus</artifactId>
      <version>${quarkus.version}</version>
    </dependency>"#;
const POM_DEPENDENCY: &str = r#"
    <dependency>
      <groupId>commons-collections</groupId>
      <artifactId>commons-collections</artifactId>
      <version>3.2.2</version>
    </dependency>
"#;

/// The complete memcached sample definition.
pub fn definition() -> Result<SampleDefinition, DomainError> {
    let reconciler = java_file("MemcachedReconciler.java");
    let spec = java_file("MemcachedSpec.java");
    let status = java_file("MemcachedStatus.java");

    let insertions = vec![
        entry(
            "implement-reconcile-helpers",
            "implementing reconcile helpers",
            &reconciler,
            RECONCILE_HELPERS_ANCHOR,
            RECONCILE_HELPERS,
        )?,
        entry(
            "implement-reconcile",
            "implementing reconcile",
            &reconciler,
            RECONCILE_BODY_ANCHOR,
            RECONCILE_BODY,
        )?,
        entry(
            "implement-spec",
            "implementing spec",
            &spec,
            SPEC_FIELDS_ANCHOR,
            SPEC_FIELDS,
        )?,
        entry(
            "implement-status",
            "implementing status",
            &status,
            STATUS_FIELDS_ANCHOR,
            STATUS_FIELDS,
        )?,
        entry(
            "add-reconcile-dependencies",
            "adding reconcile dependencies",
            &reconciler,
            RECONCILE_IMPORTS_ANCHOR,
            RECONCILE_IMPORTS,
        )?,
        entry(
            "add-status-dependencies",
            "adding status dependencies",
            &status,
            STATUS_IMPORTS_ANCHOR,
            STATUS_IMPORTS,
        )?,
        entry(
            "add-pom-dependencies",
            "adding pom dependencies",
            "pom.xml",
            POM_DEPENDENCY_ANCHOR,
            POM_DEPENDENCY,
        )?,
    ];

    Ok(SampleDefinition {
        name: NAME.to_string(),
        description: "Memcached operator on Quarkus with a sized Deployment and pod status"
            .to_string(),
        workspace_dir: RelativePath::from_segments(WORKSPACE_DIR)?,
        init: InitConfig {
            plugin: PLUGIN.to_string(),
            domain: "example.com".to_string(),
            project_name: "memcached-quarkus-operator".to_string(),
        },
        create_api: CreateApiConfig {
            plugin: PLUGIN.to_string(),
            gvk: GroupVersionKind::new("cache", "v1", "Memcached")?,
        },
        insertions,
        build: CommandSpec::new("mvn", ["clean", "install"]),
        package: CommandSpec::new("make", ["bundle"]),
    })
}

fn java_file(name: &str) -> String {
    format!("{}/{}", JAVA_DIR, name)
}

fn entry(
    name: &'static str,
    label: &'static str,
    file: &str,
    anchor: &str,
    payload: &str,
) -> Result<InsertionEntry, DomainError> {
    Ok(InsertionEntry {
        name,
        label,
        insertion: AnchorInsertion::new(file, anchor, payload)?,
    })
}
