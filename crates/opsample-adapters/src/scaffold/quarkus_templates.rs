//! Quarkus operator project templates.
//!
//! Placeholders use `{{name}}`. Maven's own `${...}` properties pass through
//! untouched.

/// Substitute every `{{key}}` in `template`.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{{{}}}}}", key), value);
    }
    out
}

/// Package name derived from a domain: `example.com` -> `com.example`.
pub fn package_for_domain(domain: &str) -> String {
    domain.rsplit('.').collect::<Vec<_>>().join(".")
}

pub const PROJECT: &str = r#"domain: {{domain}}
layout:
- quarkus.javaoperatorsdk.io/v1-alpha
projectName: {{project_name}}
version: "3"
"#;

pub const RESOURCES_HEADER: &str = "resources:\n";

pub const PROJECT_RESOURCE: &str = r#"- api:
    crdVersion: v1
    namespaced: true
  domain: {{domain}}
  group: {{group}}
  kind: {{kind}}
  version: {{version}}
"#;

pub const POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
  xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">
  <modelVersion>4.0.0</modelVersion>
  <groupId>{{package}}</groupId>
  <artifactId>{{project_name}}</artifactId>
  <version>0.0.1-SNAPSHOT</version>
  <properties>
    <compiler-plugin.version>3.8.1</compiler-plugin.version>
    <maven.compiler.parameters>true</maven.compiler.parameters>
    <maven.compiler.source>11</maven.compiler.source>
    <maven.compiler.target>11</maven.compiler.target>
    <project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>
    <project.reporting.outputEncoding>UTF-8</project.reporting.outputEncoding>
    <quarkus-sdk.version>3.0.4</quarkus-sdk.version>
    <quarkus.version>2.7.3.Final</quarkus.version>
  </properties>
  <dependencyManagement>
    <dependencies>
      <dependency>
        <groupId>io.quarkus</groupId>
        <artifactId>quarkus-bom</artifactId>
        <version>${quarkus.version}</version>
        <type>pom</type>
        <scope>import</scope>
      </dependency>
    </dependencies>
  </dependencyManagement>
  <dependencies>
    <dependency>
      <groupId>io.quarkiverse.operatorsdk</groupId>
      <artifactId>quarkus-operator-sdk</artifactId>
      <version>${quarkus-sdk.version}</version>
    </dependency>
    <dependency>
      <groupId>io.quarkiverse.operatorsdk</groupId>
      <artifactId>quarkus-operator-sdk-bundle-generator</artifactId>
      <version>${quarkus-sdk.version}</version>
    </dependency>
    <dependency>
      <groupId>io.quarkus</groupId>
      <artifactId>quarkus-micrometer-registry-prometheus</artifactId>
      <version>${quarkus.version}</version>
    </dependency>
  </dependencies>
  <build>
    <plugins>
      <plugin>
        <groupId>io.quarkus</groupId>
        <artifactId>quarkus-maven-plugin</artifactId>
        <version>${quarkus.version}</version>
        <executions>
          <execution>
            <goals>
              <goal>build</goal>
            </goals>
          </execution>
        </executions>
      </plugin>
      <plugin>
        <artifactId>maven-compiler-plugin</artifactId>
        <version>${compiler-plugin.version}</version>
      </plugin>
    </plugins>
  </build>
</project>
"#;

// Recipe lines must start with a tab.
pub const MAKEFILE: &str = concat!(
    "VERSION ?= 0.0.1\n",
    "IMAGE_TAG_BASE ?= {{domain}}/{{project_name}}\n",
    "BUNDLE_IMG ?= $(IMAGE_TAG_BASE)-bundle:v$(VERSION)\n",
    "IMG ?= $(IMAGE_TAG_BASE):$(VERSION)\n",
    "\n",
    "all: docker-build\n",
    "\n",
    "##@ Build\n",
    "\n",
    "docker-build: ## Build docker image with the manager.\n",
    "\tmvn package -Dquarkus.container-image.build=true -Dquarkus.container-image.image=$(IMG)\n",
    "\n",
    "docker-push: ## Push docker image with the manager.\n",
    "\tmvn package -Dquarkus.container-image.push=true -Dquarkus.container-image.image=$(IMG)\n",
    "\n",
    "##@ Bundle\n",
    "\n",
    ".PHONY: bundle\n",
    "bundle: ## Copy the generated OLM bundle into ./bundle\n",
    "\trm -rf bundle\n",
    "\tcp -r target/bundle/{{project_name}} bundle\n",
    "\n",
    ".PHONY: bundle-build\n",
    "bundle-build: ## Build the bundle image.\n",
    "\tdocker build -f bundle/bundle.Dockerfile -t $(BUNDLE_IMG) bundle\n",
);

pub const APPLICATION_PROPERTIES: &str = r#"quarkus.container-image.build=true
quarkus.container-image.name={{project_name}}
quarkus.operator-sdk.crd.apply=true
quarkus.operator-sdk.generate-csv=true
quarkus.operator-sdk.bundle.package-name={{project_name}}
"#;

pub const GITIGNORE: &str = r#"target/
bundle/
*.iml
.idea/
"#;

pub const RESOURCE: &str = r#"package {{package}};

import io.fabric8.kubernetes.api.model.Namespaced;
import io.fabric8.kubernetes.client.CustomResource;
import io.fabric8.kubernetes.model.annotation.Group;
import io.fabric8.kubernetes.model.annotation.Version;

@Version("{{version}}")
@Group("{{group}}.{{domain}}")
public class {{kind}} extends CustomResource<{{kind}}Spec, {{kind}}Status> implements Namespaced {}
"#;

pub const SPEC: &str = r#"package {{package}};

public class {{kind}}Spec {

    // Add Spec information here
}
"#;

pub const STATUS: &str = r#"package {{package}};

public class {{kind}}Status {

    // Add Status information here
}
"#;

pub const RECONCILER: &str = r#"package {{package}};

import io.fabric8.kubernetes.client.KubernetesClient;
import io.javaoperatorsdk.operator.api.reconciler.Context;
import io.javaoperatorsdk.operator.api.reconciler.Reconciler;
import io.javaoperatorsdk.operator.api.reconciler.UpdateControl;

public class {{kind}}Reconciler implements Reconciler<{{kind}}> {
  private final KubernetesClient client;

  public {{kind}}Reconciler(KubernetesClient client) {
    this.client = client;
  }

  // TODO Fill in the rest of the reconciler

  @Override
  public UpdateControl<{{kind}}> reconcile(
    {{kind}} resource, Context context) {
    // TODO: fill in logic

    return UpdateControl.noUpdate();
  }
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_replaces_placeholders_only() {
        let out = render(
            "<v>${quarkus.version}</v> {{kind}}/{{kind}}",
            &[("kind", "Memcached")],
        );
        assert_eq!(out, "<v>${quarkus.version}</v> Memcached/Memcached");
    }

    #[test]
    fn package_reverses_domain() {
        assert_eq!(package_for_domain("example.com"), "com.example");
        assert_eq!(package_for_domain("ops.acme.io"), "io.acme.ops");
    }

    #[test]
    fn makefile_recipes_use_tabs() {
        assert!(MAKEFILE.contains("bundle: ## Copy"));
        let recipes = MAKEFILE.lines().filter(|l| l.starts_with('\t')).count();
        assert!(recipes >= 4);
    }
}
