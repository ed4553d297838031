//! Whole-project resolution, including sibling projects.

use pretty_assertions::assert_eq;
use rmx_extension::config::{DependencySpec, ExtensionConfig, ExtensionDependencyRef};
use rmx_extension::descriptor::ExtensionDescriptor;
use rmx_extension::locator::ResourceKind;
use rmx_extension::pipeline::{DescriptorResolver, resolve_project};
use rmx_extension::project::{ProjectRegistry, SiblingProject};
use rmx_extension::Error;
use rmx_fs::ProjectLayout;
use rmx_test_utils::{TestProject, TestWorkspace};

const WEB_MINING_CONFIG: &str = r#"
version = "5.3.3"

[extension]
name = "Web Mining"
vendor = "RapidMiner GmbH"
homepage = "https://rapidminer.com"

[extension.dependencies]
platform_version = "7.2.0"
extensions = [
    { namespace = "text", version = "5.3.3-SNAPSHOT" },
    { namespace = "core", version = "1.0.0" },
]
"#;

fn web_mining_project() -> TestProject {
    let project = TestProject::new();
    project.write_config(WEB_MINING_CONFIG);
    project.write_conventional_sources("WebMining");
    project
}

#[test]
fn test_web_mining_project() {
    let project = web_mining_project();
    let resolved = resolve_project(project.root(), None).unwrap();

    assert_eq!(resolved.descriptor.namespace, "web_mining");
    assert_eq!(resolved.version, "5.3.3");
    assert_eq!(
        resolved.resources.get(ResourceKind::InitClass).value(),
        Some("com.rapidminer.PluginInitWebMining")
    );
    assert_eq!(
        resolved.manifest.get("Plugin-Dependencies"),
        Some("rmx_text[5.3.3-SNAPSHOT]; rmx_core[1.0.0]")
    );
    assert_eq!(resolved.manifest.get("RapidMiner-Version"), Some("7.2.0"));
    assert_eq!(resolved.manifest.get("Extension-ID"), Some("rmx_web_mining"));
}

#[test]
fn test_version_override() {
    let project = web_mining_project();
    let resolved = resolve_project(project.root(), Some("6.0.0")).unwrap();

    assert_eq!(resolved.manifest.get("Implementation-Version"), Some("6.0.0"));
}

#[test]
fn test_resolution_is_idempotent() {
    let project = web_mining_project();
    let before = project.snapshot();

    let first = resolve_project(project.root(), None).unwrap();
    let second = resolve_project(project.root(), None).unwrap();

    assert_eq!(first.manifest, second.manifest);
    assert_eq!(first.manifest.render(), second.manifest.render());
    assert_eq!(project.snapshot(), before);
}

#[test]
fn test_project_without_extension_table() {
    let project = TestProject::new();
    project.write_config("version = \"1.0.0\"\n");

    let err = resolve_project(project.root(), None).unwrap_err();
    assert!(matches!(err, Error::NotAnExtensionProject { .. }));
}

#[test]
fn test_project_without_config() {
    let project = TestProject::new();

    let err = resolve_project(project.root(), None).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound(_)));
}

#[test]
fn test_missing_version_everywhere() {
    let project = TestProject::new();
    project.write_config("[extension]\nname = \"Web Mining\"\nvendor = \"V\"\n");
    project.write_conventional_sources("WebMining");

    let err = resolve_project(project.root(), None).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingMandatoryField { field: "version" }
    ));
}

#[test]
fn test_mandatory_resource_failure_stops_pipeline() {
    let project = TestProject::new();
    project.write_config(WEB_MINING_CONFIG);
    project.write_java("com/rapidminer/PluginInitWebMining.java");

    let err = resolve_project(project.root(), None).unwrap_err();
    assert!(matches!(
        err,
        Error::MissingMandatoryResource {
            kind: ResourceKind::Operators,
            ..
        }
    ));
}

#[test]
fn test_sibling_projects_from_directories() {
    let workspace = TestWorkspace::new();

    let text = workspace.project("text");
    text.write_config("version = \"5.3.3-SNAPSHOT\"\n\n[extension]\nname = \"Text Processing\"\nnamespace = \"text\"\n");

    let platform = workspace.project("platform");
    platform.write_config("version = \"9.1.0\"\n");

    let web = workspace.project("web-mining");
    web.write_conventional_sources("WebMining");
    web.write_config(
        r#"
version = "5.3.3"

[extension]
name = "Web Mining"
vendor = "RapidMiner GmbH"

[extension.dependencies]
platform_project = "platform"
extensions = [{ project = "text" }, { namespace = "core", version = "1.0.0" }]
"#,
    );

    let resolved = resolve_project(web.root(), None).unwrap();
    assert_eq!(resolved.dependencies.platform_version, "9.1.0");
    assert_eq!(
        resolved.manifest.get("Plugin-Dependencies"),
        Some("rmx_text[5.3.3-SNAPSHOT]; rmx_core[1.0.0]")
    );
}

#[test]
fn test_sibling_that_is_not_an_extension() {
    let workspace = TestWorkspace::new();
    workspace
        .project("util")
        .write_config("version = \"1.0.0\"\n");

    let web = workspace.project("web-mining");
    web.write_conventional_sources("WebMining");
    web.write_config(
        r#"
version = "5.3.3"

[extension]
name = "Web Mining"
vendor = "RapidMiner GmbH"

[extension.dependencies]
extensions = [{ project = "util" }]
"#,
    );

    let err = resolve_project(web.root(), None).unwrap_err();
    assert!(matches!(err, Error::NotAnExtensionProject { project } if project == "util"));
}

#[test]
fn test_resolver_with_registry() {
    let project = TestProject::new();
    project.write_conventional_sources("WebMining");

    let text = ExtensionDescriptor::from_config(&ExtensionConfig {
        name: Some("Text Processing".to_string()),
        namespace: Some("text".to_string()),
        ..ExtensionConfig::default()
    })
    .unwrap();
    let mut registry = ProjectRegistry::new();
    registry.register(SiblingProject::extension("text", Some("7.5.0"), text));

    let config = ExtensionConfig {
        name: Some("Web Mining".to_string()),
        vendor: Some("RapidMiner GmbH".to_string()),
        dependencies: DependencySpec {
            extensions: vec![ExtensionDependencyRef::sibling("text")],
            ..DependencySpec::default()
        },
        ..ExtensionConfig::default()
    };

    let layout = ProjectLayout::new(project.root());
    let resolved = DescriptorResolver::new(&layout, &registry)
        .resolve(&config, "1.0.0")
        .unwrap();

    assert_eq!(resolved.dependencies.plugin_dependencies(), "rmx_text[7.5.0]");
    assert_eq!(resolved.manifest.get("RapidMiner-Version"), Some("7.0.0"));
}

#[test]
fn test_report_json() {
    let project = web_mining_project();
    let resolved = resolve_project(project.root(), None).unwrap();

    let json = serde_json::to_value(resolved.report()).unwrap();
    assert_eq!(json["namespace"], "web_mining");
    assert_eq!(json["manifest"]["Namespace"], "web_mining");
}
