//! Build scenarios across whole extension projects.
//!
//! Each test sets up one or more project trees the way a multi-project
//! extension build lays them out and runs the full resolution over them.

use pretty_assertions::assert_eq;
use rmx_extension::{
    Coordinate, Error, ExtensionDescriptor, ProjectConfig, ResolvedGraph, ResourceKind,
    compute_exclusions, install_target, resolve_project,
};
use rmx_test_utils::{TestProject, TestWorkspace};

/// A platform project, a text processing extension and a web mining
/// extension depending on both.
fn web_mining_build() -> TestWorkspace {
    let workspace = TestWorkspace::new();

    workspace
        .project("rapidminer-studio")
        .write_config("version = \"9.10.0\"\n");

    let text = workspace.project("text-processing");
    text.write_conventional_sources("TextProcessing");
    text.write_config(
        r#"
version = "5.3.3-SNAPSHOT"

[extension]
name = "Text Processing"
namespace = "text"
vendor = "RapidMiner GmbH"

[extension.dependencies]
platform_project = "rapidminer-studio"
"#,
    );

    let web = workspace.project("web-mining");
    web.write_conventional_sources("WebMining");
    web.write_resource("com/rapidminer/resources/i18n/GUIWebMining.properties", "");
    web.write_resource("com/rapidminer/resources/ioobjectsWebMining.xml", "");
    web.write_config(
        r#"
version = "5.3.3"

[extension]
name = "Web Mining"
vendor = "RapidMiner GmbH"
homepage = "https://rapidminer.com"

[extension.dependencies]
platform_project = "rapidminer-studio"
extensions = [
    { project = "text-processing" },
    { namespace = "core", version = "1.0.0" },
]
"#,
    );

    workspace
}

#[test]
fn test_multi_project_build() {
    let workspace = web_mining_build();

    let web = resolve_project(&workspace.root().join("web-mining"), None).unwrap();
    let text = resolve_project(&workspace.root().join("text-processing"), None).unwrap();

    assert_eq!(web.descriptor.namespace, "web_mining");
    assert_eq!(text.descriptor.namespace, "text");

    let manifest = &web.manifest;
    assert_eq!(manifest.get("Implementation-Title"), Some("Web Mining"));
    assert_eq!(manifest.get("RapidMiner-Version"), Some("9.10.0"));
    assert_eq!(
        manifest.get("Plugin-Dependencies"),
        Some("rmx_text[5.3.3-SNAPSHOT]; rmx_core[1.0.0]")
    );
    assert_eq!(
        manifest.get("Initialization-Class"),
        Some("com.rapidminer.PluginInitWebMining")
    );
    assert_eq!(
        manifest.get("GUI-Descriptor"),
        Some("com/rapidminer/resources/i18n/GUIWebMining.properties")
    );
    assert_eq!(
        manifest.get("IOObject-Descriptor"),
        Some("com/rapidminer/resources/ioobjectsWebMining.xml")
    );
    assert_eq!(manifest.get("Group-Descriptor"), Some(""));

    assert_eq!(text.manifest.get("Plugin-Dependencies"), Some(""));
    assert_eq!(
        text.manifest.get("Initialization-Class"),
        Some("com.rapidminer.PluginInitTextProcessing")
    );
}

#[test]
fn test_repeated_builds_are_identical() {
    let workspace = web_mining_build();
    let root = workspace.root().join("web-mining");
    let web = workspace.project("web-mining");
    let before = web.snapshot();

    let renders: Vec<String> = (0..3)
        .map(|_| resolve_project(&root, None).unwrap().manifest.render())
        .collect();

    assert_eq!(renders[0], renders[1]);
    assert_eq!(renders[1], renders[2]);
    assert_eq!(web.snapshot(), before);
}

#[test]
fn test_legacy_layout_found_by_scanning() {
    let project = TestProject::new();
    project.write_config(
        "version = \"1.0.0\"\n\n[extension]\nname = \"Web Mining\"\nvendor = \"V\"\n",
    );
    project.write_java("org/legacy/web/PluginInitWeb.java");
    project.write_operators("legacy/OperatorsWeb.xml", Some("legacy/OperatorsDocWeb"));
    project.write_resource("legacy/OperatorsDocWeb.xml", "<documentation/>");
    project.write_resource("legacy/i18n/ErrorsWeb.properties", "");

    let resolved = resolve_project(project.root(), None).unwrap();
    assert_eq!(
        resolved.resources.get(ResourceKind::InitClass).value(),
        Some("org.legacy.web.PluginInitWeb")
    );
    assert_eq!(
        resolved.resources.get(ResourceKind::Operators).value(),
        Some("legacy/OperatorsWeb.xml")
    );
    assert_eq!(
        resolved.manifest.get("Error-Descriptor"),
        Some("legacy/i18n/ErrorsWeb.properties")
    );
}

#[test]
fn test_configured_resources() {
    let project = TestProject::new();
    project.write_config(
        r#"
version = "1.0.0"

[extension]
name = "Web Mining"
vendor = "V"

[extension.resources]
init_class = "org.example.Boot"
operators = "defs/ops.xml"
settings = "defs/settings.properties"
"#,
    );
    project.write_java("org/example/Boot.java");
    project.write_operators("defs/ops.xml", Some("defs/docs.xml"));
    project.write_resource("defs/docs.xml", "<documentation/>");
    project.write_resource("defs/settings.properties", "");

    let resolved = resolve_project(project.root(), None).unwrap();
    assert_eq!(resolved.manifest.get("Initialization-Class"), Some("org.example.Boot"));
    assert_eq!(resolved.manifest.get("Operator-Descriptor"), Some("defs/ops.xml"));
    assert_eq!(
        resolved.manifest.get("Settings-Descriptor"),
        Some("defs/settings.properties")
    );
}

#[test]
fn test_conflicting_dependency_declaration() {
    let workspace = web_mining_build();
    let web = workspace.project("web-mining");
    web.write_config(
        r#"
version = "5.3.3"

[extension]
name = "Web Mining"
vendor = "RapidMiner GmbH"

[extension.dependencies]
extensions = [{ namespace = "text", version = "1.0", project = "text-processing" }]
"#,
    );

    let err = resolve_project(web.root(), None).unwrap_err();
    assert!(matches!(err, Error::ConflictingDependencySpec { .. }));
    assert!(err.to_string().contains("#1"));
}

#[test]
fn test_unknown_sibling() {
    let workspace = web_mining_build();
    let web = workspace.project("web-mining");
    web.write_config(
        "version = \"5.3.3\"\n\n[extension]\nname = \"Web Mining\"\nvendor = \"V\"\n\n\
         [extension.dependencies]\nextensions = [{ project = \"missing\" }]\n",
    );

    let err = resolve_project(web.root(), None).unwrap_err();
    assert!(matches!(err, Error::UnknownProject { project } if project == "missing"));
}

#[test]
fn test_install_target_from_config() {
    let workspace = web_mining_build();
    let folder = workspace.root().join("installed");
    std::fs::create_dir(&folder).unwrap();

    let config: ProjectConfig = toml_config(&format!(
        "[extension]\nname = \"Web Mining\"\nextension_folder = {:?}\n",
        folder.display().to_string()
    ));
    let descriptor = ExtensionDescriptor::from_config(config.extension.as_ref().unwrap()).unwrap();

    assert_eq!(
        descriptor.install_target().unwrap(),
        std::fs::canonicalize(&folder).unwrap()
    );
    assert_eq!(
        install_target(None, Some(workspace.root().to_path_buf())).unwrap(),
        workspace.root().join(".RapidMiner/extensions")
    );
}

fn toml_config(content: &str) -> ProjectConfig {
    ProjectConfig::from_toml(content).unwrap()
}

#[test]
fn test_exclusions_for_provided_dependencies() {
    let mut graph = ResolvedGraph::new();
    let platform = graph.add_module(Coordinate::new("com.rapidminer", "platform", "9.10.0"));
    let slf4j = graph.add_module(Coordinate::new("org.slf4j", "slf4j-api", "1.7.36"));
    let guava = graph.add_module(Coordinate::new("com.google.guava", "guava", "31.1"));
    let failureaccess =
        graph.add_module(Coordinate::new("com.google.guava", "failureaccess", "1.0.1"));
    graph.add_module(Coordinate::new("org.jsoup", "jsoup", "1.15.3"));

    graph.add_root(platform);
    graph.add_child(platform, slf4j);
    graph.add_child(platform, guava);
    graph.add_child(slf4j, failureaccess);
    graph.add_child(guava, failureaccess);
    graph.add_child(failureaccess, platform);

    let exclusions = graph.exclusions();
    assert_eq!(exclusions.len(), 4);
    assert!(!exclusions.contains(&Coordinate::new("org.jsoup", "jsoup", "1.15.3")));

    let same = compute_exclusions(graph.root_nodes());
    assert_eq!(same, exclusions);
    assert_eq!(
        exclusions
            .to_sorted_vec()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>(),
        vec![
            "com.google.guava:failureaccess:1.0.1",
            "com.google.guava:guava:31.1",
            "com.rapidminer:platform:9.10.0",
            "org.slf4j:slf4j-api:1.7.36",
        ]
    );
}
