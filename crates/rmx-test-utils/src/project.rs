//! Extension project fixtures.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Java source root inside a project.
pub const JAVA_ROOT: &str = "src/main/java";

/// Resource root inside a project.
pub const RESOURCES_ROOT: &str = "src/main/resources";

/// A temporary directory holding several sibling projects.
///
/// # Example
///
/// ```rust,no_run
/// use rmx_test_utils::TestWorkspace;
///
/// let workspace = TestWorkspace::new();
/// let text = workspace.project("text");
/// text.write_config("version = \"1.0.0\"\n[extension]\nname = \"Text\"\n");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create (or reopen) the project directory `name` inside the workspace.
    ///
    /// The returned project borrows nothing; it stays valid as long as the
    /// workspace is alive.
    pub fn project(&self, name: &str) -> TestProject {
        let root = self.root().join(name);
        fs::create_dir_all(&root).unwrap();
        TestProject {
            root,
            _temp_dir: None,
        }
    }
}

/// An extension project tree with helpers for setup and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use rmx_test_utils::TestProject;
///
/// let project = TestProject::new();
/// project.write_java("com/rapidminer/PluginInitWebMining.java");
/// project.write_operators(
///     "com/rapidminer/resources/OperatorsWebMining.xml",
///     Some("com/rapidminer/resources/i18n/OperatorsDocWebMining"),
/// );
/// project.assert_file_exists("src/main/java/com/rapidminer/PluginInitWebMining.java");
/// ```
pub struct TestProject {
    root: PathBuf,
    /// Owns the directory for standalone projects.
    _temp_dir: Option<TempDir>,
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProject {
    /// A standalone project in its own temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir_all(&root).unwrap();
        Self {
            root,
            _temp_dir: Some(temp_dir),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `path` (relative to the project root), creating
    /// parent directories.
    pub fn write_file(&self, path: &str, content: &str) -> PathBuf {
        self.write_bytes(path, content.as_bytes())
    }

    /// Like [`write_file`](Self::write_file), for content that is not UTF-8.
    pub fn write_bytes(&self, path: &str, content: &[u8]) -> PathBuf {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        full_path
    }

    /// Write a Java source file, path relative to `src/main/java`.
    pub fn write_java(&self, path: &str) -> PathBuf {
        let class = Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Unnamed");
        self.write_file(
            &format!("{JAVA_ROOT}/{path}"),
            &format!("public final class {class} {{}}\n"),
        )
    }

    /// Write a resource file, path relative to `src/main/resources`.
    pub fn write_resource(&self, path: &str, content: &str) -> PathBuf {
        self.write_file(&format!("{RESOURCES_ROOT}/{path}"), content)
    }

    /// Write an operator definition document with an optional docbundle
    /// attribute.
    pub fn write_operators(&self, path: &str, docbundle: Option<&str>) -> PathBuf {
        let attribute = docbundle
            .map(|d| format!(" docbundle=\"{d}\""))
            .unwrap_or_default();
        self.write_resource(
            path,
            &format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                 <operators name=\"test\" version=\"6.0\"{attribute}>\n\
                 </operators>\n"
            ),
        )
    }

    /// Write `extension.toml`.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write_file("extension.toml", content)
    }

    /// Lay down the conventional sources of an extension named with `stem`
    /// (its name without whitespace): the init class, the operator
    /// definitions and their documentation bundle.
    pub fn write_conventional_sources(&self, stem: &str) {
        self.write_java(&format!("com/rapidminer/PluginInit{stem}.java"));
        let docbundle = format!("com/rapidminer/resources/i18n/OperatorsDoc{stem}");
        self.write_operators(
            &format!("com/rapidminer/resources/Operators{stem}.xml"),
            Some(&docbundle),
        );
        self.write_resource(&format!("{docbundle}.xml"), "<documentation/>\n");
    }

    /// Assert that `path` (relative to the project root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root.join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Sorted relative paths of every file in the project.
    ///
    /// Used to show that resolution leaves the tree untouched.
    pub fn snapshot(&self) -> Vec<String> {
        let mut files = Vec::new();
        collect_files(&self.root, &self.root, &mut files);
        files.sort();
        files
    }
}

fn collect_files(base: &Path, dir: &Path, files: &mut Vec<String>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(base, &path, files);
        } else {
            let relative = path.strip_prefix(base).unwrap();
            files.push(relative.to_string_lossy().replace('\\', "/"));
        }
    }
}
