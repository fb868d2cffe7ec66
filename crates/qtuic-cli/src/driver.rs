//! File handling around the compiler: output paths, staleness and batch
//! mode.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use qtuic_codegen::{CodegenError, CompileOptions, CompilerOutput};
use qtuic_parser::{Document, ParseError, Parser};

#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("error reading {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("error writing {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },

    #[error("{}: {source}", path.display())]
    Codegen { path: PathBuf, source: CodegenError },

    /// Some files of a directory failed; `outcomes` holds the others.
    #[error("{failed} of {total} files failed to build")]
    Batch {
        failed: usize,
        total: usize,
        outcomes: Vec<Outcome>,
    },
}

/// Settings of one `build` run.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub out_dir: PathBuf,
    /// Companion `main.go` to write, single-file mode only.
    pub scaffold: Option<PathBuf>,
    /// Import path of `out_dir`, used by the scaffold.
    pub go_package: Option<String>,
    /// Rebuild even when the output is newer than the input.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    UpToDate(PathBuf),
}

/// `dialog.ui` → `<out_dir>/dialog_ui.go`
pub fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().replace('.', "_"))
        .unwrap_or_default();
    out_dir.join(format!("{name}.go"))
}

/// Go package clause for files in `out_dir`: the directory's own name.
pub fn package_name(out_dir: &Path) -> String {
    let absolute = std::path::absolute(out_dir).unwrap_or_else(|_| out_dir.to_path_buf());
    absolute
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "main".to_string())
}

/// Import path of `dir` when it lies under `<gopath>/src`.
pub fn gopath_package(dir: &Path, gopath: &Path) -> Option<String> {
    let relative = dir.strip_prefix(gopath.join("src")).ok()?;
    let parts: Vec<String> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// True unless `output` exists and is strictly newer than `input`.
pub fn needs_rebuild(input: &Path, output: &Path) -> bool {
    let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified()).ok();
    match (modified(input), modified(output)) {
        (Some(input), Some(output)) => output <= input,
        _ => true,
    }
}

/// `.ui` files directly inside `dir`, sorted by name.
pub fn collect_inputs(dir: &Path) -> Result<Vec<PathBuf>, DriverError> {
    let read_error = |source| DriverError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "ui") {
            inputs.push(path);
        }
    }
    inputs.sort();
    Ok(inputs)
}

/// Parse and compile one file without writing anything.
pub fn translate(input: &Path, package: &str) -> Result<(Document, CompilerOutput), DriverError> {
    let source = fs::read_to_string(input).map_err(|source| DriverError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let doc = Parser::parse(&source).map_err(|source| DriverError::Parse {
        path: input.to_path_buf(),
        source,
    })?;

    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let output = qtuic_codegen::compile(&doc, &CompileOptions::new(package, stem)).map_err(
        |source| DriverError::Codegen {
            path: input.to_path_buf(),
            source,
        },
    )?;

    if !output.diagnostics.is_empty() {
        log::warn!(
            "{}: {} fragment(s) left out of the generated code",
            input.display(),
            output.diagnostics.len()
        );
    }
    Ok((doc, output))
}

/// Build a single `.ui` file or every `.ui` file in a directory.
///
/// In directory mode a failing file is logged and the others still built;
/// their outcomes travel in [`DriverError::Batch`].
pub fn build(path: &Path, options: &BuildOptions) -> Result<Vec<Outcome>, DriverError> {
    if !path.exists() {
        return Err(DriverError::NotFound(path.to_path_buf()));
    }
    let package = package_name(&options.out_dir);

    if !path.is_dir() {
        return build_file(path, options, &package, options.scaffold.as_deref())
            .map(|outcome| vec![outcome]);
    }

    if options.scaffold.is_some() {
        log::warn!("--scaffold is ignored when building a directory");
    }

    let inputs = collect_inputs(path)?;
    let total = inputs.len();
    let mut outcomes = Vec::with_capacity(total);
    let mut failed = 0;
    for input in &inputs {
        match build_file(input, options, &package, None) {
            Ok(outcome) => outcomes.push(outcome),
            Err(e) => {
                log::error!("{e}");
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(DriverError::Batch {
            failed,
            total,
            outcomes,
        });
    }
    Ok(outcomes)
}

fn build_file(
    input: &Path,
    options: &BuildOptions,
    package: &str,
    scaffold: Option<&Path>,
) -> Result<Outcome, DriverError> {
    let output_file = output_path(input, &options.out_dir);
    if !options.force && !needs_rebuild(input, &output_file) {
        log::info!("{} is up to date", output_file.display());
        return Ok(Outcome::UpToDate(output_file));
    }

    log::info!("translating {}", input.display());
    let (doc, output) = translate(input, package)?;
    write_file(&output_file, &output.code)?;

    if let Some(scaffold) = scaffold {
        let go_package = options.go_package.clone().or_else(|| {
            let gopath = std::env::var_os("GOPATH")?;
            let out_dir = std::path::absolute(&options.out_dir).ok()?;
            gopath_package(&out_dir, Path::new(&gopath))
        });
        let code = qtuic_codegen::scaffold::generate(&doc, &output.class_name, go_package.as_deref());
        write_file(scaffold, &code)?;
        log::info!("wrote scaffold {}", scaffold.display());
    }

    Ok(Outcome::Written(output_file))
}

fn write_file(path: &Path, contents: &str) -> Result<(), DriverError> {
    let write_error = |source| DriverError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_error)?;
    }
    fs::write(path, contents).map_err(write_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::{Duration, SystemTime};

    const FORM: &str = r#"<ui version="4.0">
 <widget class="QWidget" name="Form">
  <property name="windowTitle"><string>Hello</string></property>
 </widget>
</ui>"#;

    fn options(out_dir: &Path) -> BuildOptions {
        BuildOptions {
            out_dir: out_dir.to_path_buf(),
            ..BuildOptions::default()
        }
    }

    fn set_modified(path: &Path, time: SystemTime) {
        fs::File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(time)
            .unwrap();
    }

    // =========================================================================
    // Paths
    // =========================================================================

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("forms/dialog.ui"), Path::new("uigen")),
            PathBuf::from("uigen/dialog_ui.go")
        );
        assert_eq!(
            output_path(Path::new("main.window.ui"), Path::new("out")),
            PathBuf::from("out/main_window_ui.go")
        );
    }

    #[test]
    fn test_package_name_is_directory_name() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("widgets_gen");
        assert_eq!(package_name(&out), "widgets_gen");
    }

    #[test]
    fn test_gopath_package() {
        let gopath = Path::new("/home/me/go");
        assert_eq!(
            gopath_package(Path::new("/home/me/go/src/example.com/app/uigen"), gopath),
            Some("example.com/app/uigen".to_string())
        );
        assert_eq!(gopath_package(Path::new("/home/me/go/src"), gopath), None);
        assert_eq!(gopath_package(Path::new("/tmp/uigen"), gopath), None);
    }

    // =========================================================================
    // Building
    // =========================================================================

    #[test]
    fn test_build_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("hello.ui");
        fs::write(&input, FORM).unwrap();
        let out_dir = tmp.path().join("uigen");

        let outcomes = build(&input, &options(&out_dir)).unwrap();
        let expected = out_dir.join("hello_ui.go");
        assert_eq!(outcomes, vec![Outcome::Written(expected.clone())]);

        let code = fs::read_to_string(&expected).unwrap();
        assert!(code.contains("package uigen\n"));
        assert!(code.contains("type UIHelloForm struct"));
    }

    #[test]
    fn test_newer_output_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("hello.ui");
        fs::write(&input, FORM).unwrap();
        let out_dir = tmp.path().join("uigen");
        let output = out_dir.join("hello_ui.go");
        fs::create_dir_all(&out_dir).unwrap();
        fs::write(&output, "stale marker").unwrap();

        let now = SystemTime::now();
        set_modified(&input, now - Duration::from_secs(60));
        set_modified(&output, now);

        let outcomes = build(&input, &options(&out_dir)).unwrap();
        assert_eq!(outcomes, vec![Outcome::UpToDate(output.clone())]);
        assert_eq!(fs::read_to_string(&output).unwrap(), "stale marker");

        let forced = BuildOptions {
            force: true,
            ..options(&out_dir)
        };
        build(&input, &forced).unwrap();
        assert_ne!(fs::read_to_string(&output).unwrap(), "stale marker");
    }

    #[test]
    fn test_older_output_is_rebuilt() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("hello.ui");
        let output = tmp.path().join("hello_ui.go");
        fs::write(&input, FORM).unwrap();
        fs::write(&output, "old").unwrap();

        let now = SystemTime::now();
        set_modified(&output, now - Duration::from_secs(60));
        set_modified(&input, now);
        assert!(needs_rebuild(&input, &output));
        assert!(needs_rebuild(&input, &tmp.path().join("missing.go")));
    }

    #[test]
    fn test_directory_mode_is_not_recursive() {
        let tmp = tempfile::tempdir().unwrap();
        let forms = tmp.path().join("forms");
        fs::create_dir_all(forms.join("nested")).unwrap();
        fs::write(forms.join("b.ui"), FORM).unwrap();
        fs::write(forms.join("a.ui"), FORM).unwrap();
        fs::write(forms.join("notes.txt"), "ignore me").unwrap();
        fs::write(forms.join("nested/c.ui"), FORM).unwrap();

        let out_dir = tmp.path().join("gen");
        let outcomes = build(&forms, &options(&out_dir)).unwrap();
        assert_eq!(
            outcomes,
            vec![
                Outcome::Written(out_dir.join("a_ui.go")),
                Outcome::Written(out_dir.join("b_ui.go")),
            ]
        );
        assert!(!out_dir.join("c_ui.go").exists());
    }

    #[test]
    fn test_directory_mode_reports_failures() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("good.ui"), FORM).unwrap();
        fs::write(tmp.path().join("bad.ui"), "<ui><layout/></ui>").unwrap();

        let out_dir = tmp.path().join("gen");
        let err = build(tmp.path(), &options(&out_dir)).unwrap_err();
        let DriverError::Batch {
            failed,
            total,
            outcomes,
        } = err
        else {
            panic!("Expected batch error");
        };
        assert_eq!((failed, total), (1, 2));
        assert_eq!(outcomes, vec![Outcome::Written(out_dir.join("good_ui.go"))]);
        assert!(out_dir.join("good_ui.go").exists());
    }

    #[test]
    fn test_scaffold_is_written() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("hello.ui");
        fs::write(&input, FORM).unwrap();
        let scaffold = tmp.path().join("cmd/main.go");

        let opts = BuildOptions {
            scaffold: Some(scaffold.clone()),
            go_package: Some("example.com/hello/uigen".into()),
            ..options(&tmp.path().join("uigen"))
        };
        build(&input, &opts).unwrap();

        let code = fs::read_to_string(&scaffold).unwrap();
        assert!(code.contains("\t\"example.com/hello/uigen\"\n"));
        assert!(code.contains("uigen.UIHelloForm"));
    }

    #[test]
    fn test_missing_input() {
        let tmp = tempfile::tempdir().unwrap();
        let err = build(&tmp.path().join("nope.ui"), &options(tmp.path())).unwrap_err();
        assert!(matches!(err, DriverError::NotFound(_)));
    }
}
