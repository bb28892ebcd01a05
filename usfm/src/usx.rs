//! Batch conversion of exported USFM folders to USX with an external
//! converter.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{error, info, warn};

use crate::Error;

/// Captured result of one converter run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConversionOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ConversionOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// The captured error output, falling back to standard output.
    pub fn message(&self) -> &str {
        match self.stderr.trim() {
            "" => self.stdout.trim(),
            err => err,
        }
    }
}

/// Trait implemented by USFM to USX converters.
pub trait Converter {
    fn convert(&self, input: &Path, output: &Path) -> io::Result<ConversionOutput>;
}

/// The `usfmconv` command line tool.
#[derive(Clone, Debug)]
pub struct Usfmconv {
    pub program: PathBuf,
}

impl Converter for Usfmconv {
    fn convert(&self, input: &Path, output: &Path) -> io::Result<ConversionOutput> {
        let out = Command::new(&self.program)
            .arg(input)
            .arg("-o")
            .arg(output)
            .args(["-F", "usx"])
            .output()?;

        Ok(ConversionOutput {
            code: out.status.code(),
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
        })
    }
}

#[derive(Clone, Debug)]
pub struct UsxConfig {
    /// Directory holding the USFM folders.
    pub root: PathBuf,
    /// USFM folder names, e.g. `ght_usfm`.
    pub folders: Vec<String>,
    /// Directory the USX folders are created in.
    pub out_root: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UsxReport {
    pub converted: usize,
    pub failed: usize,
    pub missing: usize,
}

/// Name of the USX folder for a USFM folder: `ght_usfm` becomes `ght_usx`.
pub fn output_folder(folder: &str) -> String {
    folder.replace("_usfm", "_usx")
}

/// Converts every `.usfm` file of every configured folder.
///
/// A failing file is logged and skipped; only I/O errors on the folders
/// themselves stop the run.
pub fn run<C: Converter>(config: &UsxConfig, converter: &C) -> Result<UsxReport, Error> {
    let mut report = UsxReport::default();

    for folder in &config.folders {
        let in_dir = config.root.join(folder);
        let out_dir = config.out_root.join(output_folder(folder));
        fs::create_dir_all(&out_dir).map_err(|e| Error::Io {
            path: out_dir.display().to_string(),
            cause: e.to_string(),
        })?;

        let files = usfm_files(&in_dir)?;
        info!("Processing {} ({} files)", folder, files.len());

        for file in files {
            let stem = file.file_stem().unwrap_or_default().to_string_lossy();
            let out_file = out_dir.join(format!("{}.usx", stem));
            info!("{} -> {}", file.display(), out_file.display());

            match converter.convert(&file, &out_file) {
                Ok(out) if out.success() => {
                    if out_file.exists() {
                        report.converted += 1;
                    } else {
                        warn!("Converted but file missing: {}", out_file.display());
                        report.missing += 1;
                    }
                }
                Ok(out) => {
                    error!("FAILED {}: {}", file.display(), out.message());
                    report.failed += 1;
                }
                Err(e) => {
                    error!("FAILED {}: {}", file.display(), e);
                    report.failed += 1;
                }
            }
        }
    }

    info!(
        "Done: {} converted, {} failed, {} missing",
        report.converted, report.failed, report.missing
    );
    Ok(report)
}

/// The `.usfm` files of a folder, sorted by name. A missing folder has
/// none.
fn usfm_files(dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let io_error = |e: io::Error| Error::Io {
        path: dir.display().to_string(),
        cause: e.to_string(),
    };

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{} does not exist", dir.display());
            return Ok(vec![]);
        }
        Err(e) => return Err(io_error(e)),
    };

    let mut files = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    files.retain(|p| p.is_file() && p.extension().map_or(false, |ext| ext == "usfm"));
    files.sort();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Writes the output file unless the input name says otherwise.
    #[derive(Default)]
    struct TestConverter {
        calls: RefCell<Vec<(PathBuf, PathBuf)>>,
    }

    impl Converter for TestConverter {
        fn convert(&self, input: &Path, output: &Path) -> io::Result<ConversionOutput> {
            self.calls
                .borrow_mut()
                .push((input.to_path_buf(), output.to_path_buf()));

            let name = input.file_name().unwrap().to_string_lossy();
            if name.contains("BAD") {
                return Ok(ConversionOutput {
                    code: Some(1),
                    stdout: "line 3: unknown marker".to_string(),
                    stderr: String::new(),
                });
            }
            if name.contains("GONE") {
                return Ok(ConversionOutput {
                    code: Some(0),
                    ..Default::default()
                });
            }
            if name.contains("CRASH") {
                return Err(io::Error::new(io::ErrorKind::NotFound, "no such program"));
            }

            fs::write(output, "<usx/>")?;
            Ok(ConversionOutput {
                code: Some(0),
                ..Default::default()
            })
        }
    }

    #[test]
    fn folder_names() {
        assert_eq!(output_folder("ght_usfm"), "ght_usx");
        assert_eq!(output_folder("ghtg_usfm"), "ghtg_usx");
    }

    #[test]
    fn message_prefers_stderr() {
        let out = ConversionOutput {
            code: Some(2),
            stdout: "out".to_string(),
            stderr: " err \n".to_string(),
        };
        assert_eq!(out.message(), "err");
        assert!(!out.success());
    }

    #[test]
    fn converts_each_file() {
        let root = tempfile::tempdir().unwrap();
        let out_root = tempfile::tempdir().unwrap();
        let usfm = root.path().join("ght_usfm");
        fs::create_dir(&usfm).unwrap();
        for name in ["41MATGHT.usfm", "01GENGHT.usfm", "02BADGHT.usfm", "03GONEGHT.usfm"] {
            fs::write(usfm.join(name), "\\id X\n").unwrap();
        }
        fs::write(usfm.join("notes.txt"), "skip").unwrap();

        let converter = TestConverter::default();
        let report = run(
            &UsxConfig {
                root: root.path().to_path_buf(),
                folders: vec!["ght_usfm".to_string(), "ghtg_usfm".to_string()],
                out_root: out_root.path().to_path_buf(),
            },
            &converter,
        )
        .unwrap();

        assert_eq!(
            report,
            UsxReport {
                converted: 2,
                failed: 1,
                missing: 1
            }
        );

        let inputs = converter
            .calls
            .borrow()
            .iter()
            .map(|(input, _)| input.file_name().unwrap().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        assert_eq!(
            inputs,
            vec!["01GENGHT.usfm", "02BADGHT.usfm", "03GONEGHT.usfm", "41MATGHT.usfm"]
        );

        let usx = out_root.path().join("ght_usx");
        assert!(usx.join("01GENGHT.usx").exists());
        assert!(usx.join("41MATGHT.usx").exists());
        assert!(!usx.join("02BADGHT.usx").exists());
        assert!(out_root.path().join("ghtg_usx").is_dir());
    }

    #[test]
    fn spawn_failure_is_not_fatal() {
        let root = tempfile::tempdir().unwrap();
        let usfm = root.path().join("ght_usfm");
        fs::create_dir(&usfm).unwrap();
        fs::write(usfm.join("01CRASHGHT.usfm"), "\\id GEN\n").unwrap();
        fs::write(usfm.join("02EXOGHT.usfm"), "\\id EXO\n").unwrap();

        let report = run(
            &UsxConfig {
                root: root.path().to_path_buf(),
                folders: vec!["ght_usfm".to_string()],
                out_root: root.path().to_path_buf(),
            },
            &TestConverter::default(),
        )
        .unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(report.converted, 1);
    }
}
