use crate::book::tune::Tune;
use crate::converter::converter_config::ConverterConfig;
use crate::converter::TuneConverter;
use crate::AbcError;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::process::Command;

/// Converter backed by the abcm2ps, abc2midi and abc2abc command line tools.
#[derive(Debug, Clone, Default)]
pub struct AbcTools {
    config: ConverterConfig,
}

impl AbcTools {
    pub const fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Run `program` to completion and return its stdout.
    ///
    /// The child is killed if it outlives the configured timeout.
    fn run(&self, program: &Path, args: &[&OsStr]) -> Result<Vec<u8>, AbcError> {
        let name = program.display().to_string();
        let timeout = self.config.timeout();
        log::debug!("Running {name} {args:?}");

        // a runtime cannot be nested, so async callers get a dedicated thread
        let output = if tokio::runtime::Handle::try_current().is_ok() {
            std::thread::scope(|scope| {
                scope
                    .spawn(|| wait_for_child(program, args, &name, timeout))
                    .join()
            })
            .map_err(|_| AbcError::ExternalToolError(format!("{name} runner thread panicked")))??
        } else {
            wait_for_child(program, args, &name, timeout)?
        };

        if !output.status.success() {
            log::warn!("{name} exited with {}", output.status);
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AbcError::ExternalToolError(format!(
                "{name} exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }
        Ok(output.stdout)
    }
}

impl TuneConverter for AbcTools {
    fn render_svg(&self, tune: &Tune, output: &Path) -> Result<(), AbcError> {
        let source = write_transient(tune)?;
        self.run(
            &self.config.abcm2ps,
            &[
                OsStr::new("-v"),
                OsStr::new("-O"),
                output.as_os_str(),
                source.path().as_os_str(),
            ],
        )?;
        // abcm2ps numbers its pages: `tune.svg` is written as `tune001.svg`
        let first_page = page_one_path(output);
        std::fs::rename(&first_page, output).map_err(|err| {
            AbcError::ExternalToolError(format!(
                "abcm2ps output {} not found: {err}",
                first_page.display()
            ))
        })?;
        log::info!("Rendered {:?} to {output:?}", tune.title());
        Ok(())
    }

    fn render_midi(&self, tune: &Tune, output: &Path) -> Result<(), AbcError> {
        let source = write_transient(tune)?;
        self.run(
            &self.config.abc2midi,
            &[
                source.path().as_os_str(),
                OsStr::new("-o"),
                output.as_os_str(),
            ],
        )?;
        log::info!("Rendered {:?} to {output:?}", tune.title());
        Ok(())
    }

    fn transpose(&self, tune: &Tune, semitones: i32) -> Result<String, AbcError> {
        let source = write_transient(tune)?;
        let semitones = OsString::from(semitones.to_string());
        let stdout = self.run(
            &self.config.abc2abc,
            &[
                source.path().as_os_str(),
                OsStr::new("-e"),
                OsStr::new("-t"),
                semitones.as_os_str(),
            ],
        )?;
        String::from_utf8(stdout).map_err(|err| {
            AbcError::ExternalToolError(format!("abc2abc output is not valid UTF-8: {err}"))
        })
    }
}

fn wait_for_child(
    program: &Path,
    args: &[&OsStr],
    name: &str,
    timeout: Duration,
) -> Result<Output, AbcError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async {
        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|err| AbcError::ExternalToolError(format!("could not start {name}: {err}")))?;
        match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(output) => {
                output.map_err(|err| AbcError::ExternalToolError(format!("{name} failed: {err}")))
            }
            Err(_) => Err(AbcError::ExternalToolError(format!(
                "{name} timed out after {}s",
                timeout.as_secs()
            ))),
        }
    })
}

/// Path abcm2ps writes the first page of `output` to.
pub fn page_one_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match output.extension() {
        Some(extension) => format!("{stem}001.{}", extension.to_string_lossy()),
        None => format!("{stem}001"),
    };
    output.with_file_name(file_name)
}

/// Tune text in a temporary `.abc` file, removed on drop.
fn write_transient(tune: &Tune) -> Result<NamedTempFile, AbcError> {
    let mut file = tempfile::Builder::new()
        .prefix("tune")
        .suffix(".abc")
        .tempfile()?;
    file.write_all(tune.raw_text().as_bytes())?;
    file.flush()?;
    Ok(file)
}
