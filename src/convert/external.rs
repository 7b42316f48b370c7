//! External conversion binaries: tesseract, LibreOffice and Calibre
//!
//! Every invocation gets its own temporary directory, removed when the
//! operation finishes whatever the outcome, and a hard timeout.

use crate::error::{Error, Result};
use crate::pdf::render_pages_to_png;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;
use tokio::process::Command;

/// Ebook formats Calibre's `ebook-convert` is asked to produce
pub const EBOOK_FORMATS: &[&str] = &["epub", "mobi", "azw3", "fb2", "pdf", "docx", "txt"];

/// Paths and limits for external tools
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// tesseract binary
    pub tesseract: String,
    /// LibreOffice binary
    pub soffice: String,
    /// Calibre ebook-convert binary
    pub ebook_convert: String,
    /// Wall-clock limit for a single tool invocation
    pub timeout: Duration,
    /// Render resolution for OCR input images
    pub ocr_dpi: u16,
    /// tesseract language code(s), e.g. "eng" or "eng+deu"
    pub ocr_lang: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            tesseract: "tesseract".to_string(),
            soffice: "soffice".to_string(),
            ebook_convert: "ebook-convert".to_string(),
            timeout: Duration::from_secs(120),
            ocr_dpi: 300,
            ocr_lang: "eng".to_string(),
        }
    }
}

/// Reduce an uploaded file name to a safe basename for the temp directory.
pub fn safe_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// File stem of a (sanitized) name, used for output naming.
pub fn file_stem(name: &str) -> String {
    Path::new(&safe_file_name(name))
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string())
}

/// Run a tool to completion under a timeout.
///
/// A binary that cannot be found maps to `ToolNotInstalled`; a non-zero
/// exit status maps to `ToolFailed` carrying the tail of stderr.
pub async fn run_tool(program: &str, args: &[OsString], timeout: Duration) -> Result<Output> {
    tracing::debug!(program, ?args, "running external tool");

    let child = Command::new(program)
        .args(args)
        .kill_on_drop(true)
        .output();

    let output = match tokio::time::timeout(timeout, child).await {
        Err(_) => {
            return Err(Error::ToolTimeout {
                tool: program.to_string(),
                seconds: timeout.as_secs(),
            })
        }
        Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::ToolNotInstalled {
                tool: program.to_string(),
            })
        }
        Ok(result) => result?,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail: String = stderr
            .lines()
            .rev()
            .take(5)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect::<Vec<_>>()
            .join("\n");
        return Err(Error::ToolFailed {
            tool: program.to_string(),
            stderr: tail,
        });
    }

    Ok(output)
}

/// OCR every page of a PDF. Returns one text block per page.
pub async fn ocr_pdf(data: Vec<u8>, tools: &ToolConfig) -> Result<Vec<String>> {
    let dpi = tools.ocr_dpi;
    let pages = tokio::task::spawn_blocking(move || render_pages_to_png(&data, dpi))
        .await
        .map_err(|e| Error::Io(std::io::Error::other(e)))??;

    let workdir = tempfile::tempdir()?;
    let mut texts = Vec::with_capacity(pages.len());

    for page in pages {
        let image_path = workdir.path().join(format!("page_{:04}.png", page.page));
        tokio::fs::write(&image_path, &page.png).await?;

        let args: Vec<OsString> = vec![
            image_path.into_os_string(),
            "stdout".into(),
            "-l".into(),
            tools.ocr_lang.clone().into(),
        ];
        let output = run_tool(&tools.tesseract, &args, tools.timeout).await?;
        texts.push(String::from_utf8_lossy(&output.stdout).to_string());
    }

    tracing::info!(pages = texts.len(), "OCR complete");
    Ok(texts)
}

/// Convert an office document (docx, xlsx, pptx, odt, ...) to PDF via LibreOffice.
pub async fn office_to_pdf(name: &str, data: &[u8], tools: &ToolConfig) -> Result<Vec<u8>> {
    let workdir = tempfile::tempdir()?;
    let input = workdir.path().join(safe_file_name(name));
    tokio::fs::write(&input, data).await?;

    let outdir = workdir.path().join("out");
    tokio::fs::create_dir(&outdir).await?;

    let args: Vec<OsString> = vec![
        "--headless".into(),
        "--convert-to".into(),
        "pdf".into(),
        "--outdir".into(),
        outdir.clone().into_os_string(),
        input.into_os_string(),
    ];
    run_tool(&tools.soffice, &args, tools.timeout).await?;

    let produced: PathBuf = outdir.join(format!("{}.pdf", file_stem(name)));
    read_output(&tools.soffice, &produced).await
}

/// Convert between ebook formats via Calibre. `target` must be one of [`EBOOK_FORMATS`].
pub async fn convert_ebook(
    name: &str,
    data: &[u8],
    target: &str,
    tools: &ToolConfig,
) -> Result<Vec<u8>> {
    let target = target.trim().trim_start_matches('.').to_ascii_lowercase();
    if !EBOOK_FORMATS.contains(&target.as_str()) {
        return Err(Error::invalid(
            "target format",
            format!("expected one of {}", EBOOK_FORMATS.join(", ")),
        ));
    }

    let workdir = tempfile::tempdir()?;
    let input = workdir.path().join(safe_file_name(name));
    tokio::fs::write(&input, data).await?;

    let produced = workdir
        .path()
        .join(format!("converted_{}.{}", file_stem(name), target));

    let args: Vec<OsString> = vec![input.into_os_string(), produced.clone().into_os_string()];
    run_tool(&tools.ebook_convert, &args, tools.timeout).await?;

    read_output(&tools.ebook_convert, &produced).await
}

async fn read_output(tool: &str, path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(Error::ToolFailed {
            tool: tool.to_string(),
            stderr: "no output file was produced".to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_file_name() {
        assert_eq!(safe_file_name("report.docx"), "report.docx");
        assert_eq!(safe_file_name("../../etc/passwd"), "passwd");
        assert_eq!(safe_file_name("C:\\Users\\me\\My Book.epub"), "My_Book.epub");
        assert_eq!(safe_file_name(".hidden"), "hidden");
        assert_eq!(safe_file_name(""), "upload");
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem("My Book.epub"), "My_Book");
        assert_eq!(file_stem("noext"), "noext");
    }

    #[tokio::test]
    async fn test_missing_tool_is_reported() {
        let result = run_tool(
            "definitely-not-a-real-converter-binary",
            &[],
            Duration::from_secs(5),
        )
        .await;
        assert!(matches!(result, Err(Error::ToolNotInstalled { .. })));
    }

    #[tokio::test]
    async fn test_ebook_rejects_unknown_target() {
        let result = convert_ebook("book.epub", b"data", "exe", &ToolConfig::default()).await;
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_tool_reports_stderr() {
        let args: Vec<OsString> = vec!["-c".into(), "echo broken >&2; exit 3".into()];
        let result = run_tool("sh", &args, Duration::from_secs(5)).await;
        match result {
            Err(Error::ToolFailed { stderr, .. }) => assert_eq!(stderr, "broken"),
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_tool_times_out() {
        let args: Vec<OsString> = vec!["5".into()];
        let result = run_tool("sleep", &args, Duration::from_millis(100)).await;
        assert!(matches!(result, Err(Error::ToolTimeout { .. })));
    }
}
