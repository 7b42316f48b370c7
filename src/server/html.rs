//! Server-rendered pages

use crate::convert::EBOOK_FORMATS;
use crate::ops::{Category, Field, Operation};
use quick_xml::escape::escape;
use std::fmt::Write;

/// A stored artifact as listed on the result page
#[derive(Debug, Clone)]
pub struct DownloadLink {
    pub id: String,
    pub file_name: String,
    pub size: usize,
}

const STYLE: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; display: flex; min-height: 100vh; }
nav { width: 15rem; background: #f3f4f6; padding: 1rem; }
nav h2 { font-size: .8rem; text-transform: uppercase; color: #6b7280; margin: 1rem 0 .3rem; }
nav form { margin: 0; }
nav button { width: 100%; text-align: left; background: none; border: 0; padding: .3rem .5rem; cursor: pointer; border-radius: 4px; }
nav button:hover, nav button.active { background: #dbeafe; }
main { flex: 1; padding: 2rem; max-width: 40rem; }
label { display: block; margin: 1rem 0 .3rem; }
.error { background: #fee2e2; color: #991b1b; padding: .6rem 1rem; border-radius: 4px; }
.success { background: #dcfce7; color: #166534; padding: .6rem 1rem; border-radius: 4px; }
#busy { display: none; margin-top: 1rem; color: #1d4ed8; }
"#;

const BUSY_SCRIPT: &str = r#"<script>
function showBusy(form) {
  document.getElementById('busy').style.display = 'block';
  form.querySelector('button[type=submit]').disabled = true;
}
</script>"#;

fn layout(current: Option<Operation>, main: &str) -> String {
    let mut nav = String::new();
    for category in Category::ALL {
        let _ = write!(nav, "<h2>{}</h2>", category.label());
        for op in category.operations() {
            let class = if current == Some(op) { " class=\"active\"" } else { "" };
            let _ = write!(
                nav,
                r#"<form method="post" action="/select/{}"><button type="submit"{}>{}</button></form>"#,
                op.slug(),
                class,
                op.label()
            );
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>PDF Workbench</title>
<style>{STYLE}</style>
</head>
<body>
<nav><h1>PDF Workbench</h1>{nav}</nav>
<main>{main}</main>
{BUSY_SCRIPT}
</body>
</html>"#
    )
}

/// Landing page with no operation selected
pub fn menu_page() -> String {
    layout(
        None,
        "<h2>Welcome</h2><p>Pick an operation from the menu to get started.</p>",
    )
}

fn render_field(out: &mut String, field: &Field) {
    match field {
        Field::Upload {
            label,
            accept,
            multiple,
        } => {
            let multiple = if *multiple { " multiple" } else { "" };
            let _ = write!(
                out,
                r#"<label for="files">{label}</label><input id="files" type="file" name="files" accept="{accept}"{multiple}>"#
            );
        }
        Field::InsertUpload => out.push_str(
            r#"<label for="insert_file">PDF to insert</label><input id="insert_file" type="file" name="insert_file" accept=".pdf">"#,
        ),
        Field::Ranges => out.push_str(
            r#"<label for="ranges">Ranges (e.g. 1-3,4-5)</label><input id="ranges" type="text" name="ranges">"#,
        ),
        Field::Pages => out.push_str(
            r#"<label for="pages">Pages to delete (e.g. 1,3,5)</label><input id="pages" type="text" name="pages">"#,
        ),
        Field::Angle => out.push_str(
            r#"<label for="angle">Angle</label><select id="angle" name="angle"><option>90</option><option>180</option><option>270</option></select>"#,
        ),
        Field::Crop => {
            for (name, default) in [("x0", 0), ("y0", 0), ("x1", 612), ("y1", 792)] {
                let _ = write!(
                    out,
                    r#"<label for="{name}">{name}</label><input id="{name}" type="number" step="any" name="{name}" value="{default}">"#
                );
            }
        }
        Field::Password => out.push_str(
            r#"<label for="password">Password</label><input id="password" type="password" name="password">"#,
        ),
        Field::Text => out.push_str(
            r#"<label for="text">Watermark text</label><input id="text" type="text" name="text" value="Confidential">"#,
        ),
        Field::Position => out.push_str(
            r#"<label for="position">Insert at position (0-based)</label><input id="position" type="number" min="0" step="1" name="position" value="0">"#,
        ),
        Field::TargetFormat => {
            out.push_str(r#"<label for="target_format">Target format</label><select id="target_format" name="target_format">"#);
            for fmt in EBOOK_FORMATS {
                let _ = write!(out, "<option>{fmt}</option>");
            }
            out.push_str("</select>");
        }
    }
}

fn back_button() -> &'static str {
    r#"<form method="post" action="/back"><button type="submit">&larr; Back</button></form>"#
}

fn operation_form(out: &mut String, operation: Operation) {
    out.push_str(
        r#"<form method="post" action="/run" enctype="multipart/form-data" onsubmit="showBusy(this)">"#,
    );
    for field in operation.fields() {
        render_field(out, field);
    }
    let _ = write!(
        out,
        r#"<p><button type="submit">{}</button></p><div id="busy">Working&hellip;</div></form>"#,
        operation.action_label()
    );
}

/// Form for the selected operation, optionally with an inline error
pub fn form_page(operation: Operation, error: Option<&str>) -> String {
    let mut main = String::new();
    main.push_str(back_button());
    let _ = write!(main, "<h2>{}</h2>", operation.label());

    if let Some(message) = error {
        let _ = write!(main, r#"<p class="error">{}</p>"#, escape(message));
    }

    operation_form(&mut main, operation);

    layout(Some(operation), &main)
}

fn human_size(bytes: usize) -> String {
    match bytes {
        b if b >= 1024 * 1024 => format!("{:.1} MB", b as f64 / (1024.0 * 1024.0)),
        b if b >= 1024 => format!("{:.1} KB", b as f64 / 1024.0),
        b => format!("{} B", b),
    }
}

/// Success page listing one download link per stored artifact
pub fn result_page(operation: Operation, links: &[DownloadLink], dropped: usize) -> String {
    let mut main = String::new();
    main.push_str(back_button());
    let _ = write!(
        main,
        r#"<h2>{}</h2><p class="success">{}</p><ul>"#,
        operation.label(),
        operation.success_message()
    );
    for link in links {
        let _ = write!(
            main,
            r#"<li><a href="/download/{}" download="{}">Download {}</a> ({})</li>"#,
            link.id,
            escape(link.file_name.as_str()),
            escape(link.file_name.as_str()),
            human_size(link.size)
        );
    }
    main.push_str("</ul>");
    if dropped > 0 {
        let _ = write!(
            main,
            r#"<p class="error">{} result file(s) were too large to keep for download.</p>"#,
            dropped
        );
    }

    // Re-offer the form so the operation can be run again
    operation_form(&mut main, operation);

    layout(Some(operation), &main)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_every_operation() {
        let page = menu_page();
        for op in Operation::ALL {
            assert!(page.contains(op.label()), "missing {}", op);
            assert!(page.contains(&format!("/select/{}", op.slug())));
        }
    }

    #[test]
    fn test_form_has_widgets_and_escaped_error() {
        let page = form_page(Operation::CropPdf, Some("Invalid <crop box>"));
        assert!(page.contains(r#"name="x1""#));
        assert!(page.contains(r#"value="792""#));
        assert!(page.contains("Invalid &lt;crop box&gt;"));
        assert!(page.contains(r#"accept=".pdf""#));

        let merge = form_page(Operation::MergePdfs, None);
        assert!(merge.contains(" multiple"));
        assert!(!merge.contains(r#"class="error""#));
    }

    #[test]
    fn test_watermark_text_prefilled() {
        let page = form_page(Operation::AddWatermark, None);
        assert!(page.contains(r#"name="text" value="Confidential""#));
    }

    #[test]
    fn test_result_links() {
        let links = vec![
            DownloadLink {
                id: "abc".to_string(),
                file_name: "part1.pdf".to_string(),
                size: 2048,
            },
            DownloadLink {
                id: "def".to_string(),
                file_name: "part2.pdf".to_string(),
                size: 10,
            },
        ];
        let page = result_page(Operation::SplitPdf, &links, 0);
        assert!(page.contains(r#"href="/download/abc""#));
        assert!(page.contains("Download part2.pdf"));
        assert!(page.contains("2.0 KB"));
        assert!(page.contains("Split!"));
    }

    #[test]
    fn test_human_size() {
        assert_eq!(human_size(12), "12 B");
        assert_eq!(human_size(3 * 1024 * 1024), "3.0 MB");
    }
}
