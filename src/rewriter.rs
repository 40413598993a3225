use std::path::Path;

use anyhow::Context as _;
use log::{debug, info, warn};

use crate::{context::Context, metadata::FrontMatter};

mod extract;
mod utils;

use extract::extract;
use utils::{default_title, now_timestamp};

/// Builds the new file content: front matter block followed by the processed body.
pub(crate) fn render(
    content: &str,
    path: &Path,
    date: String,
    duplicate_heading: bool,
) -> anyhow::Result<String> {
    let default = default_title(path);
    let extracted = extract(content, &default, duplicate_heading);
    if !extracted.heading_found {
        warn!("No heading found in {path:?}. using {default:?} as title");
    }

    let fields = extracted.fields;
    let front_matter = FrontMatter::new(
        extracted.title,
        date,
        fields.description,
        fields.image,
        fields.categories,
        fields.tags,
    );
    debug!("title {:?} -> slug {:?}", front_matter.title, front_matter.slug());
    let block = front_matter
        .to_block()
        .with_context(|| format!("while serializing front matter of {path:?}"))?;

    Ok(block + &extracted.lines.join("\n"))
}

/// Reads the file as text; bytes that are not valid UTF-8 become U+FFFD.
fn read_content(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).context("Error reading file")?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn write_content(path: &Path, content: String) -> anyhow::Result<()> {
    std::fs::write(path, content).context("Error writing file")
}

pub(crate) fn rewrite(c: &Context) -> anyhow::Result<()> {
    let path = &c.file_path;

    let content = read_content(path)?;
    let new_content = render(&content, path, now_timestamp(), c.duplicate_heading)?;

    if c.dry_run {
        print!("{new_content}");
        return Ok(());
    }

    write_content(path, new_content)?;
    info!("Rewrote {path:?}");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const DATE: &str = "2024-01-02 03:04:05+0900";

    fn render_at(content: &str, name: &str) -> String {
        render(content, &PathBuf::from(name), DATE.to_string(), true).unwrap()
    }

    fn split(output: &str) -> (&str, &str) {
        let rest = output.strip_prefix("---\n").unwrap();
        rest.split_once("---\n\n").unwrap()
    }

    #[test]
    fn heading_scenario() {
        let out = render_at("description: Hello\n# My Title\nBody text\n", "posts/index.md");
        let (yaml, body) = split(&out);
        assert!(yaml.starts_with("title: My Title\n"));
        assert!(yaml.contains("description: Hello\n"));
        assert!(yaml.contains("slug: my-title\n"));
        assert_eq!(body, "# My Title\n\n# My Title\nBody text\n");
    }

    #[test]
    fn no_recognized_lines_leaves_body_unchanged() {
        let content = "plain paragraph\n\nanother one\n";
        let out = render_at(content, "notes.md");
        let (yaml, body) = split(&out);
        assert!(yaml.starts_with("title: notes.md\n"));
        assert!(yaml.contains("description: ''\n"));
        assert!(!yaml.contains("image:"));
        assert!(!yaml.contains("categories:"));
        assert!(!yaml.contains("tags:"));
        assert_eq!(body, content);
    }

    #[test]
    fn empty_file_is_just_the_block() {
        let out = render_at("", "index.md");
        let (yaml, body) = split(&out);
        assert!(yaml.starts_with("title: .md\n"));
        assert!(yaml.contains("slug: md\n"));
        assert_eq!(body, "");
        assert!(out.ends_with("---\n\n"));
    }

    #[test]
    fn list_fields_are_rendered() {
        let out = render_at("tags: a, b\n# T\n", "x.md");
        let (yaml, _) = split(&out);
        assert!(yaml.contains("tags:\n- a\n- b\n"));
    }

    #[test]
    fn rewrites_file_on_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("index-post.md");
        std::fs::write(&path, "image: cover.png\n# Hello World\ntext\n").unwrap();

        let c = Context {
            file_path: path.clone(),
            duplicate_heading: true,
            dry_run: false,
        };
        rewrite(&c).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let (yaml, body) = split(&written);
        assert!(yaml.starts_with("title: Hello World\ndate: "));
        assert!(yaml.contains("slug: hello-world\n"));
        assert!(yaml.contains("image: cover.png\n"));
        assert_eq!(body, "# Hello World\n\n# Hello World\ntext\n");
    }

    #[test]
    fn dry_run_leaves_file_alone() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("post.md");
        std::fs::write(&path, "# Title\n").unwrap();

        let c = Context {
            file_path: path.clone(),
            duplicate_heading: true,
            dry_run: true,
        };
        rewrite(&c).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# Title\n");
    }

    #[test]
    fn missing_file_reports_read_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let c = Context {
            file_path: dir.path().join("missing.md"),
            duplicate_heading: true,
            dry_run: false,
        };
        let err = rewrite(&c).unwrap_err();
        assert!(format!("{err:#}").starts_with("Error reading file: "));
    }

    #[test]
    fn non_utf8_file_is_rewritten() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("latin1.md");
        std::fs::write(&path, b"description: caf\xe9\n# Title\nbody\n").unwrap();

        let c = Context {
            file_path: path.clone(),
            duplicate_heading: true,
            dry_run: false,
        };
        rewrite(&c).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let (yaml, body) = split(&written);
        assert!(yaml.starts_with("title: Title\n"));
        let parsed: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed["description"].as_str(), Some("caf\u{fffd}"));
        assert_eq!(body, "# Title\n\n# Title\nbody\n");
    }

    #[test]
    fn unwritable_target_reports_write_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("post.md");

        let err = write_content(&path, "# Title\n".to_string()).unwrap_err();
        assert!(format!("{err:#}").starts_with("Error writing file: "));
        assert!(!path.exists());
    }
}
