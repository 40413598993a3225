use std::ops::ControlFlow;

use log::debug;

use super::utils::split_list;

const HEADING: &str = "# ";

/// Fields collected from metadata lines.
#[derive(Debug, Default, Clone, PartialEq)]
pub(super) struct Fields {
    pub description: String,
    pub image: String,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Extracted {
    pub title: String,
    /// `false` when the title fell back to the default.
    pub heading_found: bool,
    pub fields: Fields,
    pub lines: Vec<String>,
}

struct Rule {
    prefix: &'static str,
    apply: fn(&mut Fields, &str),
}

fn set_description(fields: &mut Fields, value: &str) {
    fields.description = value.trim().to_string();
}

fn set_image(fields: &mut Fields, value: &str) {
    fields.image = value.trim().to_string();
}

fn set_categories(fields: &mut Fields, value: &str) {
    fields.categories = split_list(value.trim());
}

fn set_tags(fields: &mut Fields, value: &str) {
    fields.tags = split_list(value.trim());
}

// prefixes are disjoint, so at most one rule matches a line
const RULES: &[Rule] = &[
    Rule {
        prefix: "description: ",
        apply: set_description,
    },
    Rule {
        prefix: "image: ",
        apply: set_image,
    },
    Rule {
        prefix: "categories: ",
        apply: set_categories,
    },
    Rule {
        prefix: "tags: ",
        apply: set_tags,
    },
];

#[derive(Default)]
struct Scan {
    fields: Fields,
    lines: Vec<String>,
}

/// Position and title of the first heading, which ends the scan.
struct Heading {
    index: usize,
    title: String,
}

/// Single pass over `content`: metadata lines before the first heading are
/// consumed into [`Fields`] and blanked, the heading (if any) gives the title.
///
/// With `duplicate_heading`, the heading line is also inserted at the very
/// front of the returned lines while staying at its original position.
pub(super) fn extract(content: &str, default_title: &str, duplicate_heading: bool) -> Extracted {
    let lines: Vec<&str> = content.split('\n').collect();

    let flow = lines
        .iter()
        .enumerate()
        .try_fold(Scan::default(), |mut scan, (index, line)| {
            if let Some(rest) = line.strip_prefix(HEADING) {
                debug!("heading at line {}, stopping scan", index + 1);
                return ControlFlow::Break((
                    scan,
                    Heading {
                        index,
                        title: rest.trim().to_string(),
                    },
                ));
            }

            match RULES
                .iter()
                .find_map(|rule| line.strip_prefix(rule.prefix).map(|rest| (rule, rest)))
            {
                Some((rule, rest)) => {
                    debug!("{:?} at line {}", rule.prefix.trim_end(), index + 1);
                    (rule.apply)(&mut scan.fields, rest);
                    scan.lines.push(String::new());
                }
                None => scan.lines.push(line.to_string()),
            }
            ControlFlow::Continue(scan)
        });

    match flow {
        ControlFlow::Continue(scan) => Extracted {
            title: default_title.to_string(),
            heading_found: false,
            fields: scan.fields,
            lines: scan.lines,
        },
        ControlFlow::Break((scan, heading)) => {
            let mut out = Vec::with_capacity(lines.len() + 1);
            if duplicate_heading {
                out.push(lines[heading.index].to_string());
            }
            out.extend(scan.lines);
            out.extend(lines[heading.index..].iter().map(|l| l.to_string()));
            Extracted {
                title: heading.title,
                heading_found: true,
                fields: scan.fields,
                lines: out,
            }
        }
    }
}
