use serde::Serialize;

/// Front matter written at the top of the rewritten file.
///
/// Field order here is the order in the generated block.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub(crate) struct FrontMatter {
    pub title: String,
    pub date: String,
    pub description: String,
    slug: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub image: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl FrontMatter {
    pub fn new(
        title: String,
        date: String,
        description: String,
        image: String,
        categories: Vec<String>,
        tags: Vec<String>,
    ) -> Self {
        // slug always follows the title it was built with
        let slug = slug::slugify(&title);
        Self {
            title,
            date,
            description,
            slug,
            image,
            categories,
            tags,
        }
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Renders the `---` delimited block, including the blank line after it.
    pub fn to_block(&self) -> anyhow::Result<String> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("---\n{yaml}---\n\n"))
    }
}
