use super::error::Rejection;
use super::metadata::{MetadataSource, Template};

/// Wrap `source` in the templates, in the order given.
pub fn apply_templates(templates: &[Template], source: &str) -> String {
    templates
        .iter()
        .fold(source.to_owned(), |acc, template| {
            if template.prepend {
                format!("{}\n{}", template.code, acc)
            } else {
                format!("{}\n{}", acc, template.code)
            }
        })
}

/// Source handed to the judge for `problem_id` in `language`.
pub async fn transform(
    problem_id: u32,
    language: u32,
    source: &str,
    metadata: &dyn MetadataSource,
) -> Result<String, Rejection> {
    let templates = metadata.templates(problem_id, language).await?;
    Ok(apply_templates(&templates, source))
}
