//! Plain text rendering for segmented documents.

use crate::error::Result;
use crate::model::SegmentedDocument;

use super::RenderOptions;

/// Convert a segmented document to plain text: each heading on its own line,
/// followed by its content, sections separated by a blank line.
pub fn to_text(doc: &SegmentedDocument, options: &RenderOptions) -> Result<String> {
    let blocks: Vec<String> = doc
        .sections
        .iter()
        .filter(|s| options.include_empty_sections || !s.content.trim().is_empty())
        .map(|s| {
            let heading = options.normalize(&s.heading);
            let content = options.normalize(&s.content);
            match (heading.is_empty(), content.is_empty()) {
                (true, _) => content,
                (false, true) => heading,
                (false, false) => format!("{}\n{}", heading, content),
            }
        })
        .filter(|block| !block.is_empty())
        .collect();

    Ok(blocks.join("\n\n"))
}
