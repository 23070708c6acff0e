//! `changelog.txt`

use super::{Document, LineEnding};
use crate::package::PackageContext;

/// Render the package changelog. New packages always start at `v1`.
pub fn render(ctx: &PackageContext) -> String {
    let meta = &ctx.metadata;
    let title = format!("RSO Package: {}", meta.name);

    let mut doc = Document::new();
    doc.line(&title)
        .line("=".repeat(title.len()))
        .blank()
        .line(format!("{} v1", meta.date))
        .line(format!("    Business item: {}", meta.business_item));
    for line in meta.description.lines() {
        doc.line(format!("    {line}"));
    }
    doc.finish(LineEnding::Lf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::test_support::context;

    #[test]
    fn test_changelog_header_and_version() {
        let text = render(&context(&["a.frm"], &[], &[], &[]));
        assert!(text.starts_with("RSO Package: Acme\n=================\n"));
        assert!(text.contains("2024-01-01 v1"));
        assert!(text.contains("Business item: BI-1"));
    }
}
