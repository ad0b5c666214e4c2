//! Processing order of loaded pages.

use crate::page::PageResult;

/// Move index pages behind all other pages.
///
/// Index pages summarize the rest of the site, so they are rendered last.
/// The partition is stable: both groups keep their relative order.
pub fn move_index_pages_to_end(pages: &mut Vec<PageResult>) {
    let (others, indices): (Vec<_>, Vec<_>) = pages.drain(..).partition(|p| !p.is_index());
    pages.extend(others);
    pages.extend(indices);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{PageHeader, PageModel};
    use pretty_assertions::assert_eq;

    fn page(name: &str, is_index: bool) -> PageResult {
        let mut page = PageResult::new(format!("{name}.md").into(), format!("{name}.html").into());
        page.set_model(PageModel {
            header: PageHeader {
                title: name.to_owned(),
                description: String::new(),
                date: None,
                is_blog_post: false,
                is_index,
                template: "post".to_owned(),
            },
            markdown: String::new(),
            contents: String::new(),
            page_link: format!("{name}.html"),
        });
        page
    }

    fn titles(pages: &[PageResult]) -> Vec<&str> {
        pages
            .iter()
            .map(|p| p.model.as_ref().unwrap().header.title.as_str())
            .collect()
    }

    #[test]
    fn test_index_pages_move_to_end_stably() {
        let mut pages = vec![
            page("home", true),
            page("a", false),
            page("toc", true),
            page("b", false),
            page("c", false),
        ];

        move_index_pages_to_end(&mut pages);

        assert_eq!(titles(&pages), vec!["a", "b", "c", "home", "toc"]);
    }

    #[test]
    fn test_partition_invariant_for_all_flag_patterns() {
        // every combination of index flags over five pages
        for mask in 0u32..32 {
            let mut pages: Vec<_> = (0..5)
                .map(|i| page(&i.to_string(), mask & (1 << i) != 0))
                .collect();

            move_index_pages_to_end(&mut pages);

            let first_index = pages.iter().position(PageResult::is_index).unwrap_or(pages.len());
            assert!(pages[first_index..].iter().all(PageResult::is_index));
            assert!(pages[..first_index].iter().all(|p| !p.is_index()));

            let order: Vec<usize> = titles(&pages).iter().map(|t| t.parse().unwrap()).collect();
            let (others, indices) = order.split_at(first_index);
            assert!(others.is_sorted());
            assert!(indices.is_sorted());
            assert_eq!(pages.len(), 5);
        }
    }

    #[test]
    fn test_unloaded_pages_count_as_regular() {
        let mut pages = vec![
            page("home", true),
            PageResult::new("raw.md".into(), "raw.html".into()),
        ];

        move_index_pages_to_end(&mut pages);

        assert_eq!(pages[0].name(), "raw.md");
        assert!(pages[1].is_index());
    }

    #[test]
    fn test_empty_collection() {
        let mut pages = Vec::new();
        move_index_pages_to_end(&mut pages);
        assert!(pages.is_empty());
    }
}
