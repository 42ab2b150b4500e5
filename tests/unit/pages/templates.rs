use super::*;

#[test]
fn all_category_lists_every_template() {
    let catalog = Catalog::builtin();
    let text = TemplatesPage::new(&catalog, Category::All).render().unwrap();
    assert!(text.starts_with("Choose Your Template"));
    assert!(text.contains("[All]"));
    assert_eq!(text.matches("[Use Template]").count(), 9);
    assert!(text.contains("/designer?template=1&type=tshirt&view=front"));
}

#[test]
fn filter_narrows_listings() {
    let catalog = Catalog::builtin();
    let page = TemplatesPage::new(&catalog, Category::All).select(Category::Hoodies);
    assert_eq!(page.category(), Category::Hoodies);
    let text = page.render().unwrap();
    assert!(text.contains("[Hoodies]"));
    assert_eq!(text.matches("[Use Template]").count(), 3);
    assert!(!text.contains("type=polo"));

    let empty = TemplatesPage::new(&catalog, Category::Devices).render().unwrap();
    assert_eq!(empty.matches("[Use Template]").count(), 0);
    assert!(empty.contains("No templates in Devices yet."));
}
