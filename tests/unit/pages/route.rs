use super::*;
use crate::catalog::Catalog;

#[test]
fn parses_paths() {
    assert_eq!(Route::parse("/").unwrap(), Route::Home);
    assert_eq!(Route::parse("").unwrap(), Route::Home);
    assert_eq!(Route::parse("/templates/").unwrap(), Route::Templates);
    assert_eq!(
        Route::parse("/designer").unwrap(),
        Route::Designer(DesignerQuery::default())
    );
    assert!(matches!(
        Route::parse("/admin"),
        Err(MockwearError::Validation(_))
    ));
}

#[test]
fn every_gallery_link_round_trips() {
    let catalog = Catalog::builtin();
    for listing in catalog.listings(crate::catalog::Category::All) {
        let Route::Designer(q) = Route::parse(&listing.href()).unwrap() else {
            panic!("expected designer route");
        };
        assert_eq!(q.template.as_deref(), Some(listing.id.to_string().as_str()));
        assert_eq!(q.garment, listing.garment);
        assert_eq!(q.view, listing.view);
        assert_eq!(Route::Designer(q).href(), listing.href());
    }
}

#[test]
fn missing_type_falls_back_to_template_hint() {
    let q = DesignerQuery::parse("?template=hoodie-classic");
    assert_eq!(q.garment, GarmentType::Hoodie);
    assert_eq!(q.view, GarmentView::Front);

    let q = DesignerQuery::parse("template=7&type=sweater&view=upside");
    assert_eq!(q.garment, GarmentType::Tshirt);
    assert_eq!(q.view, GarmentView::Front);

    let q = DesignerQuery::parse("type=polo&view=side");
    assert_eq!(q.template, None);
    assert_eq!((q.garment, q.view), (GarmentType::Polo, GarmentView::Side));
    assert_eq!(q.to_string(), "type=polo&view=side");
}

#[test]
fn query_values_are_percent_decoded() {
    let q = DesignerQuery::parse("?template=Hoodie%20Classic&type=t%2Dshirt&view=%62ack");
    assert_eq!(q.template.as_deref(), Some("Hoodie Classic"));
    assert_eq!(q.garment, GarmentType::Tshirt);
    assert_eq!(q.view, GarmentView::Back);

    let q = DesignerQuery::parse("template=Hoodie+Classic");
    assert_eq!(q.template.as_deref(), Some("Hoodie Classic"));
    assert_eq!(q.garment, GarmentType::Hoodie);

    let link = Route::Designer(q).href();
    assert_eq!(link, "/designer?template=Hoodie%20Classic&type=hoodie&view=front");
    let Route::Designer(back) = Route::parse(&link).unwrap() else {
        panic!("expected designer route");
    };
    assert_eq!(back.template.as_deref(), Some("Hoodie Classic"));
}
