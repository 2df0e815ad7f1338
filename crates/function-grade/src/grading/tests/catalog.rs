use std::io::Cursor;

use crate::grading::{CatalogError, RoleCatalog};

#[test]
fn standard_catalog_lists_sorted_families() {
    let catalog = RoleCatalog::standard();

    assert_eq!(catalog.roles().len(), 41);
    assert_eq!(
        catalog.families(),
        vec![
            "Bedrijfsbureau",
            "Montage",
            "Ondersteunend",
            "Projectleiding",
            "Technisch beheer",
        ]
    );
    assert_eq!(catalog.roles_in("Montage").count(), 8);
    assert!(catalog.contains_family("Ondersteunend"));
    assert!(!catalog.contains_family("Verkoop"));
    assert_eq!(
        catalog.find("HM_7").map(|role| role.title.as_str()),
        Some("Hoofdmonteur (7)")
    );
}

#[test]
fn standard_catalog_passes_validation() {
    let roles = RoleCatalog::standard().roles().to_vec();
    assert!(RoleCatalog::from_roles(roles).is_ok());
}

#[test]
fn loads_catalog_from_json() {
    let json = r#"[
        {"code": "KOK_4", "title": "Kok (4)", "family": "Horeca", "level": 4},
        {"code": "CHEF_7", "title": "Chef-kok (7)", "family": "Horeca", "level": 7, "keywords": ["keuken"]}
    ]"#;

    let catalog = RoleCatalog::from_reader(Cursor::new(json)).expect("catalog parses");

    assert_eq!(catalog.families(), vec!["Horeca"]);
    assert_eq!(catalog.best_match("Horeca", 6).best.expect("role").code, "CHEF_7");
    assert!(catalog.roles()[0].keywords.is_empty());
}

#[test]
fn rejects_roles_outside_allowed_levels() {
    let json = r#"[{"code": "X_12", "title": "X", "family": "F", "level": 12}]"#;

    match RoleCatalog::from_reader(Cursor::new(json)) {
        Err(CatalogError::InvalidLevel { code, level }) => {
            assert_eq!(code, "X_12");
            assert_eq!(level, 12);
        }
        other => panic!("expected invalid level, got {other:?}"),
    }
}

#[test]
fn rejects_duplicate_codes() {
    let json = r#"[
        {"code": "A", "title": "A (5)", "family": "F", "level": 5},
        {"code": "A", "title": "A (6)", "family": "F", "level": 6}
    ]"#;

    assert!(matches!(
        RoleCatalog::from_reader(Cursor::new(json)),
        Err(CatalogError::DuplicateCode(code)) if code == "A"
    ));
}

#[test]
fn missing_catalog_file_reports_path() {
    let error = RoleCatalog::from_path("/nonexistent/roles.json").expect_err("missing file");
    assert!(error.to_string().contains("/nonexistent/roles.json"));
}
