use crate::api::validate::{MAX_TITLE_LENGTH, clean_description, clean_title};

#[test]
fn test_clean_title_trims_whitespace() {
    let title = clean_title("  Sprint planning  ", "title").unwrap();
    assert_eq!(title, "Sprint planning");
}

#[test]
fn test_clean_title_rejects_empty() {
    assert!(clean_title("   ", "title").is_err());
}

#[test]
fn test_clean_title_rejects_oversized() {
    let long = "x".repeat(MAX_TITLE_LENGTH + 1);
    assert!(clean_title(&long, "title").is_err());
}

#[test]
fn test_clean_description_collapses_empty_to_none() {
    assert_eq!(clean_description(Some("   ".into())).unwrap(), None);
    assert_eq!(clean_description(None).unwrap(), None);
}

#[test]
fn test_clean_description_keeps_content() {
    let description = clean_description(Some(" details ".into())).unwrap();
    assert_eq!(description.as_deref(), Some("details"));
}
