// Host-side tests for content-browser filtering and paging.

use exhibit_core::{
    available_letters, filter_by_letter, search, Book, Catalog, CatalogEntry, LetterSelector,
    Pager, PagerCommand, Species, SCROLL_PAGE_THRESHOLD,
};

const SPECIES_JSON: &str = r#"[
  {"slug": "clownfish", "name": "Clownfish", "scientificName": "Amphiprion ocellaris", "habitat": "Reef"},
  {"slug": "cuttlefish", "name": "cuttlefish", "scientificName": "Sepia officinalis", "habitat": "Coastal"},
  {"slug": "manta", "name": "Manta Ray", "scientificName": "Mobula birostris", "habitat": "Open ocean"},
  {"slug": "seahorse", "name": "Seahorse", "scientificName": "Hippocampus", "habitat": "Seagrass"}
]"#;

fn species() -> Catalog<Species> {
    Catalog::from_json_str(SPECIES_JSON).expect("species fixture parses")
}

#[test]
fn all_selector_returns_every_entry() {
    let cat = species();
    assert_eq!(filter_by_letter(cat.entries(), LetterSelector::All).len(), cat.len());
}

#[test]
fn letter_filter_is_case_insensitive() {
    let cat = species();
    let c: Vec<&str> = filter_by_letter(cat.entries(), LetterSelector::Letter('C'))
        .iter()
        .map(|s| s.slug())
        .collect();
    assert_eq!(c, vec!["clownfish", "cuttlefish"]);
}

#[test]
fn letter_filter_is_empty_only_without_matches() {
    let cat = species();
    for letter in 'A'..='Z' {
        let hits = filter_by_letter(cat.entries(), LetterSelector::Letter(letter));
        let any_match = cat
            .entries()
            .iter()
            .any(|e| e.title().to_uppercase().starts_with(letter));
        assert_eq!(hits.is_empty(), !any_match, "letter {letter}");
    }
}

#[test]
fn available_letters_are_sorted_and_unique() {
    assert_eq!(available_letters(species().entries()), vec!['C', 'M', 'S']);
}

#[test]
fn search_matches_secondary_fields() {
    let cat = species();
    let all = filter_by_letter(cat.entries(), LetterSelector::All);
    let hits = search(&all, "sepia");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].slug(), "cuttlefish");
    assert_eq!(search(&all, "   ").len(), all.len());
}

#[test]
fn find_by_slug_and_missing_slug() {
    let cat = species();
    assert_eq!(cat.find("manta").map(|s| s.name.as_str()), Some("Manta Ray"));
    assert!(cat.find("kraken").is_none());
}

#[test]
fn wrapped_item_lists_parse() {
    let json = r#"{"items": [{"slug": "dune", "title": "Dune", "author": "Frank Herbert", "year": 1965}]}"#;
    let cat: Catalog<Book> = Catalog::from_json_str(json).expect("wrapped list parses");
    assert_eq!(cat.find("dune").and_then(|b| b.year), Some(1965));
}

#[test]
fn malformed_json_is_an_error() {
    assert!(Catalog::<Book>::from_json_str("{\"items\": 3}").is_err());
}

#[test]
fn pager_clamps_at_both_ends() {
    let mut p = Pager::new(5, 12);
    assert_eq!(p.page_count(), 3);
    assert!(!p.apply(PagerCommand::Prev));
    assert!(p.apply(PagerCommand::Next));
    assert!(p.apply(PagerCommand::Next));
    assert_eq!(p.page_range(), 10..12);
    assert!(!p.apply(PagerCommand::Next));
    assert!(p.apply(PagerCommand::First));
    assert!(p.apply(PagerCommand::Last));
    assert_eq!(p.page(), 2);
    p.reset(3);
    assert_eq!(p.page(), 0);
    assert_eq!(p.page_range(), 0..3);
}

#[test]
fn scroll_turns_one_page_per_threshold() {
    let mut p = Pager::new(2, 10);
    let step = SCROLL_PAGE_THRESHOLD / 3.0;
    assert!(!p.on_scroll(step));
    assert!(!p.on_scroll(step));
    assert!(p.on_scroll(step * 1.01));
    assert_eq!(p.page(), 1);

    // A reversal drops the partial downward scroll.
    assert!(!p.on_scroll(step));
    assert!(!p.on_scroll(-step));
    assert!(!p.on_scroll(-step));
    assert!(p.on_scroll(-step * 1.01));
    assert_eq!(p.page(), 0);
}
