use catalog_core::{Category, Scope};
use pretty_assertions::assert_eq;

#[test]
fn aggregate_expands_to_every_category_in_canonical_order() {
    assert!(Scope::All.is_aggregate());
    assert_eq!(
        Scope::All.categories(),
        vec![
            Category::Movies,
            Category::Music,
            Category::Apps,
            Category::Books
        ]
    );
}

#[test]
fn concrete_scope_is_a_singleton() {
    let scope = Scope::Only(Category::Apps);
    assert!(!scope.is_aggregate());
    assert_eq!(scope.categories(), vec![Category::Apps]);
    assert_eq!(scope.media_token(), "software");
    assert_eq!(scope.title(), "Apps");
}

#[test]
fn exactly_one_scope_is_aggregate() {
    let aggregates = Scope::ALL.iter().filter(|s| s.is_aggregate()).count();
    assert_eq!(aggregates, 1);
}

#[test]
fn media_tokens_match_upstream_parameters() {
    let tokens: Vec<_> = Scope::ALL.iter().map(|s| s.media_token()).collect();
    assert_eq!(tokens, vec!["all", "movie", "music", "software", "ebook"]);
}

#[test]
fn canonical_order_ignores_selection_order() {
    let mut shuffled = vec![Category::Books, Category::Movies, Category::Apps, Category::Music];
    shuffled.sort();
    assert_eq!(shuffled, Category::ALL.to_vec());
}

#[test]
fn parses_titles_and_tokens() {
    assert_eq!("all".parse::<Scope>(), Ok(Scope::All));
    assert_eq!("Movies".parse::<Scope>(), Ok(Scope::Only(Category::Movies)));
    assert_eq!(" ebook ".parse::<Scope>(), Ok(Scope::Only(Category::Books)));
    assert!("podcasts".parse::<Scope>().is_err());
}
