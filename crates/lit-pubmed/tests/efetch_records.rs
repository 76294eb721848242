//! A realistic efetch batch mapped all the way to normalized rows.

use lit_core::entities::NO_TITLE;
use lit_pubmed::efetch::{article_link, parse_articles};
use pretty_assertions::assert_eq;

const BATCH: &str = include_str!("fixtures/efetch_batch.xml");

#[test]
fn batch_maps_to_one_record_per_article() {
    let articles = parse_articles(BATCH).unwrap();
    let pmids: Vec<_> = articles.iter().map(|a| a.pmid.as_deref()).collect();
    assert_eq!(pmids, vec![Some("36500001"), Some("36500002")]);
}

#[test]
fn structured_abstract_keeps_section_labels() {
    let articles = parse_articles(BATCH).unwrap();
    let row = articles[0].normalize();
    assert_eq!(
        row.abstract_text,
        "OBJECTIVE: To quantify the placebo response. METHODS: Randomised trials were pooled. \
         CONCLUSION: Saline has a large effect."
    );
    assert_eq!(row.authors, "Nguyen TM, O'Neill TW");
    assert_eq!(row.doi, "10.1016/j.joca.2022.10.001");
    assert_eq!(row.link, article_link("36500001"));
    assert_eq!(row.year, 2023);
}

#[test]
fn empty_title_and_missing_abstract_become_sentinels() {
    let articles = parse_articles(BATCH).unwrap();
    let row = articles[1].normalize();
    assert_eq!(row.title, NO_TITLE);
    assert_eq!(row.abstract_text, "No Abstract");
    assert_eq!(row.authors, "Knee Trials Consortium");
    assert_eq!(row.doi, "N/A");
    assert_eq!(row.year, 2022);
}
