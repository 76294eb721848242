//! Transactional behaviour of the result store: a run and its results are
//! written together or not at all.

use lit_core::entities::{NO_TITLE, NewRun, RawArticle, ResultLink};
use lit_core::ids::RunId;
use lit_core::range::DateRange;
use lit_db::ResultStore;
use pretty_assertions::assert_eq;
use rstest::rstest;

async fn store() -> ResultStore {
    ResultStore::open_local(":memory:").await.unwrap()
}

fn new_run() -> NewRun {
    NewRun {
        range: DateRange::new(2001, 2004),
        research_purpose: "To assess sleep quality in night-shift nurses.".into(),
        search_strategy: "(sleep quality) AND (nurses OR nurse) AND (night shift)".into(),
    }
}

fn tags(results: &[lit_core::entities::SearchResult]) -> Vec<String> {
    results.iter().map(|r| r.ref_id.to_string()).collect()
}

#[tokio::test]
async fn failed_record_after_begin_leaves_no_run() {
    let store = store().await;
    let session = store.session().await.unwrap();
    session.begin_run(&new_run()).await.unwrap();

    let err = session
        .record_results(ResultLink::Run(RunId(9999)), &[RawArticle::titled("orphan")])
        .await;
    assert!(err.is_err(), "unknown run id must violate the foreign key");

    session.rollback().await.unwrap();
    assert_eq!(store.count_runs().await.unwrap(), 0);
}

#[tokio::test]
async fn persist_run_rolls_back_when_a_later_row_is_rejected() {
    let store = store().await;
    store
        .db()
        .conn()
        .execute(
            "CREATE TRIGGER reject_retracted BEFORE INSERT ON search_results
             WHEN NEW.title = 'retracted'
             BEGIN SELECT RAISE(ABORT, 'retracted article'); END",
            (),
        )
        .await
        .unwrap();
    let articles = vec![RawArticle::titled("fine"), RawArticle::titled("retracted")];

    let err = store.persist_run(new_run(), &articles).await.unwrap_err();
    assert!(err.to_string().contains("retracted article"), "{err}");
    assert_eq!(store.count_runs().await.unwrap(), 0);

    let mut rows = store
        .db()
        .conn()
        .query("SELECT COUNT(*) FROM search_results", ())
        .await
        .unwrap();
    let row = rows.next().await.unwrap().unwrap();
    assert_eq!(row.get::<i64>(0).unwrap(), 0);
}

#[tokio::test]
async fn long_identifiers_are_stored_verbatim() {
    let store = store().await;
    let sici_doi = format!(
        "10.1002/(SICI)1097-0258(19980815/30)17:15/16<1661::AID-SIM968>3.0.CO;2-2{}",
        "x".repeat(50)
    );
    let wide_pmid = "9".repeat(30);
    let articles = vec![
        RawArticle::titled("ok"),
        RawArticle {
            doi: Some(sici_doi.clone()),
            pmid: Some(wide_pmid.clone()),
            ..RawArticle::titled("long identifiers")
        },
    ];

    let persisted = store.persist_run(new_run(), &articles).await.unwrap();
    let stored = store.list_results(persisted.run.id).await.unwrap();
    assert_eq!(stored.len(), 2);
    assert!(sici_doi.len() > 100);
    assert_eq!(stored[1].doi, sici_doi);
    assert_eq!(stored[1].pmid, wide_pmid);
}

#[tokio::test]
async fn dropped_session_discards_its_writes() {
    let store = store().await;
    {
        let session = store.session().await.unwrap();
        let id = session.begin_run(&new_run()).await.unwrap();
        session
            .record_results(ResultLink::Run(id), &[RawArticle::titled("lost")])
            .await
            .unwrap();
    }
    assert_eq!(store.count_runs().await.unwrap(), 0);

    let persisted = store.persist_run(new_run(), &[]).await.unwrap();
    assert_eq!(store.count_runs().await.unwrap(), 1);
    assert!(store.list_results(persisted.run.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn tags_follow_input_order_with_sentinels() {
    let store = store().await;
    let articles = vec![
        RawArticle::titled("A"),
        RawArticle::default(),
        RawArticle::titled("C"),
    ];

    let persisted = store.persist_run(new_run(), &articles).await.unwrap();
    assert_eq!(tags(&persisted.results), vec!["S00001", "S00002", "S00003"]);
    let titles: Vec<&str> = persisted.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["A", NO_TITLE, "C"]);
    assert!(
        persisted
            .results
            .iter()
            .all(|r| r.run_id == Some(persisted.run.id))
    );
}

#[tokio::test]
async fn second_batch_continues_the_run_sequence() {
    let store = store().await;
    let session = store.session().await.unwrap();
    let id = session.begin_run(&new_run()).await.unwrap();
    let link = ResultLink::Run(id);

    let first = session
        .record_results(link, &[RawArticle::titled("a"), RawArticle::titled("b")])
        .await
        .unwrap();
    let second = session
        .record_results(link, &[RawArticle::titled("c")])
        .await
        .unwrap();
    session.commit().await.unwrap();

    assert_eq!(tags(&first), vec!["S00001", "S00002"]);
    assert_eq!(tags(&second), vec!["S00003"]);
    assert_eq!(store.list_results(id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn detached_batches_restart_at_one() {
    let store = store().await;
    let session = store.session().await.unwrap();
    let first = session
        .record_results(ResultLink::Detached, &[RawArticle::titled("a")])
        .await
        .unwrap();
    let second = session
        .record_results(
            ResultLink::Detached,
            &[RawArticle::titled("b"), RawArticle::titled("c")],
        )
        .await
        .unwrap();
    session.commit().await.unwrap();

    assert_eq!(tags(&first), vec!["S00001"]);
    assert_eq!(tags(&second), vec!["S00001", "S00002"]);
    assert!(second.iter().all(|r| r.run_id.is_none()));
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(12)]
#[tokio::test]
async fn n_articles_give_n_strictly_increasing_tags(#[case] n: usize) {
    let store = store().await;
    let articles: Vec<RawArticle> = (0..n)
        .map(|i| RawArticle::titled(&format!("article {i}")))
        .collect();

    let persisted = store.persist_run(new_run(), &articles).await.unwrap();
    let seqs: Vec<u32> = persisted.results.iter().map(|r| r.ref_id.seq()).collect();
    let expected: Vec<u32> = (1..=u32::try_from(n).unwrap()).collect();
    assert_eq!(seqs, expected);
}

#[tokio::test]
async fn file_backed_store_keeps_committed_runs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("search.db");
    let path = path.to_str().unwrap();

    let id = {
        let store = ResultStore::open_local(path).await.unwrap();
        store
            .persist_run(new_run(), &[RawArticle::titled("kept")])
            .await
            .unwrap()
            .run
            .id
    };

    let store = ResultStore::open_local(path).await.unwrap();
    let run = store.get_run(id).await.unwrap();
    assert_eq!(run.range(), DateRange::new(2001, 2004));
    assert_eq!(store.list_results(id).await.unwrap()[0].title, "kept");
}
