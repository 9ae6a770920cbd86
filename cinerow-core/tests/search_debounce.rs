//! Search-as-you-type against a catalog with real latency.

mod support;

use cinerow_core::{Catalog, SearchController};
use std::{sync::Arc, time::Duration};
use support::{FakeCatalog, ms};
use tokio::time;

const DEBOUNCE: Duration = Duration::from_millis(400);

fn names(search: &SearchController) -> Vec<String> {
    search.state().results.into_iter().map(|t| t.name).collect()
}

#[tokio::test(start_paused = true)]
async fn one_request_for_a_burst_of_keystrokes() {
    let fake = Arc::new(FakeCatalog::new().search(
        "matrix",
        ms(80),
        &["The Matrix", "The Matrix Reloaded"],
    ));
    let search = SearchController::new(Catalog::new(fake.clone()), DEBOUNCE);

    for prefix in ["m", "ma", "mat", "matr", "matri", "matrix"] {
        search.on_input(prefix);
        time::sleep(ms(120)).await;
    }
    time::sleep(ms(500)).await;

    assert_eq!(fake.calls(), ["search_titles:matrix"]);
    assert_eq!(names(&search), ["The Matrix", "The Matrix Reloaded"]);
    assert!(!search.state().is_searching);
}

#[tokio::test(start_paused = true)]
async fn slow_stale_response_never_replaces_newer_results() {
    let fake = Arc::new(
        FakeCatalog::new()
            .search("star", ms(2000), &["Star Trek"])
            .search("star wars", ms(50), &["Star Wars"]),
    );
    let search = SearchController::new(Catalog::new(fake.clone()), DEBOUNCE);

    search.on_input("star");
    time::sleep(ms(450)).await;
    assert!(search.state().is_searching);

    search.on_input("star wars");
    assert!(!search.state().is_searching);
    time::sleep(ms(500)).await;
    assert_eq!(names(&search), ["Star Wars"]);

    time::sleep(ms(3000)).await;
    assert_eq!(names(&search), ["Star Wars"]);
    assert_eq!(fake.count("search_titles"), 2);
}

#[tokio::test(start_paused = true)]
async fn no_match_shows_empty_results() {
    let fake = Arc::new(FakeCatalog::new());
    let search = SearchController::new(Catalog::new(fake.clone()), DEBOUNCE);

    search.on_input("qwxz");
    time::sleep(ms(600)).await;

    let state = search.state();
    assert!(state.results.is_empty());
    assert!(!state.is_searching);
    assert_eq!(fake.count("search_titles"), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_controller_cancels_pending_lookup() {
    let fake = Arc::new(FakeCatalog::new().search("heat", ms(10), &["Heat"]));
    let search = SearchController::new(Catalog::new(fake.clone()), DEBOUNCE);

    search.on_input("heat");
    time::sleep(ms(100)).await;
    drop(search);
    time::sleep(ms(1000)).await;

    assert!(fake.calls().is_empty());
}
