use std::time::Duration;

use rs_lastmessage::extractor::wait_for_any;
use rs_lastmessage::selector::SelectorSet;
use rs_lastmessage::Page;
use tokio::time::Instant;

fn set() -> SelectorSet {
    SelectorSet::new(&[".msg-s-event-listitem", "main li"]).unwrap()
}

#[tokio::test(start_paused = true)]
async fn matches_come_from_one_selector_only() {
    let page = Page::new(
        "https://www.linkedin.com/messaging/",
        r#"<main><ul><li>plain one</li><li>plain two</li><li class="msg-s-event-listitem">styled</li></ul></main>"#,
    );
    let selectors = set();
    let matches = wait_for_any(&page, &selectors, Duration::from_secs(1)).await.unwrap();
    assert_eq!(matches.selector(), ".msg-s-event-listitem");
    assert_eq!(matches.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn lower_priority_selector_matches_when_alone() {
    let page = Page::new("https://www.linkedin.com/messaging/", "<main><ul><li>a</li><li>b</li></ul></main>");
    let selectors = set();
    let matches = wait_for_any(&page, &selectors, Duration::from_secs(1)).await.unwrap();
    assert_eq!(matches.selector(), "main li");
    assert_eq!(matches.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn snapshot_is_stable_after_rerender() {
    let page = Page::new("https://www.linkedin.com/messaging/", "<main><ul><li>a</li><li>b</li></ul></main>");
    let selectors = set();
    let matches = wait_for_any(&page, &selectors, Duration::from_secs(1)).await.unwrap();
    page.render("<main></main>");
    assert_eq!(matches.len(), 2);
    assert_eq!(page.snapshot().select("li").length(), 0);
}

#[tokio::test(start_paused = true)]
async fn navigation_alone_wakes_but_does_not_match() {
    let page = Page::new("https://www.linkedin.com/messaging/thread/1/", "<main></main>");
    let selectors = set();
    let navigate = async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        page.navigate("https://www.linkedin.com/messaging/thread/2/");
        tokio::time::sleep(Duration::from_millis(200)).await;
        page.render(r#"<main><ul><li class="msg-s-event-listitem">x</li></ul></main>"#);
    };
    let start = Instant::now();
    let (matches, ()) = tokio::join!(wait_for_any(&page, &selectors, Duration::from_secs(3)), navigate);
    assert_eq!(matches.unwrap().selector(), ".msg-s-event-listitem");
    assert_eq!(start.elapsed(), Duration::from_millis(400));
    assert_eq!(page.revision(), 2);
    assert_eq!(page.observer_count(), 0);
}
