use std::time::Duration;

use rs_lastmessage::{extract_last_message, Engine, Options, Page};

#[test]
fn malformed_html_unclosed_tags() {
    let html = r#"<main><li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">Unclosed paragraph text here<div>more"#;
    let message = extract_last_message(html).unwrap();
    assert!(message.starts_with("Unclosed paragraph text here"), "got {message:?}");
}

#[test]
fn malformed_html_invalid_nesting() {
    let html = "<p><div></p></div><li><ul></li>";
    assert_eq!(extract_last_message(html).unwrap(), "");
}

#[test]
fn malformed_html_broken_attributes() {
    let html = "<div class=\"msg-s-event-listitem id=broken>Never closed attribute";
    assert!(extract_last_message(html).is_ok());
}

#[test]
fn incomplete_entities() {
    let html = r#"<li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">Fish &amp chips &lt; tonight at eight</p></li>"#;
    assert_eq!(extract_last_message(html).unwrap(), "Fish & chips < tonight at eight");
}

#[test]
fn empty_and_whitespace_input() {
    assert_eq!(extract_last_message("").unwrap(), "");
    assert_eq!(extract_last_message("   \n\t ").unwrap(), "");
    assert_eq!(extract_last_message("<html></html>").unwrap(), "");
}

#[test]
fn only_chrome_in_containers() {
    let html = r#"<ul>
        <li class="msg-s-event-listitem"><div>Like</div><div>Reply</div></li>
        <li class="msg-s-event-listitem"><div>10:42 AM</div><div>Seen</div></li>
    </ul>"#;
    assert_eq!(extract_last_message(html).unwrap(), "");
}

#[test]
fn deeply_nested_markup_does_not_overflow() {
    let depth = 200;
    let html = format!(
        "<main><div class=\"conversation\">{}<span>Deep inside many wrappers we still find it</span>{}</div></main>",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    assert_eq!(extract_last_message(&html).unwrap(), "Deep inside many wrappers we still find it");
}

#[test]
fn very_long_thread_picks_last_turn() {
    let items: String = (0..2000)
        .map(|i| format!(r#"<li class="msg-s-event-listitem"><p class="msg-s-event-listitem__body">Message number {i} of the thread</p></li>"#))
        .collect();
    let html = format!("<ul>{items}</ul>");
    assert_eq!(extract_last_message(&html).unwrap(), "Message number 1999 of the thread");
}

#[test]
fn oversized_text_is_not_a_fallback_candidate() {
    let huge = "word ".repeat(1000);
    let html = format!(r#"<main><section class="thread"><span>{huge}</span></section></main>"#);
    assert_eq!(extract_last_message(&html).unwrap(), "");
}

#[tokio::test(start_paused = true)]
async fn mutation_between_strategies_is_tolerated() {
    let page = Page::new("https://www.linkedin.com/messaging/", "<main></main>");
    let engine = Engine::new(Options::default()).unwrap();

    // Appears after the container wait has expired, during the grace period.
    let render = async {
        tokio::time::sleep(Duration::from_millis(9500)).await;
        page.render(r#"<main><section class="thread"><span>Arrived during the grace period</span></section></main>"#);
    };
    let (message, ()) = tokio::join!(engine.last_message(&page), render);
    assert_eq!(message, "Arrived during the grace period");
}

#[test]
fn fallback_keeps_inline_markup_together() {
    let html = r#"<main><section class="thread-view"><p>Hey <b>Sam</b>, can we move our call to Friday afternoon?</p></section></main>"#;
    assert_eq!(extract_last_message(html).unwrap(), "Hey Sam, can we move our call to Friday afternoon?");
}
