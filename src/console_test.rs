use rand::SeedableRng;
use rand::rngs::StdRng;

use responder::Topic;

use super::*;
use crate::config::WidgetConfig;
use crate::delay::TokioDelay;

// =============================================================
// parse_command
// =============================================================

#[test]
fn slash_commands_parse() {
    assert_eq!(parse_command("/open"), Command::Open);
    assert_eq!(parse_command("  /close  "), Command::Close);
    assert_eq!(parse_command("/toggle"), Command::Toggle);
    assert_eq!(parse_command("/log"), Command::Log);
    assert_eq!(parse_command("/help"), Command::Help);
    assert_eq!(parse_command("/quit"), Command::Quit);
    assert_eq!(parse_command("/exit"), Command::Quit);
}

#[test]
fn quick_is_one_based() {
    assert_eq!(parse_command("/quick 1"), Command::Quick(0));
    assert_eq!(parse_command("/quick 3"), Command::Quick(2));
}

#[test]
fn quick_out_of_range_is_unknown() {
    assert_eq!(parse_command("/quick 0"), Command::Unknown("/quick 0".to_owned()));
    assert_eq!(parse_command("/quick 4"), Command::Unknown("/quick 4".to_owned()));
    assert_eq!(parse_command("/quick x"), Command::Unknown("/quick x".to_owned()));
    assert_eq!(parse_command("/quick"), Command::Unknown("/quick".to_owned()));
}

#[test]
fn extra_arguments_are_unknown() {
    assert_eq!(parse_command("/open now"), Command::Unknown("/open now".to_owned()));
    assert_eq!(parse_command("/dance"), Command::Unknown("/dance".to_owned()));
}

#[test]
fn plain_text_is_said_verbatim() {
    assert_eq!(parse_command("  hey there "), Command::Say("  hey there ".to_owned()));
    assert_eq!(parse_command(""), Command::Say(String::new()));
}

// =============================================================
// rendering
// =============================================================

#[test]
fn entries_are_prefixed_by_origin() {
    let user = ChatEntry { id: 2, origin: Origin::User, text: "hi".to_owned() };
    let bot = ChatEntry { id: 3, origin: Origin::Assistant, text: "hello".to_owned() };
    assert_eq!(format_entry(&user), "you › hi");
    assert_eq!(format_entry(&bot), "assistant › hello");
}

#[test]
fn quick_reply_menu_is_numbered() {
    assert_eq!(format_quick_replies(), "[1] Tell me about Alex  [2] View projects  [3] Get in touch");
}

#[test]
fn quick_replies_render_when_event_offers_them() {
    let lines = render_event(&WidgetEvent::Composing { active: false, quick_replies: true });
    assert_eq!(lines, vec![format_quick_replies()]);
}

#[test]
fn settling_without_menu_renders_nothing() {
    assert!(render_event(&WidgetEvent::Composing { active: false, quick_replies: false }).is_empty());
}

#[test]
fn typing_indicator_renders() {
    let event = WidgetEvent::Composing { active: true, quick_replies: false };
    assert_eq!(render_event(&event), vec!["assistant is typing…".to_owned()]);
}

#[test]
fn open_close_and_entries_render() {
    let entry = ChatEntry { id: 1, origin: Origin::User, text: "hey".to_owned() };
    assert_eq!(render_event(&WidgetEvent::Opened), vec!["(chat open)".to_owned()]);
    assert_eq!(render_event(&WidgetEvent::Closed), vec!["(chat closed)".to_owned()]);
    assert_eq!(render_event(&WidgetEvent::Appended(entry)), vec!["you › hey".to_owned()]);
}

// =============================================================
// shut_down
// =============================================================

fn timed_widget() -> ChatWidget {
    ChatWidget::new(WidgetConfig::default(), TokioDelay, StdRng::seed_from_u64(5))
}

#[tokio::test(start_paused = true)]
async fn shut_down_exports_pending_reply() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat.jsonl");
    let widget = timed_widget();

    widget.open();
    widget.submit("hello");
    shut_down(&widget, Some(&path)).await.unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    let entries: Vec<ChatEntry> = written.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0].origin, Origin::User);
    assert_eq!(entries[1].origin, Origin::Assistant);
    let last = entries.last().unwrap();
    assert_eq!(last.origin, Origin::Assistant);
    assert_eq!(last.text, Topic::Greeting.reply());
}

#[tokio::test(start_paused = true)]
async fn shut_down_without_path_still_settles() {
    let widget = timed_widget();
    widget.open();

    shut_down(&widget, None).await.unwrap();
    assert_eq!(widget.snapshot().log().len(), 1);
    assert!(!widget.snapshot().is_composing());
}
