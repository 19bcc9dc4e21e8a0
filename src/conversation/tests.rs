use super::*;

#[test]
fn greetings_and_thanks_are_conversational() {
    let conversation = Conversation::new();

    assert!(conversation.is_conversational("Hello there"));
    assert!(conversation.is_conversational("thanks!"));
    assert!(conversation.is_conversational("Who are you?"));
    assert!(conversation.is_conversational("great job on that answer"));
}

#[test]
fn quality_questions_are_not_conversational() {
    let conversation = Conversation::new();

    assert!(!conversation.is_conversational("What is Six Sigma?"));
    assert!(!conversation.is_conversational("this is it"));
    assert!(!conversation.is_conversational(""));
}

#[test]
fn replies_come_from_matching_group() {
    let mut conversation = Conversation::new();

    let reply = conversation.respond("bye for now");
    assert!(REPLY_SOURCES[4].1.contains(&reply.as_str()));

    let reply = conversation.respond("Who are you?");
    assert_eq!(reply, INTRODUCTION);
}

#[test]
fn same_input_gets_same_reply() {
    let mut first = Conversation::new();
    let mut second = Conversation::new();
    assert_eq!(first.respond("hey"), second.respond("hey"));
}

#[test]
fn unmatched_input_gets_default_reply() {
    let reply = Conversation::new().respond("zzz");
    assert!(DEFAULT_REPLIES.contains(&reply.as_str()));
}

#[test]
fn history_is_bounded() {
    let mut conversation = Conversation::new();
    for i in 0..12 {
        conversation.respond(&format!("message {i}"));
    }

    assert_eq!(conversation.history.len(), 10);
    assert_eq!(
        conversation.recent_context(),
        ["message 7", "message 8", "message 9", "message 10", "message 11"]
    );

    conversation.reset();
    assert!(conversation.recent_context().is_empty());
}

#[test]
fn long_statements_get_a_follow_up() {
    let conversation = Conversation::new();
    let long = "Control charts separate common cause variation from special cause variation over a long period of time.";

    let enhanced = conversation.enhance_response(long, "control charts");
    assert!(enhanced.starts_with(long));
    assert!(FOLLOW_UPS.iter().any(|f| enhanced.ends_with(f)));

    assert_eq!(conversation.enhance_response("Short.", "x"), "Short.");
    let question = format!("{long} Shall we continue?");
    assert_eq!(conversation.enhance_response(&question, "x"), question);
}
