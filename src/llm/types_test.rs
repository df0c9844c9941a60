// ABOUTME: Tests for LLM types - serialization, helpers, text extraction.
// ABOUTME: Verifies the shapes local subagents exchange with their model client.

use super::*;

#[test]
fn test_role_serialization() {
    assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    assert_eq!(
        serde_json::to_string(&Role::Assistant).unwrap(),
        "\"assistant\""
    );
}

#[test]
fn test_content_block_tool_use_deserialization() {
    let json = r#"{
        "type": "tool_use",
        "id": "123",
        "name": "Read",
        "input": {"path": "/tmp/test.txt"}
    }"#;
    let block: ContentBlock = serde_json::from_str(json).unwrap();
    match block {
        ContentBlock::ToolUse { id, name, input } => {
            assert_eq!(id, "123");
            assert_eq!(name, "Read");
            assert_eq!(input["path"], "/tmp/test.txt");
        }
        _ => panic!("Expected ToolUse"),
    }
}

#[test]
fn test_content_block_tool_error_serialization() {
    let block = ContentBlock::tool_error("123", "tool 'Bash' not found or not allowed");
    let json = serde_json::to_value(&block).unwrap();
    assert_eq!(json["type"], "tool_result");
    assert_eq!(json["tool_use_id"], "123");
    assert_eq!(json["is_error"], true);
}

#[test]
fn test_message_text_skips_non_text_blocks() {
    let msg = Message::tool_results(vec![
        ContentBlock::text("a"),
        ContentBlock::tool_result("1", "ignored"),
        ContentBlock::text("b"),
    ]);
    assert_eq!(msg.role, Role::User);
    assert_eq!(msg.text(), "ab");
}

#[test]
fn test_request_builder() {
    let req = Request::new("claude-sonnet-4-5")
        .system("You are a researcher.")
        .message(Message::user("What is 2+2?"))
        .tools(vec![ToolDefinition {
            name: "Read".into(),
            description: "Read a file".into(),
            input_schema: serde_json::json!({"type": "object"}),
        }])
        .max_tokens(1024);

    assert_eq!(req.model, "claude-sonnet-4-5");
    assert_eq!(req.system.as_deref(), Some("You are a researcher."));
    assert_eq!(req.messages.len(), 1);
    assert_eq!(req.tool_names(), vec!["Read"]);
    assert_eq!(req.max_tokens, Some(1024));
}

#[test]
fn test_response_from_text() {
    let resp = Response::from_text("m", "4");
    assert!(!resp.has_tool_use());
    assert_eq!(resp.stop_reason, StopReason::EndTurn);
    assert_eq!(resp.text(), "4");
}

#[test]
fn test_response_has_tool_use() {
    let resp = Response {
        id: "msg_1".into(),
        content: vec![
            ContentBlock::text("Let me look."),
            ContentBlock::ToolUse {
                id: "t1".into(),
                name: "Grep".into(),
                input: serde_json::json!({"pattern": "fn main"}),
            },
        ],
        stop_reason: StopReason::ToolUse,
        model: "m".into(),
        usage: Usage::default(),
    };
    assert!(resp.has_tool_use());
    assert_eq!(resp.text(), "Let me look.");
}
