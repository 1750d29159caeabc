//! Property-based tests for conversation history bookkeeping
//!
//! Whatever mix of text replies and tool requests the model produces, each
//! cycle records exactly one user turn, one assistant turn, and one batched
//! tool-result turn iff the reply requested tools.

use super::{Conversation, Turn};
use crate::llm::testing::MockLlmService;
use crate::llm::ContentBlock;
use crate::tools::ToolRegistry;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

/// One scripted model reply: leading text plus N tool requests
#[derive(Debug, Clone)]
struct Reply {
    text: Option<String>,
    tool_requests: usize,
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    (
        proptest::option::of("[a-zA-Z ]{1,30}"),
        prop_oneof![3 => Just(0usize), 2 => 1usize..4],
    )
        .prop_map(|(text, tool_requests)| Reply {
            text,
            tool_requests,
        })
}

fn to_response(cycle: usize, reply: &Reply) -> Vec<ContentBlock> {
    let mut content = Vec::new();
    if let Some(text) = &reply.text {
        content.push(ContentBlock::text(text.clone()));
    }
    for i in 0..reply.tool_requests {
        // Unknown tools still get a result; keeps the test off the filesystem
        content.push(ContentBlock::tool_use(
            format!("toolu_{cycle}_{i}"),
            "not_a_tool",
            json!({}),
        ));
    }
    if content.is_empty() {
        content.push(ContentBlock::text("ok"));
    }
    content
}

fn run_cycles(replies: &[Reply]) -> Vec<Turn> {
    let llm = Arc::new(MockLlmService::new("mock"));
    for (cycle, reply) in replies.iter().enumerate() {
        llm.queue_response(MockLlmService::response(to_response(cycle, reply)));
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();

    runtime.block_on(async {
        let mut conv = Conversation::new(llm, ToolRegistry::standard(), 256);
        for i in 0..replies.len() {
            conv.advance(&format!("input {i}"), |_| {}).await.unwrap();
        }
        conv.turns().to_vec()
    })
}

proptest! {
    #[test]
    fn prop_turn_count_matches_cycles(replies in proptest::collection::vec(arb_reply(), 1..8)) {
        let turns = run_cycles(&replies);

        let expected: usize = replies
            .iter()
            .map(|r| 2 + usize::from(r.tool_requests > 0))
            .sum();
        prop_assert_eq!(turns.len(), expected);
    }

    #[test]
    fn prop_every_request_answered_in_order(replies in proptest::collection::vec(arb_reply(), 1..8)) {
        let turns = run_cycles(&replies);

        let mut i = 0;
        for reply in &replies {
            prop_assert!(matches!(turns[i], Turn::User(_)));
            let requests = turns[i + 1].tool_requests();
            prop_assert_eq!(requests.len(), reply.tool_requests);
            i += 2;

            if reply.tool_requests > 0 {
                let Turn::ToolResults(results) = &turns[i] else {
                    return Err(TestCaseError::fail("missing batched tool results"));
                };
                let request_ids: Vec<&str> = requests.iter().map(|r| r.id.as_str()).collect();
                let result_ids: Vec<&str> = results.iter().map(|r| r.tool_use_id.as_str()).collect();
                prop_assert_eq!(request_ids, result_ids);
                i += 1;
            }
        }
        prop_assert_eq!(i, turns.len());
    }
}
