//! # Node Runtime Flows
//!
//! The runtime container and command handler over a real program.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tl_01_tweet_program::prelude::*;
    use tl_node_runtime::{Command, CommandHandler, NodeConfig, ProgramContainer, Response};

    fn node(seed: u8, airdrop: u64) -> CommandHandler {
        let mut config = NodeConfig::default();
        config.identity.keypair_seed = Some([seed; 32]);
        config.identity.airdrop_lamports = airdrop;
        CommandHandler::new(Arc::new(ProgramContainer::new(config).unwrap()))
    }

    #[tokio::test]
    async fn test_unfunded_node_cannot_send() {
        let handler = node(1, 0);

        let response = handler
            .handle(Command::Send {
                topic: String::new(),
                content: "gm".into(),
                seed: None,
            })
            .await;

        match response {
            Response::Error { message } => {
                assert!(message.starts_with("Insufficient lamports to fund the account"));
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_response_lines_are_json() {
        let handler = node(2, 1_000_000_000);
        let mut output = Vec::new();
        let script = "{\"cmd\":\"send\",\"topic\":\"veganism\",\"content\":\"Hummus, am I right?\"}\n\
                      {\"cmd\":\"by_topic\",\"topic\":\"veganism\"}\n";

        handler.serve(script.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines[0]["type"], "receipt");
        assert_eq!(lines[0]["receipt"]["instruction"], "send_tweet");
        assert_eq!(lines[1]["type"], "tweets");
        assert_eq!(lines[1]["tweets"][0]["topic"], "veganism");
        assert_eq!(lines[1]["tweets"][0]["content"], "Hummus, am I right?");
        assert_eq!(lines[1]["tweets"][0]["address"], lines[0]["receipt"]["address"]);
    }
}
