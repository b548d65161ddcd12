//! # Read-Side Filter Flows
//!
//! Byte-offset filters over a populated ledger, including records that
//! share prefixes or collide on length bytes.

#[cfg(test)]
mod tests {
    use crate::fixtures::{pubkey, seed, TestNet};
    use tl_01_tweet_program::prelude::*;

    async fn populated() -> (TestNet, Pubkey, Pubkey) {
        let net = TestNet::new();
        let alice = net.user(1);
        let bob = net.user(2);

        net.send(&alice, seed(1), "veganism", "Hummus, am I right?").await.unwrap();
        net.send(&alice, seed(2), "vegan", "Tofu").await.unwrap();
        net.send(&bob, seed(1), "veganism", "Yay! Tofu!").await.unwrap();
        net.send(&bob, seed(2), "", &"a".repeat(97)).await.unwrap();
        net.send(&bob, seed(3), "sleep", "gn").await.unwrap();

        (net, pubkey(&alice), pubkey(&bob))
    }

    fn topics(tweets: &[Tweet]) -> Vec<&str> {
        let mut topics: Vec<&str> = tweets.iter().map(|t| t.record.topic.as_str()).collect();
        topics.sort_unstable();
        topics
    }

    #[tokio::test]
    async fn test_author_filter() {
        let (net, alice, bob) = populated().await;

        let mine = net.program.query(&RecordQuery::by_author(&alice)).await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|t| t.record.author == alice));

        let theirs = net.program.query(&RecordQuery::by_author(&bob)).await.unwrap();
        assert_eq!(theirs.len(), 3);
    }

    #[tokio::test]
    async fn test_exact_topic_filter() {
        let (net, ..) = populated().await;

        let vegan = net.program.query(&RecordQuery::by_topic("vegan")).await.unwrap();
        assert_eq!(topics(&vegan), vec!["vegan"]);

        let veganism = net.program.query(&RecordQuery::by_topic("veganism")).await.unwrap();
        assert_eq!(topics(&veganism), vec!["veganism", "veganism"]);

        let untagged = net.program.query(&RecordQuery::by_topic("")).await.unwrap();
        assert_eq!(topics(&untagged), vec![""]);
    }

    #[tokio::test]
    async fn test_prefix_filter_ignores_empty_topic_alias() {
        let (net, ..) = populated().await;

        // Bob's empty-topic record carries 0x61 ('a') where a topic would start.
        let hits = net.program.query(&RecordQuery::by_topic_prefix("vegan")).await.unwrap();
        assert_eq!(topics(&hits), vec!["vegan", "veganism", "veganism"]);
        assert!(net
            .program
            .query(&RecordQuery::by_topic_prefix("a"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_combined_filters() {
        let (net, alice, _) = populated().await;

        let query = RecordQuery::by_topic("veganism").and(Filter::Memcmp {
            offset: TWEET_SCHEMA_V1.offset_of("author").unwrap(),
            bytes: alice.as_bytes().to_vec(),
        });
        let hits = net.program.query(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].record.content, "Hummus, am I right?");
    }

    #[tokio::test]
    async fn test_results_follow_edits_and_deletes() {
        let net = TestNet::new();
        let alice = net.user(1);
        let address = net.send(&alice, seed(1), "veganism", "gm").await.unwrap().address;

        net.update(&alice, address, "sleep", "gn").await.unwrap();
        assert!(net.program.query(&RecordQuery::by_topic("veganism")).await.unwrap().is_empty());
        assert_eq!(net.program.query(&RecordQuery::by_topic("sleep")).await.unwrap().len(), 1);

        net.delete(&alice, address).await.unwrap();
        assert!(net.program.query(&RecordQuery::all()).await.unwrap().is_empty());
    }
}
