//! # Concurrent Transition Flows
//!
//! Many tasks submit against one program; the execution lock must make the
//! outcome equivalent to some serial order.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::future::join_all;
    use rand::RngCore;

    use crate::fixtures::{pubkey, seed, TestNet, AIRDROP};
    use tl_01_tweet_program::prelude::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_seed_race_creates_exactly_one() {
        let net = Arc::new(TestNet::new());
        let alice = Arc::new(net.user(1));

        let attempts = (0..16).map(|i| {
            let net = Arc::clone(&net);
            let alice = Arc::clone(&alice);
            tokio::spawn(async move {
                net.send(&alice, seed(9), "race", &format!("attempt {i}")).await
            })
        });
        let results: Vec<_> = join_all(attempts)
            .await
            .into_iter()
            .map(|joined| joined.unwrap())
            .collect();

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == TweetError::AlreadyExists));
        assert_eq!(
            net.ledger.balance(&pubkey(&alice)).await.unwrap(),
            AIRDROP - net.program.tweet_deposit()
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_distinct_seeds_never_conflict() {
        let net = Arc::new(TestNet::new());
        let authors: Vec<_> = (1..=4).map(|i| Arc::new(net.user(i))).collect();

        let mut handles = Vec::new();
        for author in &authors {
            for _ in 0..8 {
                let mut raw = [0u8; 16];
                rand::thread_rng().fill_bytes(&mut raw);
                let net = Arc::clone(&net);
                let author = Arc::clone(author);
                handles.push(tokio::spawn(async move {
                    net.send(&author, UniqueSeed::new(raw), "", "gm").await
                }));
            }
        }

        for result in join_all(handles).await {
            result.unwrap().unwrap();
        }
        assert_eq!(net.program.query(&RecordQuery::all()).await.unwrap().len(), 32);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_update_racing_delete() {
        let net = Arc::new(TestNet::new());
        let alice = Arc::new(net.user(1));
        let address = net.send(&alice, seed(1), "", "gm").await.unwrap().address;

        let deleter = {
            let (net, alice) = (Arc::clone(&net), Arc::clone(&alice));
            tokio::spawn(async move { net.delete(&alice, address).await })
        };
        let updater = {
            let (net, alice) = (Arc::clone(&net), Arc::clone(&alice));
            tokio::spawn(async move { net.update(&alice, address, "", "gn").await })
        };

        deleter.await.unwrap().unwrap();
        match updater.await.unwrap() {
            // Update ran first, then the delete.
            Ok(_) => {}
            Err(e) => assert_eq!(e, TweetError::NotFound),
        }
        assert!(net.program.fetch(&address).await.unwrap().is_none());
        assert_eq!(net.ledger.balance(&pubkey(&alice)).await.unwrap(), AIRDROP);
    }
}
