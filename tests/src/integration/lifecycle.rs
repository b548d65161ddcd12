//! # Record Lifecycle Flows
//!
//! `Absent -> Active -> Absent` through the public program API, with the
//! ledger inspected directly between steps.
//!
//! ## Flows Tested:
//!
//! 1. **Create**: record lands at the derived address with the stored bump
//! 2. **Update**: owner edits; others are rejected without side effects
//! 3. **Delete**: deposit flows back to the author; the seed becomes reusable

#[cfg(test)]
mod tests {
    use crate::fixtures::{pubkey, seed, TestNet, AIRDROP, GENESIS_MILLIS};
    use tl_01_tweet_program::domain::layout;
    use tl_01_tweet_program::prelude::*;

    // =============================================================================
    // CREATE
    // =============================================================================

    #[tokio::test]
    async fn test_created_record_matches_layout_and_derivation() {
        let net = TestNet::new();
        let alice = net.user(1);

        let receipt = net
            .send(&alice, seed(1), "veganism", "Hummus, am I right?")
            .await
            .unwrap();

        let (expected, bump) = derive(net.program.tag(), &pubkey(&alice), &seed(1)).unwrap();
        assert_eq!(receipt.address, expected);

        let account = net.ledger.get_account(&expected).await.unwrap().unwrap();
        assert_eq!(account.owner, net.program_id());
        assert_eq!(account.data.len(), TWEET_ACCOUNT_LEN);
        assert_eq!(&account.data[8..40], pubkey(&alice).as_bytes());
        assert_eq!(&account.data[40..56], seed(1).as_bytes());
        assert_eq!(account.data[56], bump);
        assert_eq!(&account.data[57..65], &GENESIS_MILLIS.to_le_bytes());
        assert_eq!(&account.data[73..77], &8u32.to_le_bytes());
        assert_eq!(&account.data[77..85], b"veganism");

        let record = layout::decode(&account.data).unwrap();
        assert_eq!(record.content, "Hummus, am I right?");
        assert_eq!(record.created_at, record.updated_at);
    }

    #[tokio::test]
    async fn test_program_ids_partition_address_space() {
        let first = TestNet::new();
        let second = TestNet::with_config(ProgramConfig {
            program_id: Pubkey::new([0x33; 32]),
            ..ProgramConfig::default()
        });
        let alice = first.user(1);
        second.user(1);

        let a = first.send(&alice, seed(1), "", "gm").await.unwrap();
        let b = second.send(&alice, seed(1), "", "gm").await.unwrap();
        assert_ne!(a.address, b.address);
    }

    // =============================================================================
    // UPDATE
    // =============================================================================

    #[tokio::test]
    async fn test_owner_update_keeps_identity_fields() {
        let net = TestNet::new();
        let alice = net.user(1);
        let created = net
            .send(&alice, seed(1), "veganism", "Hummus, am I right?")
            .await
            .unwrap();

        net.clock.advance(1_000);
        let updated = net.update(&alice, created.address, "sleep", "gn").await.unwrap();

        let before = created.tweet.unwrap().record;
        let after = updated.tweet.unwrap().record;
        assert_eq!(after.author, before.author);
        assert_eq!(after.unique_seed, before.unique_seed);
        assert_eq!(after.bump, before.bump);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.updated_at, GENESIS_MILLIS + 1_000);
        assert_eq!((after.topic.as_str(), after.content.as_str()), ("sleep", "gn"));
    }

    #[tokio::test]
    async fn test_forged_update_leaves_storage_untouched() {
        let net = TestNet::new();
        let alice = net.user(1);
        let mallory = net.user(2);
        let address = net.send(&alice, seed(1), "veganism", "gm").await.unwrap().address;
        let snapshot = net.ledger.get_account(&address).await.unwrap();

        // Mallory signs with their own key.
        let err = net.update(&mallory, address, "x", "y").await.unwrap_err();
        assert_eq!(err, TweetError::AuthorizationViolation);

        // Mallory claims Alice's identity without Alice's key.
        let mut forged = net.sign(
            &mallory,
            address,
            &TweetInstruction::UpdateTweet {
                topic: "x".into(),
                content: "y".into(),
            },
        );
        forged.author = pubkey(&alice);
        let err = net.program.execute(forged).await.unwrap_err();
        assert_eq!(err, TweetError::AuthorizationViolation);

        assert_eq!(net.ledger.get_account(&address).await.unwrap(), snapshot);
        assert_eq!(net.program.stats().await.authorization_failures, 2);
    }

    #[tokio::test]
    async fn test_update_of_second_record_does_not_touch_first() {
        let net = TestNet::new();
        let alice = net.user(1);
        let first = net.send(&alice, seed(1), "a", "one").await.unwrap().address;
        let second = net.send(&alice, seed(2), "b", "two").await.unwrap().address;

        net.update(&alice, second, "b", "two edited").await.unwrap();

        let untouched = net.program.fetch(&first).await.unwrap().unwrap();
        assert_eq!(untouched.record.content, "one");
        assert!(!untouched.record.is_edited());
    }

    // =============================================================================
    // DELETE
    // =============================================================================

    #[tokio::test]
    async fn test_delete_restores_balance_and_frees_seed() {
        let net = TestNet::new();
        let alice = net.user(1);
        let address = net.send(&alice, seed(1), "", "gm").await.unwrap().address;
        assert!(net.ledger.balance(&pubkey(&alice)).await.unwrap() < AIRDROP);

        let receipt = net.delete(&alice, address).await.unwrap();
        assert_eq!(receipt.lamports, net.program.tweet_deposit());
        assert_eq!(net.ledger.balance(&pubkey(&alice)).await.unwrap(), AIRDROP);
        assert!(net.ledger.get_account(&address).await.unwrap().is_none());

        let again = net.send(&alice, seed(1), "", "gm again").await.unwrap();
        assert_eq!(again.address, address);
    }

    #[tokio::test]
    async fn test_stranger_cannot_delete() {
        let net = TestNet::new();
        let alice = net.user(1);
        let mallory = net.user(2);
        let address = net.send(&alice, seed(1), "", "gm").await.unwrap().address;

        assert_eq!(
            net.delete(&mallory, address).await.unwrap_err(),
            TweetError::AuthorizationViolation
        );
        assert!(net.program.fetch(&address).await.unwrap().is_some());
    }
}
