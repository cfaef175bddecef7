//! Property-based tests for direct translation.
//!
//! Dispatching the same `SecretRequest`, `RevealSecret`, `Delivered` or
//! `Processed` message twice yields identical state changes, and the fields
//! are carried over unchanged.

mod common;

use common::Harness;
use pcn_message_handler::algorithms::translation;
use pcn_message_handler::domain::{Delivered, Processed, RevealSecret, SecretRequest};
use pcn_message_handler::{
    sha256_secrethash, Message, MessageDispatcher, MessageHandlerApi, StateChange,
};
use proptest::prelude::*;
use shared_types::TokenAmount;

fn secret_request_strategy() -> impl Strategy<Value = SecretRequest> {
    (
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<u64>(),
        any::<[u8; 32]>(),
        any::<[u8; 20]>(),
    )
        .prop_map(
            |(message_identifier, payment_identifier, amount, expiration, secrethash, sender)| {
                SecretRequest {
                    message_identifier,
                    payment_identifier,
                    amount: TokenAmount::from(amount),
                    expiration,
                    secrethash,
                    sender,
                }
            },
        )
}

fn reveal_secret_strategy() -> impl Strategy<Value = RevealSecret> {
    (any::<u64>(), any::<[u8; 32]>(), any::<[u8; 20]>()).prop_map(
        |(message_identifier, secret, sender)| RevealSecret {
            message_identifier,
            secret,
            sender,
        },
    )
}

fn ack_strategy() -> impl Strategy<Value = (u64, [u8; 20])> {
    (any::<u64>(), any::<[u8; 20]>())
}

fn dispatch_twice(message: Message) -> (Vec<StateChange>, Vec<StateChange>) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");
    runtime.block_on(async {
        let dispatcher = MessageDispatcher::new();
        let first = Harness::new();
        let second = Harness::new();
        dispatcher.on_message(&first.node, message.clone()).await;
        dispatcher.on_message(&second.node, message).await;
        (first.recorder.state_changes(), second.recorder.state_changes())
    })
}

#[test]
fn prop_secret_request_translation_is_idempotent() {
    proptest!(|(message in secret_request_strategy())| {
        let a = translation::secret_request(message.clone());
        let b = translation::secret_request(message.clone());
        prop_assert_eq!(&a, &b);

        match a {
            StateChange::SecretRequest(record) => {
                prop_assert_eq!(record.payment_identifier, message.payment_identifier);
                prop_assert_eq!(record.amount, message.amount);
                prop_assert_eq!(record.expiration, message.expiration);
                prop_assert_eq!(record.secrethash, message.secrethash);
                prop_assert_eq!(record.sender, message.sender);
            }
            other => prop_assert!(false, "unexpected {}", other.name()),
        }
    });
}

#[test]
fn prop_reveal_secret_translation_is_idempotent() {
    proptest!(|(message in reveal_secret_strategy())| {
        let a = translation::secret_reveal(message.clone());
        let b = translation::secret_reveal(message.clone());
        prop_assert_eq!(&a, &b);

        match a {
            StateChange::SecretReveal(record) => {
                prop_assert_eq!(record.secret, message.secret);
                prop_assert_eq!(record.secrethash, sha256_secrethash(&message.secret));
                prop_assert_eq!(record.sender, message.sender);
            }
            other => prop_assert!(false, "unexpected {}", other.name()),
        }
    });
}

#[test]
fn prop_acknowledgments_are_idempotent_and_distinct() {
    proptest!(|((id, sender) in ack_strategy())| {
        let delivered = translation::delivered(Delivered {
            delivered_message_identifier: id,
            sender,
        });
        let processed = translation::processed(Processed {
            message_identifier: id,
            sender,
        });

        prop_assert_eq!(
            &delivered,
            &translation::delivered(Delivered { delivered_message_identifier: id, sender })
        );
        prop_assert_eq!(
            &processed,
            &translation::processed(Processed { message_identifier: id, sender })
        );
        prop_assert_ne!(&delivered, &processed);
    });
}

#[test]
fn prop_dispatcher_translation_is_idempotent() {
    let config = ProptestConfig {
        cases: 32,
        ..ProptestConfig::default()
    };
    proptest!(config, |(request in secret_request_strategy(), (id, sender) in ack_strategy())| {
        for message in [
            Message::SecretRequest(request.clone()),
            Message::Delivered(Delivered { delivered_message_identifier: id, sender }),
            Message::Processed(Processed { message_identifier: id, sender }),
        ] {
            let (first, second) = dispatch_twice(message);
            prop_assert_eq!(first.len(), 1);
            prop_assert_eq!(first, second);
        }
    });
}
