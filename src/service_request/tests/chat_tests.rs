//! Chat service tests.

use std::sync::Arc;

use crate::error::ErrorCategory;
use crate::identity::{Actor, UserId};
use crate::mechanic::domain::MechanicType;
use crate::service_request::{
    adapters::memory::{InMemoryChatRepository, InMemoryServiceRequestRepository},
    domain::{ServiceRequest, ServiceRequestId, TransitionAction},
    ports::ServiceRequestRepository,
    services::ChatService,
};
use crate::test_support::ManualClock;
use chrono::TimeDelta;
use rstest::{fixture, rstest};

use super::fixtures::draft;

type TestChat = ChatService<InMemoryServiceRequestRepository, InMemoryChatRepository, ManualClock>;

struct ChatHarness {
    chat: TestChat,
    requests: Arc<InMemoryServiceRequestRepository>,
    clock: Arc<ManualClock>,
    customer: Actor,
    mechanic: Actor,
}

impl ChatHarness {
    async fn request_after(&self, actions: &[TransitionAction]) -> ServiceRequest {
        let mut request = ServiceRequest::new_direct(
            self.customer.id(),
            self.mechanic.id(),
            draft(MechanicType::Automotive),
            &*self.clock,
        );
        for action in actions {
            request
                .apply(*action, &self.mechanic, &*self.clock)
                .expect("transition applies");
        }
        self.requests.store(&request).await.expect("store succeeds");
        request
    }
}

#[fixture]
fn harness() -> ChatHarness {
    let requests = Arc::new(InMemoryServiceRequestRepository::new());
    let clock = Arc::new(ManualClock::fixed());
    ChatHarness {
        chat: ChatService::new(
            Arc::clone(&requests),
            Arc::new(InMemoryChatRepository::new()),
            Arc::clone(&clock),
        ),
        requests,
        clock,
        customer: Actor::customer(UserId::new()),
        mechanic: Actor::mechanic(UserId::new()),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn participants_exchange_messages_in_order(harness: ChatHarness) {
    let request = harness.request_after(&[TransitionAction::Accept]).await;

    harness
        .chat
        .send_message(request.id(), &harness.customer, "Where are you?")
        .await
        .expect("customer sends");
    harness.clock.advance(TimeDelta::seconds(30));
    let reply = harness
        .chat
        .send_message(request.id(), &harness.mechanic, "  Five minutes away  ")
        .await
        .expect("mechanic replies");
    assert_eq!(reply.receiver(), harness.customer.id());
    assert_eq!(reply.body().as_str(), "Five minutes away");

    let history = harness
        .chat
        .history(request.id(), &harness.mechanic)
        .await
        .expect("history loads");
    let bodies: Vec<&str> = history.iter().map(|m| m.body().as_str()).collect();
    assert_eq!(bodies, vec!["Where are you?", "Five minutes away"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn chat_is_closed_before_acceptance(harness: ChatHarness) {
    let request = harness.request_after(&[]).await;

    let err = harness
        .chat
        .send_message(request.id(), &harness.customer, "Hello?")
        .await
        .expect_err("chat is closed");

    assert_eq!(err.category(), ErrorCategory::State);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn outsiders_cannot_read_or_write(harness: ChatHarness) {
    let request = harness.request_after(&[TransitionAction::Accept]).await;
    let outsider = Actor::customer(UserId::new());

    let send = harness
        .chat
        .send_message(request.id(), &outsider, "Hi")
        .await
        .expect_err("outsider cannot send");
    let read = harness
        .chat
        .history(request.id(), &outsider)
        .await
        .expect_err("outsider cannot read");

    assert_eq!(send.category(), ErrorCategory::Authorization);
    assert_eq!(read.category(), ErrorCategory::Authorization);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_messages_are_rejected(harness: ChatHarness) {
    let request = harness.request_after(&[TransitionAction::Accept]).await;

    let err = harness
        .chat
        .send_message(request.id(), &harness.customer, "   ")
        .await
        .expect_err("blank message");

    assert_eq!(err.category(), ErrorCategory::Validation);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_request_is_not_found(harness: ChatHarness) {
    let err = harness
        .chat
        .history(ServiceRequestId::new(), &harness.customer)
        .await
        .expect_err("request does not exist");

    assert_eq!(err.category(), ErrorCategory::NotFound);
}
