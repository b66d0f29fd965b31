mod common;

use common::{
    make_router, message_from, MockLlmClient, MockWeatherOutcome, MockWeatherProvider,
};
use conversation_memory::{ConversationStore, InMemoryConversationStore, Turn};
use llm_client::MessageRole;
use std::sync::Arc;
use telebot::router::{ABOUT_TEXT, GREETING, HELP_TEXT, RESET_DONE, WEATHER_USAGE};
use weather_client::CITY_NOT_FOUND_MESSAGE;

fn fixtures() -> (
    Arc<MockLlmClient>,
    Arc<MockWeatherProvider>,
    Arc<InMemoryConversationStore>,
) {
    (
        Arc::new(MockLlmClient::replying("mock reply")),
        Arc::new(MockWeatherProvider::new(MockWeatherOutcome::Report(
            "City: London\nTemperature: 15°C\nHumidity: 70%\nCondition: overcast clouds\nRain expected: No".to_string(),
        ))),
        Arc::new(InMemoryConversationStore::new()),
    )
}

#[tokio::test]
async fn static_commands_reply_with_fixed_texts() {
    let (llm, weather, store) = fixtures();
    let router = make_router(llm.clone(), weather, store);

    assert_eq!(
        router.dispatch(&message_from(1, "/start")).await.as_deref(),
        Some(GREETING)
    );
    assert_eq!(
        router.dispatch(&message_from(1, "/help")).await.as_deref(),
        Some(HELP_TEXT)
    );
    assert_eq!(
        router.dispatch(&message_from(1, "/content")).await.as_deref(),
        Some(ABOUT_TEXT)
    );
    assert_eq!(llm.call_count(), 0);
}

#[tokio::test]
async fn unrecognized_commands_get_no_reply() {
    let (llm, weather, store) = fixtures();
    let router = make_router(llm.clone(), weather.clone(), store);

    assert_eq!(router.dispatch(&message_from(1, "/frobnicate")).await, None);
    assert_eq!(
        router.dispatch(&message_from(1, "/frobnicate with args")).await,
        None
    );
    assert_eq!(llm.call_count(), 0);
    assert!(weather.requested_cities().is_empty());
}

#[tokio::test]
async fn weather_command_requires_a_city() {
    let (llm, weather, store) = fixtures();
    let router = make_router(llm, weather.clone(), store);

    assert_eq!(
        router.dispatch(&message_from(1, "/weather")).await.as_deref(),
        Some(WEATHER_USAGE)
    );
    assert!(weather.requested_cities().is_empty());
}

#[tokio::test]
async fn weather_command_returns_the_report() {
    let (llm, weather, store) = fixtures();
    let router = make_router(llm, weather.clone(), store);

    let reply = router.dispatch(&message_from(1, "/weather London")).await.unwrap();
    assert!(reply.starts_with("City: London"));
    assert_eq!(weather.requested_cities(), vec!["London".to_string()]);
}

#[tokio::test]
async fn weather_command_maps_not_found_to_canned_string() {
    let llm = Arc::new(MockLlmClient::replying("unused"));
    let weather = Arc::new(MockWeatherProvider::new(MockWeatherOutcome::NotFound));
    let store = Arc::new(InMemoryConversationStore::new());
    let router = make_router(llm, weather, store);

    let reply = router.dispatch(&message_from(1, "/weather Atlantis")).await;
    assert_eq!(reply.as_deref(), Some(CITY_NOT_FOUND_MESSAGE));
}

#[tokio::test]
async fn reset_clears_only_the_callers_history() {
    let (llm, weather, store) = fixtures();
    store.append(1, Turn::user("old question")).await.unwrap();
    store.append(2, Turn::user("other user")).await.unwrap();
    let router = make_router(llm, weather, store.clone());

    let reply = router.dispatch(&message_from(1, "/reset")).await;
    assert_eq!(reply.as_deref(), Some(RESET_DONE));
    assert!(store.history(1).await.unwrap().is_empty());
    assert_eq!(store.history(2).await.unwrap().len(), 1);
}

#[tokio::test]
async fn message_after_reset_carries_no_prior_context() {
    let (llm, weather, store) = fixtures();
    let router = make_router(llm.clone(), weather, store);

    router.dispatch(&message_from(1, "remember this")).await;
    router.dispatch(&message_from(1, "/reset")).await;
    router.dispatch(&message_from(1, "fresh start")).await;

    let messages = llm.last_call();
    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(roles, vec![MessageRole::System, MessageRole::User]);
    assert_eq!(messages[1].content, "fresh start");
}

#[tokio::test]
async fn free_text_goes_to_the_orchestrator() {
    let (llm, weather, store) = fixtures();
    let router = make_router(llm.clone(), weather, store);

    let reply = router.dispatch(&message_from(1, "Tell me a joke")).await;
    assert_eq!(reply.as_deref(), Some("mock reply"));
    assert_eq!(llm.call_count(), 1);
}
