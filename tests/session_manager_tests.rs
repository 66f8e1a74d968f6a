mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{FakeCharacter, connected_state, session, test_config};
use voicechat_backend::services::chatbot::generate_reply;
use voicechat_backend::services::session_manager::SessionManager;

#[tokio::test]
async fn install_replaces_missing_session() {
    let mgr = SessionManager::new();
    assert!(mgr.lock_turn().await.is_none());
    mgr.install(session()).await;
    assert_eq!(*mgr.lock_turn().await, Some(session()));
}

#[tokio::test]
async fn concurrent_relays_do_not_interleave() {
    let fake = Arc::new(FakeCharacter {
        reply: "miau".into(),
        delay: Duration::from_millis(20),
        ..Default::default()
    });
    let state = connected_state(fake.clone(), test_config()).await;

    let mut handles = Vec::new();
    for i in 0..5 {
        let state = state.clone();
        handles.push(tokio::spawn(async move {
            generate_reply(&state, &format!("mensaje {i}")).await
        }));
    }
    for handle in handles {
        let reply = handle.await.unwrap().unwrap();
        assert_eq!(reply.texto, "miau");
    }

    assert_eq!(fake.prompts.lock().unwrap().len(), 5);
    assert_eq!(fake.speech_calls.lock().unwrap().len(), 5);
    assert_eq!(fake.max_active_relays.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn lock_turn_blocks_until_released() {
    let mgr = SessionManager::new();
    mgr.install(session()).await;
    let guard = mgr.lock_turn().await;

    let other = mgr.clone();
    let waiter = tokio::spawn(async move { other.lock_turn().await.clone() });
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(!waiter.is_finished());

    drop(guard);
    assert_eq!(waiter.await.unwrap(), Some(session()));
}
