use std::sync::Arc;

use super::{AppState, Gallery, Studio, StudioError};
use crate::config::Config;
use crate::input::PointerEvent;
use crate::refine::{
    GenerateResponse, RefineClient, RefineError, RefineManager, RefineOutcome, Style,
    testing::MockTransport,
};

const MOCK_IMAGE: &str = "data:image/png;base64,UkVGSU5FRA==";

fn studio_with(mock: &MockTransport) -> Studio {
    let client = RefineClient::new(Arc::new(mock.clone()));
    let manager = RefineManager::new(&tokio::runtime::Handle::current(), client);
    Studio::new(&Config::default(), manager)
}

fn draw_line(studio: &mut Studio) {
    let surface = studio.surface_mut();
    surface.handle_event(PointerEvent::Down { x: 20.0, y: 20.0 });
    surface.handle_event(PointerEvent::Move { x: 200.0, y: 120.0 });
    surface.handle_event(PointerEvent::Move { x: 400.0, y: 300.0 });
    surface.handle_event(PointerEvent::Up);
}

#[test]
fn test_state_transitions() {
    let mut state = AppState {
        error: Some("old failure".into()),
        ..AppState::default()
    };

    state.start_refining();
    assert!(state.is_refining);
    assert!(state.error.is_none());

    state.finish_success("first".into());
    assert!(!state.is_refining);
    assert_eq!(state.result_image.as_deref(), Some("first"));

    state.start_refining();
    state.finish_failure("boom".into());
    assert!(!state.is_refining);
    assert_eq!(state.error.as_deref(), Some("boom"));
    assert_eq!(state.result_image.as_deref(), Some("first"));
}

#[test]
fn test_reset_keeps_selected_style() {
    let mut state = AppState {
        selected_style: Style::Oil,
        input_image: Some("x".into()),
        result_image: Some("y".into()),
        details: "more contrast".into(),
        ..AppState::default()
    };
    state.reset();
    assert_eq!(state.selected_style, Style::Oil);
    assert!(state.input_image.is_none());
    assert!(state.result_image.is_none());
    assert!(state.details.is_empty());
}

#[test]
fn test_gallery_delete_preserves_order() {
    let mut gallery = Gallery::new();
    let ids: Vec<_> = ["a", "b", "c", "d"]
        .iter()
        .map(|image| gallery.add(image.to_string(), Style::Pencil).id)
        .collect();

    assert!(gallery.delete(ids[1]));
    assert_eq!(gallery.len(), 3);
    let remaining: Vec<_> = gallery.items().iter().map(|i| i.image.as_str()).collect();
    assert_eq!(remaining, vec!["a", "c", "d"]);

    assert!(!gallery.delete(ids[1]));
    assert_eq!(gallery.len(), 3);
    assert_eq!(gallery.get(ids[3]).map(|i| i.image.as_str()), Some("d"));
    assert!(gallery.get(ids[1]).is_none());
}

#[test]
fn test_gallery_ids_are_unique() {
    let mut gallery = Gallery::new();
    let first = gallery.add("a".into(), Style::Oil).id;
    let second = gallery.add("a".into(), Style::Oil).id;
    assert_ne!(first, second);
    assert!(gallery.items()[0].timestamp <= gallery.items()[1].timestamp);
}

#[tokio::test]
async fn test_draw_export_refine_end_to_end() {
    let mock = MockTransport::returning_image("UkVGSU5FRA==");
    let mut studio = studio_with(&mock);
    draw_line(&mut studio);

    studio.use_sketch().unwrap();
    assert!(studio.gallery().is_empty());

    studio.request_refine().unwrap();
    assert!(studio.state().is_refining);

    let outcome = studio.wait_for_refine().await.unwrap();
    assert!(matches!(outcome, RefineOutcome::Success { .. }));

    assert_eq!(studio.gallery().len(), 1);
    assert_eq!(studio.state().result_image.as_deref(), Some(MOCK_IMAGE));
    assert!(!studio.state().is_refining);
    assert!(studio.state().error.is_none());
    assert_eq!(studio.gallery().items()[0].style, Style::Pencil);

    let request = &mock.recorded()[0];
    assert_eq!(&request.image[..4], &[0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_failure_keeps_previous_result() {
    let mock = MockTransport::returning_image("UkVGSU5FRA==");
    let mut studio = studio_with(&mock);
    studio.use_sketch().unwrap();
    studio.request_refine().unwrap();
    studio.wait_for_refine().await.unwrap();

    *mock.error.lock().unwrap() = Some(RefineError::Transport("503 Service Unavailable".into()));
    studio.request_refine().unwrap();
    studio.wait_for_refine().await.unwrap();

    assert!(!studio.state().is_refining);
    assert!(studio.state().error.as_deref().unwrap().contains("503"));
    assert_eq!(studio.state().result_image.as_deref(), Some(MOCK_IMAGE));
    assert_eq!(studio.gallery().len(), 1);
}

#[tokio::test]
async fn test_no_image_response_sets_error() {
    let mock = MockTransport::returning(GenerateResponse::default());
    let mut studio = studio_with(&mock);
    studio.use_sketch().unwrap();
    studio.request_refine().unwrap();
    studio.wait_for_refine().await.unwrap();

    assert!(studio.state().error.is_some());
    assert!(studio.state().result_image.is_none());
    assert!(studio.gallery().is_empty());
}

#[tokio::test]
async fn test_refine_guards() {
    let mock = MockTransport::returning_image("AAAA");
    let mut studio = studio_with(&mock);

    assert!(matches!(
        studio.request_refine(),
        Err(StudioError::InputMissing)
    ));

    studio.use_sketch().unwrap();
    studio.request_refine().unwrap();
    assert!(matches!(
        studio.request_refine(),
        Err(StudioError::AlreadyRefining)
    ));

    studio.wait_for_refine().await.unwrap();
    assert_eq!(mock.recorded().len(), 1);
    assert!(studio.wait_for_refine().await.is_none());
}

#[tokio::test]
async fn test_style_and_details_reach_the_request() {
    let mock = MockTransport::returning_image("AAAA");
    let mut studio = studio_with(&mock);
    studio.use_sketch().unwrap();
    studio.set_style(Style::Watercolor);
    studio.set_details("make it blue");
    studio.request_refine().unwrap();
    studio.wait_for_refine().await.unwrap();

    let instruction = &mock.recorded()[0].instruction;
    assert!(instruction.starts_with(Style::Watercolor.prompt_fragment()));
    assert!(instruction.contains("make it blue"));
    assert_eq!(studio.gallery().items()[0].style, Style::Watercolor);
}

#[tokio::test]
async fn test_poll_applies_outcome_without_blocking() {
    let mock = MockTransport::returning_image("AAAA");
    let mut studio = studio_with(&mock);
    studio.use_sketch().unwrap();
    studio.request_refine().unwrap();

    let mut outcome = None;
    for _ in 0..100 {
        outcome = studio.poll();
        if outcome.is_some() {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }
    assert!(outcome.is_some());
    assert_eq!(studio.gallery().len(), 1);
    assert!(!studio.state().is_refining);
}

#[tokio::test]
async fn test_reset_keeps_gallery_and_downloads() {
    let mock = MockTransport::returning_image("UkVGSU5FRA==");
    let mut studio = studio_with(&mock);
    studio.use_sketch().unwrap();
    studio.request_refine().unwrap();
    studio.wait_for_refine().await.unwrap();

    let temp = tempfile::tempdir().unwrap();
    let result_path = temp.path().join("refined.png");
    studio.download_result(Some(&result_path)).unwrap();
    assert_eq!(std::fs::read(&result_path).unwrap(), b"REFINED".to_vec());

    let sketch_path = temp.path().join("sketch.png");
    studio.download_sketch(Some(&sketch_path)).unwrap();
    assert_eq!(
        &std::fs::read(&sketch_path).unwrap()[..4],
        &[0x89, b'P', b'N', b'G']
    );

    let id = studio.gallery().items()[0].id;
    studio.reset();
    assert!(studio.state().input_image.is_none());
    assert!(studio.state().result_image.is_none());
    assert_eq!(studio.gallery().len(), 1);
    assert!(matches!(
        studio.download_result(None),
        Err(StudioError::NothingToSave)
    ));

    assert!(studio.delete_gallery_item(id));
    assert!(studio.gallery().is_empty());
}

#[tokio::test]
async fn test_upload_sets_input() {
    let mock = MockTransport::returning_image("AAAA");
    let mut studio = studio_with(&mock);
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("photo.jpg");
    std::fs::write(&path, [0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]).unwrap();

    studio.upload(&path).unwrap();
    studio.request_refine().unwrap();
    studio.wait_for_refine().await.unwrap();
    assert_eq!(mock.recorded()[0].mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_reset_abandons_in_flight_refinement() {
    let mut mock = MockTransport::returning_image("UkVGSU5FRA==");
    mock.delay = Some(std::time::Duration::from_millis(50));
    let mut studio = studio_with(&mock);

    studio.use_sketch().unwrap();
    studio.set_style(Style::Oil);
    studio.request_refine().unwrap();
    studio.reset();
    assert!(!studio.state().is_refining);

    studio.use_sketch().unwrap();
    studio.set_style(Style::Charcoal);
    studio.request_refine().unwrap();

    let outcome = studio.wait_for_refine().await.unwrap();
    assert_eq!(
        outcome,
        RefineOutcome::Success {
            image: MOCK_IMAGE.to_string(),
            style: "charcoal".to_string(),
        }
    );
    assert!(!studio.state().is_refining);
    assert_eq!(studio.gallery().len(), 1);
    assert_eq!(studio.gallery().items()[0].style, Style::Charcoal);
    assert_eq!(mock.recorded().len(), 2);
}

#[tokio::test]
async fn test_poll_ignores_abandoned_outcome() {
    let mock = MockTransport::returning_image("AAAA");
    let mut studio = studio_with(&mock);
    studio.use_sketch().unwrap();
    studio.request_refine().unwrap();
    studio.reset();

    for _ in 0..20 {
        assert!(studio.poll().is_none());
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    assert_eq!(mock.recorded().len(), 1);
    assert!(studio.gallery().is_empty());
    assert!(studio.state().result_image.is_none());
    assert!(studio.wait_for_refine().await.is_none());
}

#[tokio::test]
async fn test_download_gallery_item_by_id() {
    let mock = MockTransport::returning_image("AAAA");
    let mut studio = studio_with(&mock);
    let first = studio
        .gallery
        .add("data:image/png;base64,Rmlyc3Q=".into(), Style::Oil)
        .id;
    studio
        .gallery
        .add("data:image/png;base64,U2Vjb25k".into(), Style::Digital);

    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("first.png");
    let written = studio.download_gallery_item(first, Some(&path)).unwrap();
    assert_eq!(written, path);
    assert_eq!(std::fs::read(&path).unwrap(), b"First".to_vec());

    let missing = uuid::Uuid::new_v4();
    assert!(matches!(
        studio.download_gallery_item(missing, Some(&path)),
        Err(StudioError::NotFound(id)) if id == missing
    ));
}
