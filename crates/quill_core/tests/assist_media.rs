use quill_core::{
    AssistError, AssistService, CatalogConfig, CatalogError, CatalogStore, ContentGenerator,
    GenerationError, TextTarget, UnconfiguredGenerator,
};
use std::cell::RefCell;
use uuid::Uuid;

/// Scripted generator that records every prompt it receives.
struct FakeGenerator {
    text: Result<String, GenerationError>,
    image: Result<Option<String>, GenerationError>,
    prompts: RefCell<Vec<String>>,
}

impl FakeGenerator {
    fn returning(text: &str, image: Option<&str>) -> Self {
        Self {
            text: Ok(text.to_string()),
            image: Ok(image.map(str::to_string)),
            prompts: RefCell::new(Vec::new()),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            text: Err(GenerationError::Service(message.to_string())),
            image: Err(GenerationError::Service(message.to_string())),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl ContentGenerator for FakeGenerator {
    fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.text.clone()
    }

    fn generate_image(&self, prompt: &str) -> Result<Option<String>, GenerationError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.image.clone()
    }
}

fn empty_store() -> CatalogStore {
    CatalogStore::open(CatalogConfig::default()).unwrap()
}

#[test]
fn generated_excerpt_is_returned_and_prompt_names_subject() {
    let assist = AssistService::new(FakeGenerator::returning("A crisp excerpt.", None));

    let text = assist
        .generate_post_text(TextTarget::Excerpt, "Rust Lifetimes", "Programming")
        .unwrap();

    assert_eq!(text, "A crisp excerpt.");
    let prompts = assist.generator().prompts.borrow();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("\"Rust Lifetimes\""));
    assert!(prompts[0].contains("\"Programming\""));
    assert!(prompts[0].contains("50-70 words"));
}

#[test]
fn empty_generated_text_is_an_external_service_error() {
    let assist = AssistService::new(FakeGenerator::returning("   ", None));

    let err = assist
        .generate_post_text(TextTarget::Article, "Title", "")
        .unwrap_err();

    assert_eq!(
        err,
        AssistError::ExternalService("no content generated".to_string())
    );
}

#[test]
fn missing_subject_is_rejected_before_calling_generator() {
    let assist = AssistService::new(FakeGenerator::returning("unused", None));

    let err = assist
        .generate_post_text(TextTarget::Excerpt, " ", "")
        .unwrap_err();

    assert_eq!(err, AssistError::MissingSubject);
    assert!(assist.generator().prompts.borrow().is_empty());
}

#[test]
fn generated_image_is_stored_with_prompt_derived_name() {
    let mut store = empty_store();
    let assist = AssistService::new(FakeGenerator::returning(
        "",
        Some("data:image/jpeg;base64,AAAA"),
    ));

    let asset = store
        .generate_media(&assist, "A lighthouse on a stormy cliff at midnight")
        .unwrap();

    assert_eq!(asset.name, "Generated Image: A lighthouse on a stormy cliff...");
    assert_eq!(asset.url, "data:image/jpeg;base64,AAAA");
    assert_eq!(store.media().unwrap(), vec![asset]);
}

#[test]
fn generator_failure_stores_nothing() {
    let mut store = empty_store();
    let assist = AssistService::new(FakeGenerator::failing("quota exceeded"));

    let err = store.generate_media(&assist, "a red fox").unwrap_err();

    match err {
        CatalogError::ExternalService(message) => assert!(message.contains("quota exceeded")),
        other => panic!("unexpected error: {other}"),
    }
    assert!(store.media().unwrap().is_empty());
}

#[test]
fn missing_image_data_is_an_external_service_error() {
    let mut store = empty_store();
    let assist = AssistService::new(FakeGenerator::returning("", None));

    let err = store.generate_media(&assist, "a red fox").unwrap_err();

    assert!(matches!(err, CatalogError::ExternalService(_)));
    assert!(store.media().unwrap().is_empty());
}

#[test]
fn blank_prompt_is_a_validation_error() {
    let mut store = empty_store();
    let assist = AssistService::new(UnconfiguredGenerator);

    let err = store.generate_media(&assist, "  ").unwrap_err();

    assert!(matches!(err, CatalogError::Validation(_)));
}

#[test]
fn unconfigured_generator_reports_external_service_error() {
    let mut store = empty_store();
    let assist = AssistService::new(UnconfiguredGenerator);

    let err = store.generate_media(&assist, "anything").unwrap_err();

    assert!(matches!(err, CatalogError::ExternalService(_)));
}

#[test]
fn uploaded_media_lists_newest_first_and_deletes_by_id() {
    let mut store = empty_store();

    let older = store.upload_media("hero.png", "https://cdn.test/hero.png").unwrap();
    let newer = store.upload_media("logo.svg", "https://cdn.test/logo.svg").unwrap();

    let listed: Vec<Uuid> = store.media().unwrap().iter().map(|a| a.id).collect();
    assert_eq!(listed, vec![newer.id, older.id]);

    assert!(store.delete_media(older.id).unwrap());
    assert!(!store.delete_media(older.id).unwrap());
    assert!(!store.delete_media(Uuid::new_v4()).unwrap());
    assert_eq!(store.media().unwrap(), vec![newer]);
}
