use atlas_model::application::{
    Application, ApplicationConfiguration, ApplicationSources, SourceState, SourceStatus,
};
use atlas_model::equiv::{merge_field, order_by_precedence, select_winner};
use atlas_model::model::{Content, EntityType};
use atlas_model::{AtlasError, Publisher};

fn app() -> Application {
    Application::builder()
        .with_slug("radio-app")
        .with_sources(
            ApplicationSources::builder()
                .with_precedence(true)
                .with_read(Publisher::C4, SourceStatus::AVAILABLE_ENABLED)
                .with_read(Publisher::Bbc, SourceStatus::AVAILABLE_ENABLED)
                .with_read(Publisher::Pa, SourceStatus::UNAVAILABLE)
                .with_writes(vec![Publisher::Metabroadcast])
                .build(),
        )
        .build()
        .unwrap()
}

#[test]
fn licensed_source_request_to_enabled() {
    let config = app().configuration();
    assert!(!config.is_enabled(Publisher::Pa));

    let requested = config.request(Publisher::Pa).unwrap();
    assert_eq!(requested.status_of(Publisher::Pa).state(), SourceState::Requested);

    let err = requested.approve(Publisher::Pa).unwrap_err();
    assert!(matches!(err, AtlasError::LicenceRequired(Publisher::Pa)));

    let enabled = requested
        .agree_licence(Publisher::Pa)
        .and_then(|c| c.approve(Publisher::Pa))
        .and_then(|c| c.enable(Publisher::Pa))
        .unwrap();
    assert!(enabled.is_enabled(Publisher::Pa));
    assert!(enabled.status_of(Publisher::Pa).is_licence_agreed());

    // Earlier values are untouched.
    assert!(!requested.is_enabled(Publisher::Pa));
    assert!(!config.is_enabled(Publisher::Pa));
}

#[test]
fn denied_then_requested_again() {
    let config = ApplicationConfiguration::default_configuration()
        .request(Publisher::RadioTimes)
        .and_then(|c| c.deny(Publisher::RadioTimes))
        .unwrap();
    assert_eq!(config.status_of(Publisher::RadioTimes), SourceStatus::DENIED);

    let err = config.enable(Publisher::RadioTimes).unwrap_err();
    assert!(matches!(
        err,
        AtlasError::IllegalTransition {
            from: SourceState::Denied,
            ..
        }
    ));

    let again = config.request(Publisher::RadioTimes).unwrap();
    assert_eq!(again.status_of(Publisher::RadioTimes), SourceStatus::REQUESTED);
}

#[test]
fn revoke_and_reset() {
    let config = ApplicationConfiguration::default_configuration()
        .revoke(Publisher::Bbc)
        .unwrap();
    assert_eq!(config.status_of(Publisher::Bbc), SourceStatus::REVOKED);
    assert!(!config.enabled_sources().contains(&Publisher::Bbc));

    let reset = config.reset(Publisher::Bbc).unwrap();
    assert_eq!(reset.status_of(Publisher::Bbc), Publisher::Bbc.default_source_status());
    assert!(reset.is_enabled(Publisher::Bbc));
}

#[test]
fn sources_become_configuration() {
    let app = app();
    let config = app.configuration();

    assert!(config.precedence_enabled());
    assert_eq!(&config.ordered_publishers()[..3], &[Publisher::C4, Publisher::Bbc, Publisher::Pa]);
    assert_eq!(config.ordered_publishers().len(), Publisher::COUNT);
    assert!(config.can_write(Publisher::Metabroadcast));
    assert!(!config.can_write(Publisher::Bbc));
    assert_eq!(app.sources().enabled_read_sources(), vec![Publisher::C4, Publisher::Bbc]);
    assert_eq!(app.title(), "radio-app");
}

#[test]
fn copy_then_rebuild() {
    let app = app();
    let renamed = app.copy().with_title("Radio").build().unwrap();
    assert_eq!(renamed.slug(), app.slug());
    assert_eq!(renamed.credentials(), app.credentials());
    assert_eq!(renamed.title(), "Radio");

    let err = Application::builder().build().unwrap_err();
    assert!(matches!(err, AtlasError::MissingField("slug")));
}

#[test]
fn precedence_drives_merging() {
    let mut bbc = Content::new("http://bbc/1", Publisher::Bbc, EntityType::Film);
    bbc.title = Some("Film (BBC)".to_string());
    let c4 = Content::new("http://c4/1", Publisher::C4, EntityType::Film);
    let mut five = Content::new("http://five/1", Publisher::Five, EntityType::Film);
    five.title = Some("Film (Five)".to_string());
    let contents = vec![bbc, c4, five];

    let config = app().configuration();
    assert_eq!(select_winner(&contents, &config).map(|c| c.publisher), Some(Publisher::C4));

    let ranked = order_by_precedence(&contents, &config);
    assert_eq!(merge_field(&ranked, |c| c.title.as_deref()), Some("Film (BBC)"));

    let unordered = config.copy_with_null_precedence();
    assert!(!unordered.precedence_enabled());
    assert_eq!(select_winner(&contents, &unordered).map(|c| c.publisher), Some(Publisher::Bbc));
}

#[test]
fn anonymous_requests_see_open_sources_only() {
    let config = ApplicationConfiguration::for_no_api_key();
    for publisher in Publisher::ALL {
        assert_eq!(config.is_enabled(publisher), publisher.enabled_with_no_api_key());
    }
}
