use atlas_model::model::temporal::{current_or_future_value, value_for_date, values_for_date};
use atlas_model::model::{Channel, Image, ImageTheme, TemporalField};
use atlas_model::Publisher;
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn window(
    value: &'static str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> TemporalField<&'static str> {
    TemporalField::new(value, start, end)
}

#[test]
fn current_window_wins() {
    let fields = vec![
        window("old", Some(date(2020, 1, 1)), Some(date(2021, 1, 1))),
        window("current", Some(date(2021, 1, 1)), Some(date(2030, 1, 1))),
        window("future", Some(date(2031, 1, 1)), None),
    ];
    assert_eq!(current_or_future_value(&fields, date(2025, 6, 1)), Some(&"current"));
    // The open-ended window is current once it has started.
    assert_eq!(current_or_future_value(&fields, date(2035, 1, 1)), Some(&"future"));
}

#[test]
fn nothing_current_or_upcoming() {
    let fields = vec![
        window("old", Some(date(2020, 1, 1)), Some(date(2021, 1, 1))),
        window("current", Some(date(2021, 1, 1)), Some(date(2030, 1, 1))),
    ];
    assert_eq!(current_or_future_value(&fields, date(2035, 1, 1)), None);
}

#[test]
fn earliest_upcoming_window_wins() {
    let fields = vec![
        window("later", Some(date(2024, 1, 1)), Some(date(2025, 1, 1))),
        window("sooner", Some(date(2022, 1, 1)), Some(date(2023, 1, 1))),
    ];
    assert_eq!(current_or_future_value(&fields, date(2020, 6, 1)), Some(&"sooner"));
}

#[test]
fn windows_are_half_open() {
    let fields = vec![
        window("a", Some(date(2020, 1, 1)), Some(date(2021, 1, 1))),
        window("b", Some(date(2021, 1, 1)), None),
    ];
    assert_eq!(values_for_date(&fields, date(2021, 1, 1)), vec![&"b"]);
    assert_eq!(values_for_date(&fields, date(2020, 12, 31)), vec![&"a"]);
}

#[test]
fn overlapping_windows_prefer_latest_start() {
    let fields = vec![
        TemporalField::always("default"),
        window("season", Some(date(2024, 12, 1)), Some(date(2025, 1, 1))),
    ];
    assert_eq!(value_for_date(&fields, date(2024, 12, 25)), Some(&"season"));
    assert_eq!(value_for_date(&fields, date(2024, 11, 1)), Some(&"default"));
    assert_eq!(values_for_date(&fields, date(2024, 12, 25)).len(), 2);
}

#[test]
fn channel_titles_and_images_change_over_time() {
    let channel = Channel::builder()
        .with_uri("http://www.bbc.co.uk/services/bbcthree")
        .with_source(Publisher::Bbc)
        .with_title_between("BBC Choice", None, Some(date(2003, 2, 9)))
        .with_title_between("BBC Three", Some(date(2003, 2, 9)), None)
        .with_image_between(
            Image::new("choice.png").with_theme(ImageTheme::LightOpaque),
            None,
            Some(date(2003, 2, 9)),
        )
        .with_image_between(
            Image::new("three.png").with_theme(ImageTheme::LightOpaque),
            Some(date(2003, 2, 9)),
            None,
        )
        .build()
        .unwrap();

    assert_eq!(channel.title_for_date(date(2001, 1, 1)), Some("BBC Choice"));
    assert_eq!(channel.title(date(2024, 1, 1)), Some("BBC Three"));
    assert_eq!(channel.image(date(2001, 1, 1)).map(|i| i.uri.as_str()), Some("choice.png"));
    assert_eq!(channel.images_for_date(date(2010, 1, 1)).len(), 1);
}
