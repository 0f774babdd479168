//! Channels, whose titles and images change over time.

use super::content::Image;
use super::temporal::{self, TemporalField};
use super::Id;
use crate::error::{AtlasError, Result};
use crate::publisher::Publisher;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<Id>,
    uri: String,
    source: Publisher,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(default)]
    titles: Vec<TemporalField<String>>,
    #[serde(default)]
    images: Vec<TemporalField<Image>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
}

impl Channel {
    pub fn builder() -> ChannelBuilder {
        ChannelBuilder::default()
    }

    /// A builder pre-filled with this channel's fields.
    pub fn copy(&self) -> ChannelBuilder {
        ChannelBuilder {
            id: self.id,
            uri: Some(self.uri.clone()),
            source: Some(self.source),
            key: self.key.clone(),
            titles: self.titles.clone(),
            images: self.images.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn source(&self) -> Publisher {
        self.source
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn start_date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    pub fn end_date(&self) -> Option<NaiveDate> {
        self.end_date
    }

    /// The title in effect on `today`, or the next one to take effect.
    pub fn title(&self, today: NaiveDate) -> Option<&str> {
        temporal::current_or_future_value(&self.titles, today).map(String::as_str)
    }

    pub fn title_for_date(&self, date: NaiveDate) -> Option<&str> {
        temporal::value_for_date(&self.titles, date).map(String::as_str)
    }

    pub fn all_titles(&self) -> &[TemporalField<String>] {
        &self.titles
    }

    pub fn add_title(
        &mut self,
        title: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) {
        self.titles.push(TemporalField::new(title.into(), start, end));
    }

    pub fn set_titles(&mut self, titles: impl IntoIterator<Item = TemporalField<String>>) {
        self.titles = titles.into_iter().collect();
    }

    /// The primary image in effect on `today`, or the next one to take effect.
    pub fn image(&self, today: NaiveDate) -> Option<&Image> {
        let primary: Vec<&TemporalField<Image>> =
            self.images.iter().filter(|f| f.value().is_primary()).collect();
        temporal::current_or_future_value(primary.iter().copied(), today)
    }

    pub fn images(&self, today: NaiveDate) -> Vec<&Image> {
        temporal::current_values(&self.images, today)
    }

    pub fn images_for_date(&self, date: NaiveDate) -> Vec<&Image> {
        temporal::values_for_date(&self.images, date)
    }

    pub fn all_images(&self) -> &[TemporalField<Image>] {
        &self.images
    }

    pub fn add_image(&mut self, image: Image, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.images.push(TemporalField::new(image, start, end));
    }

    pub fn set_images(&mut self, images: impl IntoIterator<Item = TemporalField<Image>>) {
        self.images = images.into_iter().collect();
    }
}

#[derive(Debug, Default)]
pub struct ChannelBuilder {
    id: Option<Id>,
    uri: Option<String>,
    source: Option<Publisher>,
    key: Option<String>,
    titles: Vec<TemporalField<String>>,
    images: Vec<TemporalField<Image>>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
}

impl ChannelBuilder {
    pub fn with_id(mut self, id: Id) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    pub fn with_source(mut self, source: Publisher) -> Self {
        self.source = Some(source);
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// A title valid on every date.
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_title_between(title, None, None)
    }

    pub fn with_title_between(
        mut self,
        title: impl Into<String>,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        self.titles.push(TemporalField::new(title.into(), start, end));
        self
    }

    pub fn with_image(self, image: Image) -> Self {
        self.with_image_between(image, None, None)
    }

    pub fn with_image_between(
        mut self,
        image: Image,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Self {
        self.images.push(TemporalField::new(image, start, end));
        self
    }

    pub fn with_images(mut self, images: impl IntoIterator<Item = Image>) -> Self {
        self.images.extend(images.into_iter().map(TemporalField::always));
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn build(self) -> Result<Channel> {
        Ok(Channel {
            id: self.id,
            uri: self.uri.ok_or(AtlasError::MissingField("uri"))?,
            source: self.source.ok_or(AtlasError::MissingField("source"))?,
            key: self.key,
            titles: self.titles,
            images: self.images,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ImageTheme;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn bbc_one() -> Channel {
        Channel::builder()
            .with_uri("http://www.bbc.co.uk/services/bbcone")
            .with_source(Publisher::Bbc)
            .with_title_between("BBC 1", None, Some(date(1997, 10, 4)))
            .with_title_between("BBC One", Some(date(1997, 10, 4)), None)
            .with_image_between(
                Image::new("old.png").with_theme(ImageTheme::LightOpaque),
                None,
                Some(date(2021, 1, 1)),
            )
            .with_image_between(
                Image::new("new.png").with_theme(ImageTheme::LightOpaque),
                Some(date(2021, 1, 1)),
                None,
            )
            .with_image(Image::new("dark.png").with_theme(ImageTheme::DarkTransparent))
            .build()
            .unwrap()
    }

    #[test]
    fn build_requires_uri_and_source() {
        let err = Channel::builder().with_source(Publisher::Bbc).build().unwrap_err();
        assert!(matches!(err, AtlasError::MissingField("uri")));
        let err = Channel::builder().with_uri("x").build().unwrap_err();
        assert!(matches!(err, AtlasError::MissingField("source")));
    }

    #[test]
    fn title_follows_reference_date() {
        let channel = bbc_one();
        assert_eq!(channel.title(date(1990, 1, 1)), Some("BBC 1"));
        assert_eq!(channel.title(date(2024, 1, 1)), Some("BBC One"));
        assert_eq!(channel.title_for_date(date(1997, 10, 4)), Some("BBC One"));
    }

    #[test]
    fn future_title_when_nothing_current() {
        let channel = Channel::builder()
            .with_uri("http://example.com/launching")
            .with_source(Publisher::Itv)
            .with_title_between("ITV Next", Some(date(2030, 1, 1)), None)
            .build()
            .unwrap();
        assert_eq!(channel.title(date(2025, 1, 1)), Some("ITV Next"));
        assert_eq!(channel.title_for_date(date(2025, 1, 1)), None);
    }

    #[test]
    fn image_only_considers_primary_images() {
        let channel = bbc_one();
        assert_eq!(channel.image(date(2020, 1, 1)).map(|i| i.uri.as_str()), Some("old.png"));
        assert_eq!(channel.image(date(2022, 1, 1)).map(|i| i.uri.as_str()), Some("new.png"));
        assert_eq!(channel.images(date(2022, 1, 1)).len(), 2);
        assert_eq!(channel.images_for_date(date(2020, 1, 1)).len(), 2);
    }

    #[test]
    fn mutating_titles() {
        let mut channel = bbc_one();
        channel.add_title("BBC One HD", Some(date(2030, 1, 1)), None);
        assert_eq!(channel.title(date(2031, 1, 1)), Some("BBC One HD"));

        channel.set_titles([TemporalField::always("One".to_string())]);
        assert_eq!(channel.all_titles().len(), 1);
        assert_eq!(channel.title(date(2031, 1, 1)), Some("One"));
    }

    #[test]
    fn copy_keeps_fields() {
        let channel = bbc_one();
        let copy = channel.copy().with_key("bbcone").build().unwrap();
        assert_eq!(copy.key(), Some("bbcone"));
        assert_eq!(copy.all_titles(), channel.all_titles());
        assert_eq!(copy.uri(), channel.uri());
    }
}
