//! Review submission form
//!
//! Validates what a customer typed before anything is sent. Validation
//! stops at the first problem and no payload is built for an invalid draft.

use crate::constants::{
    ACCEPTED_IMAGE_TYPES, MAX_REVIEW_IMAGE_BYTES, MAX_STAR_RATING, MIN_REVIEW_LENGTH,
};
use crate::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use std::path::Path;

/// An image attached to a review
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageAttachment {
    /// Validate size and type of raw image bytes
    pub fn from_bytes(mime_type: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let mime_type = mime_type.into();

        if bytes.len() > MAX_REVIEW_IMAGE_BYTES {
            return Err(Error::validation(
                "image",
                "Image size must be less than 5MB",
            ));
        }
        if !ACCEPTED_IMAGE_TYPES.contains(&mime_type.as_str()) {
            return Err(Error::validation(
                "image",
                "Only JPG and PNG images are allowed",
            ));
        }

        Ok(Self { mime_type, bytes })
    }

    /// Read an image file, inferring its type from the extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let mime_type = mime_type_for(path).ok_or_else(|| {
            Error::validation("image", "Only JPG and PNG images are allowed")
        })?;

        let bytes = std::fs::read(path)
            .map_err(|e| Error::io(format!("Failed to read image {}", path.display()), e))?;

        Self::from_bytes(mime_type, bytes)
    }

    /// `data:<mime>;base64,<payload>`
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

fn mime_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    match extension.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        _ => None,
    }
}

/// What the customer entered on the review form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewDraft {
    pub name: String,

    /// 0 means no star was picked
    pub rating: u8,

    pub body: String,
    pub image: Option<ImageAttachment>,
}

impl ReviewDraft {
    pub fn new(name: impl Into<String>, rating: u8, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rating,
            body: body.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.image = Some(image);
        self
    }

    /// Check the draft, reporting the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("name", "Please enter your name"));
        }

        if self.rating == 0 {
            return Err(Error::validation("rating", "Please select a rating"));
        }
        if self.rating > MAX_STAR_RATING {
            return Err(Error::validation(
                "rating",
                format!("Rating must be between 1 and {}", MAX_STAR_RATING),
            ));
        }

        let body = self.body.trim();
        if body.is_empty() {
            return Err(Error::validation("review", "Please enter your review"));
        }
        if body.chars().count() < MIN_REVIEW_LENGTH {
            return Err(Error::validation(
                "review",
                format!(
                    "Review must be at least {} characters long",
                    MIN_REVIEW_LENGTH
                ),
            ));
        }

        Ok(())
    }

    /// Validate and build the submission body, stamped with `submitted_at`
    pub fn to_payload(&self, submitted_at: DateTime<Utc>) -> Result<ReviewPayload> {
        self.validate()?;

        Ok(ReviewPayload {
            name: self.name.trim().to_string(),
            rating: self.rating,
            review: self.body.trim().to_string(),
            timestamp: submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            image: self.image.as_ref().map(ImageAttachment::data_url),
            image_type: self.image.as_ref().map(|image| image.mime_type.clone()),
        })
    }
}

/// JSON body posted to the review endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewPayload {
    pub name: String,
    pub rating: u8,
    pub review: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_type: Option<String>,
}
