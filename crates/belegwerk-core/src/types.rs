// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Belegwerk receipt workflow.

use std::ops::RangeInclusive;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::{BelegwerkError, Result};
use crate::payload::ImagePayload;

/// A point in image space: native pixel coordinates of the source photo.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

/// Number of vertices in every contour.
pub const CONTOUR_VERTICES: usize = 4;

/// A receipt outline: exactly four image-space points.
///
/// Winding order is whatever detection returned (normally top-left,
/// top-right, bottom-right, bottom-left) and is never re-sorted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contour([Point; CONTOUR_VERTICES]);

impl Contour {
    pub const fn new(points: [Point; CONTOUR_VERTICES]) -> Self {
        Self(points)
    }

    /// The four vertices in stored order.
    pub fn points(&self) -> &[Point; CONTOUR_VERTICES] {
        &self.0
    }

    /// Vertex `index`, or `None` when out of range.
    pub fn vertex(&self, index: usize) -> Option<Point> {
        self.0.get(index).copied()
    }

    /// Copy of this contour with vertex `index` replaced; the other three
    /// vertices are untouched. Out-of-range indices return `None`.
    pub fn with_vertex(&self, index: usize, point: Point) -> Option<Self> {
        if index >= CONTOUR_VERTICES {
            return None;
        }
        let mut points = self.0;
        points[index] = point;
        Some(Self(points))
    }

    /// Enclosed area in square pixels (shoelace formula, always >= 0).
    pub fn area(&self) -> f64 {
        let p = &self.0;
        let twice: f64 = (0..CONTOUR_VERTICES)
            .map(|i| {
                let a = p[i];
                let b = p[(i + 1) % CONTOUR_VERTICES];
                a.x * b.y - b.x * a.y
            })
            .sum();
        (twice / 2.0).abs()
    }

    /// Vertices as `[x, y]` pairs, the shape the image service speaks.
    pub fn to_pairs(&self) -> Vec<[f64; 2]> {
        self.0.iter().map(|&p| p.into()).collect()
    }
}

impl TryFrom<Vec<[f64; 2]>> for Contour {
    type Error = BelegwerkError;

    fn try_from(pairs: Vec<[f64; 2]>) -> Result<Self> {
        let len = pairs.len();
        let points: [[f64; 2]; CONTOUR_VERTICES] = pairs
            .try_into()
            .map_err(|_| BelegwerkError::InvalidContour(len))?;
        Ok(Self(points.map(Point::from)))
    }
}

/// One quadrilateral found by detection, with its pixel area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CandidateFields")]
pub struct ReceiptCandidate {
    pub contour: Contour,
    area: f64,
}

impl ReceiptCandidate {
    /// Negative (and NaN) areas are stored as zero.
    pub fn new(contour: Contour, area: f64) -> Self {
        Self {
            contour,
            area: area.max(0.0),
        }
    }

    /// Pixel area; never negative.
    pub fn area(&self) -> f64 {
        self.area
    }
}

// Deserialized candidates go through `new` so the area stays clamped.
#[derive(Deserialize)]
struct CandidateFields {
    contour: Contour,
    area: f64,
}

impl From<CandidateFields> for ReceiptCandidate {
    fn from(fields: CandidateFields) -> Self {
        Self::new(fields.contour, fields.area)
    }
}

/// Successful outcome of contour detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Non-empty, largest area first.
    pub candidates: Vec<ReceiptCandidate>,
    /// Source photo annotated with every detected outline.
    pub preview: ImagePayload,
}

/// Tonal adjustments sent along with the chosen contour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustments {
    pub brightness: i32,
    pub contrast: f64,
    pub denoise: bool,
}

impl Adjustments {
    pub const BRIGHTNESS: RangeInclusive<i32> = -50..=50;
    pub const CONTRAST: RangeInclusive<f64> = 0.5..=2.0;
    /// Increment used by the contrast slider.
    pub const CONTRAST_STEP: f64 = 0.1;

    /// Build a validated set of adjustments.
    pub fn new(brightness: i32, contrast: f64, denoise: bool) -> Result<Self> {
        let adjustments = Self {
            brightness,
            contrast,
            denoise,
        };
        adjustments.validate()?;
        Ok(adjustments)
    }

    /// Check both values lie within their allowed ranges.
    pub fn validate(&self) -> Result<()> {
        if !Self::BRIGHTNESS.contains(&self.brightness) {
            return Err(BelegwerkError::InvalidAdjustment(format!(
                "brightness {} outside {}..={}",
                self.brightness,
                Self::BRIGHTNESS.start(),
                Self::BRIGHTNESS.end()
            )));
        }
        if !Self::CONTRAST.contains(&self.contrast) {
            return Err(BelegwerkError::InvalidAdjustment(format!(
                "contrast {} outside {}..={}",
                self.contrast,
                Self::CONTRAST.start(),
                Self::CONTRAST.end()
            )));
        }
        Ok(())
    }
}

impl Default for Adjustments {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 1.0,
            denoise: false,
        }
    }
}

/// What the storage service reported after a successful upload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub file_id: Option<String>,
    /// Browser link to the stored file.
    pub link: Option<String>,
}

/// Suggested upload name, e.g. `receipt_20240101_1234.jpg`.
pub fn suggested_filename<Tz: TimeZone>(prefix: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}_{}.jpg", now.format("%Y%m%d_%H%M"))
}

/// Trim a user-entered filename, rejecting blank input.
pub fn validate_filename(filename: &str) -> Result<&str> {
    let trimmed = filename.trim();
    if trimmed.is_empty() {
        Err(BelegwerkError::EmptyFilename)
    } else {
        Ok(trimmed)
    }
}
