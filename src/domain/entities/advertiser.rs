//! Advertiser entity.

use chrono::{DateTime, Utc};

/// An advertiser account that owns campaigns and receives statistics.
///
/// Deletion is soft: `deleted_at` is set and the record disappears from every
/// lookup, but statistics rows keep their foreign key.
#[derive(Debug, Clone, PartialEq)]
pub struct Advertiser {
    pub id: i64,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Advertiser {
    /// Returns true if the advertiser has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Input data for creating a new advertiser.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAdvertiser {
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub comments: Option<String>,
}

/// Partial update for an existing advertiser.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdvertiserPatch {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub comments: Option<String>,
}

impl AdvertiserPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.contact_name.is_none()
            && self.email.is_none()
            && self.comments.is_none()
    }

    /// Applies the patch in place.
    pub fn apply_to(self, advertiser: &mut Advertiser) {
        if let Some(name) = self.name {
            advertiser.name = name;
        }
        if let Some(contact_name) = self.contact_name {
            advertiser.contact_name = Some(contact_name);
        }
        if let Some(email) = self.email {
            advertiser.email = Some(email);
        }
        if let Some(comments) = self.comments {
            advertiser.comments = Some(comments);
        }
    }
}
