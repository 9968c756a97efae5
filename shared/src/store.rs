//! In-memory listing store
//!
//! Owns the canonical, insertion-ordered sequence of listings. Records are
//! only reachable by shared reference; every change goes through
//! [`ListingStore::create`], [`ListingStore::delete`],
//! [`ListingStore::approve`] or [`ListingStore::reject`].

use std::collections::HashSet;

use chrono::Utc;
use serde::Serialize;

use crate::error::{StoreError, ValidationError};
use crate::models::{
    Category, CategoryFilter, Listing, ListingId, ListingStatus, NewListingInput,
};
use crate::validation::{validate_listing, validate_new_listing};

/// Notification emitted after the store changed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChangeEvent {
    Created {
        listing: Listing,
    },
    Deleted {
        id: ListingId,
    },
    StatusChanged {
        id: ListingId,
        from: ListingStatus,
        to: ListingStatus,
    },
}

/// Handle returned by [`ListingStore::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(u64);

impl Subscription {
    pub fn id(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Subscription {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

type Subscriber = Box<dyn FnMut(&ChangeEvent)>;

/// Number of approved listings in one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: Category,
    pub count: usize,
}

/// All listings split by moderation state, each in insertion order
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdminPartition<'a> {
    pub pending: Vec<&'a Listing>,
    pub approved: Vec<&'a Listing>,
    pub rejected: Vec<&'a Listing>,
}

impl<'a> AdminPartition<'a> {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn by_status(&self, status: ListingStatus) -> &[&'a Listing] {
        match status {
            ListingStatus::Pending => &self.pending,
            ListingStatus::Approved => &self.approved,
            ListingStatus::Rejected => &self.rejected,
        }
    }

    pub fn total(&self) -> usize {
        self.pending.len() + self.approved.len() + self.rejected.len()
    }

    /// Approved listings counted per category, every category included
    pub fn approved_by_category(&self) -> Vec<CategoryCount> {
        Category::ALL
            .into_iter()
            .map(|category| CategoryCount {
                category,
                count: self
                    .approved
                    .iter()
                    .filter(|l| l.category == category)
                    .count(),
            })
            .collect()
    }
}

/// The directory's listing store
#[derive(Default)]
pub struct ListingStore {
    listings: Vec<Listing>,
    subscribers: Vec<(Subscription, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for ListingStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListingStore")
            .field("listings", &self.listings)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ListingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with existing records.
    ///
    /// Seed records keep their own id, status and creation time. Each one is
    /// validated and ids must be unique.
    pub fn with_seed(records: Vec<Listing>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            validate_listing(record)?;
            if !seen.insert(record.id.clone()) {
                return Err(StoreError::DuplicateId(record.id.to_string()));
            }
        }

        tracing::info!(count = records.len(), "Seeded listing store");
        Ok(Self {
            listings: records,
            ..Self::default()
        })
    }

    /// Create a store from a JSON array of records
    pub fn from_seed_json(json: &str) -> Result<Self, StoreError> {
        let records: Vec<Listing> = serde_json::from_str(json)?;
        Self::with_seed(records)
    }

    // ------------------------------------------------------------------
    // Mutators
    // ------------------------------------------------------------------

    /// Validate a submission and append it as a pending listing.
    ///
    /// On failure nothing is appended.
    pub fn create(&mut self, input: NewListingInput) -> Result<Listing, ValidationError> {
        let coordinates = validate_new_listing(&input).map_err(|err| {
            tracing::warn!(field = %err.field, "Rejected listing submission: {}", err.message);
            err
        })?;

        let listing = Listing {
            id: self.fresh_id(),
            name: input.name,
            category: input.category,
            description: input.description,
            address: input.address,
            coordinates,
            photos: input.photos,
            phone: input.phone,
            whatsapp: input.whatsapp,
            status: ListingStatus::Pending,
            created_at: Utc::now(),
        };

        tracing::info!(id = %listing.id, name = %listing.name, "Listing submitted for review");
        self.listings.push(listing.clone());
        self.notify(&ChangeEvent::Created {
            listing: listing.clone(),
        });

        Ok(listing)
    }

    /// Remove a listing in place. Returns `false` if the id is unknown.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(id, "Delete ignored, listing not found");
            return false;
        };

        let removed = self.listings.remove(index);
        tracing::info!(id, name = %removed.name, "Listing deleted");
        self.notify(&ChangeEvent::Deleted { id: removed.id });
        true
    }

    /// Mark a listing approved. Returns `false` if the id is unknown.
    pub fn approve(&mut self, id: &str) -> bool {
        self.set_status(id, ListingStatus::Approved)
    }

    /// Mark a listing rejected. Returns `false` if the id is unknown.
    pub fn reject(&mut self, id: &str) -> bool {
        self.set_status(id, ListingStatus::Rejected)
    }

    fn set_status(&mut self, id: &str, status: ListingStatus) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!(id, %status, "Status change ignored, listing not found");
            return false;
        };

        let listing = &mut self.listings[index];
        let previous = listing.status;
        if previous == status {
            return true;
        }
        listing.status = status;

        tracing::info!(id, from = %previous, to = %status, "Listing status changed");
        let event = ChangeEvent::StatusChanged {
            id: listing.id.clone(),
            from: previous,
            to: status,
        };
        self.notify(&event);
        true
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Approved listings whose name contains `search_text` (case-insensitive)
    /// and whose category passes `filter`, in insertion order
    pub fn public_query(&self, search_text: &str, filter: CategoryFilter) -> Vec<&Listing> {
        let needle = search_text.to_lowercase();
        let results: Vec<&Listing> = self
            .listings
            .iter()
            .filter(|l| l.status == ListingStatus::Approved)
            .filter(|l| filter.matches(l.category))
            .filter(|l| l.name.to_lowercase().contains(&needle))
            .collect();

        tracing::debug!(search = search_text, %filter, results = results.len(), "Public query");
        results
    }

    /// Every listing split by status
    pub fn admin_partition(&self) -> AdminPartition<'_> {
        let mut partition = AdminPartition::default();
        for listing in &self.listings {
            match listing.status {
                ListingStatus::Pending => partition.pending.push(listing),
                ListingStatus::Approved => partition.approved.push(listing),
                ListingStatus::Rejected => partition.rejected.push(listing),
            }
        }
        partition
    }

    /// Number of listings awaiting moderation
    pub fn pending_count(&self) -> usize {
        self.listings
            .iter()
            .filter(|l| l.status == ListingStatus::Pending)
            .count()
    }

    /// Look up any listing by id, regardless of status
    pub fn get(&self, id: &str) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id.as_str() == id)
    }

    /// Current ordered contents
    pub fn snapshot(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    // ------------------------------------------------------------------
    // Change notification
    // ------------------------------------------------------------------

    /// Register a callback invoked after every effective change
    pub fn subscribe<F>(&mut self, callback: F) -> Subscription
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        let subscription = Subscription(self.next_subscription);
        self.next_subscription += 1;
        let subscriber: Subscriber = Box::new(callback);
        self.subscribers.push((subscription, subscriber));
        subscription
    }

    /// Remove a callback. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != subscription);
        self.subscribers.len() != before
    }

    fn notify(&mut self, event: &ChangeEvent) {
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(event);
        }
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.listings.iter().position(|l| l.id.as_str() == id)
    }

    fn fresh_id(&self) -> ListingId {
        loop {
            let id = ListingId::generate();
            if self.position(id.as_str()).is_none() {
                return id;
            }
        }
    }
}
